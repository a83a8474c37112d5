use thiserror::Error;

/// Errors raised while building sprites, layouts and resources.
///
/// Dispatch, update and render never fail; everything here happens at
/// construction or load time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] sprig_engine::Error),

    /// A sprite sheet does not split evenly into the requested frames.
    #[error("cannot divide texture of {axis} {extent} into {frame_count} parts")]
    Division {
        extent: u32,
        /// `"width"` or `"height"`.
        axis: &'static str,
        frame_count: u32,
    },

    #[error("unknown sprite layout: {0:?}")]
    UnknownLayout(String),

    #[error("sprite has no frames")]
    EmptySprite,

    #[error("invalid frame rate: {0}")]
    InvalidFps(f32),

    #[error("invalid frame duration: {0}")]
    InvalidDuration(f32),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
