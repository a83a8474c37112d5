use thiserror::Error;

/// Errors raised by the engine's boundary operations.
///
/// The per-frame paths (input translation, draw recording, rendering) do not
/// fail; everything here happens while constructing values or loading assets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A value was rejected while validating user input.
    #[error("invalid {what}: {value}")]
    InvalidArgument {
        /// What was being constructed (e.g. "pixel length").
        what: &'static str,
        /// The offending input, as text.
        value: String,
    },

    /// An image could not be read or decoded into a drawable.
    #[error("failed to load drawable from {origin}: {message}")]
    Load {
        /// Path or description of the byte source.
        origin: String,
        /// Diagnostic text reported by the decoder.
        message: String,
    },

    /// A font could not be parsed or rasterized.
    #[error("font error: {0}")]
    Font(String),
}

impl Error {
    pub(crate) fn invalid(what: &'static str, value: impl ToString) -> Self {
        Error::InvalidArgument { what, value: value.to_string() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
