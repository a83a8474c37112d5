use super::shapes::rect::RectCmd;
use super::shapes::sprite::SpriteCmd;

/// Renderer-agnostic draw command stream.
///
/// Each variant has a push helper in `draw::shapes::*` and a matching
/// renderer under `render::shapes::*`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    Sprite(SpriteCmd),
}

/// Which renderer a [`DrawCmd`] belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawKind {
    Rect,
    Sprite,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Rect(_) => DrawKind::Rect,
            DrawCmd::Sprite(_) => DrawKind::Sprite,
        }
    }
}
