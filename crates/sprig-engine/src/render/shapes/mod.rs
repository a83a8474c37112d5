//! Shape renderers.

mod common;
mod ordered;

pub mod rect;
pub mod sprite;

pub use ordered::ShapeRenderer;
