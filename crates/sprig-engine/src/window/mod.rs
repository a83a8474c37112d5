//! Window and runtime loop.
//!
//! Owns the `winit` event loop and window and wires them to the GPU layer.

mod cursor;
mod runtime;

pub use cursor::CursorImage;
pub use runtime::{Runtime, RuntimeConfig};
