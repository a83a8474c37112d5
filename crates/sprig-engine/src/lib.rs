//! sprig engine crate.
//!
//! Platform and GPU runtime for the toolkit: window loop, input translation,
//! timing, the coordinate model, drawables, the draw list and its renderers.

pub mod coords;
pub mod core;
pub mod device;
pub mod draw;
pub mod drawable;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod text;
pub mod time;
pub mod window;

mod error;

pub use error::{Error, Result};
