//! GPU rendering subsystem.
//!
//! Renderers consume `draw` streams and issue GPU commands via wgpu.
//! Each renderer owns its GPU resources (pipelines, buffers, textures).
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.
//!
//! [`ShapeRenderer`](shapes::ShapeRenderer) interleaves the per-shape
//! renderers so z ordering holds across shape kinds.

mod ctx;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
