//! GPU device and surface management.
//!
//! Creates the wgpu instance, adapter, device and queue for one window,
//! keeps the surface configured across resizes, and hands out frames.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
