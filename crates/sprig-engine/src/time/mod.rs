//! Time subsystem.
//!
//! - [`FrameClock`]: variable delta per presented frame.
//! - [`FixedStep`]: whole simulation steps at a fixed rate.

mod fixed_step;
mod frame_clock;

pub use fixed_step::FixedStep;
pub use frame_clock::{FrameClock, FrameTime};
