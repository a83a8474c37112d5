use crate::input::{InputEvent, InputState};
use crate::window::CursorImage;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called for every translated input event, in arrival order.
    ///
    /// `input` already reflects `event`.
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        let _ = (event, input);
        AppControl::Continue
    }

    /// Called once per redraw.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Earliest instant the app needs another frame. `None` redraws continuously.
    fn next_frame_at(&self) -> Option<std::time::Instant> {
        None
    }

    /// A new cursor to show over the window, if any.
    ///
    /// Polled once per event-loop iteration; returning `None` keeps the
    /// current cursor.
    fn take_cursor(&mut self) -> Option<CursorImage> {
        None
    }
}
