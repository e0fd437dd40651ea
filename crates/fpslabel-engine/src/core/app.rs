use crate::coords::Vec2;
use crate::input::InputEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by hosts of the runtime.
pub trait App {
    /// Called for each translated input event, before the next frame.
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called when the window's logical size changes.
    fn on_resize(&mut self, size: Vec2) {
        let _ = size;
    }

    /// Called once per paced frame, after the display link has fired.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
