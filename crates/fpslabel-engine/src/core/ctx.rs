use winit::window::Window;

use crate::coords::Vec2;
use crate::input::InputState;
use crate::time::{DisplayLink, FrameTime};

/// Window handle plus derived metadata.
pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Returns the logical window size in logical pixels.
    pub fn logical_size(&self) -> Vec2 {
        let phys = self.window.inner_size();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(self.window.scale_factor());
        Vec2::new(logi.width as f32, logi.height as f32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }
}

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub window: WindowCtx<'a>,
    pub input: &'a InputState,
    pub time: FrameTime,

    /// Clock source fired with `time.timestamp` just before this callback.
    pub display_link: &'a DisplayLink,
}
