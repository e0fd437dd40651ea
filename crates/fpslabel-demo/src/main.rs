use anyhow::Result;

use fpslabel_engine::coords::Vec2;
use fpslabel_engine::core::{App, AppControl, FrameCtx};
use fpslabel_engine::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent};
use fpslabel_engine::logging::{init_logging, LoggingConfig};
use fpslabel_engine::overlay::{OverlayConfig, OverlayShell};
use fpslabel_engine::window::{Runtime, RuntimeConfig};

const TITLE: &str = "fpslabel demo";

/// Hosts the overlay in a plain window.
///
/// There is no renderer here: the label text goes to the window title and the
/// label geometry to the log. Drag inside the label's frame (top-left by
/// default) to move it; right click toggles the overlay.
struct Demo {
    shell: OverlayShell,
    screen: Vec2,
    toggle_requested: bool,
    last_text: Option<String>,
}

impl Demo {
    fn new() -> Self {
        Self {
            shell: OverlayShell::new(OverlayConfig {
                enabled: true,
                ..OverlayConfig::default()
            }),
            screen: Vec2::zero(),
            toggle_requested: false,
            last_text: None,
        }
    }
}

impl App for Demo {
    fn on_input(&mut self, event: &InputEvent) -> AppControl {
        if self.shell.handle_input(event) {
            return AppControl::Continue;
        }

        if let InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            ..
        }) = event
        {
            self.toggle_requested = true;
        }
        AppControl::Continue
    }

    fn on_resize(&mut self, size: Vec2) {
        self.screen = size;
        self.shell.set_screen_size(size);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        // First frame installs; later right clicks toggle.
        if ctx.time.frame_index == 0 || self.toggle_requested {
            self.toggle_requested = false;
            if !self.shell.uninstall() && self.shell.install(ctx.display_link, self.screen) {
                let cfg = self.shell.config();
                log::info!(
                    "label style: background {:?}, corner radius {}, text {:?}",
                    cfg.background.to_straight(),
                    cfg.corner_radius,
                    cfg.text_align
                );
            }
        }

        let text = self.shell.payload().map(|p| p.text);
        if text != self.last_text {
            match (&text, self.shell.frame()) {
                (Some(t), Some(frame)) => {
                    ctx.window.set_title(&format!("{TITLE} - {t}"));
                    log::info!("{t} at ({:.0}, {:.0}) {:.0}x{:.0}",
                        frame.origin.x, frame.origin.y, frame.size.x, frame.size.y);
                }
                _ => ctx.window.set_title(TITLE),
            }
            self.last_text = text;
        }

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    let logging = if std::env::args().any(|a| a == "--verbose") {
        LoggingConfig::verbose()
    } else {
        LoggingConfig::default()
    };
    init_logging(logging);

    let config = RuntimeConfig {
        title: TITLE.to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(config, Demo::new())
}
