use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::input::{InputEvent, InputState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
use crate::time::{DisplayLink, FrameClock};

/// Refresh rates the runtime will pace frames at, in Hz.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameRateRange {
    pub min: f64,
    pub max: f64,
}

impl FrameRateRange {
    /// Clamps a monitor-reported refresh rate into the range.
    pub fn pick(self, monitor_hz: Option<f64>) -> f64 {
        let hz = monitor_hz.filter(|hz| hz.is_finite() && *hz > 0.0).unwrap_or(60.0);
        hz.clamp(self.min, self.max)
    }
}

impl Default for FrameRateRange {
    fn default() -> Self {
        Self { min: 30.0, max: 120.0 }
    }
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub frame_rate: FrameRateRange,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "fpslabel".to_string(),
            initial_size: LogicalSize::new(480.0, 800.0),
            frame_rate: FrameRateRange::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits or the window closes.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct WindowEntry {
    window: Window,
    input: InputState,
    clock: FrameClock,
    display_link: DisplayLink,

    frame_interval: Duration,
    next_frame: Instant,
    redraw_pending: bool,
}

impl WindowEntry {
    /// Schedules the next frame one interval after the current one, without
    /// bursting to catch up after a stall.
    fn advance_schedule(&mut self, now: Instant) {
        self.next_frame += self.frame_interval;
        if self.next_frame < now {
            self.next_frame = now + self.frame_interval;
        }
    }
}

struct AppState<A: App> {
    config: RuntimeConfig,
    app: A,
    window: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            window: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let monitor_hz = window
            .current_monitor()
            .and_then(|m| m.refresh_rate_millihertz())
            .map(|mhz| f64::from(mhz) / 1000.0);
        let hz = self.config.frame_rate.pick(monitor_hz);
        log::info!("pacing frames at {hz:.1} Hz (monitor reports {monitor_hz:?})");

        let size = logical_size(&window);
        self.window = Some(WindowEntry {
            window,
            input: InputState::default(),
            clock: FrameClock::default(),
            display_link: DisplayLink::new(),
            frame_interval: Duration::from_secs_f64(1.0 / hz),
            next_frame: Instant::now(),
            redraw_pending: false,
        });
        self.app.on_resize(size);
        Ok(())
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };
        entry.redraw_pending = false;

        let ft = entry.clock.tick();
        entry.advance_schedule(ft.now);
        entry.display_link.fire(ft.timestamp);

        let mut ctx = FrameCtx {
            window: WindowCtx { window: &entry.window },
            input: &entry.input,
            time: ft,
            display_link: &entry.display_link,
        };

        if self.app.on_frame(&mut ctx) == AppControl::Exit {
            self.request_exit(event_loop);
        }
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            log::error!("failed to create window: {e:#}");
            self.request_exit(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        // Emulate a display link: one redraw per refresh interval.
        if !entry.redraw_pending && Instant::now() >= entry.next_frame {
            entry.redraw_pending = true;
            entry.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(entry.next_frame));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        if let Some(ev) = translate_input_event(&entry.window, &entry.input, &event) {
            entry.input.apply_event(&ev);
            if self.app.on_input(&ev) == AppControl::Exit {
                self.request_exit(event_loop);
                return;
            }
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                let size = logical_size(&entry.window);
                self.app.on_resize(size);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn logical_size(window: &Window) -> Vec2 {
    WindowCtx { window }.logical_size()
}

fn translate_input_event(window: &Window, state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(PointerMoveEvent {
            pos: to_logical(window, *position),
        })),

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: st,
                pos: state.pointer_pos.unwrap_or_default(),
            }))
        }

        _ => None,
    }
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_rate_is_clamped_to_range() {
        let range = FrameRateRange::default();
        assert_eq!(range.pick(Some(144.0)), 120.0);
        assert_eq!(range.pick(Some(24.0)), 30.0);
        assert_eq!(range.pick(Some(75.0)), 75.0);
    }

    #[test]
    fn unknown_refresh_rate_defaults_to_sixty() {
        let range = FrameRateRange::default();
        assert_eq!(range.pick(None), 60.0);
        assert_eq!(range.pick(Some(0.0)), 60.0);
        assert_eq!(range.pick(Some(f64::NAN)), 60.0);
    }
}
