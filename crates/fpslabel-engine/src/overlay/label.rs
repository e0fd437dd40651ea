use crate::coords::{Rect, Vec2};
use crate::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};
use crate::present::{DisplayPayload, Presenter};
use crate::text::FontSystem;
use crate::time::{FpsReading, RateEstimator};

use super::snap::{rest_position, SnapAnimation};
use super::OverlayConfig;

/// State of the on-screen frame-rate label.
///
/// Owns the measurement pipeline (estimator and presenter), the fonts it
/// measures with, and the label's placement. The host renders [`payload`]
/// inside [`frame`] and forwards pointer input to [`handle_input`].
///
/// [`payload`]: Self::payload
/// [`frame`]: Self::frame
/// [`handle_input`]: Self::handle_input
pub struct FpsLabel {
    estimator: RateEstimator,
    presenter: Presenter,
    fonts: FontSystem,
    config: OverlayConfig,

    screen: Vec2,
    frame: Rect,
    payload: Option<DisplayPayload>,
    last_reading: Option<FpsReading>,

    /// Last pointer position while a drag is in progress.
    drag: Option<Vec2>,
    snap: Option<SnapAnimation>,
}

impl FpsLabel {
    /// Creates a label resting at the top-left padding corner that resolves
    /// its fonts from `fonts`.
    pub fn with_fonts(config: OverlayConfig, screen: Vec2, mut fonts: FontSystem) -> Self {
        let main_font = fonts.resolve(config.font_families.as_slice(), config.main_font_size);
        let sub_font = fonts.resolve(config.font_families.as_slice(), config.sub_font_size);
        let presenter = Presenter::with_reference(config.reference_fps, main_font, sub_font);

        Self {
            estimator: RateEstimator::with_interval(config.report_interval),
            presenter,
            fonts,
            screen,
            frame: Rect::from_origin_size(
                Vec2::new(config.h_padding, config.top_padding),
                config.label_size,
            ),
            payload: None,
            last_reading: None,
            drag: None,
            snap: None,
            config,
        }
    }

    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Latest label content; `None` until the first reporting window closes.
    #[inline]
    pub fn payload(&self) -> Option<&DisplayPayload> {
        self.payload.as_ref()
    }

    #[inline]
    pub fn last_reading(&self) -> Option<FpsReading> {
        self.last_reading
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }

    /// Gives back the font system so a later label can reuse it.
    pub(crate) fn into_fonts(self) -> FontSystem {
        self.fonts
    }

    /// Clock callback. Returns `true` when a new reading was presented.
    pub fn tick(&mut self, timestamp: f64) -> bool {
        let emitted = match self.estimator.on_frame_tick(timestamp) {
            Some(reading) => {
                self.apply_reading(reading);
                true
            }
            None => false,
        };

        if let Some(anim) = self.snap.as_mut() {
            let (origin, done) = anim.sample(timestamp);
            self.frame = self.frame.with_origin(origin);
            if done {
                self.snap = None;
            }
        }

        emitted
    }

    fn apply_reading(&mut self, reading: FpsReading) {
        let payload = self.presenter.present(&reading);
        log::debug!("fps {:.2} -> {:?} (hue {:.3})", reading.value, payload.text, payload.hue);

        let size = self.fit_size(&payload);
        self.last_reading = Some(reading);
        self.payload = Some(payload);

        if size != self.frame.size {
            self.frame = self.frame.with_size(size);
            if !self.is_dragging() {
                self.settle();
            }
        }
    }

    /// Label size that fits `payload`, never below the configured minimum.
    fn fit_size(&self, payload: &DisplayPayload) -> Vec2 {
        let mut w = 0.0f32;
        let mut h = 0.0f32;
        for (range, font) in payload.font_runs() {
            if range.is_empty() {
                continue;
            }
            let run = self.fonts.measure_text(&payload.text[range], font);
            w += run.x;
            h = h.max(run.y);
        }
        Vec2::new(
            (w + 2.0 * self.config.text_inset).max(self.config.label_size.x),
            h.max(self.config.label_size.y),
        )
    }

    /// Updates the bounds used for snapping and moves the label back inside them.
    pub fn set_screen_size(&mut self, screen: Vec2) {
        if self.screen == screen {
            return;
        }
        self.screen = screen;
        if !self.is_dragging() {
            self.settle();
        }
    }

    /// Starts a snap toward the rest position if the label is not already there.
    fn settle(&mut self) {
        let to = rest_position(self.frame, self.screen, &self.config);
        let already = match &self.snap {
            Some(anim) => anim.target() == to,
            None => self.frame.origin == to,
        };
        if !already {
            self.snap = Some(SnapAnimation::new(self.frame.origin, to, self.config.snap_duration));
        }
    }

    /// Drag-to-reposition. Returns `true` when the event was consumed.
    pub fn handle_input(&mut self, ev: &InputEvent) -> bool {
        match ev {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                pos,
            }) if self.frame.contains(*pos) => {
                self.drag = Some(*pos);
                self.snap = None;
                true
            }

            InputEvent::PointerMoved(PointerMoveEvent { pos }) => match self.drag {
                Some(last) => {
                    self.frame = self.frame.translated(*pos - last);
                    self.drag = Some(*pos);
                    true
                }
                None => false,
            },

            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Released,
                pos,
            }) if self.is_dragging() => {
                if let Some(last) = self.drag.take() {
                    self.frame = self.frame.translated(*pos - last);
                }
                self.settle();
                true
            }

            InputEvent::PointerLeft | InputEvent::Focused(false) if self.is_dragging() => {
                self.drag = None;
                self.settle();
                false
            }

            _ => false,
        }
    }
}

impl std::fmt::Debug for FpsLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FpsLabel")
            .field("frame", &self.frame)
            .field("screen", &self.screen)
            .field("payload", &self.payload)
            .field("dragging", &self.is_dragging())
            .field("snapping", &self.is_snapping())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    const SCREEN: Vec2 = Vec2::new(400.0, 800.0);

    fn config() -> OverlayConfig {
        OverlayConfig {
            enabled: true,
            load_system_fonts: false,
            ..OverlayConfig::default()
        }
    }

    fn label() -> FpsLabel {
        FpsLabel::with_fonts(config(), SCREEN, FontSystem::new())
    }

    fn run_at(label: &mut FpsLabel, hz: f64, from: f64, count: usize) -> usize {
        (0..count)
            .filter(|i| label.tick(from + *i as f64 / hz))
            .count()
    }

    fn press(x: f32, y: f32) -> InputEvent {
        InputEvent::button(MouseButton::Left, MouseButtonState::Pressed, x, y)
    }

    fn release(x: f32, y: f32) -> InputEvent {
        InputEvent::button(MouseButton::Left, MouseButtonState::Released, x, y)
    }

    #[test]
    fn starts_at_top_left_padding() {
        let l = label();
        assert_eq!(l.frame(), Rect::new(20.0, 88.0, 60.0, 20.0));
        assert!(l.payload().is_none());
    }

    #[test]
    fn one_second_at_sixty_hz_presents_sixty() {
        let mut l = label();
        assert_eq!(run_at(&mut l, 60.0, 0.0, 61), 1);

        let p = l.payload().unwrap();
        assert_eq!(p.text, "60 FPS");
        assert!((p.hue - 0.216).abs() < 1e-6);
        assert_eq!(p.color_runs()[1].1, Color::WHITE);
        assert_eq!(l.frame().size, Vec2::new(60.0, 20.0));
        assert!((l.last_reading().unwrap().value - 60.0).abs() < 1e-9);
    }

    #[test]
    fn wide_text_grows_label() {
        let mut l = label();
        run_at(&mut l, 120.0, 0.0, 121);
        assert_eq!(l.payload().unwrap().text, "120 FPS");
        // 6 main-font chars at 8.4px, one accent-font space at 2.4px, plus insets.
        assert!((l.frame().size.x - 64.8).abs() < 1e-3, "{}", l.frame().size.x);
        // Growing at the left edge keeps the label where it is.
        assert_eq!(l.frame().origin, Vec2::new(20.0, 88.0));
        assert!(!l.is_snapping());
    }

    #[test]
    fn drag_moves_and_release_snaps() {
        let mut l = label();

        assert!(l.handle_input(&press(30.0, 95.0)));
        assert!(l.is_dragging());
        assert!(l.handle_input(&InputEvent::pointer_moved(341.0, 395.0)));
        assert_eq!(l.frame().origin, Vec2::new(331.0, 388.0));

        assert!(l.handle_input(&release(341.0, 395.0)));
        assert!(!l.is_dragging());
        assert!(l.is_snapping());

        l.tick(10.0);
        l.tick(10.5);
        assert!(!l.is_snapping());
        assert_eq!(l.frame().origin, Vec2::new(320.0, 388.0));
    }

    #[test]
    fn release_on_left_half_snaps_left_and_clamps() {
        let mut l = label();
        l.handle_input(&press(25.0, 90.0));
        l.handle_input(&InputEvent::pointer_moved(105.0, 10.0));
        l.handle_input(&release(105.0, 10.0));

        l.tick(1.0);
        l.tick(2.0);
        assert_eq!(l.frame().origin, Vec2::new(20.0, 88.0));
    }

    #[test]
    fn press_outside_is_ignored() {
        let mut l = label();
        assert!(!l.handle_input(&press(300.0, 300.0)));
        assert!(!l.handle_input(&InputEvent::pointer_moved(310.0, 310.0)));
        assert_eq!(l.frame().origin, Vec2::new(20.0, 88.0));
    }

    #[test]
    fn other_buttons_do_not_drag() {
        let mut l = label();
        let right = InputEvent::button(MouseButton::Right, MouseButtonState::Pressed, 30.0, 95.0);
        assert!(!l.handle_input(&right));
        assert!(!l.is_dragging());
    }

    #[test]
    fn focus_loss_ends_drag() {
        let mut l = label();
        l.handle_input(&press(30.0, 95.0));
        l.handle_input(&InputEvent::pointer_moved(40.0, 500.0));
        l.handle_input(&InputEvent::Focused(false));
        assert!(!l.is_dragging());
        // Origin (30, 493) rests on the left padding.
        l.tick(0.0);
        l.tick(1.0);
        assert_eq!(l.frame().origin, Vec2::new(20.0, 493.0));
    }

    #[test]
    fn shrinking_screen_pulls_label_back() {
        let mut l = label();
        l.handle_input(&press(30.0, 95.0));
        l.handle_input(&InputEvent::pointer_moved(30.0, 695.0));
        l.handle_input(&release(30.0, 695.0));
        l.tick(0.0);
        l.tick(1.0);
        assert_eq!(l.frame().origin.y, 688.0);

        l.set_screen_size(Vec2::new(400.0, 500.0));
        l.tick(2.0);
        l.tick(3.0);
        assert_eq!(l.frame().origin.y, 422.0);
    }

    #[test]
    fn snap_is_animated() {
        let mut l = label();
        l.handle_input(&press(30.0, 95.0));
        l.handle_input(&InputEvent::pointer_moved(130.0, 95.0));
        l.handle_input(&release(130.0, 95.0));

        l.tick(0.0);
        assert_eq!(l.frame().origin.x, 120.0);
        l.tick(0.15);
        assert!((l.frame().origin.x - 70.0).abs() < 1e-3);
        l.tick(0.3);
        assert_eq!(l.frame().origin.x, 20.0);
    }
}
