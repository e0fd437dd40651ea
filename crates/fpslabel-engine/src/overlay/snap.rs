use crate::coords::{Rect, Vec2};

use super::OverlayConfig;

/// Where a released label comes to rest.
///
/// The label snaps to whichever side of the screen its origin is on, inset by
/// `h_padding`, and its origin is kept between `top_padding` and
/// `screen.y - bottom_padding` (the bottom bound wins when they cross).
pub fn rest_position(frame: Rect, screen: Vec2, config: &OverlayConfig) -> Vec2 {
    let x = if frame.origin.x - screen.x / 2.0 > 0.0 {
        screen.x - frame.size.x - config.h_padding
    } else {
        config.h_padding
    };
    let y = frame
        .origin
        .y
        .max(config.top_padding)
        .min(screen.y - config.bottom_padding);
    Vec2::new(x, y)
}

/// Timed move of the label origin, driven by clock timestamps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct SnapAnimation {
    from: Vec2,
    to: Vec2,
    duration: f64,
    /// Set by the first sample; input events carry no timestamp.
    start: Option<f64>,
}

impl SnapAnimation {
    pub(crate) fn new(from: Vec2, to: Vec2, duration: f64) -> Self {
        Self { from, to, duration, start: None }
    }

    #[inline]
    pub(crate) fn target(&self) -> Vec2 {
        self.to
    }

    /// Position at `now` and whether the animation has finished.
    pub(crate) fn sample(&mut self, now: f64) -> (Vec2, bool) {
        if self.duration <= 0.0 {
            return (self.to, true);
        }
        let start = *self.start.get_or_insert(now);
        let t = ((now - start) / self.duration).clamp(0.0, 1.0);
        if t >= 1.0 {
            return (self.to, true);
        }
        (self.from.lerp(self.to, ease_in_out(t as f32)), false)
    }
}

#[inline]
fn ease_in_out(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}
