//! Maps frame-rate readings to label text, colors and fonts.
//!
//! The label reads `"<n> FPS"`. The number is tinted along a hue gradient
//! (red when slow, green around the reference rate); the unit suffix is
//! always white. One character, at `len - 4`, uses the smaller accent font.

mod payload;

pub use payload::DisplayPayload;

use crate::paint::{normalize_hue, Color};
use crate::text::FontRef;
use crate::time::FpsReading;

/// Unit appended to every label.
pub const UNIT_SUFFIX: &str = "FPS";

/// Frame rate that maps to `progress = 1.0`.
pub const REFERENCE_FPS: f64 = 60.0;

const HUE_SCALE: f64 = 0.27;
const HUE_OFFSET: f64 = 0.2;
const SATURATION: f32 = 1.0;
const BRIGHTNESS: f32 = 0.9;

/// Raw gradient hue for a frame rate, before wraparound.
#[inline]
pub fn gradient_hue(fps: f64, reference_fps: f64) -> f64 {
    let progress = fps / reference_fps;
    HUE_SCALE * (progress - HUE_OFFSET)
}

/// Presentation mapper. Pure: the same reading always yields the same payload.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Presenter {
    reference_fps: f64,
    main_font: FontRef,
    sub_font: FontRef,
}

impl Presenter {
    pub fn new(main_font: FontRef, sub_font: FontRef) -> Self {
        Self::with_reference(REFERENCE_FPS, main_font, sub_font)
    }

    pub fn with_reference(reference_fps: f64, main_font: FontRef, sub_font: FontRef) -> Self {
        debug_assert!(reference_fps > 0.0);
        Self { reference_fps, main_font, sub_font }
    }

    pub fn present(&self, reading: &FpsReading) -> DisplayPayload {
        let hue = normalize_hue(gradient_hue(reading.value, self.reference_fps) as f32);
        let primary_color = Color::from_hsva(hue, SATURATION, BRIGHTNESS, 1.0);

        let rounded = reading.value.round().max(0.0) as u64;
        let text = format!("{rounded} {UNIT_SUFFIX}");

        DisplayPayload {
            text,
            hue,
            primary_color,
            accent_color: Color::WHITE,
            primary_font: self.main_font,
            accent_font: self.sub_font,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn presenter() -> Presenter {
        Presenter::new(FontRef::system(14.0), FontRef::system(4.0))
    }

    fn reading(value: f64) -> FpsReading {
        FpsReading { value, timestamp: 1.0 }
    }

    #[test]
    fn sixty_fps_label() {
        let p = presenter().present(&reading(60.0));
        assert_eq!(p.text, "60 FPS");
        assert!((p.hue - 0.216).abs() < 1e-6, "{}", p.hue);
        assert_eq!(p.primary_color, Color::from_hsva(0.216, 1.0, 0.9, 1.0));
        assert_eq!(p.accent_color, Color::WHITE);
    }

    #[test]
    fn value_is_rounded() {
        assert_eq!(presenter().present(&reading(59.5)).text, "60 FPS");
        assert_eq!(presenter().present(&reading(59.49)).text, "59 FPS");
        assert_eq!(presenter().present(&reading(119.7)).text, "120 FPS");
        assert_eq!(presenter().present(&reading(0.2)).text, "0 FPS");
    }

    #[test]
    fn zero_fps_hue_wraps() {
        assert!((gradient_hue(0.0, REFERENCE_FPS) + 0.054).abs() < 1e-12);
        let p = presenter().present(&reading(0.0));
        assert!((p.hue - 0.946).abs() < 1e-6, "{}", p.hue);
    }

    #[test]
    fn slow_is_redder_than_fast() {
        let slow = presenter().present(&reading(15.0)).primary_color.to_straight();
        let fast = presenter().present(&reading(60.0)).primary_color.to_straight();
        assert!(slow.0 > fast.0);
        assert!(slow.1 < fast.1);
    }

    #[test]
    fn present_is_pure() {
        let p = presenter();
        let r = reading(47.3);
        assert_eq!(p.present(&r), p.present(&r));
    }

    #[test]
    fn custom_reference_rate() {
        let p = Presenter::with_reference(120.0, FontRef::system(14.0), FontRef::system(4.0));
        let at_ref = p.present(&reading(120.0));
        assert!((at_ref.hue - 0.216).abs() < 1e-6);
    }
}
