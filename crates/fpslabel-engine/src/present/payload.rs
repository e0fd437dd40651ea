use std::ops::Range;

use crate::paint::Color;
use crate::text::FontRef;

use super::UNIT_SUFFIX;

/// Display-ready label content for one reading.
///
/// `text` is ASCII, so the byte ranges returned by the run accessors are also
/// character ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayPayload {
    pub text: String,

    /// Gradient hue in turns, already wrapped into `[0, 1)`.
    pub hue: f32,

    /// Color of the numeric prefix.
    pub primary_color: Color,

    /// Color of the unit suffix.
    pub accent_color: Color,

    pub primary_font: FontRef,
    pub accent_font: FontRef,
}

impl DisplayPayload {
    /// Number of characters at the end of `text` drawn in the accent color.
    pub const SUFFIX_LEN: usize = UNIT_SUFFIX.len();

    #[inline]
    fn suffix_start(&self) -> usize {
        self.text.len().saturating_sub(Self::SUFFIX_LEN)
    }

    /// Color runs covering the whole text: gradient prefix, white suffix.
    pub fn color_runs(&self) -> [(Range<usize>, Color); 2] {
        let split = self.suffix_start();
        [
            (0..split, self.primary_color),
            (split..self.text.len(), self.accent_color),
        ]
    }

    /// Index of the single character drawn with the accent font.
    #[inline]
    pub fn accent_font_index(&self) -> usize {
        self.text.len().saturating_sub(Self::SUFFIX_LEN + 1)
    }

    /// Font runs covering the whole text. Empty ranges are kept so the shape
    /// is fixed: main font, one accent-font character, main font.
    pub fn font_runs(&self) -> [(Range<usize>, FontRef); 3] {
        let at = self.accent_font_index();
        let end = self.text.len();
        let next = (at + 1).min(end);
        [
            (0..at, self.primary_font),
            (at..next, self.accent_font),
            (next..end, self.primary_font),
        ]
    }
}
