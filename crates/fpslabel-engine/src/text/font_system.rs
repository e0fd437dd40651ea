use std::collections::HashMap;
use std::fmt;

use crate::coords::Vec2;

/// Error returned by [`FontSystem::load_font`] and [`FontSystem::load_family`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Which face a [`FontRef`] points at.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FontFace {
    /// A face parsed and owned by the `FontSystem`.
    Loaded(FontId),
    /// The host's default UI font. Always available.
    System,
}

/// A resolved font at a given size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontRef {
    pub face: FontFace,
    pub size: f32,
}

impl FontRef {
    #[inline]
    pub const fn system(size: f32) -> Self {
        Self { face: FontFace::System, size }
    }
}

/// Font database plus the faces parsed out of it.
///
/// Family lookups go through a `fontdb::Database`; parsed faces are kept as
/// `fontdue::Font` for measurement. Family lookups are cached, misses included,
/// so resolving the same chain twice does not query the database again.
pub struct FontSystem {
    db: fontdb::Database,
    fonts: Vec<fontdue::Font>,
    by_family: HashMap<String, Option<FontId>>,
}

impl FontSystem {
    /// Creates an empty system. Only the generic system face resolves.
    pub fn new() -> Self {
        Self {
            db: fontdb::Database::new(),
            fonts: Vec::new(),
            by_family: HashMap::new(),
        }
    }

    /// Creates a system backed by the fonts installed on this machine.
    pub fn with_system_fonts() -> Self {
        let mut fonts = Self::new();
        fonts.db.load_system_fonts();
        log::debug!("font system: {} system faces indexed", fonts.db.len());
        fonts
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(self.push(font))
    }

    /// Finds an installed face by family name and parses it.
    pub fn load_family(&mut self, family: &str) -> Result<FontId, FontLoadError> {
        if let Some(cached) = self.by_family.get(family) {
            return (*cached).ok_or_else(|| FontLoadError(format!("family {family:?} not found")));
        }

        let result = self.load_family_uncached(family);
        self.by_family.insert(family.to_owned(), result.as_ref().ok().copied());
        result
    }

    fn load_family_uncached(&mut self, family: &str) -> Result<FontId, FontLoadError> {
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(family)],
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = self
            .db
            .query(&query)
            .ok_or_else(|| FontLoadError(format!("family {family:?} not found")))?;

        let font = self
            .db
            .with_face_data(id, |data, index| {
                let settings = fontdue::FontSettings {
                    collection_index: index,
                    ..fontdue::FontSettings::default()
                };
                fontdue::Font::from_bytes(data, settings)
            })
            .ok_or_else(|| FontLoadError(format!("family {family:?}: face data unavailable")))?
            .map_err(|e| FontLoadError(format!("family {family:?}: {e}")))?;

        Ok(self.push(font))
    }

    fn push(&mut self, font: fontdue::Font) -> FontId {
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        id
    }

    /// Resolves the first loadable family of `chain`, falling back to the
    /// generic system face. Never fails.
    pub fn resolve<S: AsRef<str>>(&mut self, chain: &[S], size: f32) -> FontRef {
        for family in chain {
            match self.load_family(family.as_ref()) {
                Ok(id) => {
                    log::debug!("font resolved: {} at {size}px", family.as_ref());
                    return FontRef { face: FontFace::Loaded(id), size };
                }
                Err(e) => log::debug!("font fallback: {e}"),
            }
        }
        if !chain.is_empty() {
            log::warn!("no preferred font family available; using the system font");
        }
        FontRef::system(size)
    }

    /// Whether a lookup for `family` has already been made, hit or miss.
    #[cfg(test)]
    pub(crate) fn has_looked_up(&self, family: &str) -> bool {
        self.by_family.contains_key(family)
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    /// Computes the single-line size of `text` in logical pixels.
    ///
    /// The system face is measured with a fixed monospace advance
    /// (`0.6 * size`) since its metrics are owned by the host.
    #[must_use]
    pub fn measure_text(&self, text: &str, font: FontRef) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let line_height = font.size * 1.2;
        let loaded = match font.face {
            FontFace::Loaded(id) => self.get(id),
            FontFace::System => None,
        };
        let Some(face) = loaded else {
            let advance = font.size * 0.6;
            return Vec2::new(text.chars().count() as f32 * advance, line_height);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[face], &TextStyle::new(text, font.size, 0));

        // Pen position after each glyph, not the bitmap edge: trailing spaces count.
        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = face.metrics_indexed(g.key.glyph_index, font.size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w, line_height)
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}
