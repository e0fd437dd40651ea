//! Font resolution and measurement.

mod font_system;

pub use font_system::{FontFace, FontId, FontLoadError, FontRef, FontSystem};
