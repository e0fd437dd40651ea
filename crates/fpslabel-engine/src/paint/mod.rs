//! Paint model shared between the overlay and its host renderer.
//!
//! Colors are linear premultiplied RGBA; HSV construction lives on `Color`.

pub mod color;

pub use color::{normalize_hue, Color};
