//! Geometry types for placing the overlay.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
