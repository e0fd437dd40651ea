//! fpslabel engine crate.
//!
//! Frame-rate measurement and presentation (`time`, `present`), the overlay
//! shell that places and drags the label (`overlay`), and the small winit
//! runtime that drives it (`window`, `core`, `input`).

pub mod core;
pub mod coords;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod paint;
pub mod present;
pub mod text;
pub mod time;
pub mod window;
