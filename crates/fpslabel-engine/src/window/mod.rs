//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, paces redraws at the
//! monitor refresh rate and fires the display link once per frame.

mod runtime;

pub use runtime::{FrameRateRange, Runtime, RuntimeConfig};
