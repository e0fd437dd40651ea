//! On-screen frame-rate overlay.
//!
//! `OverlayShell` owns the lifecycle (install/uninstall against a clock
//! source); `FpsLabel` holds the measurement pipeline plus the drag and snap
//! placement logic. Rendering is left to the host, which reads the label's
//! frame and payload and styles it from `OverlayConfig`.

mod config;
mod label;
mod shell;
mod snap;

pub use config::{OverlayConfig, TextAlign};
pub use label::FpsLabel;
pub use shell::OverlayShell;
pub use snap::rest_position;
