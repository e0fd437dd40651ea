//! Time subsystem.
//!
//! - `FrameClock`: one per render loop, `tick()` once per presented frame
//! - `DisplayLink`: fans frame timestamps out to subscribers (`ClockSource`)
//! - `RateEstimator`: turns a timestamp stream into periodic FPS readings

mod display_link;
mod frame_clock;
mod rate;

pub use display_link::{ClockSource, DisplayLink, SubscriptionHandle, TickCallback};
pub use frame_clock::{FrameClock, FrameTime};
pub use rate::{FpsReading, RateEstimator, SamplingState, DEFAULT_REPORT_INTERVAL};
