/// Default reporting window length, in seconds.
pub const DEFAULT_REPORT_INTERVAL: f64 = 1.0;

/// One frame-rate measurement, produced when a reporting window closes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FpsReading {
    /// Frames per second over the window that just closed.
    pub value: f64,

    /// Timestamp (seconds) of the tick that closed the window.
    pub timestamp: f64,
}

/// Mutable sampling state owned by a [`RateEstimator`].
///
/// `last_timestamp` is `None` until the first tick has been observed.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SamplingState {
    pub last_timestamp: Option<f64>,
    pub tick_count: u64,
}

/// Turns a per-frame timestamp stream into one [`FpsReading`] per reporting window.
///
/// A window closes on the first tick whose distance from the window start is at
/// least `interval` seconds, so windows are variable-length and never shorter
/// than the interval. The rate is `ticks / elapsed` over that window.
///
/// Timestamps that do not move forward (including NaN and infinities) are
/// discarded: they are neither counted nor used as a new baseline.
#[derive(Debug, Clone)]
pub struct RateEstimator {
    state: SamplingState,
    interval: f64,
}

impl RateEstimator {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_REPORT_INTERVAL)
    }

    /// Creates an estimator with a custom reporting window, in seconds.
    pub fn with_interval(interval: f64) -> Self {
        debug_assert!(interval > 0.0);
        Self {
            state: SamplingState::default(),
            interval,
        }
    }

    #[inline]
    pub fn state(&self) -> SamplingState {
        self.state
    }

    /// Feeds one frame tick. Returns a reading when the current window closes.
    pub fn on_frame_tick(&mut self, timestamp: f64) -> Option<FpsReading> {
        if !timestamp.is_finite() {
            return None;
        }

        let Some(last) = self.state.last_timestamp else {
            self.state.last_timestamp = Some(timestamp);
            return None;
        };

        if timestamp <= last {
            log::trace!("discarding non-increasing frame timestamp {timestamp} (last {last})");
            return None;
        }

        self.state.tick_count += 1;

        let elapsed = timestamp - last;
        if elapsed < self.interval {
            return None;
        }

        let value = self.state.tick_count as f64 / elapsed;
        self.state.last_timestamp = Some(timestamp);
        self.state.tick_count = 0;

        Some(FpsReading { value, timestamp })
    }
}

impl Default for RateEstimator {
    fn default() -> Self {
        Self::new()
    }
}
