use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic instant taken at the tick.
    pub now: Instant,

    /// Seconds since the clock was created. Unclamped and strictly monotonic
    /// in practice; this is the value handed to clock subscribers.
    pub timestamp: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is
/// paused by the debugger, minimized, or stalls. The `timestamp` field is not
/// clamped: frame-rate measurement needs the real elapsed time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    epoch: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            epoch: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to an explicit instant.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            timestamp: now.saturating_duration_since(self.epoch).as_secs_f64(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_is_clamped_but_timestamp_is_not() {
        let mut clock = FrameClock::new();
        let start = clock.epoch;

        let a = clock.tick_at(start + Duration::from_millis(16));
        assert_eq!(a.frame_index, 0);
        assert!((a.dt - 0.016).abs() < 1e-6);

        let b = clock.tick_at(start + Duration::from_secs(2));
        assert_eq!(b.frame_index, 1);
        assert!((b.dt - 0.25).abs() < 1e-6);
        assert!((b.timestamp - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tiny_dt_is_raised_to_minimum() {
        let mut clock = FrameClock::new();
        let start = clock.epoch;
        clock.tick_at(start);
        let ft = clock.tick_at(start);
        assert!((ft.dt - 0.0001).abs() < 1e-7);
    }
}
