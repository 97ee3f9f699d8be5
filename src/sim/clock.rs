//! Frame clock
//!
//! Converts host animation timestamps into a delta normalized to 60 Hz frames.

use crate::consts::{FRAME_MS, MAX_FRAME_DELTA};

/// Turns a monotonically increasing timestamp stream into per-frame deltas
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last_ms: Option<f64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta in baseline frames since the previous sample.
    ///
    /// The first sample after construction or `reset` yields 0.
    pub fn sample(&mut self, timestamp_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / FRAME_MS) as f32,
            None => 0.0,
        };
        self.last_ms = Some(timestamp_ms);
        delta.clamp(0.0, MAX_FRAME_DELTA)
    }

    /// Forget the previous timestamp (restart, resume)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_is_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.sample(1234.0), 0.0);
    }

    #[test]
    fn test_one_frame_interval_is_unit_delta() {
        let mut clock = Clock::new();
        clock.sample(1000.0);
        let delta = clock.sample(1000.0 + FRAME_MS);
        assert!((delta - 1.0).abs() < 1e-4);
        let delta = clock.sample(1000.0 + FRAME_MS * 1.5);
        assert!((delta - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_stall_is_clamped() {
        let mut clock = Clock::new();
        clock.sample(0.0);
        assert_eq!(clock.sample(5_000.0), MAX_FRAME_DELTA);
    }

    #[test]
    fn test_backwards_time_is_zero() {
        let mut clock = Clock::new();
        clock.sample(500.0);
        assert_eq!(clock.sample(400.0), 0.0);
    }

    #[test]
    fn test_reset_restarts_stream() {
        let mut clock = Clock::new();
        clock.sample(0.0);
        clock.sample(16.0);
        clock.reset();
        assert_eq!(clock.sample(10_000.0), 0.0);
    }
}
