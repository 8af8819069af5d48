//! Frame-rate independent time step.
//!
//! Frame callbacks arrive at whatever rate the display (or terminal loop)
//! manages. [`SimulationClock`] turns the timestamps of consecutive frames into
//! a `delta` factor where `1.0` is exactly one reference frame, so the physics
//! constants can be tuned once for 60 fps and behave the same at 30 or 144.

/// Reference frame period: one 60 Hz frame, in milliseconds.
pub const REFERENCE_PERIOD_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Clone)]
pub struct SimulationClock {
    reference_period_ms: f64,
    max_delta: Option<f64>,
    last_timestamp_ms: Option<f64>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(REFERENCE_PERIOD_MS, None)
    }
}

impl SimulationClock {
    pub fn new(reference_period_ms: f64, max_delta: Option<f64>) -> Self {
        debug_assert!(reference_period_ms > 0.0);
        Self {
            reference_period_ms,
            max_delta,
            last_timestamp_ms: None,
        }
    }

    /// Normalized delta for the frame at `timestamp_ms`, recording it as the
    /// previous frame for the next call.
    ///
    /// The first frame after construction or [`reset`](Self::reset) is always
    /// one reference period, whatever `max_delta` says.
    pub fn delta(&mut self, timestamp_ms: f64) -> f64 {
        let Some(last) = self.last_timestamp_ms.replace(timestamp_ms) else {
            return 1.0;
        };
        let delta = ((timestamp_ms - last) / self.reference_period_ms).max(0.0);

        match self.max_delta {
            Some(max) => delta.min(max),
            None => delta,
        }
    }

    /// Forget the previous timestamp so a stale one can't cause a spike.
    pub fn reset(&mut self) {
        self.last_timestamp_ms = None;
    }

    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.last_timestamp_ms
    }
}
