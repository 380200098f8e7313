use super::errors::SimulationError;
use rand::Rng;
use std::time::Duration;

/// Inclusive range of seconds a simulated delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyRange {
    min: f64,
    max: f64,
}

impl LatencyRange {
    /// `/api/data` processing time.
    pub const DATA: LatencyRange = LatencyRange { min: 0.01, max: 0.3 };
    /// `/api/slow` processing time.
    pub const SLOW: LatencyRange = LatencyRange { min: 1.5, max: 3.5 };
    /// Pause between two generated requests.
    pub const TRAFFIC_INTERVAL: LatencyRange = LatencyRange { min: 0.5, max: 2.0 };

    pub fn new(min: f64, max: f64) -> Result<Self, SimulationError> {
        for bound in [min, max] {
            if !bound.is_finite() || bound < 0.0 {
                return Err(SimulationError::InvalidBound(bound));
            }
        }
        if min > max {
            return Err(SimulationError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Result<Self, SimulationError> {
        Self::new(min_ms as f64 / 1000.0, max_ms as f64 / 1000.0)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.min && seconds <= self.max
    }

    /// Draws seconds uniformly from the range.
    pub fn sample_secs<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_secs_f64(self.sample_secs(rng))
    }
}

/// Rounds to two decimals, the precision `/api/slow` reports its delay with.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
