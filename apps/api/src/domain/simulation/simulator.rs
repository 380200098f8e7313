use super::{errors::SimulationError, value_objects::LatencyRange};
use rand::Rng;
use std::time::Duration;

/// Source of every random decision the simulated endpoints make.
///
/// Handlers never touch an RNG directly, so tests can swap in fixed or zero delays.
#[cfg_attr(test, mockall::automock)]
pub trait Simulator: Send + Sync {
    /// Processing time of one `/api/data` request.
    fn data_latency(&self) -> Duration;

    /// Whether this `/api/data` request fails with a synthetic internal error.
    fn data_fails(&self) -> bool;

    /// Number of items a successful `/api/data` request reports, in `1..=100`.
    fn item_count(&self) -> u32;

    /// Processing time of one `/api/slow` request.
    fn slow_latency(&self) -> Duration;
}

pub const MAX_ITEM_COUNT: u32 = 100;

/// Production simulator backed by the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomSimulator {
    data_latency: LatencyRange,
    slow_latency: LatencyRange,
    error_rate: f64,
}

impl RandomSimulator {
    pub fn new(error_rate: f64) -> Result<Self, SimulationError> {
        Self::with_ranges(LatencyRange::DATA, LatencyRange::SLOW, error_rate)
    }

    pub fn with_ranges(
        data_latency: LatencyRange,
        slow_latency: LatencyRange,
        error_rate: f64,
    ) -> Result<Self, SimulationError> {
        if !(0.0..=1.0).contains(&error_rate) {
            return Err(SimulationError::InvalidProbability(error_rate));
        }
        Ok(Self {
            data_latency,
            slow_latency,
            error_rate,
        })
    }
}

impl Simulator for RandomSimulator {
    fn data_latency(&self) -> Duration {
        self.data_latency.sample(&mut rand::thread_rng())
    }

    fn data_fails(&self) -> bool {
        rand::thread_rng().gen_bool(self.error_rate)
    }

    fn item_count(&self) -> u32 {
        rand::thread_rng().gen_range(1..=MAX_ITEM_COUNT)
    }

    fn slow_latency(&self) -> Duration {
        self.slow_latency.sample(&mut rand::thread_rng())
    }
}
