use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("Invalid range: min {min} exceeds max {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("Invalid range bound: {0}")]
    InvalidBound(f64),
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),
    #[error("Invalid traffic weights: {0}")]
    InvalidWeights(String),
}
