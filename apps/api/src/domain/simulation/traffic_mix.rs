use super::{entity::Endpoint, errors::SimulationError};
use rand::{Rng, distributions::Distribution, distributions::WeightedIndex};

/// Weighted pool of endpoints the background traffic generator draws from.
#[derive(Debug, Clone)]
pub struct TrafficMix {
    endpoints: Vec<Endpoint>,
    index: WeightedIndex<u32>,
}

impl TrafficMix {
    pub fn new(entries: Vec<(Endpoint, u32)>) -> Result<Self, SimulationError> {
        let (endpoints, weights): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        let index = WeightedIndex::new(&weights)
            .map_err(|e| SimulationError::InvalidWeights(e.to_string()))?;
        Ok(Self { endpoints, index })
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Endpoint {
        self.endpoints[self.index.sample(rng)]
    }
}

impl Default for TrafficMix {
    /// 8 parts `/api/data`, 1 part `/api/slow`, 1 part `/api/error`.
    fn default() -> Self {
        Self::new(vec![
            (Endpoint::Data, 8),
            (Endpoint::Slow, 1),
            (Endpoint::Error, 1),
        ])
        .expect("static traffic weights are non-zero")
    }
}
