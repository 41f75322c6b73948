use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DiscoveryError, Result};
use crate::models::PlaceCandidate;

/// Uniform random choice among filtered candidates. No weighting by rating or
/// popularity; every survivor is equally likely.
pub struct Selector {
    rng: Mutex<StdRng>,
}

impl Selector {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    pub fn pick(&self, mut candidates: Vec<PlaceCandidate>) -> Result<PlaceCandidate> {
        if candidates.is_empty() {
            return Err(DiscoveryError::Internal(
                "selector called with no candidates".to_string(),
            ));
        }
        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..candidates.len());
        Ok(candidates.swap_remove(index))
    }
}
