use crate::{Sample, VectorSet, VectorSetProvider};
use anyhow::Result;
use rand::distributions::Standard;
use rand::prelude::*;

/// Deterministic synthetic vector set: `samples` vectors of `dim`
/// independent uniform components in [0, 1).
///
/// The same seed always yields the same set, component for component.
#[derive(Debug, Clone, Copy)]
pub struct RandomProvider {
    seed: u64,
    samples: usize,
    dim: usize,
}

impl RandomProvider {
    pub fn new(seed: u64, samples: usize, dim: usize) -> Self {
        Self { seed, samples, dim }
    }
}

impl VectorSetProvider for RandomProvider {
    fn name(&self) -> String {
        format!("random (seed {})", self.seed)
    }

    fn load(&self) -> Result<VectorSet> {
        let mut rng = StdRng::seed_from_u64(self.seed);

        let samples = (0..self.samples)
            .map(|index| Sample {
                measures: (0..self.dim)
                    .map(|_| rng.sample::<f64, _>(Standard))
                    .collect(),
                label: index.to_string(),
                index,
            })
            .collect();

        VectorSet::new(self.dim, samples)
    }
}
