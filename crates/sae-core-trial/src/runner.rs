use crate::{TrialConfig, TrialKind, TrialOutcome, run_trial};
use anyhow::{Context, Result};
use log::info;
use rayon::prelude::*;
use sae_core_data::{RandomProvider, VectorSetProvider};

/// Aggregate of one suite run. `outcomes` is in trial order: the
/// reference trial first, then seeds 1..=K.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteSummary {
    pub fail_count: usize,
    pub total_count: usize,
    pub threshold: f64,
    pub outcomes: Vec<TrialOutcome>,
}

/// One reference trial followed by `config.trials` seeded synthetic trials.
pub struct TrialRunner {
    config: TrialConfig,
    reference: Box<dyn VectorSetProvider>,
}

impl TrialRunner {
    pub fn new(config: TrialConfig, reference: Box<dyn VectorSetProvider>) -> Self {
        Self { config, reference }
    }

    pub fn config(&self) -> &TrialConfig {
        &self.config
    }

    /// Trial list in execution order. Synthetic trial `i` (0-based) uses
    /// seed `i + 1`.
    pub fn trial_kinds(&self) -> Vec<TrialKind> {
        std::iter::once(TrialKind::Reference)
            .chain((1..=self.config.trials as u64).map(|seed| TrialKind::Synthetic { seed }))
            .collect()
    }

    fn run_one(&self, kind: TrialKind) -> Result<TrialOutcome> {
        let set = match kind {
            TrialKind::Reference => self.reference.load(),
            TrialKind::Synthetic { seed } => {
                RandomProvider::new(seed, self.config.samples, self.config.dim).load()
            }
        }
        .with_context(|| format!("loading vector set for trial {}", kind))?;

        run_trial(kind, &set, self.config.threshold)
            .with_context(|| format!("trial {} ({} samples)", kind, set.len()))
    }

    /// Runs every trial. Any fatal error aborts the whole suite; nothing
    /// partial is returned.
    pub fn run_suite(&self) -> Result<SuiteSummary> {
        let kinds = self.trial_kinds();
        info!(
            "running {} trials (reference: {}, threshold {}, {})",
            kinds.len(),
            self.reference.name(),
            self.config.threshold,
            if self.config.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        let outcomes: Vec<TrialOutcome> = if self.config.parallel {
            kinds
                .par_iter()
                .map(|&kind| self.run_one(kind))
                .collect::<Result<_>>()?
        } else {
            kinds
                .iter()
                .map(|&kind| self.run_one(kind))
                .collect::<Result<_>>()?
        };

        let fail_count = outcomes.iter().filter(|o| o.below_threshold).count();
        let summary = SuiteSummary {
            fail_count,
            total_count: outcomes.len(),
            threshold: self.config.threshold,
            outcomes,
        };

        info!(
            "suite finished: {}/{} below threshold",
            summary.fail_count, summary.total_count
        );
        Ok(summary)
    }
}
