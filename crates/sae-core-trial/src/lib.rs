use anyhow::Result;
use log::{Level, debug, log_enabled};
use sae_core_data::{IRIS_DIM, IRIS_SAMPLES, VectorSet};
use sae_core_kernel::{
    attention_diagnostics, cosine_sim, principal_eigenvector_magnitudes, self_attention_forward,
};
use std::fmt;

pub mod render;
pub mod runner;

pub use render::{render_summary, render_trials};
pub use runner::{SuiteSummary, TrialRunner};

/// Suite parameters. `Default` is the reference configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialConfig {
    /// Number of synthetic trials after the reference trial.
    pub trials: usize,
    /// Vectors per synthetic set.
    pub samples: usize,
    /// Dimension of synthetic vectors.
    pub dim: usize,
    /// A trial fails when its cosine similarity is below this.
    pub threshold: f64,
    /// Run on the rayon pool instead of the calling thread.
    pub parallel: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            trials: 128,
            samples: IRIS_SAMPLES,
            dim: IRIS_DIM,
            threshold: 0.95,
            parallel: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrialKind {
    Reference,
    Synthetic { seed: u64 },
}

impl fmt::Display for TrialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Synthetic { seed } => write!(f, "seed {}", seed),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    pub kind: TrialKind,
    pub samples: usize,
    /// cos(|principal eigenvector|, first column of the attention output)
    pub similarity: f64,
    pub below_threshold: bool,
    pub dominant_eigenvalue: f64,
    /// The dominant eigenvalue was tied, so the principal direction is one
    /// of several valid choices.
    pub degenerate: bool,
}

/// Per-sample comparison signals of one vector set.
#[derive(Debug, Clone)]
pub struct Signals {
    /// `|v[r]|` of the principal Gram eigenvector.
    pub eigen: Vec<f64>,
    /// `X[r][0]` of the attention output.
    pub attention: Vec<f64>,
    pub dominant_eigenvalue: f64,
    pub degenerate: bool,
}

/// Attention pass and eigen pass over the same vector set.
pub fn compute_signals(set: &VectorSet) -> Result<Signals> {
    let (n, d) = (set.len(), set.dim());
    let v = set.matrix();

    let attn = self_attention_forward(&v, n, d)?;
    if log_enabled!(Level::Trace) {
        attention_diagnostics(&attn);
    }

    let principal = principal_eigenvector_magnitudes(&attn.gram, n)?;

    Ok(Signals {
        eigen: principal.magnitudes,
        attention: attn.output_column(0),
        dominant_eigenvalue: principal.value,
        degenerate: principal.degenerate,
    })
}

/// One complete trial against a single vector set.
pub fn run_trial(kind: TrialKind, set: &VectorSet, threshold: f64) -> Result<TrialOutcome> {
    let signals = compute_signals(set)?;
    let similarity = cosine_sim(&signals.eigen, &signals.attention);
    let below_threshold = similarity < threshold;

    debug!(
        "trial {}: n={} λ₁={:.4} cos={:.6}{}",
        kind,
        set.len(),
        signals.dominant_eigenvalue,
        similarity,
        if below_threshold { " (below threshold)" } else { "" }
    );

    Ok(TrialOutcome {
        kind,
        samples: set.len(),
        similarity,
        below_threshold,
        dominant_eigenvalue: signals.dominant_eigenvalue,
        degenerate: signals.degenerate,
    })
}
