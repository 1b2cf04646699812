use anyhow::{Result, bail};
use std::path::PathBuf;
use thiserror::Error;

pub mod iris;
pub mod random;
pub mod species;

pub use iris::{IRIS_DIM, IRIS_SAMPLES, IrisProvider};
pub use random::RandomProvider;
pub use species::{SPECIES, Species};

/// Fatal data-loading failures. A run that hits one of these stops; there
/// is no partial load.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read vector set from {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, field {field}: '{value}' is not a finite number")]
    BadNumber {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("line {line}, field {field}: negative value {value}")]
    Negative { line: usize, field: usize, value: f64 },

    #[error("sample {index} has {found} measures, expected {expected}")]
    Dimension {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("vector set is empty")]
    Empty,
}

/// One feature vector plus its categorical label and its position in the set.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub measures: Vec<f64>,
    pub label: String,
    /// Zero-based position in file / generation order.
    pub index: usize,
}

impl Sample {
    pub fn species(&self) -> Option<Species> {
        Species::from_label(&self.label)
    }
}

/// An ordered, non-empty set of equal-dimension vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSet {
    dim: usize,
    samples: Vec<Sample>,
}

impl VectorSet {
    pub fn new(dim: usize, samples: Vec<Sample>) -> Result<Self> {
        if samples.is_empty() || dim == 0 {
            bail!(DataError::Empty);
        }
        for s in &samples {
            if s.measures.len() != dim {
                bail!(DataError::Dimension {
                    index: s.index,
                    expected: dim,
                    found: s.measures.len(),
                });
            }
        }
        Ok(Self { dim, samples })
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline(always)]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Row-major `len x dim` copy of the measures.
    pub fn matrix(&self) -> Vec<f64> {
        let mut data = Vec::with_capacity(self.len() * self.dim);
        for s in &self.samples {
            data.extend_from_slice(&s.measures);
        }
        data
    }
}

/// Source of vector sets - one call, one fresh set.
pub trait VectorSetProvider: Send + Sync {
    /// Short human-readable description used in logs and reports.
    fn name(&self) -> String;
    fn load(&self) -> Result<VectorSet>;
}
