use crate::{DataError, Sample, VectorSet, VectorSetProvider};
use anyhow::{Result, bail};
use log::debug;
use std::path::PathBuf;

/// Fisher's iris table: 150 records, 4 measures (cm) and a species label.
static BUNDLED_IRIS: &str = include_str!("../data/iris.data");

pub const IRIS_DIM: usize = 4;
pub const IRIS_SAMPLES: usize = 150;

#[derive(Debug, Clone)]
pub enum IrisSource {
    Bundled,
    File(PathBuf),
}

/// Reference vector set: delimited records of `dim` measures followed by
/// a label, returned in file order.
#[derive(Debug, Clone)]
pub struct IrisProvider {
    source: IrisSource,
    dim: usize,
}

impl IrisProvider {
    pub fn bundled() -> Self {
        Self {
            source: IrisSource::Bundled,
            dim: IRIS_DIM,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: IrisSource::File(path.into()),
            dim: IRIS_DIM,
        }
    }
}

impl VectorSetProvider for IrisProvider {
    fn name(&self) -> String {
        match &self.source {
            IrisSource::Bundled => "iris (bundled)".to_string(),
            IrisSource::File(p) => format!("iris ({})", p.display()),
        }
    }

    fn load(&self) -> Result<VectorSet> {
        let set = match &self.source {
            IrisSource::Bundled => parse_records(BUNDLED_IRIS, self.dim)?,
            IrisSource::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| {
                    DataError::Unreadable {
                        path: path.clone(),
                        source,
                    }
                })?;
                parse_records(&text, self.dim)?
            }
        };
        debug!("loaded {}: {} samples x {}", self.name(), set.len(), set.dim());
        Ok(set)
    }
}

/// Parse comma-delimited records of `dim` numbers plus a trailing label.
/// Blank lines are skipped; line numbers in errors are 1-based.
pub fn parse_records(text: &str, dim: usize) -> Result<VectorSet> {
    let mut samples = Vec::with_capacity(IRIS_SAMPLES);

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let record = raw.trim();
        if record.is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split(',').map(str::trim).collect();
        if fields.len() != dim + 1 {
            bail!(DataError::FieldCount {
                line,
                expected: dim + 1,
                found: fields.len(),
            });
        }

        let mut measures = Vec::with_capacity(dim);
        for (field, value) in fields[..dim].iter().enumerate() {
            let x = match value.parse::<f64>() {
                Ok(x) if x.is_finite() => x,
                _ => bail!(DataError::BadNumber {
                    line,
                    field,
                    value: value.to_string(),
                }),
            };
            if x < 0.0 {
                bail!(DataError::Negative { line, field, value: x });
            }
            measures.push(x);
        }

        samples.push(Sample {
            measures,
            label: fields[dim].to_string(),
            index: samples.len(),
        });
    }

    VectorSet::new(dim, samples)
}
