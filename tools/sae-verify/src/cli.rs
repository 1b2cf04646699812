use clap::{Args, Parser};
use sae_globals::GlobalOpts;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sae-verify",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compares unscaled self-attention with the principal eigenvector of the Gram matrix."
)]
pub struct Cli {
    #[command(flatten)]
    pub g: GlobalOpts,

    #[command(flatten)]
    pub args: SuiteArgs,
}

#[derive(Args, Debug)]
pub struct SuiteArgs {
    /// Number of synthetic trials (seeds 1..=K)
    #[arg(short = 'k', long, default_value_t = 128)]
    pub trials: usize,

    /// Vectors per synthetic set
    #[arg(short = 'n', long, default_value_t = 150, value_parser = clap::value_parser!(u64).range(1..))]
    pub samples: u64,

    /// Dimension of synthetic vectors
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u64).range(1..))]
    pub dim: u64,

    /// Cosine similarity below which a trial counts as outside
    #[arg(long, default_value_t = 0.95)]
    pub threshold: f64,

    /// Reference vector set as CSV (4 measures + label per line) instead of the bundled iris table
    #[arg(short = 'f', long = "data", value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Run trials on the main thread instead of the thread pool
    #[arg(long)]
    pub sequential: bool,
}
