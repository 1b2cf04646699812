use clap::{Args, ValueEnum};
use once_cell::sync::OnceCell;
use std::path::PathBuf;

static INIT_SYNC: std::sync::Once = std::sync::Once::new();
static GLOBAL_OPTS: OnceCell<GlobalOpts> = OnceCell::new();

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    /// single `<fail>/<total> outside of cosine similarity <t>` line
    Summary,
    /// one line per trial, then the summary line
    #[value(alias = "table")]
    Trials,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    // write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    // summary | trials
    #[arg(
        short = 'F',
        long,
        value_enum,
        default_value = "summary",
        value_name = "FMT",
        global = true
    )]
    pub format: OutputFormat,

    #[arg(short = 't', long, help = "Number of threads (optional)")]
    pub threads: Option<usize>,

    // verbosity (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

// -v / -vv pick the level; RUST_LOG still wins when set
pub fn setup_logging(verbose: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .try_init();
}

pub fn setup_rayon(threads: Option<usize>) {
    INIT_SYNC.call_once(|| {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        if let Err(e) = builder.build_global() {
            log::warn!("rayon global pool already initialised: {}", e);
        }
    });
}

pub fn init_globals(opts: GlobalOpts) {
    if GLOBAL_OPTS.set(opts).is_err() {
        panic!("Global options already initialized");
    }

    let opts = GLOBAL_OPTS.get().expect("options just initialized");

    // logging
    setup_logging(opts.verbose);
    // threading
    setup_rayon(opts.threads);
}

pub fn get_globals() -> &'static GlobalOpts {
    GLOBAL_OPTS.get().expect("Global options not initialized")
}
