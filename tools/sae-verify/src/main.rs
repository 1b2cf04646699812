mod cli;

use crate::cli::{Cli, SuiteArgs};
use anyhow::Context;
use clap::Parser;
use log::debug;
use sae_core_data::{IrisProvider, VectorSetProvider};
use sae_core_trial::{TrialConfig, TrialRunner, render_summary, render_trials};
use sae_globals::{GlobalOpts, OutputFormat, get_globals, init_globals};

fn trial_config(args: &SuiteArgs) -> TrialConfig {
    TrialConfig {
        trials: args.trials,
        samples: args.samples as usize,
        dim: args.dim as usize,
        threshold: args.threshold,
        parallel: !args.sequential,
    }
}

pub fn run_suite_cmd(cmd: SuiteArgs, globals: &GlobalOpts) -> anyhow::Result<()> {
    debug!("sae-verify::suite");
    debug!("sae-verify args: {:#?}", &cmd);

    let reference: Box<dyn VectorSetProvider> = match &cmd.data {
        Some(path) => Box::new(IrisProvider::from_path(path.clone())),
        None => Box::new(IrisProvider::bundled()),
    };

    let summary = TrialRunner::new(trial_config(&cmd), reference).run_suite()?;

    let report = match globals.format {
        OutputFormat::Summary => render_summary(&summary),
        OutputFormat::Trials => render_trials(&summary),
    };

    // threshold misses are the report, not an error: exit status stays 0
    match &globals.output {
        Some(path) => std::fs::write(path, format!("{}\n", report))
            .with_context(|| format!("writing report to {}", path.display()))?,
        None => println!("{}", report),
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_globals(cli.g);
    run_suite_cmd(cli.args, get_globals())
}
