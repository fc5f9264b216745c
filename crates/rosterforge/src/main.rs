use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rosterforge::pipeline::{run, RunError};
use rosterforge::{RosterConfig, TerminationConfig, TextSummary};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Split signed-up players into balanced teams, one player per role"
)]
struct Args {
    /// Run configuration (.yaml/.yml or .toml). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Signups CSV with Name, Skill, Position, Captain and Avoid columns.
    /// Falls back to `signups_csv` from the configuration.
    #[arg(short, long)]
    signups: Option<PathBuf>,

    /// Directory that receives the run directory
    #[arg(long)]
    output_root: Option<PathBuf>,

    /// Solver time budget in seconds
    #[arg(short, long)]
    time_limit: Option<u64>,

    /// Random seed passed to the solver
    #[arg(long)]
    seed: Option<u64>,

    /// Solver worker count; 1 gives reproducible runs
    #[arg(short, long)]
    workers: Option<usize>,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if !args.quiet {
        rosterforge::console::init();
    }

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: Args) -> Result<(), RunError> {
    let mut config = match &args.config {
        Some(path) => RosterConfig::load(path)?,
        None => RosterConfig::default(),
    };
    if let Some(root) = args.output_root {
        config.output_root = root;
    }
    if let Some(seconds) = args.time_limit {
        config.termination = TerminationConfig {
            seconds_spent_limit: Some(seconds),
            minutes_spent_limit: None,
        };
    }
    if let Some(seed) = args.seed {
        config.random_seed = seed;
    }
    if let Some(workers) = args.workers {
        config.worker_count = workers;
    }

    let signups = match args.signups.or_else(|| config.signups_csv.clone()) {
        Some(path) => path,
        None => {
            return Err(rosterforge::ConfigError::Invalid(
                "no signups CSV given; pass --signups or set signups_csv".to_string(),
            )
            .into())
        }
    };

    let report = run(&config, &signups)?;
    print!("{}", TextSummary::to_string(&report.assignment.diagnostics));
    println!("Outputs written to {}", report.run_dir.display());
    Ok(())
}
