//! A complete run: signups in, run directory out.
//!
//! ```text
//! signups.csv ─► Roster ─► TeamBalancer ─► Assignment
//!                                             ├─► used_config.yaml
//!                                             ├─► teams.md
//!                                             └─► assignments.csv
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rosterforge_config::{ConfigError, RosterConfig};
use rosterforge_core::{Roster, RosterForgeError};
use rosterforge_model::{Assignment, BalanceSettings};
use rosterforge_report::{
    read_signups, AssignmentsCsv, MarkdownReport, ReportError, ASSIGNMENTS_CSV_FILE,
    TEAMS_MARKDOWN_FILE,
};
use rosterforge_solver::{GoodLpEngine, SolverEngine};
use thiserror::Error;
use tracing::info;

use crate::balancer::TeamBalancer;

/// Any failure of a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterForgeError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub assignment: Assignment,
    pub run_dir: PathBuf,
    pub config_file: PathBuf,
    pub teams_markdown: PathBuf,
    pub assignments_csv: PathBuf,
}

/// Translates the balancing part of a configuration.
pub fn settings_from_config(config: &RosterConfig) -> Result<BalanceSettings, RosterForgeError> {
    Ok(BalanceSettings::new()
        .with_role_weights(config.role_weights())
        .with_presets(config.presets())
        .with_captain_policy(config.captain_policy()?)
        .with_weights(config.objective_weights())
        .with_scale(config.scale_factor))
}

/// Runs the full pipeline on the microlp engine.
pub fn run(config: &RosterConfig, signups: impl AsRef<Path>) -> Result<RunReport, RunError> {
    run_with_engine(config, signups, GoodLpEngine::new())
}

/// Runs the full pipeline on `engine`.
///
/// Nothing is written unless balancing succeeds.
pub fn run_with_engine<E: SolverEngine>(
    config: &RosterConfig,
    signups: impl AsRef<Path>,
    engine: E,
) -> Result<RunReport, RunError> {
    let signups = signups.as_ref();
    config.validate()?;

    let players = read_signups(signups)?;
    info!(
        event = "signups_loaded",
        players = players.len(),
        path = %signups.display(),
    );

    let roster = Roster::new(players, &config.roles, config.num_teams)?;
    let settings = settings_from_config(config)?;

    let balancer = TeamBalancer::with_engine(engine)
        .with_time_limit(config.time_limit())
        .with_random_seed(config.random_seed)
        .with_worker_count(config.worker_count);
    let assignment = balancer.balance(&roster, &settings)?;

    let run_dir = config.run_dir();
    fs::create_dir_all(&run_dir)?;

    let config_file = config.save_effective(&run_dir, signups)?;
    report_written(&config_file);

    let teams_markdown = run_dir.join(TEAMS_MARKDOWN_FILE);
    MarkdownReport::to_file(&assignment, &teams_markdown)?;
    report_written(&teams_markdown);

    let assignments_csv = run_dir.join(ASSIGNMENTS_CSV_FILE);
    AssignmentsCsv::to_file(&assignment, &assignments_csv)?;
    report_written(&assignments_csv);

    Ok(RunReport {
        assignment,
        run_dir,
        config_file,
        teams_markdown,
        assignments_csv,
    })
}

fn report_written(path: &Path) {
    info!(event = "report_written", path = %path.display());
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
