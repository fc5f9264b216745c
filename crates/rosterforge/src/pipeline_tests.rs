use super::*;
use rosterforge_config::EFFECTIVE_CONFIG_FILE;
use rosterforge_core::Role;
use rosterforge_model::SolveStatus;
use rosterforge_test::ScriptedEngine;

const SIGNUPS: &str = "Name,Skill,Position,Captain,Avoid\n\
P1,10,1,0,\n\
P2,20,1,1,\n\
P3,15,2,0,\n\
P4,25,2,1,\n";

fn config_in(dir: &Path) -> RosterConfig {
    RosterConfig::new()
        .with_run_name("test_run")
        .with_output_root(dir)
        .with_roles([Role::new(1), Role::new(2)])
        .with_captain_policy("at_least_one", true)
        .with_worker_count(1)
}

fn write_signups(dir: &Path) -> PathBuf {
    let path = dir.join("signups.csv");
    fs::write(&path, SIGNUPS).unwrap();
    path
}

#[test]
fn test_settings_from_config() {
    let config = RosterConfig::new()
        .with_captain_policy("separate", false)
        .with_preset("P1", 2);
    let settings = settings_from_config(&config).unwrap();
    assert_eq!(settings.presets.len(), 1);
    assert_eq!(settings.scale, 100);
    assert!(!settings.captain_policy.is_hard());

    let bad = RosterConfig::new().with_captain_policy("captains_everywhere", true);
    assert!(matches!(
        settings_from_config(&bad),
        Err(RosterForgeError::Config(_))
    ));
}

#[test]
fn test_run_writes_run_directory() {
    let dir = tempfile::tempdir().unwrap();
    let signups = write_signups(dir.path());
    let config = config_in(dir.path()).with_termination_seconds(20);

    let report = run(&config, &signups).unwrap();

    assert_eq!(report.run_dir, dir.path().join("test_run"));
    assert_eq!(report.config_file, report.run_dir.join(EFFECTIVE_CONFIG_FILE));
    assert_eq!(report.assignment.diagnostics.status, SolveStatus::Optimal);
    assert_eq!(report.assignment.diagnostics.target_score, 35.0);

    let saved = RosterConfig::load(&report.config_file).unwrap();
    assert_eq!(saved.run_name, "test_run");
    assert!(saved.signups_csv.unwrap().is_absolute());

    let markdown = fs::read_to_string(&report.teams_markdown).unwrap();
    assert!(markdown.contains("## Team 1"));
    assert!(markdown.contains("## Team 2"));

    let csv = fs::read_to_string(&report.assignments_csv).unwrap();
    assert!(csv.starts_with("Name,Skill,Position,Captain,Avoid,Team"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn test_structural_error_stops_before_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signups.csv");
    fs::write(&path, "Name,Skill,Position,Captain,Avoid\nP1,10,1,0,\nP2,20,1,0,\nP3,15,2,0,\n")
        .unwrap();

    let engine = ScriptedEngine::infeasible();
    let err = run_with_engine(&config_in(dir.path()), &path, &engine).unwrap_err();
    assert!(matches!(
        err,
        RunError::Roster(RosterForgeError::Structural(_))
    ));
    assert_eq!(engine.calls(), 0);
    assert!(!dir.path().join("test_run").exists());
}

#[test]
fn test_solver_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let signups = write_signups(dir.path());

    let engine = ScriptedEngine::infeasible();
    let err = run_with_engine(&config_in(dir.path()), &signups, &engine).unwrap_err();
    assert!(matches!(
        err,
        RunError::Roster(RosterForgeError::SolverFailure(_))
    ));
    assert_eq!(engine.calls(), 1);
    assert!(!dir.path().join("test_run").exists());
}

#[test]
fn test_invalid_config_is_rejected_first() {
    let dir = tempfile::tempdir().unwrap();
    let config = RosterConfig {
        scale_factor: 0,
        ..config_in(dir.path())
    };
    let err = run(&config, dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, RunError::Config(ConfigError::Invalid(_))));
}

#[test]
fn test_missing_signups_is_report_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&config_in(dir.path()), dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, RunError::Report(ReportError::Io(_))));
}
