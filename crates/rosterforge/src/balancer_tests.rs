use super::*;
use rosterforge_core::CaptainPolicy;
use rosterforge_model::{SolveStatus, Valuation};
use rosterforge_test::{four_player_roster, ScriptedEngine};

#[test]
fn test_scripted_valuation_is_extracted() {
    let roster = four_player_roster();
    let settings = BalanceSettings::new();
    let built = ModelBuilder::new(&roster, &settings).build().unwrap();
    let valuation = built.valuation_for(&roster, &[0, 1, 1, 0]);

    let balancer =
        TeamBalancer::with_engine(ScriptedEngine::returning(SolveStatus::Feasible, valuation));
    let assignment = balancer.balance(&roster, &settings).unwrap();

    assert_eq!(balancer.engine().calls(), 1);
    assert_eq!(assignment.diagnostics.status, SolveStatus::Feasible);
    assert_eq!(assignment.team_of("P1"), Some(1));
    assert_eq!(assignment.team_of("P4"), Some(1));
    assert_eq!(assignment.team_of("P2"), Some(2));
}

#[test]
fn test_infeasible_outcome_is_solver_failure() {
    let balancer = TeamBalancer::with_engine(ScriptedEngine::infeasible());
    let err = balancer
        .balance(&four_player_roster(), &BalanceSettings::new())
        .unwrap_err();
    assert!(matches!(err, RosterForgeError::SolverFailure(_)));
    assert!(err.to_string().contains("scripted infeasible"));
}

#[test]
fn test_engine_error_is_solver_failure() {
    let balancer = TeamBalancer::with_engine(ScriptedEngine::lost_worker());
    let err = balancer
        .balance(&four_player_roster(), &BalanceSettings::new())
        .unwrap_err();
    assert!(matches!(err, RosterForgeError::SolverFailure(_)));
}

#[test]
fn test_config_error_skips_engine() {
    let balancer = TeamBalancer::with_engine(ScriptedEngine::infeasible());
    let settings = BalanceSettings::new().with_preset("Nobody", 1);
    let err = balancer.balance(&four_player_roster(), &settings).unwrap_err();
    assert!(matches!(err, RosterForgeError::Config(_)));
    assert!(err.is_input_error());
    assert_eq!(balancer.engine().calls(), 0);
}

#[test]
fn test_inconsistent_valuation_is_internal() {
    let roster = four_player_roster();
    let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::separate(true));
    let built = ModelBuilder::new(&roster, &settings).build().unwrap();
    let empty = Valuation::new(vec![0.0; built.model().var_count()]);

    let balancer =
        TeamBalancer::with_engine(ScriptedEngine::returning(SolveStatus::Optimal, empty));
    let err = balancer.balance(&roster, &settings).unwrap_err();
    assert!(matches!(err, RosterForgeError::Internal(_)));
}

#[test]
fn test_params_builders() {
    let balancer = TeamBalancer::new()
        .with_time_limit(None)
        .with_random_seed(7)
        .with_worker_count(1);
    assert_eq!(balancer.params().time_limit, None);
    assert_eq!(balancer.params().random_seed, 7);
    assert_eq!(balancer.params().worker_count, 1);
}

#[test]
fn test_engine_sees_seeded_incumbent() {
    let roster = four_player_roster();
    let settings = BalanceSettings::new();
    let mut built = ModelBuilder::new(&roster, &settings).build().unwrap();
    assert!(built.seed_incumbent(&roster));
    let seeded = built.model().incumbent().unwrap().clone();

    let balancer = TeamBalancer::with_engine(ScriptedEngine::returning_incumbent());
    let assignment = balancer.balance(&roster, &settings).unwrap();
    assert_eq!(assignment.diagnostics.status, SolveStatus::Feasible);
    assert_eq!(
        assignment.diagnostics.objective.objective,
        built.model().objective_value(&seeded)
    );
}

#[test]
fn test_colliding_presets_leave_nothing_to_fall_back_on() {
    let settings = BalanceSettings::new()
        .with_preset("P1", 1)
        .with_preset("P2", 1);
    let balancer = TeamBalancer::with_engine(ScriptedEngine::returning_incumbent());
    let err = balancer.balance(&four_player_roster(), &settings).unwrap_err();
    assert!(matches!(err, RosterForgeError::SolverFailure(_)));
    assert!(err.to_string().contains("time limit"));
}
