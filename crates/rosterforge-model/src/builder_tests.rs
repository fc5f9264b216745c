//! Tests for model construction.

use super::*;
use rosterforge_core::{Player, Role};

use crate::solution::Valuation;

fn four_players() -> Roster {
    let roles = [Role::new(1), Role::new(2)];
    Roster::new(
        vec![
            Player::new("P1", 10.0, Role::new(1)),
            Player::new("P2", 20.0, Role::new(1)).with_captain(true),
            Player::new("P3", 15.0, Role::new(2)),
            Player::new("P4", 25.0, Role::new(2)).with_captain(true),
        ],
        &roles,
        Some(2),
    )
    .unwrap()
}

fn build(roster: &Roster, settings: &BalanceSettings) -> TeamModel {
    ModelBuilder::new(roster, settings).build().unwrap()
}

#[test]
fn test_structure_of_plain_model() {
    let roster = four_players();
    let built = build(&roster, &BalanceSettings::new());

    // 8 assignment + 2 score + 2 deviation + 2 captain count
    assert_eq!(built.model().var_count(), 14);
    // 4 one-team + 4 role slots + 2 score + 4 abs + 2 captain count
    assert_eq!(built.model().constraint_count(), 16);
    assert_eq!(built.scaled_skills(), &[1000, 2000, 1500, 2500]);
    assert_eq!(built.target(), 3500);
    assert_eq!(built.captain_state(), CaptainState::Disabled);
    assert!(built.conflicts().is_empty());
    assert!(built.captain_violations().is_empty());
    assert_eq!(built.model().objective().len(), 2);
}

#[test]
fn test_assignment_table_is_player_major() {
    let roster = four_players();
    let built = build(&roster, &BalanceSettings::new());
    assert_eq!(built.assignment(0, 0).index(), 0);
    assert_eq!(built.assignment(0, 1).index(), 1);
    assert_eq!(built.assignment(3, 1).index(), 7);
}

#[test]
fn test_role_weights_and_rounding() {
    let roster = four_players();
    let settings = BalanceSettings::new()
        .with_role_weights(RoleWeights::new().with_weight(Role::new(2), 1.005))
        .with_scale(10);
    let built = build(&roster, &settings);
    // 15 * 1.005 * 10 = 150.75 -> 151, 25 * 1.005 * 10 = 251.25 -> 251
    assert_eq!(built.scaled_skills(), &[100, 200, 151, 251]);
}

#[test]
fn test_scaled_ties_round_to_even() {
    let roles = [Role::new(1), Role::new(2)];
    let roster = Roster::new(
        vec![
            Player::new("P1", 10.125, Role::new(1)),
            Player::new("P2", 20.0, Role::new(1)),
            Player::new("P3", 10.375, Role::new(2)),
            Player::new("P4", -0.125, Role::new(2)),
        ],
        &roles,
        Some(2),
    )
    .unwrap();
    let built = build(&roster, &BalanceSettings::new());
    // 1012.5 -> 1012, 1037.5 -> 1038, -12.5 -> -12
    assert_eq!(built.scaled_skills(), &[1012, 2000, 1038, -12]);
}

#[test]
fn test_target_floors_uneven_totals() {
    let roles = [Role::new(1)];
    let roster = Roster::new(
        vec![
            Player::new("A", 1.0, Role::new(1)),
            Player::new("B", 0.0, Role::new(1)),
        ],
        &roles,
        None,
    )
    .unwrap();
    let built = build(&roster, &BalanceSettings::new().with_scale(1));
    assert_eq!(built.target(), 0);

    let roster = Roster::new(
        vec![
            Player::new("A", -1.0, Role::new(1)),
            Player::new("B", 0.0, Role::new(1)),
        ],
        &roles,
        None,
    )
    .unwrap();
    let built = build(&roster, &BalanceSettings::new().with_scale(1));
    assert_eq!(built.target(), -1);
}

#[test]
fn test_correct_assignment_is_feasible() {
    let roster = four_players();
    let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::at_least_one(true));
    let built = build(&roster, &settings);

    let balanced = built.valuation_for(&roster, &[0, 1, 1, 0]);
    assert!(built.model().is_feasible(&balanced));
    assert_eq!(built.model().objective_value(&balanced), 0.0);

    // Captains P2 and P4 together violates the hard rule.
    let stacked = built.valuation_for(&roster, &[1, 0, 1, 0]);
    assert!(!built.model().is_feasible(&stacked));
}

#[test]
fn test_role_slot_constraint_rejects_doubled_roles() {
    let roster = four_players();
    let built = build(&roster, &BalanceSettings::new());
    let doubled = built.valuation_for(&roster, &[0, 0, 1, 1]);
    assert!(!built.model().is_feasible(&doubled));
}

#[test]
fn test_presets_pin_indicators() {
    let roster = four_players();
    let settings = BalanceSettings::new().with_preset("P1", 2);
    let built = build(&roster, &settings);

    let pinned = built.valuation_for(&roster, &[1, 0, 0, 1]);
    assert!(built.model().is_feasible(&pinned));
    let unpinned = built.valuation_for(&roster, &[0, 1, 1, 0]);
    assert!(!built.model().is_feasible(&unpinned));
}

#[test]
fn test_preset_errors_are_config_errors() {
    let roster = four_players();
    for settings in [
        BalanceSettings::new().with_preset("Nobody", 1),
        BalanceSettings::new().with_preset("P1", 0),
        BalanceSettings::new().with_preset("P1", 3),
    ] {
        let err = ModelBuilder::new(&roster, &settings).build().unwrap_err();
        assert!(matches!(err, RosterForgeError::Config(_)), "{err}");
    }
}

#[test]
fn test_invalid_settings_fail_before_building() {
    let roster = four_players();
    let bad_weight = BalanceSettings::new().with_weights(ObjectiveWeights::new(-1.0, 1.0, 1.0));
    assert!(matches!(
        ModelBuilder::new(&roster, &bad_weight).build(),
        Err(RosterForgeError::Config(_))
    ));

    let bad_scale = BalanceSettings::new().with_scale(0);
    assert!(matches!(
        ModelBuilder::new(&roster, &bad_scale).build(),
        Err(RosterForgeError::Config(_))
    ));

    let undeclared_role =
        BalanceSettings::new().with_role_weights(RoleWeights::new().with_weight(Role::new(7), 2.0));
    assert!(matches!(
        ModelBuilder::new(&roster, &undeclared_role).build(),
        Err(RosterForgeError::Config(_))
    ));
}

#[test]
fn test_conflicts_one_variable_per_pair_and_team() {
    let roles = [Role::new(1), Role::new(2)];
    let roster = Roster::new(
        vec![
            Player::new("P1", 10.0, Role::new(1)).with_avoid("P3"),
            Player::new("P2", 20.0, Role::new(1)).with_avoid("Ghost"),
            Player::new("P3", 15.0, Role::new(2)).with_avoid("P1"),
            Player::new("P4", 25.0, Role::new(2)),
        ],
        &roles,
        Some(2),
    )
    .unwrap();
    let built = build(&roster, &BalanceSettings::new());

    // P1->P3 and P3->P1 on both teams; the unknown target is skipped.
    assert_eq!(built.conflicts().len(), 4);
    assert!(built.conflicts().iter().any(|c| c.from == 2 && c.to == 0));

    let objective = built.model().objective();
    let conflict_terms = objective
        .iter()
        .filter(|(var, _)| built.conflicts().iter().any(|c| c.var == *var))
        .collect::<Vec<_>>();
    assert_eq!(conflict_terms.len(), 4);
    assert!(conflict_terms.iter().all(|(_, coef)| *coef == 100.0));

    // Mutual avoidance on one team costs twice.
    let together = built.valuation_for(&roster, &[0, 1, 0, 1]);
    assert!(built.model().is_feasible(&together));
    let breakdown = built.model().objective_value(&together);
    let deviations: f64 = (0..2).map(|t| together.value(built.deviation(t))).sum();
    assert_eq!(breakdown - deviations, 200.0);
}

#[test]
fn test_zero_weights_drop_terms() {
    let roster = four_players();
    let settings = BalanceSettings::new()
        .with_weights(ObjectiveWeights::new(0.0, 0.0, 0.0))
        .with_captain_policy(CaptainPolicy::at_least_one(false));
    let built = build(&roster, &settings);
    assert!(built.model().objective().is_empty());
    assert_eq!(built.captain_violations().len(), 2);
}

#[test]
fn test_conflict_weight_is_truncated_after_scaling() {
    let roles = [Role::new(1)];
    let roster = Roster::new(
        vec![
            Player::new("A", 1.0, Role::new(1)).with_avoid("B"),
            Player::new("B", 2.0, Role::new(1)),
        ],
        &roles,
        None,
    )
    .unwrap();
    let settings = BalanceSettings::new().with_weights(ObjectiveWeights::new(1.0, 0.257, 5.0));
    let built = build(&roster, &settings);
    let conflict = built.conflicts()[0].var;
    let coef = built
        .model()
        .objective()
        .iter()
        .find(|(var, _)| *var == conflict)
        .map(|(_, coef)| *coef);
    assert_eq!(coef, Some(25.0));
}

#[test]
fn test_soft_at_least_one_penalizes_shortfall() {
    let roster = four_players();
    let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::at_least_one(false));
    let built = build(&roster, &settings);
    assert_eq!(built.captain_state(), CaptainState::Soft(CaptainRule::AtLeastOne));

    let stacked = built.valuation_for(&roster, &[1, 0, 1, 0]);
    assert!(built.model().is_feasible(&stacked));
    let shortfall: f64 = built
        .captain_violations()
        .iter()
        .map(|v| stacked.value(*v))
        .sum();
    assert_eq!(shortfall, 1.0);

    // The shortfall cannot be zero while team 2 has no captain.
    let mut values = stacked.values().to_vec();
    for var in built.captain_violations() {
        values[var.index()] = 0.0;
    }
    assert!(!built.model().is_feasible(&Valuation::new(values)));
}

#[test]
fn test_soft_separate_penalizes_excess() {
    let roster = four_players();
    let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::separate(false));
    let built = build(&roster, &settings);

    let stacked = built.valuation_for(&roster, &[1, 0, 1, 0]);
    assert!(built.model().is_feasible(&stacked));
    let excess: f64 = built
        .captain_violations()
        .iter()
        .map(|v| stacked.value(*v))
        .sum();
    assert_eq!(excess, 1.0);
    assert_eq!(
        built.model().objective_value(&stacked),
        (0..2).map(|t| stacked.value(built.deviation(t))).sum::<f64>() + 500.0
    );
}

#[test]
fn test_pigeonhole_downgrade_emits_one_warning() {
    let roles = [Role::new(1), Role::new(2)];
    let roster = Roster::new(
        vec![
            Player::new("P1", 10.0, Role::new(1)),
            Player::new("P2", 20.0, Role::new(1)),
            Player::new("P3", 15.0, Role::new(2)),
            Player::new("P4", 25.0, Role::new(2)).with_captain(true),
        ],
        &roles,
        Some(2),
    )
    .unwrap();
    let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::at_least_one(true));
    let built = build(&roster, &settings);

    assert_eq!(built.captain_state(), CaptainState::SoftFallback(CaptainRule::AtLeastOne));
    assert_eq!(
        built.warnings(),
        &[FeasibilityWarning::NotEnoughCaptains {
            captains: 1,
            teams: 2
        }]
    );
    // Every split leaves one team without a captain, and stays feasible.
    let split = built.valuation_for(&roster, &[0, 1, 1, 0]);
    assert!(built.model().is_feasible(&split));
}
