//! Tests for the constructive starting assignment.

use super::*;
use rosterforge_core::{CaptainPolicy, ObjectiveWeights, Player, Role};

use crate::builder::{BalanceSettings, ModelBuilder};
use crate::solution::SolveStatus;

fn four_players() -> Vec<Player> {
    vec![
        Player::new("P1", 10.0, Role::new(1)),
        Player::new("P2", 20.0, Role::new(1)).with_captain(true),
        Player::new("P3", 15.0, Role::new(2)),
        Player::new("P4", 25.0, Role::new(2)).with_captain(true),
    ]
}

fn roster_of(players: Vec<Player>, roles: u32, teams: usize) -> Roster {
    let roles: Vec<Role> = (1..=roles).map(Role::new).collect();
    Roster::new(players, &roles, Some(teams)).unwrap()
}

/// Eight teams of five with every fourth player a captain.
fn eight_by_five() -> Roster {
    let players = (0..40)
        .map(|p| {
            let skill = 5.0 + ((p * 37) % 23) as f64 * 0.25;
            let role = Role::new(p as u32 % 5 + 1);
            let player = Player::new(format!("P{}", p + 1), skill, role);
            let player = player.with_captain(p % 4 == 0);
            if p % 6 == 1 {
                player.with_avoid(format!("P{}", (p + 5) % 40 + 1))
            } else {
                player
            }
        })
        .collect();
    roster_of(players, 5, 8)
}

fn build(roster: &Roster, settings: &BalanceSettings) -> TeamModel {
    ModelBuilder::new(roster, settings).build().unwrap()
}

#[test]
fn test_greedy_reaches_even_split() {
    let roster = roster_of(four_players(), 2, 2);
    let settings =
        BalanceSettings::new().with_captain_policy(CaptainPolicy::at_least_one(true));
    let mut built = build(&roster, &settings);

    // P4 and P2 are captains and go to different teams; P3 and P1 fill the
    // remaining slots on the weaker side.
    assert_eq!(built.construct(&roster), Some(vec![0, 1, 1, 0]));

    assert!(built.seed_incumbent(&roster));
    let incumbent = built.model().incumbent().unwrap().clone();
    assert_eq!(built.model().objective_value(&incumbent), 0.0);

    let assignment = built
        .extract(&roster, SolveStatus::Feasible, &incumbent)
        .unwrap();
    assert!(assignment.diagnostics.teams.iter().all(|t| t.score == 35.0));
    assert!(assignment.diagnostics.teams.iter().all(|t| t.captains == 1));
}

#[test]
fn test_presets_stay_pinned() {
    let roster = roster_of(four_players(), 2, 2);
    let settings = BalanceSettings::new()
        .with_preset("P1", 2)
        .with_preset("P3", 2);
    let mut built = build(&roster, &settings);

    let mut team_of = built.construct(&roster).unwrap();
    built.improve(&roster, &mut team_of);
    assert_eq!(team_of[0], 1);
    assert_eq!(team_of[2], 1);
    assert!(built.seed_incumbent(&roster));
}

#[test]
fn test_colliding_presets_seed_nothing() {
    let roster = roster_of(four_players(), 2, 2);
    let settings = BalanceSettings::new()
        .with_preset("P1", 1)
        .with_preset("P2", 1);
    let mut built = build(&roster, &settings);

    assert_eq!(built.construct(&roster), None);
    assert!(!built.seed_incumbent(&roster));
    assert!(built.model().incumbent().is_none());
}

#[test]
fn test_descent_separates_heavy_conflicts() {
    let players = four_players()
        .into_iter()
        .map(|p| match p.name() {
            "P1" => p.with_avoid("P4"),
            "P4" => p.with_avoid("P1"),
            _ => p,
        })
        .collect();
    let roster = roster_of(players, 2, 2);
    let settings = BalanceSettings::new().with_weights(ObjectiveWeights::new(1.0, 100.0, 5.0));
    let built = build(&roster, &settings);

    // The even split keeps P1 with P4; two co-placements outweigh the
    // deviation of splitting them.
    let mut team_of = built.construct(&roster).unwrap();
    assert_eq!(team_of[0], team_of[3]);
    let before = built.placement_cost(&roster, &team_of);

    assert_eq!(built.improve(&roster, &mut team_of), 1);
    assert_ne!(team_of[0], team_of[3]);
    assert!(built.placement_cost(&roster, &team_of).is_better_than(before));
}

#[test]
fn test_hard_captain_rule_is_met_on_eight_teams() {
    let roster = eight_by_five();
    for policy in [CaptainPolicy::at_least_one(true), CaptainPolicy::separate(false)] {
        let settings = BalanceSettings::new().with_captain_policy(policy);
        let mut built = build(&roster, &settings);

        let mut team_of = built.construct(&roster).unwrap();
        let greedy = built.placement_cost(&roster, &team_of);
        built.improve(&roster, &mut team_of);
        let improved = built.placement_cost(&roster, &team_of);
        assert_eq!(improved.hard, 0);
        assert!(!greedy.is_better_than(improved));

        assert!(built.seed_incumbent(&roster));
        let incumbent = built.model().incumbent().unwrap().clone();
        assert!(built.model().is_feasible(&incumbent));
        let assignment = built
            .extract(&roster, SolveStatus::Feasible, &incumbent)
            .unwrap();
        assert_eq!(assignment.team_count(), 8);
        if policy.rule() == Some(rosterforge_core::CaptainRule::AtLeastOne) {
            assert!(assignment.diagnostics.teams.iter().all(|t| t.captains >= 1));
        }
    }
}
