//! Tests for roster validation and policy parsing.

use super::*;
use crate::error::RosterForgeError;

fn roles() -> Vec<Role> {
    vec![Role::new(1), Role::new(2)]
}

fn four_players() -> Vec<Player> {
    vec![
        Player::new("P1", 10.0, Role::new(1)),
        Player::new("P2", 20.0, Role::new(1)).with_captain(true),
        Player::new("P3", 15.0, Role::new(2)),
        Player::new("P4", 25.0, Role::new(2)).with_captain(true),
    ]
}

#[test]
fn test_roster_infers_team_count() {
    let roster = Roster::new(four_players(), &roles(), None).unwrap();
    assert_eq!(roster.team_count(), 2);
    assert_eq!(roster.role_count(), 2);
    assert_eq!(roster.len(), 4);
    assert_eq!(roster.captain_count(), 2);
    assert_eq!(roster.player_index("P3"), Some(2));
}

#[test]
fn test_roster_sorts_and_dedups_roles() {
    let roles = [Role::new(2), Role::new(1), Role::new(2)];
    let roster = Roster::new(four_players(), &roles, Some(2)).unwrap();
    assert_eq!(roster.roles(), &[Role::new(1), Role::new(2)]);
}

#[test]
fn test_roster_rejects_duplicate_names() {
    let mut players = four_players();
    players[1] = Player::new("P1", 20.0, Role::new(1));
    let err = Roster::new(players, &roles(), None).unwrap_err();
    assert!(matches!(err, RosterForgeError::Structural(msg) if msg.contains("P1")));
}

#[test]
fn test_roster_rejects_unknown_role() {
    let mut players = four_players();
    players[3] = Player::new("P4", 25.0, Role::new(7));
    let err = Roster::new(players, &roles(), None).unwrap_err();
    assert!(matches!(err, RosterForgeError::Structural(msg) if msg.contains("unknown roles")));
}

#[test]
fn test_roster_rejects_unequal_role_counts() {
    let players = vec![
        Player::new("P1", 10.0, Role::new(1)),
        Player::new("P2", 20.0, Role::new(1)),
        Player::new("P3", 15.0, Role::new(1)),
        Player::new("P4", 25.0, Role::new(2)),
    ];
    let err = Roster::new(players, &roles(), None).unwrap_err();
    assert!(matches!(err, RosterForgeError::Structural(_)));

    // Explicit team count still requires one player per role per team.
    let players = vec![
        Player::new("P1", 10.0, Role::new(1)),
        Player::new("P2", 20.0, Role::new(1)),
        Player::new("P3", 15.0, Role::new(1)),
        Player::new("P4", 25.0, Role::new(2)),
    ];
    let err = Roster::new(players, &roles(), Some(2)).unwrap_err();
    assert!(matches!(err, RosterForgeError::Structural(msg) if msg.contains("role 1")));
}

#[test]
fn test_roster_rejects_indivisible_count() {
    let err = Roster::new(four_players(), &roles(), Some(3)).unwrap_err();
    assert!(matches!(err, RosterForgeError::Structural(msg) if msg.contains("player count")));
}

#[test]
fn test_roster_rejects_missing_role_when_inferring() {
    let roles = [Role::new(1), Role::new(2), Role::new(3)];
    let err = Roster::new(four_players(), &roles, None).unwrap_err();
    assert!(matches!(err, RosterForgeError::Structural(msg) if msg.contains("don't match")));
}

#[test]
fn test_roster_rejects_zero_teams() {
    let err = Roster::new(four_players(), &roles(), Some(0)).unwrap_err();
    assert!(matches!(err, RosterForgeError::Config(_)));
}

#[test]
fn test_avoidance_pairs_skip_unknown_targets() {
    let mut players = four_players();
    players[0] = Player::new("P1", 10.0, Role::new(1)).with_avoid("P4");
    players[3] = Player::new("P4", 25.0, Role::new(2)).with_avoid("Nobody");
    let roster = Roster::new(players, &roles(), None).unwrap();

    assert_eq!(roster.avoidance_pairs(), vec![AvoidancePair { from: 0, to: 3 }]);
    assert_eq!(roster.unresolved_avoids(), vec![("P4", "Nobody")]);
}

#[test]
fn test_self_avoidance_is_dropped() {
    let mut players = four_players();
    players[1] = Player::new("P2", 20.0, Role::new(1)).with_avoid("P2");
    let roster = Roster::new(players, &roles(), None).unwrap();

    assert!(roster.avoidance_pairs().is_empty());
    assert!(roster.unresolved_avoids().is_empty());
}

#[test]
fn test_mutual_avoidance_yields_two_pairs() {
    let mut players = four_players();
    players[0] = Player::new("P1", 10.0, Role::new(1)).with_avoid("P3");
    players[2] = Player::new("P3", 15.0, Role::new(2)).with_avoid("P1");
    let roster = Roster::new(players, &roles(), None).unwrap();

    let pairs = roster.avoidance_pairs();
    assert_eq!(pairs.len(), 2);
    assert!(pairs.contains(&AvoidancePair { from: 0, to: 2 }));
    assert!(pairs.contains(&AvoidancePair { from: 2, to: 0 }));
}

#[test]
fn test_captain_policy_parse() {
    assert_eq!(CaptainPolicy::parse("none", true).unwrap(), CaptainPolicy::None);
    assert_eq!(
        CaptainPolicy::parse("at_least_one", false).unwrap(),
        CaptainPolicy::at_least_one(false)
    );
    let separate = CaptainPolicy::parse("separate", true).unwrap();
    assert_eq!(separate.rule(), Some(CaptainRule::Separate));
    assert!(separate.is_hard());
    assert_eq!(separate.name(), "separate");

    let err = CaptainPolicy::parse("two_per_team", false).unwrap_err();
    assert!(matches!(err, RosterForgeError::Config(_)));
}

#[test]
fn test_preset_resolution() {
    let roster = Roster::new(four_players(), &roles(), None).unwrap();

    assert_eq!(Preset::new("P3", 2).resolve(&roster).unwrap(), (2, 1));
    assert!(matches!(
        Preset::new("Ghost", 1).resolve(&roster),
        Err(RosterForgeError::Config(_))
    ));
    assert!(matches!(
        Preset::new("P3", 0).resolve(&roster),
        Err(RosterForgeError::Config(_))
    ));
    assert!(matches!(
        Preset::new("P3", 3).resolve(&roster),
        Err(RosterForgeError::Config(_))
    ));
}

#[test]
fn test_role_weights_validation() {
    let weights = RoleWeights::new().with_weight(Role::new(2), 1.25);
    assert!(weights.validate(&roles()).is_ok());
    assert_eq!(weights.weight(Role::new(1)), 1.0);

    let undeclared = RoleWeights::new().with_weight(Role::new(9), 2.0);
    assert!(matches!(
        undeclared.validate(&roles()),
        Err(RosterForgeError::Config(_))
    ));

    let nan = RoleWeights::new().with_weight(Role::new(1), f64::NAN);
    assert!(nan.validate(&roles()).is_err());
}

#[test]
fn test_objective_weights_validation() {
    assert!(ObjectiveWeights::default().validate().is_ok());
    assert!(ObjectiveWeights::new(1.0, 0.0, 0.0).validate().is_ok());
    assert!(ObjectiveWeights::new(-1.0, 1.0, 5.0).validate().is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_role_deserializes_from_int_and_string_keys() {
    use std::collections::BTreeMap;

    let from_ints: BTreeMap<Role, f64> = serde_yaml::from_str("1: 1.5\n2: 0.5\n").unwrap();
    assert_eq!(from_ints.get(&Role::new(1)), Some(&1.5));

    let from_strings: BTreeMap<Role, f64> = serde_yaml::from_str("\"3\": 2.0\n").unwrap();
    assert_eq!(from_strings.get(&Role::new(3)), Some(&2.0));
}
