//! Validated roster of players.

use std::collections::{BTreeMap, HashMap};

use super::{Player, Role};
use crate::error::{Result, RosterForgeError};

/// A directed avoidance relation: the player at `from` prefers not to share a
/// team with the player at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvoidancePair {
    pub from: usize,
    pub to: usize,
}

/// The validated input contract for model building.
///
/// Construction enforces:
/// - player names are unique
/// - every player's role is one of the declared roles
/// - player count equals `team_count * role_count`
/// - every role has exactly `team_count` players
///
/// When no team count is given it is inferred from the per-role player count,
/// which then requires the roster to cover exactly the declared roles.
#[derive(Debug, Clone)]
pub struct Roster {
    players: Vec<Player>,
    roles: Vec<Role>,
    team_count: usize,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Validates `players` against `roles` and builds a roster.
    ///
    /// # Errors
    ///
    /// - [`RosterForgeError::Config`] for an empty role list or a zero team count.
    /// - [`RosterForgeError::Structural`] for anything that prevents filling
    ///   every team with exactly one player per role.
    pub fn new(players: Vec<Player>, roles: &[Role], team_count: Option<usize>) -> Result<Self> {
        let mut roles = roles.to_vec();
        roles.sort_unstable();
        roles.dedup();
        if roles.is_empty() {
            return Err(RosterForgeError::Config("at least one role is required".into()));
        }
        if players.is_empty() {
            return Err(RosterForgeError::Structural("no players signed up".into()));
        }

        let mut index = HashMap::with_capacity(players.len());
        let mut duplicates = Vec::new();
        for (i, player) in players.iter().enumerate() {
            if !player.skill().is_finite() {
                return Err(RosterForgeError::Structural(format!(
                    "player '{}' has a non-finite skill",
                    player.name()
                )));
            }
            if index.insert(player.name().to_string(), i).is_some() {
                duplicates.push(player.name().to_string());
            }
        }
        if !duplicates.is_empty() {
            return Err(RosterForgeError::Structural(format!(
                "duplicate player names found: {:?}; names must be unique",
                duplicates
            )));
        }

        let mut counts: BTreeMap<Role, usize> = BTreeMap::new();
        for player in &players {
            *counts.entry(player.role()).or_default() += 1;
        }
        let unknown: Vec<Role> = counts
            .keys()
            .filter(|r| roles.binary_search(r).is_err())
            .copied()
            .collect();
        if !unknown.is_empty() {
            return Err(RosterForgeError::Structural(format!(
                "found unknown roles {:?}; allowed roles are {:?}",
                unknown.iter().map(|r| r.id()).collect::<Vec<_>>(),
                roles.iter().map(|r| r.id()).collect::<Vec<_>>()
            )));
        }

        let team_count = match team_count {
            Some(0) => {
                return Err(RosterForgeError::Config("num_teams must be positive".into()));
            }
            Some(n) => n,
            None => infer_team_count(&counts, &roles)?,
        };

        if players.len() != team_count * roles.len() {
            return Err(RosterForgeError::Structural(format!(
                "player count ({}) != num_teams ({}) * roles ({})",
                players.len(),
                team_count,
                roles.len()
            )));
        }
        for role in &roles {
            let count = counts.get(role).copied().unwrap_or(0);
            if count != team_count {
                return Err(RosterForgeError::Structural(format!(
                    "role {} has {} players but {} teams need exactly one each",
                    role, count, team_count
                )));
            }
        }

        Ok(Self {
            players,
            roles,
            team_count,
            index,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Declared roles, sorted ascending.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub fn team_count(&self) -> usize {
        self.team_count
    }

    pub fn player_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn captain_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_captain()).count()
    }

    /// Directed avoidance relations whose target is another known player,
    /// in roster order.
    ///
    /// A player who names themself is dropped here. Such a pair is always
    /// co-placed, so keeping it would add one conflict to every assignment
    /// (a constant objective term) and one to the reported conflict count.
    pub fn avoidance_pairs(&self) -> Vec<AvoidancePair> {
        self.players
            .iter()
            .enumerate()
            .filter_map(|(from, player)| {
                let to = self.player_index(player.avoid()?)?;
                (to != from).then_some(AvoidancePair { from, to })
            })
            .collect()
    }

    /// `(player, target)` names of avoid entries naming no known player.
    pub fn unresolved_avoids(&self) -> Vec<(&str, &str)> {
        self.players
            .iter()
            .filter_map(|p| {
                let target = p.avoid()?;
                self.player_index(target)
                    .is_none()
                    .then_some((p.name(), target))
            })
            .collect()
    }
}

fn infer_team_count(counts: &BTreeMap<Role, usize>, roles: &[Role]) -> Result<usize> {
    if !counts.keys().copied().eq(roles.iter().copied()) {
        return Err(RosterForgeError::Structural(format!(
            "dataset roles {:?} don't match configured roles {:?}",
            counts.keys().map(|r| r.id()).collect::<Vec<_>>(),
            roles.iter().map(|r| r.id()).collect::<Vec<_>>()
        )));
    }
    let mut values = counts.values().copied();
    let first = values.next().unwrap_or(0);
    if values.any(|c| c != first) {
        return Err(RosterForgeError::Structural(
            "each role must have the same number of players to form balanced teams".into(),
        ));
    }
    Ok(first)
}
