//! Roster fixtures.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rosterforge_core::{Player, Role, Roster};

/// Roles `1..=count`.
pub fn roles(count: u32) -> Vec<Role> {
    (1..=count).map(Role::new).collect()
}

/// Four players, two roles, two teams. P2 and P4 are captains.
///
/// Scaled by 100 the skills are 1000/2000/1500/2500, so the only balanced
/// split is {P1, P4} against {P2, P3} at 35 each.
pub fn four_players() -> Vec<Player> {
    vec![
        Player::new("P1", 10.0, Role::new(1)),
        Player::new("P2", 20.0, Role::new(1)).with_captain(true),
        Player::new("P3", 15.0, Role::new(2)),
        Player::new("P4", 25.0, Role::new(2)).with_captain(true),
    ]
}

/// [`four_players`] as a two-team roster.
pub fn four_player_roster() -> Roster {
    roster_with(four_players(), 2, Some(2))
}

/// [`four_players`] with captaincy limited to the named players.
pub fn four_player_roster_with_captains(captains: &[&str]) -> Roster {
    let players = four_players()
        .into_iter()
        .map(|p| {
            let is_captain = captains.contains(&p.name());
            p.with_captain(is_captain)
        })
        .collect();
    roster_with(players, 2, Some(2))
}

/// Builds a roster over roles `1..=role_count`.
///
/// # Panics
///
/// Panics if the players do not form a valid roster.
pub fn roster_with(players: Vec<Player>, role_count: u32, teams: Option<usize>) -> Roster {
    match Roster::new(players, &roles(role_count), teams) {
        Ok(roster) => roster,
        Err(err) => panic!("invalid fixture roster: {err}"),
    }
}

/// Shape of a generated roster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomRoster {
    pub teams: usize,
    pub roles: u32,
    /// Chance that a player is a captain.
    pub captain_rate: f64,
    /// Chance that a player avoids another random player.
    pub avoid_rate: f64,
}

impl Default for RandomRoster {
    fn default() -> Self {
        Self {
            teams: 2,
            roles: 3,
            captain_rate: 0.3,
            avoid_rate: 0.2,
        }
    }
}

impl RandomRoster {
    pub fn new(teams: usize, roles: u32) -> Self {
        Self {
            teams,
            roles,
            ..Self::default()
        }
    }

    pub fn with_captain_rate(mut self, rate: f64) -> Self {
        self.captain_rate = rate;
        self
    }

    pub fn with_avoid_rate(mut self, rate: f64) -> Self {
        self.avoid_rate = rate;
        self
    }

    /// Players in shuffled order, one per (team, role) slot, with skills in
    /// `1.0..50.0` rounded to one decimal.
    pub fn players(&self, seed: u64) -> Vec<Player> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let count = self.teams * self.roles as usize;
        let names: Vec<String> = (1..=count).map(|i| format!("Player {:02}", i)).collect();

        let mut players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let role = Role::new(i as u32 % self.roles + 1);
                let skill = (rng.random_range(1.0..50.0_f64) * 10.0).round() / 10.0;
                let mut player = Player::new(name.clone(), skill, role)
                    .with_captain(rng.random_bool(self.captain_rate));
                if count > 1 && rng.random_bool(self.avoid_rate) {
                    let mut other = rng.random_range(0..count - 1);
                    if other >= i {
                        other += 1;
                    }
                    player = player.with_avoid(names[other].clone());
                }
                player
            })
            .collect();
        players.shuffle(&mut rng);
        players
    }

    /// A validated roster generated from `seed`.
    pub fn roster(&self, seed: u64) -> Roster {
        roster_with(self.players(seed), self.roles, Some(self.teams))
    }
}
