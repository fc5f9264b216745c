//! Reading a solved [`TeamModel`] back into a labeled roster.

use rosterforge_core::{CaptainRule, Player, Result, Roster, RosterForgeError};

use crate::builder::TeamModel;
use crate::captain::{CaptainState, FeasibilityWarning};
use crate::model::VarId;
use crate::solution::{SolveStatus, Valuation};

/// A player with its 1-based team label.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedPlayer {
    pub player: Player,
    pub team: usize,
}

/// Per-team figures, unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamDiagnostics {
    /// 1-based team label.
    pub label: usize,
    pub score: f64,
    pub deviation: f64,
    pub captains: usize,
}

/// The objective split into its components, in model units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObjectiveBreakdown {
    /// Sum of scaled team deviations.
    pub total_deviation: i64,
    /// Number of (directed avoidance pair, team) co-placements.
    pub conflicts: usize,
    /// Sum of per-team captain rule violations; 0 unless the rule is a
    /// penalty.
    pub captain_violation: i64,
    /// Objective value reported by the valuation.
    pub objective: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub status: SolveStatus,
    pub teams: Vec<TeamDiagnostics>,
    /// Unscaled balancing target shared by all teams.
    pub target_score: f64,
    pub total_captains: usize,
    pub warnings: Vec<FeasibilityWarning>,
    pub objective: ObjectiveBreakdown,
}

impl Diagnostics {
    /// Warnings rendered as messages.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn team(&self, label: usize) -> Option<&TeamDiagnostics> {
        self.teams.iter().find(|t| t.label == label)
    }
}

/// The result of a successful balance: labeled players plus diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub players: Vec<AssignedPlayer>,
    pub diagnostics: Diagnostics,
}

impl Assignment {
    /// 1-based team label of a player.
    pub fn team_of(&self, name: &str) -> Option<usize> {
        self.players
            .iter()
            .find(|a| a.player.name() == name)
            .map(|a| a.team)
    }

    /// Members of the team with the given 1-based label, in roster order.
    pub fn members(&self, label: usize) -> impl Iterator<Item = &AssignedPlayer> {
        self.players.iter().filter(move |a| a.team == label)
    }

    pub fn team_count(&self) -> usize {
        self.diagnostics.teams.len()
    }
}

impl TeamModel {
    /// Reads a valuation back into an [`Assignment`].
    ///
    /// Scores, deviations and captain counts are recomputed from the
    /// assignment indicators in exact integer arithmetic and then unscaled.
    ///
    /// # Errors
    ///
    /// - [`RosterForgeError::SolverFailure`] if `status` carries no solution.
    /// - [`RosterForgeError::Internal`] if the valuation does not describe
    ///   one team per player and one player per (team, role) slot.
    pub fn extract(
        &self,
        roster: &Roster,
        status: SolveStatus,
        valuation: &Valuation,
    ) -> Result<Assignment> {
        if !status.has_solution() {
            return Err(RosterForgeError::SolverFailure(format!(
                "no feasible assignment found (status {}); try relaxing constraints or presets",
                status
            )));
        }
        if valuation.len() != self.model().var_count() {
            return Err(RosterForgeError::Internal(format!(
                "valuation has {} values for {} variables",
                valuation.len(),
                self.model().var_count()
            )));
        }

        let teams = self.team_count();
        let mut team_of = Vec::with_capacity(roster.len());
        for (p, player) in roster.players().iter().enumerate() {
            let set: Vec<usize> = (0..teams)
                .filter(|t| valuation.is_set(self.assignment(p, *t)))
                .collect();
            match set.as_slice() {
                [team] => team_of.push(*team),
                _ => {
                    return Err(RosterForgeError::Internal(format!(
                        "player '{}' has {} set assignment indicators",
                        player.name(),
                        set.len()
                    )));
                }
            }
        }

        for t in 0..teams {
            for role in roster.roles() {
                let holders = roster
                    .players()
                    .iter()
                    .zip(&team_of)
                    .filter(|(player, team)| **team == t && player.role() == *role)
                    .count();
                if holders != 1 {
                    return Err(RosterForgeError::Internal(format!(
                        "team {} has {} players in role {}",
                        t + 1,
                        holders,
                        role
                    )));
                }
            }
        }

        let scale = self.scale() as f64;
        let scores = self.team_scores(&team_of);
        let captains = team_captains(roster, &team_of, teams);

        let team_diagnostics: Vec<TeamDiagnostics> = (0..teams)
            .map(|t| TeamDiagnostics {
                label: t + 1,
                score: scores[t] as f64 / scale,
                deviation: (scores[t] - self.target()).abs() as f64 / scale,
                captains: captains[t],
            })
            .collect();

        let objective = ObjectiveBreakdown {
            total_deviation: scores.iter().map(|s| (s - self.target()).abs()).sum(),
            conflicts: self
                .conflicts()
                .iter()
                .filter(|c| team_of[c.from] == c.team && team_of[c.to] == c.team)
                .count(),
            captain_violation: if self.captain_state().is_penalized() {
                captains
                    .iter()
                    .map(|c| captain_violation(self.captain_state(), *c as i64))
                    .sum()
            } else {
                0
            },
            objective: self.model().objective_value(valuation),
        };

        let players = roster
            .players()
            .iter()
            .zip(&team_of)
            .map(|(player, team)| AssignedPlayer {
                player: player.clone(),
                team: team + 1,
            })
            .collect();

        Ok(Assignment {
            players,
            diagnostics: Diagnostics {
                status,
                teams: team_diagnostics,
                target_score: self.target() as f64 / scale,
                total_captains: roster.captain_count(),
                warnings: self.warnings().to_vec(),
                objective,
            },
        })
    }

    /// Completes a valuation of every model variable for a fixed choice of
    /// 0-based team per player.
    ///
    /// Auxiliary variables take the smallest values their constraints allow,
    /// which is what a minimizing solver settles on. This is how
    /// [`TeamModel::seed_incumbent`] turns its constructed placement into a
    /// warm start.
    pub fn valuation_for(&self, roster: &Roster, team_of: &[usize]) -> Valuation {
        let teams = self.team_count();
        let mut values = vec![0.0; self.model().var_count()];
        let mut set = |var: VarId, value: f64| values[var.index()] = value;

        for (p, team) in team_of.iter().enumerate() {
            set(self.assignment(p, *team), 1.0);
        }
        let scores = self.team_scores(team_of);
        let captains = team_captains(roster, team_of, teams);
        for t in 0..teams {
            set(self.score(t), scores[t] as f64);
            set(self.deviation(t), (scores[t] - self.target()).abs() as f64);
            set(self.captain_count(t), captains[t] as f64);
        }
        for conflict in self.conflicts() {
            let together = team_of[conflict.from] == conflict.team
                && team_of[conflict.to] == conflict.team;
            set(conflict.var, if together { 1.0 } else { 0.0 });
        }
        for (t, var) in self.captain_violations().iter().enumerate() {
            set(*var, captain_violation(self.captain_state(), captains[t] as i64) as f64);
        }
        Valuation::new(values)
    }

    pub(crate) fn team_scores(&self, team_of: &[usize]) -> Vec<i64> {
        let mut scores = vec![0_i64; self.team_count()];
        for (skill, team) in self.scaled_skills().iter().zip(team_of) {
            scores[*team] += skill;
        }
        scores
    }
}

pub(crate) fn team_captains(roster: &Roster, team_of: &[usize], teams: usize) -> Vec<usize> {
    let mut captains = vec![0_usize; teams];
    for (player, team) in roster.players().iter().zip(team_of) {
        if player.is_captain() {
            captains[*team] += 1;
        }
    }
    captains
}

pub(crate) fn captain_violation(state: CaptainState, captains: i64) -> i64 {
    match state.rule() {
        Some(CaptainRule::AtLeastOne) => (1 - captains).max(0),
        Some(CaptainRule::Separate) => (captains - 1).max(0),
        None => 0,
    }
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
