//! Constructive starting assignment.
//!
//! A greedy pass fills role slots strongest player first, each onto the
//! weakest team that still has the player's slot open. A swap descent then
//! exchanges same-role players between teams while that strictly lowers the
//! cost: hard captain violations first, then the model objective. The result
//! is recorded on the [`Model`](crate::Model) as its incumbent, so an engine
//! whose budget runs out still has a feasible assignment to return.

use rosterforge_core::Roster;
use tracing::debug;

use crate::builder::TeamModel;
use crate::extract::{captain_violation, team_captains};

/// Upper bound on swaps taken by the descent.
const MAX_SWAPS: usize = 1_000;

const COST_EPSILON: f64 = 1e-9;

/// Cost of a placement, compared lexicographically.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlacementCost {
    /// Violations of a hard captain rule.
    hard: i64,
    /// Model objective of the placement.
    objective: f64,
}

impl PlacementCost {
    fn is_better_than(self, other: PlacementCost) -> bool {
        self.hard < other.hard
            || (self.hard == other.hard && self.objective < other.objective - COST_EPSILON)
    }
}

impl TeamModel {
    /// Builds a starting assignment and records it as the model's incumbent.
    ///
    /// Returns `false` when no feasible placement was found: presets take one
    /// role slot twice, or the descent could not satisfy a hard captain rule.
    /// The model is unchanged in that case.
    pub fn seed_incumbent(&mut self, roster: &Roster) -> bool {
        let Some(mut team_of) = self.construct(roster) else {
            debug!(event = "incumbent", seeded = false, reason = "presets collide");
            return false;
        };
        let swaps = self.improve(roster, &mut team_of);
        let valuation = self.valuation_for(roster, &team_of);
        let objective = self.model().objective_value(&valuation);
        let seeded = self.model_mut().set_incumbent(valuation);
        debug!(event = "incumbent", seeded, swaps, objective);
        seeded
    }

    /// Greedy 0-based team per player, or `None` if two presets share a
    /// role slot.
    fn construct(&self, roster: &Roster) -> Option<Vec<usize>> {
        let teams = self.team_count();
        let roles = roster.roles();
        let role_of = roster
            .players()
            .iter()
            .map(|player| roles.iter().position(|r| *r == player.role()))
            .collect::<Option<Vec<usize>>>()?;
        let skills = self.scaled_skills();
        let spreads_captains = self.captain_state().rule().is_some();
        let role_count = roles.len();

        let pinned = (0..roster.len()).filter(|p| self.preset(*p).is_some());
        let mut free: Vec<usize> = (0..roster.len())
            .filter(|p| self.preset(*p).is_none())
            .collect();
        free.sort_by(|a, b| skills[*b].cmp(&skills[*a]).then(a.cmp(b)));

        let mut open = vec![true; teams * role_count];
        let mut placed: Vec<Option<usize>> = vec![None; roster.len()];
        let mut scores = vec![0_i64; teams];
        let mut captains = vec![0_usize; teams];
        for p in pinned.chain(free) {
            let is_captain = roster.players()[p].is_captain();
            let slot_open = |t: usize| open[t * role_count + role_of[p]];
            let team = match self.preset(p) {
                Some(team) if slot_open(team) => team,
                Some(_) => return None,
                None => (0..teams).filter(|t| slot_open(*t)).min_by_key(|t| {
                    let crowd = if spreads_captains && is_captain { captains[*t] } else { 0 };
                    (crowd, scores[*t], *t)
                })?,
            };
            open[team * role_count + role_of[p]] = false;
            placed[p] = Some(team);
            scores[team] += skills[p];
            if is_captain {
                captains[team] += 1;
            }
        }

        placed.into_iter().collect()
    }

    /// Steepest-descent swaps of same-role players on different teams.
    /// Returns the number of swaps taken.
    fn improve(&self, roster: &Roster, team_of: &mut [usize]) -> usize {
        let players = roster.players();
        let movable: Vec<usize> = (0..roster.len())
            .filter(|p| self.preset(*p).is_none())
            .collect();

        let mut current = self.placement_cost(roster, team_of);
        let mut swaps = 0;
        while swaps < MAX_SWAPS {
            let mut best: Option<(usize, usize, PlacementCost)> = None;
            for (i, &a) in movable.iter().enumerate() {
                for &b in &movable[i + 1..] {
                    if team_of[a] == team_of[b] || players[a].role() != players[b].role() {
                        continue;
                    }
                    team_of.swap(a, b);
                    let cost = self.placement_cost(roster, team_of);
                    team_of.swap(a, b);
                    let bar = best.map_or(current, |(_, _, c)| c);
                    if cost.is_better_than(bar) {
                        best = Some((a, b, cost));
                    }
                }
            }
            let Some((a, b, cost)) = best else {
                break;
            };
            team_of.swap(a, b);
            current = cost;
            swaps += 1;
        }
        swaps
    }

    fn placement_cost(&self, roster: &Roster, team_of: &[usize]) -> PlacementCost {
        let state = self.captain_state();
        let violations: i64 = team_captains(roster, team_of, self.team_count())
            .iter()
            .map(|c| captain_violation(state, *c as i64))
            .sum();
        let deviation: i64 = self
            .team_scores(team_of)
            .iter()
            .map(|s| (s - self.target()).abs())
            .sum();
        let conflicts = self
            .conflicts()
            .iter()
            .filter(|c| team_of[c.from] == c.team && team_of[c.to] == c.team)
            .count();

        let coef = self.coefficients();
        let mut objective = coef.balance * deviation as f64 + coef.conflict * conflicts as f64;
        let mut hard = 0;
        if state.is_hard() {
            hard = violations;
        } else if state.is_penalized() {
            objective += coef.captain * violations as f64;
        }
        PlacementCost { hard, objective }
    }
}

#[cfg(test)]
#[path = "construct_tests.rs"]
mod tests;
