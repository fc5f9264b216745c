//! Team-balancing model construction.
//!
//! [`ModelBuilder`] turns a validated [`Roster`] and [`BalanceSettings`] into
//! a [`TeamModel`]: the linear [`Model`] plus the variable tables needed to
//! read a solution back.

use rosterforge_core::{
    CaptainPolicy, CaptainRule, ObjectiveWeights, Preset, Result, RoleWeights, Roster,
    RosterForgeError,
};
use tracing::{debug, warn};

use crate::captain::{CaptainState, FeasibilityWarning};
use crate::model::{LinearExpr, Model, VarId};

/// Default integer factor applied to weighted skills.
pub const DEFAULT_SCALE: i64 = 100;

/// Largest magnitude accepted for a scaled weighted skill.
const MAX_SCALED_SKILL: f64 = 1e12;

/// Balancing parameters that are not part of the roster itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSettings {
    pub role_weights: RoleWeights,
    pub presets: Vec<Preset>,
    pub captain_policy: CaptainPolicy,
    pub weights: ObjectiveWeights,
    /// Integer factor applied to weighted skills before rounding.
    pub scale: i64,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            role_weights: RoleWeights::new(),
            presets: Vec::new(),
            captain_policy: CaptainPolicy::None,
            weights: ObjectiveWeights::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

impl BalanceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role_weights(mut self, role_weights: RoleWeights) -> Self {
        self.role_weights = role_weights;
        self
    }

    pub fn with_preset(mut self, player: impl Into<String>, team: usize) -> Self {
        self.presets.push(Preset::new(player, team));
        self
    }

    pub fn with_presets(mut self, presets: impl IntoIterator<Item = Preset>) -> Self {
        self.presets.extend(presets);
        self
    }

    pub fn with_captain_policy(mut self, policy: CaptainPolicy) -> Self {
        self.captain_policy = policy;
        self
    }

    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_scale(mut self, scale: i64) -> Self {
        self.scale = scale;
        self
    }

    /// Checks everything that does not depend on the roster.
    pub fn validate(&self) -> Result<()> {
        if self.scale < 1 {
            return Err(RosterForgeError::Config(format!(
                "scale_factor must be at least 1 (got {})",
                self.scale
            )));
        }
        self.weights.validate()
    }
}

/// Co-placement variable of one directed avoidance pair on one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictVar {
    pub from: usize,
    pub to: usize,
    pub team: usize,
    pub var: VarId,
}

/// A built model together with the tables that index into it.
#[derive(Debug, Clone)]
pub struct TeamModel {
    model: Model,
    players: usize,
    teams: usize,
    assign: Vec<VarId>,
    scores: Vec<VarId>,
    deviations: Vec<VarId>,
    captain_counts: Vec<VarId>,
    conflicts: Vec<ConflictVar>,
    captain_violations: Vec<VarId>,
    scaled_skills: Vec<i64>,
    target: i64,
    scale: i64,
    captain_state: CaptainState,
    warnings: Vec<FeasibilityWarning>,
    presets: Vec<Option<usize>>,
    coefficients: ObjectiveCoefficients,
}

/// Objective coefficients as applied to the model; 0 where a term is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObjectiveCoefficients {
    /// Per unit of scaled deviation.
    pub balance: f64,
    /// Per co-placement of a directed avoidance pair.
    pub conflict: f64,
    /// Per unit of captain rule violation.
    pub captain: f64,
}

impl TeamModel {
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn player_count(&self) -> usize {
        self.players
    }

    pub fn team_count(&self) -> usize {
        self.teams
    }

    /// Assignment indicator of `player` on 0-based `team`.
    #[inline]
    pub fn assignment(&self, player: usize, team: usize) -> VarId {
        self.assign[player * self.teams + team]
    }

    pub fn score(&self, team: usize) -> VarId {
        self.scores[team]
    }

    pub fn deviation(&self, team: usize) -> VarId {
        self.deviations[team]
    }

    pub fn captain_count(&self, team: usize) -> VarId {
        self.captain_counts[team]
    }

    pub fn conflicts(&self) -> &[ConflictVar] {
        &self.conflicts
    }

    /// Per-team captain penalty variables; empty unless the captain rule is
    /// penalized.
    pub fn captain_violations(&self) -> &[VarId] {
        &self.captain_violations
    }

    /// Scaled weighted skill per player, rounded half to even.
    pub fn scaled_skills(&self) -> &[i64] {
        &self.scaled_skills
    }

    /// Scaled balancing target (floor of total / teams).
    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn scale(&self) -> i64 {
        self.scale
    }

    pub fn captain_state(&self) -> CaptainState {
        self.captain_state
    }

    pub fn warnings(&self) -> &[FeasibilityWarning] {
        &self.warnings
    }

    /// 0-based preset team of `player`, if pinned.
    pub fn preset(&self, player: usize) -> Option<usize> {
        self.presets[player]
    }

    pub fn coefficients(&self) -> ObjectiveCoefficients {
        self.coefficients
    }

    pub(crate) fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }
}

/// Builds a [`TeamModel`] from a roster.
///
/// # Examples
///
/// ```
/// use rosterforge_core::{CaptainPolicy, Player, Role, Roster};
/// use rosterforge_model::{BalanceSettings, ModelBuilder};
///
/// let roles = [Role::new(1), Role::new(2)];
/// let roster = Roster::new(
///     vec![
///         Player::new("P1", 10.0, Role::new(1)),
///         Player::new("P2", 20.0, Role::new(1)).with_captain(true),
///         Player::new("P3", 15.0, Role::new(2)),
///         Player::new("P4", 25.0, Role::new(2)).with_captain(true),
///     ],
///     &roles,
///     Some(2),
/// )
/// .unwrap();
///
/// let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::at_least_one(true));
/// let built = ModelBuilder::new(&roster, &settings).build().unwrap();
///
/// assert_eq!(built.target(), 3500);
/// assert!(built.warnings().is_empty());
/// ```
pub struct ModelBuilder<'a> {
    roster: &'a Roster,
    settings: &'a BalanceSettings,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(roster: &'a Roster, settings: &'a BalanceSettings) -> Self {
        Self { roster, settings }
    }

    /// Validates the settings against the roster and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`RosterForgeError::Config`] for invalid weights, scale, role
    /// weights or presets. Nothing is built in that case.
    pub fn build(&self) -> Result<TeamModel> {
        let roster = self.roster;
        let settings = self.settings;

        settings.validate()?;
        settings.role_weights.validate(roster.roles())?;
        let presets = settings
            .presets
            .iter()
            .map(|preset| preset.resolve(roster))
            .collect::<Result<Vec<_>>>()?;
        let scaled_skills = self.scaled_skills()?;

        let players = roster.len();
        let teams = roster.team_count();
        let role_count = roster.role_count() as i64;
        let mut model = Model::new();

        let mut assign = Vec::with_capacity(players * teams);
        for p in 0..players {
            for t in 0..teams {
                assign.push(model.new_bool(format!("assign_{}_{}", p, t)));
            }
        }
        let x = |p: usize, t: usize| assign[p * teams + t];

        for p in 0..players {
            model.add_eq(
                format!("one_team_{}", p),
                LinearExpr::sum((0..teams).map(|t| x(p, t))),
                1,
            );
        }

        for t in 0..teams {
            for role in roster.roles() {
                let holders = roster
                    .players()
                    .iter()
                    .enumerate()
                    .filter(|(_, player)| player.role() == *role)
                    .map(|(p, _)| x(p, t));
                model.add_eq(
                    format!("role_{}_team_{}", role, t),
                    LinearExpr::sum(holders),
                    1,
                );
            }
        }

        for &(p, team) in &presets {
            for t in 0..teams {
                let pinned = i64::from(t == team);
                model.add_eq(format!("preset_{}_{}", p, t), x(p, t), pinned);
            }
        }

        // Team scores and deviations from the floor-divided target.
        let lowest: i64 = scaled_skills.iter().filter(|s| **s < 0).sum();
        let highest: i64 = scaled_skills.iter().filter(|s| **s > 0).sum();
        let total: i64 = scaled_skills.iter().sum();
        let target = total.div_euclid(teams as i64);
        let deviation_bound = (highest - target).max(target - lowest);

        let mut scores = Vec::with_capacity(teams);
        let mut deviations = Vec::with_capacity(teams);
        for t in 0..teams {
            let score = model.new_int(format!("score_{}", t), lowest, highest);
            let weighted = LinearExpr::weighted_sum(
                scaled_skills.iter().enumerate().map(|(p, s)| (x(p, t), *s)),
            );
            model.add_eq(format!("score_def_{}", t), score, weighted);
            let deviation = model.add_linearized_abs(
                format!("deviation_{}", t),
                LinearExpr::from(score) - target,
                deviation_bound,
            );
            scores.push(score);
            deviations.push(deviation);
        }

        for (player, target) in roster.unresolved_avoids() {
            warn!(
                event = "unknown_avoid",
                player = player,
                target = target,
                "avoid target is not on the roster; ignoring"
            );
        }
        let mut conflicts = Vec::new();
        for pair in roster.avoidance_pairs() {
            for t in 0..teams {
                let var = model.add_linearized_and(
                    format!("together_{}_{}_{}", pair.from, pair.to, t),
                    x(pair.from, t),
                    x(pair.to, t),
                );
                conflicts.push(ConflictVar {
                    from: pair.from,
                    to: pair.to,
                    team: t,
                    var,
                });
            }
        }

        let mut captain_counts = Vec::with_capacity(teams);
        for t in 0..teams {
            let count = model.new_int(format!("captains_{}", t), 0, role_count);
            let captains = roster
                .players()
                .iter()
                .enumerate()
                .filter(|(_, player)| player.is_captain())
                .map(|(p, _)| x(p, t));
            model.add_eq(format!("captains_def_{}", t), count, LinearExpr::sum(captains));
            captain_counts.push(count);
        }

        let (captain_state, warning) =
            CaptainState::resolve(settings.captain_policy, roster.captain_count(), teams);
        let mut warnings = Vec::new();
        if let Some(warning) = warning {
            warn!(
                event = "relaxation",
                rule = %warning.rule(),
                captains = roster.captain_count(),
                teams = teams,
                "{}",
                warning
            );
            warnings.push(warning);
        }

        let mut captain_violations = Vec::new();
        match captain_state {
            CaptainState::Disabled => {}
            CaptainState::Hard(CaptainRule::AtLeastOne) => {
                for (t, count) in captain_counts.iter().enumerate() {
                    model.add_ge(format!("captain_min_{}", t), *count, 1);
                }
            }
            CaptainState::Hard(CaptainRule::Separate) => {
                for (t, count) in captain_counts.iter().enumerate() {
                    model.add_le(format!("captain_max_{}", t), *count, 1);
                }
            }
            CaptainState::Soft(CaptainRule::AtLeastOne)
            | CaptainState::SoftFallback(CaptainRule::AtLeastOne) => {
                for (t, count) in captain_counts.iter().enumerate() {
                    let shortfall = model.new_int(format!("captain_shortfall_{}", t), 0, 1);
                    model.add_ge(
                        format!("captain_shortfall_def_{}", t),
                        shortfall,
                        LinearExpr::constant_only(1) - LinearExpr::from(*count),
                    );
                    captain_violations.push(shortfall);
                }
            }
            CaptainState::Soft(CaptainRule::Separate)
            | CaptainState::SoftFallback(CaptainRule::Separate) => {
                for (t, count) in captain_counts.iter().enumerate() {
                    let excess = model.new_int(format!("captain_excess_{}", t), 0, role_count);
                    model.add_ge(
                        format!("captain_excess_def_{}", t),
                        excess,
                        LinearExpr::from(*count) - 1,
                    );
                    captain_violations.push(excess);
                }
            }
        }

        let weights = settings.weights;
        let scale = settings.scale as f64;
        let mut coefficients = ObjectiveCoefficients::default();
        if weights.balance != 0.0 {
            coefficients.balance = weights.balance;
            for deviation in &deviations {
                model.minimize_term(*deviation, weights.balance);
            }
        }
        if weights.conflict != 0.0 && !conflicts.is_empty() {
            coefficients.conflict = (weights.conflict * scale).trunc();
            for conflict in &conflicts {
                model.minimize_term(conflict.var, coefficients.conflict);
            }
        }
        if weights.captain != 0.0 && !captain_violations.is_empty() {
            coefficients.captain = (weights.captain * scale).trunc();
            for violation in &captain_violations {
                model.minimize_term(*violation, coefficients.captain);
            }
        }

        let mut pinned = vec![None; players];
        for &(p, team) in &presets {
            pinned[p] = Some(team);
        }

        debug!(
            event = "model_built",
            players = players,
            teams = teams,
            variables = model.var_count(),
            constraints = model.constraint_count(),
            conflicts = conflicts.len(),
            captain_state = %captain_state,
            target_score = target,
        );

        Ok(TeamModel {
            model,
            players,
            teams,
            assign,
            scores,
            deviations,
            captain_counts,
            conflicts,
            captain_violations,
            scaled_skills,
            target,
            scale: settings.scale,
            captain_state,
            warnings,
            presets: pinned,
            coefficients,
        })
    }

    fn scaled_skills(&self) -> Result<Vec<i64>> {
        let scale = self.settings.scale as f64;
        self.roster
            .players()
            .iter()
            .map(|player| {
                let weighted = player.skill() * self.settings.role_weights.weight(player.role());
                // Ties go to the even neighbour: 10.125 * 100 -> 1012.
                let scaled = (weighted * scale).round_ties_even();
                if !scaled.is_finite() || scaled.abs() > MAX_SCALED_SKILL {
                    return Err(RosterForgeError::Config(format!(
                        "weighted skill of '{}' is out of range after scaling",
                        player.name()
                    )));
                }
                Ok(scaled as i64)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
