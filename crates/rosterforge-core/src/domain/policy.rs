//! Captain policies, objective weights and presets.

use std::fmt;

use super::Roster;
use crate::error::{Result, RosterForgeError};

/// How captains should be spread across teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptainRule {
    /// Every team should have at least one captain.
    AtLeastOne,
    /// No team should have more than one captain.
    Separate,
}

impl CaptainRule {
    pub fn as_str(self) -> &'static str {
        match self {
            CaptainRule::AtLeastOne => "at_least_one",
            CaptainRule::Separate => "separate",
        }
    }
}

impl fmt::Display for CaptainRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captain distribution policy, enforced either as a hard constraint or as a
/// soft penalty.
///
/// # Examples
///
/// ```
/// use rosterforge_core::{CaptainPolicy, CaptainRule};
///
/// let policy = CaptainPolicy::parse("separate", true).unwrap();
/// assert_eq!(policy.rule(), Some(CaptainRule::Separate));
/// assert!(policy.is_hard());
///
/// assert!(CaptainPolicy::parse("everyone", false).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CaptainPolicy {
    /// No captain-related variables or penalties.
    #[default]
    None,
    /// A captain rule with its requested hardness.
    Rule { rule: CaptainRule, hard: bool },
}

impl CaptainPolicy {
    pub fn at_least_one(hard: bool) -> Self {
        CaptainPolicy::Rule {
            rule: CaptainRule::AtLeastOne,
            hard,
        }
    }

    pub fn separate(hard: bool) -> Self {
        CaptainPolicy::Rule {
            rule: CaptainRule::Separate,
            hard,
        }
    }

    /// Parses a configured policy name (`none`, `at_least_one`, `separate`).
    ///
    /// # Errors
    ///
    /// Returns [`RosterForgeError::Config`] for any other name.
    pub fn parse(name: &str, hard: bool) -> Result<Self> {
        match name.trim() {
            "none" => Ok(CaptainPolicy::None),
            "at_least_one" => Ok(Self::at_least_one(hard)),
            "separate" => Ok(Self::separate(hard)),
            other => Err(RosterForgeError::Config(format!(
                "captain_policy must be one of: none, at_least_one, separate (got '{}')",
                other
            ))),
        }
    }

    pub fn rule(&self) -> Option<CaptainRule> {
        match self {
            CaptainPolicy::None => None,
            CaptainPolicy::Rule { rule, .. } => Some(*rule),
        }
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, CaptainPolicy::Rule { hard: true, .. })
    }

    pub fn name(&self) -> &'static str {
        self.rule().map_or("none", CaptainRule::as_str)
    }
}

/// Weights of the three objective terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectiveWeights {
    pub balance: f64,
    pub conflict: f64,
    pub captain: f64,
}

impl ObjectiveWeights {
    pub fn new(balance: f64, conflict: f64, captain: f64) -> Self {
        Self {
            balance,
            conflict,
            captain,
        }
    }

    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("balance_weight", self.balance),
            ("conflict_weight", self.conflict),
            ("captain_weight", self.captain),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RosterForgeError::Config(format!(
                    "{} must be a non-negative number (got {})",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::new(1.0, 1.0, 5.0)
    }
}

/// A forced pairing of a player with a 1-based team label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    player: String,
    team: usize,
}

impl Preset {
    pub fn new(player: impl Into<String>, team: usize) -> Self {
        Self {
            player: player.into(),
            team,
        }
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// The 1-based team label.
    pub fn team(&self) -> usize {
        self.team
    }

    /// Resolves this preset to a `(player index, 0-based team index)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`RosterForgeError::Config`] if the player is unknown or the
    /// team label is outside `1..=team_count`.
    pub fn resolve(&self, roster: &Roster) -> Result<(usize, usize)> {
        let player = roster.player_index(&self.player).ok_or_else(|| {
            RosterForgeError::Config(format!(
                "preset player '{}' not found in signups",
                self.player
            ))
        })?;
        if self.team < 1 || self.team > roster.team_count() {
            return Err(RosterForgeError::Config(format!(
                "preset team index for '{}' out of range 1..{} (got {})",
                self.player,
                roster.team_count(),
                self.team
            )));
        }
        Ok((player, self.team - 1))
    }
}
