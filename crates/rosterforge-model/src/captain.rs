//! Captain policy resolution.
//!
//! A hard captain rule that cannot hold by pigeonhole is never handed to the
//! solver. [`CaptainState::resolve`] checks the roster's captain count first
//! and falls back to the soft penalty with a [`FeasibilityWarning`].

use std::fmt;

use rosterforge_core::{CaptainPolicy, CaptainRule};

/// Non-fatal notice that a hard captain rule was relaxed to a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeasibilityWarning {
    /// `at_least_one` requested hard with fewer captains than teams.
    NotEnoughCaptains { captains: usize, teams: usize },
    /// `separate` requested hard with more captains than teams.
    TooManyCaptains { captains: usize, teams: usize },
}

impl FeasibilityWarning {
    pub fn rule(&self) -> CaptainRule {
        match self {
            FeasibilityWarning::NotEnoughCaptains { .. } => CaptainRule::AtLeastOne,
            FeasibilityWarning::TooManyCaptains { .. } => CaptainRule::Separate,
        }
    }
}

impl fmt::Display for FeasibilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeasibilityWarning::NotEnoughCaptains { captains, teams } => write!(
                f,
                "Not enough captains for 'at_least_one' hard constraint ({} captains, {} teams); downgrading to soft penalty.",
                captains, teams
            ),
            FeasibilityWarning::TooManyCaptains { captains, teams } => write!(
                f,
                "Too many captains for 'separate' hard constraint ({} captains, {} teams); downgrading to soft penalty.",
                captains, teams
            ),
        }
    }
}

/// Resolved captain handling for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptainState {
    /// No captain constraint or penalty.
    Disabled,
    /// The rule is a hard constraint on every team.
    Hard(CaptainRule),
    /// The rule was requested soft and is a penalty.
    Soft(CaptainRule),
    /// The rule was requested hard but cannot hold; it is a penalty.
    SoftFallback(CaptainRule),
}

impl CaptainState {
    /// Resolves `policy` against the roster's captain and team counts.
    ///
    /// Returns the state and, on a hard-to-soft transition, the warning that
    /// explains it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rosterforge_core::{CaptainPolicy, CaptainRule};
    /// use rosterforge_model::{CaptainState, FeasibilityWarning};
    ///
    /// let (state, warning) = CaptainState::resolve(CaptainPolicy::at_least_one(true), 1, 2);
    /// assert_eq!(state, CaptainState::SoftFallback(CaptainRule::AtLeastOne));
    /// assert_eq!(
    ///     warning,
    ///     Some(FeasibilityWarning::NotEnoughCaptains { captains: 1, teams: 2 })
    /// );
    ///
    /// let (state, warning) = CaptainState::resolve(CaptainPolicy::separate(true), 2, 2);
    /// assert_eq!(state, CaptainState::Hard(CaptainRule::Separate));
    /// assert!(warning.is_none());
    /// ```
    pub fn resolve(
        policy: CaptainPolicy,
        captains: usize,
        teams: usize,
    ) -> (CaptainState, Option<FeasibilityWarning>) {
        match policy {
            CaptainPolicy::None => (CaptainState::Disabled, None),
            CaptainPolicy::Rule { rule, hard: false } => (CaptainState::Soft(rule), None),
            CaptainPolicy::Rule {
                rule: CaptainRule::AtLeastOne,
                hard: true,
            } => {
                if captains < teams {
                    (
                        CaptainState::SoftFallback(CaptainRule::AtLeastOne),
                        Some(FeasibilityWarning::NotEnoughCaptains { captains, teams }),
                    )
                } else {
                    (CaptainState::Hard(CaptainRule::AtLeastOne), None)
                }
            }
            CaptainPolicy::Rule {
                rule: CaptainRule::Separate,
                hard: true,
            } => {
                if captains > teams {
                    (
                        CaptainState::SoftFallback(CaptainRule::Separate),
                        Some(FeasibilityWarning::TooManyCaptains { captains, teams }),
                    )
                } else {
                    (CaptainState::Hard(CaptainRule::Separate), None)
                }
            }
        }
    }

    pub fn rule(&self) -> Option<CaptainRule> {
        match self {
            CaptainState::Disabled => None,
            CaptainState::Hard(rule) | CaptainState::Soft(rule) | CaptainState::SoftFallback(rule) => {
                Some(*rule)
            }
        }
    }

    /// Whether the rule is modeled as a penalty term.
    pub fn is_penalized(&self) -> bool {
        matches!(self, CaptainState::Soft(_) | CaptainState::SoftFallback(_))
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, CaptainState::Hard(_))
    }
}

impl fmt::Display for CaptainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptainState::Disabled => f.write_str("none"),
            CaptainState::Hard(rule) => write!(f, "{} (hard)", rule),
            CaptainState::Soft(rule) => write!(f, "{} (soft)", rule),
            CaptainState::SoftFallback(rule) => write!(f, "{} (soft fallback)", rule),
        }
    }
}

#[cfg(test)]
#[path = "captain_tests.rs"]
mod tests;
