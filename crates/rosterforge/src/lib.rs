//! RosterForge - Balanced team building on an integer solver
//!
//! Splits signed-up players into equal teams with exactly one player per
//! role, balancing weighted skill while honoring avoidance requests,
//! captain policies and fixed placements.
//!
//! # Example
//!
//! ```
//! use rosterforge::prelude::*;
//!
//! let roles = [Role::new(1), Role::new(2)];
//! let players = vec![
//!     Player::new("P1", 10.0, Role::new(1)),
//!     Player::new("P2", 20.0, Role::new(1)).with_captain(true),
//!     Player::new("P3", 15.0, Role::new(2)),
//!     Player::new("P4", 25.0, Role::new(2)).with_captain(true),
//! ];
//! let roster = Roster::new(players, &roles, None).unwrap();
//!
//! let settings = BalanceSettings::new().with_captain_policy(CaptainPolicy::at_least_one(true));
//! let assignment = TeamBalancer::new().balance(&roster, &settings).unwrap();
//!
//! assert_eq!(assignment.diagnostics.status, SolveStatus::Optimal);
//! assert_eq!(assignment.diagnostics.target_score, 35.0);
//! assert!(assignment.diagnostics.teams.iter().all(|t| t.deviation == 0.0));
//! ```

mod balancer;
pub mod pipeline;

pub use balancer::TeamBalancer;
pub use pipeline::{run, settings_from_config, RunError, RunReport};

pub use rosterforge_config::{ConfigError, RosterConfig, TerminationConfig};
pub use rosterforge_core::{
    CaptainPolicy, CaptainRule, ObjectiveWeights, Player, Preset, Result, Role, RoleWeights,
    Roster, RosterForgeError,
};
pub use rosterforge_model::{
    Assignment, BalanceSettings, CaptainState, Diagnostics, FeasibilityWarning, ModelBuilder,
    SolveStatus, TeamDiagnostics,
};
pub use rosterforge_report::{
    read_signups, AssignmentsCsv, MarkdownReport, ReportError, TextSummary,
};
pub use rosterforge_solver::{GoodLpEngine, SolveParams, SolverEngine, SolverError};

#[cfg(feature = "console")]
pub use rosterforge_console as console;

pub mod prelude {
    pub use super::{
        Assignment, BalanceSettings, CaptainPolicy, Diagnostics, ObjectiveWeights, Player, Role,
        RoleWeights, Roster, RosterConfig, RosterForgeError, SolveStatus, TeamBalancer,
    };
}
