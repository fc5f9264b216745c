//! Linear integer model for RosterForge team balancing.
//!
//! This crate owns the core on both sides of the solver call:
//!
//! - [`ModelBuilder`] encodes a [`Roster`](rosterforge_core::Roster) as a
//!   [`Model`] of boolean assignment indicators, team score and deviation
//!   variables, co-placement variables for avoidance pairs and captain
//!   policy constraints or penalties.
//! - [`TeamModel::seed_incumbent`] records a constructed feasible
//!   assignment on the model for engines to warm start from.
//! - [`TeamModel::extract`] reads a [`Valuation`] back into an
//!   [`Assignment`] with per-team [`Diagnostics`].
//!
//! The model itself is solver independent; `rosterforge-solver` translates it
//! to a backend.

pub mod builder;
pub mod captain;
mod construct;
pub mod extract;
pub mod model;
pub mod solution;

pub use builder::{
    BalanceSettings, ConflictVar, ModelBuilder, ObjectiveCoefficients, TeamModel, DEFAULT_SCALE,
};
pub use captain::{CaptainState, FeasibilityWarning};
pub use extract::{AssignedPlayer, Assignment, Diagnostics, ObjectiveBreakdown, TeamDiagnostics};
pub use model::{Comparison, Constraint, LinearExpr, Model, VarDef, VarDomain, VarId};
pub use solution::{SolveStatus, Valuation};
