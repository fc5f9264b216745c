//! Error types for RosterForge

use thiserror::Error;

/// Main error type for RosterForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterForgeError {
    /// Invalid policy name, preset, weight or other configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// The roster cannot fill every team with one player per role
    #[error("Structural infeasibility: {0}")]
    Structural(String),

    /// The solver found no usable assignment within its budget
    #[error("Solver failure: {0}")]
    SolverFailure(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RosterForgeError {
    /// Returns true for errors raised before any solver call.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RosterForgeError::Config(_) | RosterForgeError::Structural(_)
        )
    }
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterForgeError>;
