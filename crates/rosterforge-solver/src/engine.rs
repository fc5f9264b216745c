//! The solver engine contract.

use std::time::Duration;

use rosterforge_model::{Model, SolveStatus, Valuation};
use thiserror::Error;

/// Failures of the engine machinery itself, as opposed to an infeasible
/// model (which is a [`SolveStatus`]).
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("solver backend error: {0}")]
    Backend(String),

    #[error("failed to spawn solver worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("solver worker stopped without returning a result")]
    WorkerLost,
}

/// Parameters passed at the solve call boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveParams {
    /// Upper bound on search time; `None` waits for the backend.
    pub time_limit: Option<Duration>,
    pub random_seed: u64,
    pub worker_count: usize,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            time_limit: Some(Duration::from_secs(30)),
            random_seed: 42,
            worker_count: 8,
        }
    }
}

impl SolveParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }
}

/// What an engine returns for a model.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Present exactly when `status` has a solution.
    pub valuation: Option<Valuation>,
    pub elapsed: Duration,
    /// Why no solution is available, if none is.
    pub reason: Option<String>,
}

impl SolveOutcome {
    pub fn solved(status: SolveStatus, valuation: Valuation, elapsed: Duration) -> Self {
        debug_assert!(status.has_solution());
        Self {
            status,
            valuation: Some(valuation),
            elapsed,
            reason: None,
        }
    }

    pub fn unsolved(reason: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            status: SolveStatus::InfeasibleOrUnknown,
            valuation: None,
            elapsed,
            reason: Some(reason.into()),
        }
    }
}

/// A synchronous, time-bounded "solve this model" capability.
///
/// Engines minimize [`Model::objective`] subject to every constraint and
/// variable domain, and return either a complete [`Valuation`] or
/// [`SolveStatus::InfeasibleOrUnknown`]. When the budget runs out before an
/// engine finds anything better, [`Model::incumbent`] is a valid answer with
/// [`SolveStatus::Feasible`].
///
/// # Determinism
///
/// Runs are reproducible for a fixed `random_seed` only when
/// `worker_count == 1`. With more workers an engine may race internal
/// strategies and return different optimal or near-optimal valuations for
/// identical inputs. Callers that need reproducible output must pin the
/// worker count to 1 and accept the slower search.
pub trait SolverEngine: Send + Sync {
    /// Short engine name for logs.
    fn name(&self) -> &'static str;

    /// Solves `model`, blocking for at most `params.time_limit` plus the
    /// cost of translating the model.
    fn solve(&self, model: &Model, params: &SolveParams) -> Result<SolveOutcome, SolverError>;
}

impl<E: SolverEngine + ?Sized> SolverEngine for &E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model, params: &SolveParams) -> Result<SolveOutcome, SolverError> {
        (**self).solve(model, params)
    }
}

impl<E: SolverEngine + ?Sized> SolverEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve(&self, model: &Model, params: &SolveParams) -> Result<SolveOutcome, SolverError> {
        (**self).solve(model, params)
    }
}
