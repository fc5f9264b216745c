//! Scripted solver engines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rosterforge_model::{Model, SolveStatus, Valuation};
use rosterforge_solver::{SolveOutcome, SolveParams, SolverEngine, SolverError};

#[derive(Debug, Clone)]
enum Script {
    Outcome(SolveOutcome),
    Incumbent,
    WorkerLost,
}

/// An engine that returns a fixed answer and counts its calls.
#[derive(Debug)]
pub struct ScriptedEngine {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always returns `valuation` with `status`.
    pub fn returning(status: SolveStatus, valuation: Valuation) -> Self {
        Self::new(Script::Outcome(SolveOutcome::solved(
            status,
            valuation,
            Duration::from_millis(1),
        )))
    }

    /// Always reports infeasible-or-unknown.
    pub fn infeasible() -> Self {
        Self::new(Script::Outcome(SolveOutcome::unsolved(
            "scripted infeasible",
            Duration::from_millis(1),
        )))
    }

    /// Behaves like an engine whose budget always runs out: returns the
    /// model's incumbent as feasible, or infeasible-or-unknown without one.
    pub fn returning_incumbent() -> Self {
        Self::new(Script::Incumbent)
    }

    /// Always fails with [`SolverError::WorkerLost`].
    pub fn lost_worker() -> Self {
        Self::new(Script::WorkerLost)
    }

    /// Number of `solve` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SolverEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, model: &Model, _params: &SolveParams) -> Result<SolveOutcome, SolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let elapsed = Duration::from_millis(1);
        match &self.script {
            Script::Outcome(outcome) => Ok(outcome.clone()),
            Script::Incumbent => Ok(match model.incumbent() {
                Some(incumbent) => {
                    SolveOutcome::solved(SolveStatus::Feasible, incumbent.clone(), elapsed)
                }
                None => SolveOutcome::unsolved("time limit reached without a solution", elapsed),
            }),
            Script::WorkerLost => Err(SolverError::WorkerLost),
        }
    }
}
