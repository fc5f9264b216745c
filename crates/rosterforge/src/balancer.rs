//! Build, solve and extract in one call.

use std::time::Duration;

use rosterforge_core::{Result, Roster, RosterForgeError};
use rosterforge_model::{Assignment, BalanceSettings, ModelBuilder};
use rosterforge_solver::{GoodLpEngine, SolveParams, SolverEngine};
use tracing::{info, warn};

/// Runs a roster through model building, the solver engine and extraction.
///
/// Each call builds a fresh model; a balancer holds no state between calls
/// beyond its engine and solve parameters.
pub struct TeamBalancer<E = GoodLpEngine> {
    engine: E,
    params: SolveParams,
}

impl TeamBalancer<GoodLpEngine> {
    /// Creates a balancer on the default microlp engine.
    pub fn new() -> Self {
        Self::with_engine(GoodLpEngine::new())
    }
}

impl Default for TeamBalancer<GoodLpEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SolverEngine> TeamBalancer<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            params: SolveParams::default(),
        }
    }

    pub fn with_params(mut self, params: SolveParams) -> Self {
        self.params = params;
        self
    }

    /// Sets the time budget; `None` waits for the engine.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.params.time_limit = limit;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.params.random_seed = seed;
        self
    }

    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.params.worker_count = workers;
        self
    }

    pub fn params(&self) -> &SolveParams {
        &self.params
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Assigns every player of `roster` to a team.
    ///
    /// A greedy assignment is recorded on the model as its incumbent before
    /// the engine runs, so a budget too short to prove optimality still
    /// yields a [`SolveStatus::Feasible`](rosterforge_model::SolveStatus)
    /// assignment.
    ///
    /// # Errors
    ///
    /// - `Config` or `Structural` errors from model building, before the
    ///   engine is called.
    /// - `SolverFailure` when the engine finds no assignment or fails.
    /// - `Internal` if the engine's valuation is inconsistent.
    pub fn balance(&self, roster: &Roster, settings: &BalanceSettings) -> Result<Assignment> {
        let mut built = ModelBuilder::new(roster, settings).build()?;
        built.seed_incumbent(roster);
        let model = built.model();

        info!(
            event = "solve_start",
            engine = self.engine.name(),
            players = roster.len(),
            teams = roster.team_count(),
            roles = roster.role_count(),
            variables = model.var_count(),
            constraints = model.constraint_count(),
            time_limit_secs = self.params.time_limit.map_or(0, |l| l.as_secs()),
            worker_count = self.params.worker_count,
            random_seed = self.params.random_seed,
        );

        let outcome = match self.engine.solve(model, &self.params) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(event = "solve_end", status = "ERROR", reason = %err);
                return Err(RosterForgeError::SolverFailure(err.to_string()));
            }
        };

        let elapsed_ms = outcome.elapsed.as_millis() as u64;
        let Some(valuation) = outcome.valuation.as_ref().filter(|_| outcome.status.has_solution())
        else {
            let reason = outcome
                .reason
                .clone()
                .unwrap_or_else(|| "no solution returned".to_string());
            info!(
                event = "solve_end",
                status = %outcome.status,
                elapsed_ms = elapsed_ms,
                reason = %reason,
            );
            return Err(RosterForgeError::SolverFailure(format!(
                "no feasible assignment found ({}); try relaxing constraints or presets",
                reason
            )));
        };

        info!(
            event = "solve_end",
            status = %outcome.status,
            elapsed_ms = elapsed_ms,
            objective = model.objective_value(valuation),
        );

        built.extract(roster, outcome.status, valuation)
    }
}

#[cfg(test)]
#[path = "balancer_tests.rs"]
mod tests;
