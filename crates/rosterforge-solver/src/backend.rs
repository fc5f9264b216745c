//! `good_lp` backed engine using the pure-Rust microlp solver.

use std::time::{Duration, Instant};

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolutionStatus, SolverModel, Variable, WithInitialSolution, WithTimeLimit,
};
use rosterforge_model::{Comparison, Model, SolveStatus, Valuation, VarDomain};
use tracing::debug;

use crate::deadline::run_with_deadline;
use crate::engine::{SolveOutcome, SolveParams, SolverEngine, SolverError};

/// Extra wait on top of the time limit for microlp to notice its deadline
/// and hand back its incumbent.
const DEADLINE_GRACE: Duration = Duration::from_secs(5);

/// Branch-and-bound over the LP relaxation via `good_lp`'s microlp backend.
///
/// microlp searches on a single thread and is deterministic; `random_seed`
/// and `worker_count` are accepted and logged. The time limit is handed to
/// microlp, which stops its search at the deadline and returns the best
/// assignment it has as [`SolveStatus::Feasible`]. The model's incumbent, if
/// any, is passed as a warm start and returned as `Feasible` when microlp
/// finds nothing better in time.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpEngine;

impl GoodLpEngine {
    pub fn new() -> Self {
        Self
    }
}

enum BackendResult {
    Solved { values: Vec<f64>, optimal: bool },
    TimedOut,
    Infeasible(&'static str),
    Failed(String),
}

impl SolverEngine for GoodLpEngine {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &Model, params: &SolveParams) -> Result<SolveOutcome, SolverError> {
        debug!(
            event = "engine_start",
            engine = self.name(),
            variables = model.var_count(),
            constraints = model.constraint_count(),
            random_seed = params.random_seed,
            worker_count = params.worker_count,
            time_limit_ms = params.time_limit.map(|l| l.as_millis() as u64),
        );

        let start = Instant::now();
        let limit = params.time_limit;
        let owned = model.clone();
        let result = run_with_deadline(
            "rosterforge-microlp",
            limit.map(|limit| limit + DEADLINE_GRACE),
            move || solve_with_microlp(&owned, limit),
        )?;
        let elapsed = start.elapsed();

        let outcome = match result {
            Some(BackendResult::Solved {
                values,
                optimal: true,
            }) => SolveOutcome::solved(SolveStatus::Optimal, Valuation::new(values), elapsed),
            Some(BackendResult::Solved {
                values,
                optimal: false,
            }) => {
                let found = Valuation::new(values);
                let best = match model.incumbent() {
                    Some(incumbent)
                        if model.objective_value(incumbent) < model.objective_value(&found) =>
                    {
                        incumbent.clone()
                    }
                    _ => found,
                };
                SolveOutcome::solved(SolveStatus::Feasible, best, elapsed)
            }
            Some(BackendResult::Infeasible(reason)) => SolveOutcome::unsolved(reason, elapsed),
            Some(BackendResult::Failed(message)) => return Err(SolverError::Backend(message)),
            Some(BackendResult::TimedOut) | None => match model.incumbent() {
                Some(incumbent) => {
                    SolveOutcome::solved(SolveStatus::Feasible, incumbent.clone(), elapsed)
                }
                None => SolveOutcome::unsolved("time limit reached without a solution", elapsed),
            },
        };

        debug!(
            event = "engine_end",
            engine = self.name(),
            status = %outcome.status,
            elapsed_ms = elapsed.as_millis() as u64,
        );
        Ok(outcome)
    }
}

fn solve_with_microlp(model: &Model, limit: Option<Duration>) -> BackendResult {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = model
        .variables()
        .iter()
        .map(|def| {
            let definition = variable().name(def.name());
            let definition = match def.domain() {
                VarDomain::Binary => definition.binary(),
                VarDomain::Integer { lower, upper } => {
                    definition.integer().min(lower as f64).max(upper as f64)
                }
            };
            vars.add(definition)
        })
        .collect();

    let mut objective = Expression::from(0.0);
    for (var, coef) in model.objective() {
        objective += *coef * handles[var.index()];
    }

    let mut problem = vars.minimise(objective).using(microlp);
    if let Some(limit) = limit {
        problem = problem.with_time_limit(limit.as_secs_f64());
    }
    if let Some(incumbent) = model.incumbent() {
        let hints = handles.iter().zip(incumbent.values()).map(|(v, x)| (*v, *x));
        problem = problem.with_initial_solution(hints);
    }
    for c in model.constraints() {
        let mut lhs = Expression::from(0.0);
        for (var, coef) in c.terms() {
            lhs += *coef as f64 * handles[var.index()];
        }
        let rhs = c.rhs() as f64;
        problem = problem.with(match c.comparison() {
            Comparison::Eq => constraint::eq(lhs, rhs),
            Comparison::Le => constraint::leq(lhs, rhs),
            Comparison::Ge => constraint::geq(lhs, rhs),
        });
    }

    match problem.solve() {
        Ok(solution) => BackendResult::Solved {
            optimal: matches!(solution.status(), SolutionStatus::Optimal),
            values: handles.iter().map(|v| solution.value(*v)).collect(),
        },
        Err(ResolutionError::Infeasible) => BackendResult::Infeasible("model is infeasible"),
        Err(ResolutionError::Unbounded) => BackendResult::Failed("model is unbounded".into()),
        // microlp reports a deadline with no assignment this way.
        Err(ResolutionError::Other(_)) if limit.is_some() => BackendResult::TimedOut,
        Err(other) => BackendResult::Failed(other.to_string()),
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
