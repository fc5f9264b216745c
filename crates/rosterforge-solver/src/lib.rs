//! Solver engines for RosterForge.
//!
//! The core talks to a solver through [`SolverEngine`]: one synchronous call
//! with a time budget, a seed and a worker count. [`GoodLpEngine`] is the
//! default implementation.
//!
//! # Examples
//!
//! ```
//! use rosterforge_model::{LinearExpr, Model, SolveStatus};
//! use rosterforge_solver::{GoodLpEngine, SolveParams, SolverEngine};
//!
//! let mut model = Model::new();
//! let a = model.new_bool("a");
//! let b = model.new_bool("b");
//! model.add_eq("one", LinearExpr::sum([a, b]), 1);
//! model.minimize_term(a, 3.0);
//! model.minimize_term(b, 1.0);
//!
//! let outcome = GoodLpEngine::new().solve(&model, &SolveParams::new()).unwrap();
//! assert_eq!(outcome.status, SolveStatus::Optimal);
//! assert!(outcome.valuation.unwrap().is_set(b));
//! ```

mod backend;
mod deadline;
mod engine;

pub use backend::GoodLpEngine;
pub use deadline::run_with_deadline;
pub use engine::{SolveOutcome, SolveParams, SolverEngine, SolverError};
