//! Solver results as seen by the model layer.

use std::fmt;

use crate::model::VarId;

/// Outcome classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// Proven optimal.
    Optimal,
    /// A feasible solution without an optimality proof.
    Feasible,
    /// Infeasible, or no solution was found within the budget.
    InfeasibleOrUnknown,
}

impl SolveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::InfeasibleOrUnknown => "INFEASIBLE_OR_UNKNOWN",
        }
    }

    /// Whether a valuation is available to extract.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of every model variable, indexed by [`VarId`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Valuation {
    values: Vec<f64>,
}

impl Valuation {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Raw value of a variable. Unknown ids read as 0.
    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.index()).copied().unwrap_or(0.0)
    }

    /// Value rounded to the nearest integer.
    pub fn int_value(&self, var: VarId) -> i64 {
        self.value(var).round() as i64
    }

    /// Boolean reading of a 0/1 variable.
    pub fn is_set(&self, var: VarId) -> bool {
        self.value(var) > 0.5
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl FromIterator<f64> for Valuation {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
