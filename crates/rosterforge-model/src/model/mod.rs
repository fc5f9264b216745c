//! Solver-independent linear integer model.
//!
//! Variables live in an arena owned by [`Model`] and are addressed by dense
//! [`VarId`]s. Constraints and the objective only hold ids, so a model can be
//! translated to any backend by walking [`Model::variables`] once and mapping
//! ids to backend handles by index.

mod linearize;


use std::fmt;
use std::ops::{Add, Neg, Sub};

use smallvec::SmallVec;

use crate::solution::Valuation;

/// Tolerance used when checking a valuation against constraints.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Dense index of a variable in a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarDomain {
    /// 0 or 1.
    Binary,
    /// Any integer in `lower..=upper`.
    Integer { lower: i64, upper: i64 },
}

impl VarDomain {
    pub fn lower(self) -> i64 {
        match self {
            VarDomain::Binary => 0,
            VarDomain::Integer { lower, .. } => lower,
        }
    }

    pub fn upper(self) -> i64 {
        match self {
            VarDomain::Binary => 1,
            VarDomain::Integer { upper, .. } => upper,
        }
    }
}

/// Definition of one variable in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    name: String,
    domain: VarDomain,
}

impl VarDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> VarDomain {
        self.domain
    }
}

/// Term list of a linear expression. Most constraints touch few variables.
pub type Terms = SmallVec<[(VarId, i64); 4]>;

/// An integer linear expression `Σ coef·var + constant`.
///
/// # Examples
///
/// ```
/// use rosterforge_model::{LinearExpr, Model};
///
/// let mut model = Model::new();
/// let a = model.new_bool("a");
/// let b = model.new_bool("b");
///
/// let expr = LinearExpr::from(a) + LinearExpr::term(b, 3) - 1;
/// assert_eq!(expr.terms().len(), 2);
/// assert_eq!(expr.constant(), -1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Terms,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single `coef·var` term.
    pub fn term(var: VarId, coef: i64) -> Self {
        let mut expr = Self::new();
        expr.add_term(var, coef);
        expr
    }

    pub fn constant_only(constant: i64) -> Self {
        Self {
            terms: Terms::new(),
            constant,
        }
    }

    /// Sum of variables with coefficient 1.
    pub fn sum(vars: impl IntoIterator<Item = VarId>) -> Self {
        Self::weighted_sum(vars.into_iter().map(|v| (v, 1)))
    }

    /// Sum of `coef·var` terms. Zero coefficients are dropped.
    pub fn weighted_sum(terms: impl IntoIterator<Item = (VarId, i64)>) -> Self {
        let mut expr = Self::new();
        for (var, coef) in terms {
            expr.add_term(var, coef);
        }
        expr
    }

    /// Adds `coef·var`, merging with an existing term on the same variable.
    pub fn add_term(&mut self, var: VarId, coef: i64) {
        if coef == 0 {
            return;
        }
        match self.terms.iter().position(|(v, _)| *v == var) {
            Some(pos) => {
                self.terms[pos].1 += coef;
                if self.terms[pos].1 == 0 {
                    self.terms.remove(pos);
                }
            }
            None => self.terms.push((var, coef)),
        }
    }

    pub fn with_term(mut self, var: VarId, coef: i64) -> Self {
        self.add_term(var, coef);
        self
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression under a valuation.
    pub fn evaluate(&self, valuation: &Valuation) -> f64 {
        self.terms
            .iter()
            .map(|(var, coef)| *coef as f64 * valuation.value(*var))
            .sum::<f64>()
            + self.constant as f64
    }
}

impl From<VarId> for LinearExpr {
    fn from(var: VarId) -> Self {
        LinearExpr::term(var, 1)
    }
}

impl From<i64> for LinearExpr {
    fn from(constant: i64) -> Self {
        LinearExpr::constant_only(constant)
    }
}

impl Add for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: LinearExpr) -> LinearExpr {
        for (var, coef) in rhs.terms {
            self.add_term(var, coef);
        }
        self.constant += rhs.constant;
        self
    }
}

impl Add<i64> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: i64) -> LinearExpr {
        self.constant += rhs;
        self
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(mut self) -> LinearExpr {
        for (_, coef) in self.terms.iter_mut() {
            *coef = -*coef;
        }
        self.constant = -self.constant;
        self
    }
}

impl Sub for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: LinearExpr) -> LinearExpr {
        self + (-rhs)
    }
}

impl Sub<i64> for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: i64) -> LinearExpr {
        self + (-rhs)
    }
}

/// Relation between the two sides of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Comparison::Eq => "==",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
        })
    }
}

/// A linear constraint in normal form: `Σ coef·var  cmp  rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: String,
    terms: Terms,
    comparison: Comparison,
    rhs: i64,
}

impl Constraint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn rhs(&self) -> i64 {
        self.rhs
    }

    /// Checks the constraint against a valuation within
    /// [`FEASIBILITY_TOLERANCE`].
    pub fn is_satisfied_by(&self, valuation: &Valuation) -> bool {
        let lhs: f64 = self
            .terms
            .iter()
            .map(|(var, coef)| *coef as f64 * valuation.value(*var))
            .sum();
        let rhs = self.rhs as f64;
        match self.comparison {
            Comparison::Eq => (lhs - rhs).abs() <= FEASIBILITY_TOLERANCE,
            Comparison::Le => lhs <= rhs + FEASIBILITY_TOLERANCE,
            Comparison::Ge => lhs >= rhs - FEASIBILITY_TOLERANCE,
        }
    }
}

/// A minimization model over integer and boolean variables.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<VarDef>,
    constraints: Vec<Constraint>,
    objective: Vec<(VarId, f64)>,
    incumbent: Option<Valuation>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a boolean variable.
    pub fn new_bool(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), VarDomain::Binary)
    }

    /// Adds an integer variable in `lower..=upper`.
    pub fn new_int(&mut self, name: impl Into<String>, lower: i64, upper: i64) -> VarId {
        debug_assert!(lower <= upper, "empty domain {}..={}", lower, upper);
        self.push_var(name.into(), VarDomain::Integer { lower, upper })
    }

    fn push_var(&mut self, name: String, domain: VarDomain) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VarDef { name, domain });
        id
    }

    /// Adds `lhs cmp rhs`, moving every constant to the right-hand side.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        lhs: impl Into<LinearExpr>,
        comparison: Comparison,
        rhs: impl Into<LinearExpr>,
    ) {
        let normalized = lhs.into() - rhs.into();
        self.constraints.push(Constraint {
            name: name.into(),
            rhs: -normalized.constant,
            terms: normalized.terms,
            comparison,
        });
    }

    pub fn add_eq(&mut self, name: impl Into<String>, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) {
        self.add_constraint(name, lhs, Comparison::Eq, rhs);
    }

    pub fn add_le(&mut self, name: impl Into<String>, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) {
        self.add_constraint(name, lhs, Comparison::Le, rhs);
    }

    pub fn add_ge(&mut self, name: impl Into<String>, lhs: impl Into<LinearExpr>, rhs: impl Into<LinearExpr>) {
        self.add_constraint(name, lhs, Comparison::Ge, rhs);
    }

    /// Adds `coef·var` to the minimized objective.
    pub fn minimize_term(&mut self, var: VarId, coef: f64) {
        if coef != 0.0 {
            self.objective.push((var, coef));
        }
    }

    pub fn variables(&self) -> &[VarDef] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &VarDef {
        &self.variables[id.0]
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Objective terms; the model is always minimized.
    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn var_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value under a valuation.
    pub fn objective_value(&self, valuation: &Valuation) -> f64 {
        self.objective
            .iter()
            .map(|(var, coef)| coef * valuation.value(*var))
            .sum()
    }

    /// Returns the first constraint or domain bound the valuation violates.
    pub fn first_violation(&self, valuation: &Valuation) -> Option<String> {
        if valuation.len() != self.variables.len() {
            return Some(format!(
                "valuation covers {} of {} variables",
                valuation.len(),
                self.variables.len()
            ));
        }
        for (i, def) in self.variables.iter().enumerate() {
            let value = valuation.value(VarId(i));
            let lower = def.domain.lower() as f64 - FEASIBILITY_TOLERANCE;
            let upper = def.domain.upper() as f64 + FEASIBILITY_TOLERANCE;
            if value < lower || value > upper {
                return Some(format!("{} = {} is outside its domain", def.name, value));
            }
        }
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied_by(valuation))
            .map(|c| format!("constraint {} is violated", c.name))
    }

    /// Checks every domain bound and constraint.
    pub fn is_feasible(&self, valuation: &Valuation) -> bool {
        self.first_violation(valuation).is_none()
    }

    /// Records a known feasible valuation that engines may warm start from
    /// and fall back to when their budget runs out.
    ///
    /// Returns `false` and keeps the previous incumbent if `valuation`
    /// violates the model.
    pub fn set_incumbent(&mut self, valuation: Valuation) -> bool {
        if !self.is_feasible(&valuation) {
            return false;
        }
        self.incumbent = Some(valuation);
        true
    }

    pub fn incumbent(&self) -> Option<&Valuation> {
        self.incumbent.as_ref()
    }
}
