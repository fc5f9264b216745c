//! Linear encodings of non-linear relations.

use super::{LinearExpr, Model, VarId};

impl Model {
    /// Adds a boolean `y` with `y = a AND b` for boolean `a`, `b`:
    ///
    /// ```text
    /// y <= a
    /// y <= b
    /// y >= a + b - 1
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use rosterforge_model::{Model, Valuation};
    ///
    /// let mut model = Model::new();
    /// let a = model.new_bool("a");
    /// let b = model.new_bool("b");
    /// let y = model.add_linearized_and("both", a, b);
    ///
    /// assert!(model.is_feasible(&Valuation::new(vec![1.0, 1.0, 1.0])));
    /// assert!(!model.is_feasible(&Valuation::new(vec![1.0, 1.0, 0.0])));
    /// assert!(!model.is_feasible(&Valuation::new(vec![1.0, 0.0, 1.0])));
    /// # let _ = y;
    /// ```
    pub fn add_linearized_and(&mut self, name: impl Into<String>, a: VarId, b: VarId) -> VarId {
        let name = name.into();
        let y = self.new_bool(name.clone());
        self.add_le(format!("{}_le_a", name), y, a);
        self.add_le(format!("{}_le_b", name), y, b);
        self.add_ge(
            format!("{}_ge_ab", name),
            y,
            LinearExpr::from(a) + LinearExpr::from(b) - 1,
        );
        y
    }

    /// Adds an integer `d` in `0..=upper` with `d >= expr` and `d >= -expr`.
    ///
    /// Under minimization `d` settles on `|expr|`.
    pub fn add_linearized_abs(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        upper: i64,
    ) -> VarId {
        let name = name.into();
        let d = self.new_int(name.clone(), 0, upper.max(0));
        self.add_ge(format!("{}_pos", name), d, expr.clone());
        self.add_ge(format!("{}_neg", name), d, -expr);
        d
    }
}
