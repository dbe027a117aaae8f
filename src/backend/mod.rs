//! Boolean solver backend: the external collaborator from §6 capable of
//! incremental SAT solving and weighted pseudo-boolean minimization.
//!
//! [`SatBackend`] is the trait the solver driver (§4.4) is written against;
//! [`DpllBackend`] is the crate's own reference implementation, grounded on
//! the hand-rolled DPLL solver pattern package managers in this space tend to
//! reach for (there is no mature "weighted PBO over SAT" crate on
//! crates.io) rather than on any single external SAT library. `varisat` is
//! kept as a dev-dependency purely to cross-check [`DpllBackend`]'s plain-SAT
//! behavior in property tests, the same way the teacher crate this was
//! grounded on keeps it as a dev-only proptest oracle.

mod engine;
mod types;

pub use types::{Assignment, Clause, Lit, PbAtMost, Var};

/// Options accepted by [`SatBackend::minimize`].
#[derive(Debug, Clone, Default)]
pub struct MinimizeOptions {
    /// Hint from §4.4 ("strategy hint `bottom-up`"): search for small-cost
    /// assignments first. The reference backend already does this by
    /// construction (branch-and-bound always improves towards zero), so the
    /// hint is accepted but has no further effect; a backend wrapping a
    /// black-box PBO solver would use it to pick a search direction.
    pub bottom_up: bool,
}

/// Trait for a boolean solver backend capable of incremental SAT solving and
/// weighted pseudo-boolean minimization (§6).
pub trait SatBackend {
    /// Allocates a fresh, previously unused variable.
    fn new_var(&mut self) -> Var;

    /// `backend.require(formula)`: permanently asserts a clause.
    fn require(&mut self, clause: Clause);

    /// `backend.require` specialized to a pseudo-boolean "at most" bound;
    /// used to pin a minimization's optimum (§4.4) and to prune enumeration
    /// (§4.5) without growing the plain-clause set.
    fn require_at_most(&mut self, terms: Vec<(Var, u64)>, bound: u64);

    /// `backend.forbid(formula)`: permanently excludes a formula. For the
    /// enumeration use in §4.5, callers pass `¬φ` (the negation of the
    /// assignment to forbid) built via [`Assignment::formula_over`] and
    /// literal negation; `forbid` and `require` perform the same operation,
    /// the distinct name preserves the spec's vocabulary at call sites.
    fn forbid(&mut self, clause: Clause) {
        self.require(clause)
    }

    /// `backend.solve()`.
    fn solve(&mut self) -> Option<Assignment>;

    /// `backend.solveAssuming(formula)`.
    fn solve_assuming(&mut self, assumed: &[Lit]) -> Option<Assignment>;

    /// `backend.minimize(current, terms, weights, {progress, strategy})`.
    ///
    /// Does *not* lock the optimum; the driver does that itself via
    /// [`SatBackend::require_at_most`] once it has decided the returned cost
    /// is the final optimum for this step (see §4.4).
    fn minimize(
        &mut self,
        terms: &[(Var, u64)],
        options: &MinimizeOptions,
        nudge: &mut dyn FnMut(),
    ) -> Option<(Assignment, u64)>;
}

/// Reference [`SatBackend`] built on a small in-crate DPLL solver (see
/// [`engine`]).
#[derive(Debug, Default)]
pub struct DpllBackend {
    num_vars: u32,
    clauses: Vec<Clause>,
    pb_constraints: Vec<PbAtMost>,
}

impl DpllBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clauses asserted so far, for diagnostics/logging.
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }
}

impl SatBackend for DpllBackend {
    fn new_var(&mut self) -> Var {
        let var = Var::new(self.num_vars);
        self.num_vars += 1;
        var
    }

    fn require(&mut self, clause: Clause) {
        if clause.is_tautology() {
            return;
        }
        self.clauses.push(clause);
    }

    fn require_at_most(&mut self, terms: Vec<(Var, u64)>, bound: u64) {
        self.pb_constraints.push(PbAtMost { terms, bound });
    }

    fn solve(&mut self) -> Option<Assignment> {
        engine::solve(self.num_vars, &self.clauses, &self.pb_constraints)
    }

    fn solve_assuming(&mut self, assumed: &[Lit]) -> Option<Assignment> {
        engine::solve_assuming(self.num_vars, &self.clauses, &self.pb_constraints, assumed)
    }

    fn minimize(
        &mut self,
        terms: &[(Var, u64)],
        _options: &MinimizeOptions,
        nudge: &mut dyn FnMut(),
    ) -> Option<(Assignment, u64)> {
        engine::minimize(self.num_vars, &self.clauses, &self.pb_constraints, terms, nudge)
    }
}
