//! Basic types for the boolean solver backend.
//!
//! These mirror the usual DIMACS-style encoding: a [`Var`] is a dense
//! non-negative index, a [`Lit`] is a variable together with a polarity, and a
//! [`Clause`] is a disjunction of literals.

use std::fmt;

/// A boolean variable in the SAT/PB model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub(crate) u32);

impl Var {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}

/// A variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lit {
    var: Var,
    positive: bool,
}

impl Lit {
    /// The literal that is true exactly when `var` is true.
    pub fn positive(var: Var) -> Self {
        Self {
            var,
            positive: true,
        }
    }

    /// The literal that is true exactly when `var` is false.
    pub fn negative(var: Var) -> Self {
        Self {
            var,
            positive: false,
        }
    }

    pub fn var(self) -> Var {
        self.var
    }

    pub fn is_positive(self) -> bool {
        self.positive
    }

    pub fn negate(self) -> Self {
        Self {
            var: self.var,
            positive: !self.positive,
        }
    }

    /// Whether this literal is satisfied by `value` assigned to its variable.
    pub fn satisfied_by(self, value: bool) -> bool {
        value == self.positive
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.var)
        } else {
            write!(f, "¬{}", self.var)
        }
    }
}

/// A disjunction of literals: `conflict_c ∨ ¬fromVar ∨ formula(...)` and
/// friends from §3/§4.4 are built as values of this type.
#[derive(Debug, Clone, Default)]
pub struct Clause(pub Vec<Lit>);

impl Clause {
    pub fn new(literals: Vec<Lit>) -> Self {
        Self(literals)
    }

    pub fn unit(lit: Lit) -> Self {
        Self(vec![lit])
    }

    pub fn literals(&self) -> &[Lit] {
        &self.0
    }

    /// A clause containing both `l` and `¬l` is a tautology and can be
    /// dropped without changing satisfiability.
    pub fn is_tautology(&self) -> bool {
        self.0
            .iter()
            .any(|&l| self.0.iter().any(|&m| m == l.negate()))
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A pseudo-boolean "at most" constraint: `Σ wᵢ · [varᵢ] ≤ bound`.
///
/// Used both for the permanent locks the driver installs after each
/// `minimize` call (§4.4: "pins the optimum as a hard constraint") and, with
/// a fresh bound each try, for the linear search `minimize` performs
/// internally.
#[derive(Debug, Clone)]
pub struct PbAtMost {
    pub terms: Vec<(Var, u64)>,
    pub bound: u64,
}

impl PbAtMost {
    /// Smallest possible value of the weighted sum given a (possibly
    /// partial) assignment; `None` entries contribute nothing, so this is a
    /// valid lower bound usable for branch-and-bound pruning.
    pub fn min_possible(&self, assign: &[Option<bool>]) -> u64 {
        self.terms
            .iter()
            .filter(|(v, _)| assign[v.index() as usize] == Some(true))
            .map(|(_, w)| *w)
            .sum()
    }
}

/// A full or partial boolean assignment produced by the backend.
#[derive(Debug, Clone)]
pub struct Assignment {
    values: rustc_hash::FxHashMap<Var, bool>,
}

impl Assignment {
    pub(crate) fn new(values: rustc_hash::FxHashMap<Var, bool>) -> Self {
        Self { values }
    }

    /// `assignment.evaluate(atom)` from §6: truth value of a single literal.
    pub fn evaluate(&self, lit: Lit) -> bool {
        self.values
            .get(&lit.var())
            .map(|&v| lit.satisfied_by(v))
            .unwrap_or(false)
    }

    pub fn value_of(&self, var: Var) -> bool {
        self.values.get(&var).copied().unwrap_or(false)
    }

    /// `assignment.getTrueVars()` from §6.
    pub fn true_vars(&self) -> Vec<Var> {
        self.values
            .iter()
            .filter(|(_, &v)| v)
            .map(|(&v, _)| v)
            .collect()
    }

    /// `assignment.getWeightedSum(terms, weights)` from §6.
    pub fn weighted_sum(&self, terms: &[(Var, u64)]) -> u64 {
        terms
            .iter()
            .filter(|(v, _)| self.value_of(*v))
            .map(|(_, w)| *w)
            .sum()
    }

    /// `assignment.getFormula()` from §6, restricted to the atoms the caller
    /// cares about distinguishing (the full variable universe is usually far
    /// bigger than the handful of package-version atoms relevant to
    /// enumeration in §4.5).
    pub fn formula_over(&self, vars: &[Var]) -> Clause {
        vars.iter()
            .map(|&v| {
                if self.value_of(v) {
                    Lit::positive(v)
                } else {
                    Lit::negative(v)
                }
            })
            .collect()
    }
}
