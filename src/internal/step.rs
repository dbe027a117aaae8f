// SPDX-License-Identifier: MPL-2.0

//! `Step` machinery (component E, §3).

use crate::internal::atoms::AtomId;

/// A named cost axis: a weighted sum of atoms, minimized in sequence by
/// the solver driver (§4.4).
///
/// `optimum` is set exactly once, by the minimizer, after the driver locks
/// this step's minimal cost as a hard constraint.
#[derive(Debug, Clone)]
pub struct Step {
    name: &'static str,
    terms: Vec<AtomId>,
    weights: Vec<u64>,
    optimum: Option<u64>,
}

impl Step {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            terms: Vec::new(),
            weights: Vec::new(),
            optimum: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `addTerm(t, w)`: a no-op for `w == 0`, per §3.
    pub fn add_term(&mut self, atom: AtomId, weight: u64) {
        if weight == 0 {
            return;
        }
        self.terms.push(atom);
        self.weights.push(weight);
    }

    pub fn terms(&self) -> &[AtomId] {
        &self.terms
    }

    pub fn weighted_terms(&self) -> impl Iterator<Item = (AtomId, u64)> + '_ {
        self.terms.iter().copied().zip(self.weights.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn set_optimum(&mut self, optimum: u64) {
        self.optimum = Some(optimum);
    }

    /// The cost this step locked in, once minimized. Panics if read before
    /// minimization — a step's optimum is only ever consulted by the
    /// driver after the corresponding `minimize` call (§4.4).
    pub fn optimum(&self) -> u64 {
        self.optimum
            .expect("Step::optimum read before the step was minimized")
    }
}
