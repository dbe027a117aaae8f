//! A small DPLL solver with branch-and-bound pseudo-boolean minimization.
//!
//! This plays the role of the "Boolean solver backend" external collaborator
//! from §6: an incremental SAT solver capable of weighted pseudo-boolean
//! minimization. Unlike a production SAT engine (two-watched literals,
//! CDCL clause learning, VSIDS) this favors a short, obviously-correct
//! implementation: unit propagation to a fixpoint, then chronological
//! backtracking search, with pseudo-boolean "at most" constraints pruning
//! branches whose locked-in cost already meets or exceeds the best answer
//! found so far. Clause/variable volumes produced by the constraint core are
//! small enough (§2's own size budget) that this is not a bottleneck.

use super::types::{Assignment, Clause, Lit, PbAtMost, Var};

/// Partial assignment used during search: `None` means unassigned.
type Partial = Vec<Option<bool>>;

fn propagate(clauses: &[Clause], assign: &mut Partial) -> bool {
    loop {
        let mut changed = false;
        for clause in clauses {
            let mut satisfied = false;
            let mut unassigned_count = 0;
            let mut last_unassigned = None;
            for &lit in clause.literals() {
                match assign[lit.var().index() as usize] {
                    Some(v) if lit.satisfied_by(v) => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        unassigned_count += 1;
                        last_unassigned = Some(lit);
                    }
                }
            }
            if satisfied {
                continue;
            }
            if unassigned_count == 0 {
                return false;
            }
            if unassigned_count == 1 {
                let lit = last_unassigned.expect("unassigned_count == 1");
                assign[lit.var().index() as usize] = Some(lit.is_positive());
                changed = true;
            }
        }
        if !changed {
            return true;
        }
    }
}

fn pb_feasible(pb: &[PbAtMost], assign: &Partial) -> bool {
    pb.iter().all(|c| c.min_possible(assign) <= c.bound)
}

fn pick_unassigned(assign: &Partial) -> Option<Var> {
    assign
        .iter()
        .position(|v| v.is_none())
        .map(|i| Var::new(i as u32))
}

struct Search<'a> {
    clauses: &'a [Clause],
    pb: &'a [PbAtMost],
    objective: &'a [(Var, u64)],
    best: Option<(Partial, u64)>,
    nudge: &'a mut dyn FnMut(),
}

impl<'a> Search<'a> {
    fn objective_cost(&self, assign: &Partial) -> u64 {
        self.objective
            .iter()
            .filter(|(v, _)| assign[v.index() as usize] == Some(true))
            .map(|(_, w)| *w)
            .sum()
    }

    fn visit(&mut self, mut assign: Partial) {
        if !propagate(self.clauses, &mut assign) {
            return;
        }
        if !pb_feasible(self.pb, &assign) {
            return;
        }
        let cost_so_far = self.objective_cost(&assign);
        if let Some((_, best_cost)) = &self.best {
            if cost_so_far >= *best_cost {
                return;
            }
        }
        match pick_unassigned(&assign) {
            None => {
                let improves = match &self.best {
                    None => true,
                    Some((_, best_cost)) => cost_so_far < *best_cost,
                };
                if improves {
                    self.best = Some((assign, cost_so_far));
                    (self.nudge)();
                }
            }
            Some(var) => {
                for value in [false, true] {
                    let mut branch = assign.clone();
                    branch[var.index() as usize] = Some(value);
                    self.visit(branch);
                }
            }
        }
    }
}

fn to_assignment(num_vars: u32, partial: &Partial) -> Assignment {
    let mut values = rustc_hash::FxHashMap::default();
    for i in 0..num_vars {
        if let Some(v) = partial[i as usize] {
            values.insert(Var::new(i), v);
        }
    }
    Assignment::new(values)
}

/// Finds any assignment satisfying `clauses` and `pb`, or `None` if
/// unsatisfiable.
pub(super) fn solve(num_vars: u32, clauses: &[Clause], pb: &[PbAtMost]) -> Option<Assignment> {
    let mut search = Search {
        clauses,
        pb,
        objective: &[],
        best: None,
        nudge: &mut || {},
    };
    search.visit(vec![None; num_vars as usize]);
    search.best.map(|(p, _)| to_assignment(num_vars, &p))
}

/// Finds a satisfying assignment subject to the extra unit clauses in
/// `assumed`, without those assumptions becoming permanent.
pub(super) fn solve_assuming(
    num_vars: u32,
    clauses: &[Clause],
    pb: &[PbAtMost],
    assumed: &[Lit],
) -> Option<Assignment> {
    let mut with_assumptions: Vec<Clause> = clauses.to_vec();
    with_assumptions.extend(assumed.iter().map(|&l| Clause::unit(l)));
    solve(num_vars, &with_assumptions, pb)
}

/// Branch-and-bound weighted pseudo-boolean minimization of
/// `Σ weight · [var]` over `terms`, subject to `clauses` and `pb`.
///
/// Returns the minimizing assignment and its cost, or `None` if the
/// underlying clause set is itself unsatisfiable.
pub(super) fn minimize(
    num_vars: u32,
    clauses: &[Clause],
    pb: &[PbAtMost],
    terms: &[(Var, u64)],
    nudge: &mut dyn FnMut(),
) -> Option<(Assignment, u64)> {
    let mut search = Search {
        clauses,
        pb,
        objective: terms,
        best: None,
        nudge,
    };
    search.visit(vec![None; num_vars as usize]);
    search.best.map(|(p, cost)| (to_assignment(num_vars, &p), cost))
}
