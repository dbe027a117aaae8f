// SPDX-License-Identifier: MPL-2.0

//! Solver driver (component G, §4.4): asserts clauses into the boolean
//! backend, runs the ordered sequence of lexicographic minimizations,
//! pins selected versions, and triggers error reporting.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::backend::{Assignment, Clause, Lit, MinimizeOptions, SatBackend, Var};
use crate::catalog::CatalogCache;
use crate::error::SolveError;
use crate::input::Input;
use crate::internal::analysis::Analysis;
use crate::internal::atoms::{package_version_atom, AtomTable};
use crate::internal::constraint_model::ConstraintFormulas;
use crate::internal::filter::AllowedVersions;
use crate::internal::objective::{add_previous_steps, add_update_steps};
use crate::internal::report::explain_conflict;
use crate::internal::step::Step;
use crate::package::Package;
use crate::pricer::{PriceMode, VersionPricer};
use crate::version::Version;
use crate::version_constraint::VersionConstraint;

/// Options accepted by [`solve`] (§6).
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Also return every optimum-equivalent solution (§4.5).
    pub all_answers: bool,
}

/// The outcome of a successful [`solve`] call (§6).
#[derive(Debug, Clone)]
pub struct Solution<P: Package, V: Version> {
    pub answer: HashMap<P, V>,
    pub needed_to_use_unanticipated_prereleases: bool,
    pub all_answers: Option<Vec<HashMap<P, V>>>,
}

/// Computes a version assignment satisfying `input`'s constraints and
/// optimal with respect to the lexicographic step sequence in §4.4.
///
/// `B` is the boolean solver backend (§6); a fresh one is allocated for
/// the duration of this call and discarded at its end (§5: "none of these
/// outlive the call"). `nudge` is invoked between backend minimization
/// calls so a host can yield, e.g. to refresh a progress UI (§5); it must
/// not re-enter the solver.
pub fn solve<P, V, VC, C, Pr, B>(
    input: &Input<P, V, VC>,
    catalog: &C,
    pricer: &Pr,
    options: &SolveOptions,
    nudge: &mut dyn FnMut(),
) -> Result<Solution<P, V>, SolveError<P>>
where
    P: Package,
    V: Version,
    VC: VersionConstraint<V>,
    C: CatalogCache<P, V, VC>,
    Pr: VersionPricer<V>,
    B: SatBackend + Default,
{
    info!(
        "solving: {} roots, {} top-level constraints",
        input.roots().len(),
        input.constraints().len()
    );

    let allowed = AllowedVersions::build(catalog, input.constraints()).map_err(|e| {
        let constraints: Vec<String> = e.constraints.iter().map(|c| c.raw().to_string()).collect();
        SolveError::no_version_satisfies_constraints(e.package, &constraints)
    })?;

    let mut atoms = AtomTable::new();
    let analysis = Analysis::run(
        catalog,
        &allowed,
        &mut atoms,
        input.roots(),
        input.constraints(),
        input.previous_solution(),
        |p| input.is_upgrading(p),
    );

    if !analysis.unknown_root_deps.is_empty() {
        return Err(SolveError::unknown_root_dependencies(analysis.unknown_root_deps));
    }

    debug!("{} reachable packages", analysis.reachable_packages.len());

    // Pre-register every atom the initial assertions will touch, so the
    // backend variable count fixed below does not need to grow afterwards.
    let mut relevant_packages: Vec<P> = analysis.reachable_packages.clone();
    for c in &analysis.constraints {
        if !relevant_packages.contains(&c.to_package) {
            relevant_packages.push(c.to_package.clone());
        }
    }
    let mut versions_of: HashMap<P, Vec<V>> = HashMap::new();
    for p in &relevant_packages {
        let vs = allowed.versions_of(catalog, p);
        atoms.package(&p.to_string());
        for v in &vs {
            atoms.package_version(&p.to_string(), &v.to_string());
        }
        versions_of.insert(p.clone(), vs);
    }
    for unknown in analysis.unknown_dependency_requirers.keys() {
        atoms.package(&unknown.to_string());
    }

    let mut backend = B::default();
    for _ in 0..atoms.len() {
        backend.new_var();
    }

    // Initial assertions (§4.4).
    for p in input.roots() {
        backend.require(Clause::unit(Lit::positive(atoms.package(&p.to_string()).as_var())));
    }

    for p in &analysis.reachable_packages {
        let vs = &versions_of[p];
        let package_var = atoms.package(&p.to_string()).as_var();
        let version_vars: Vec<Var> = vs
            .iter()
            .map(|v| atoms.package_version(&p.to_string(), &v.to_string()).as_var())
            .collect();
        for i in 0..version_vars.len() {
            for j in (i + 1)..version_vars.len() {
                backend.require(Clause::new(vec![
                    Lit::negative(version_vars[i]),
                    Lit::negative(version_vars[j]),
                ]));
            }
        }
        if !version_vars.is_empty() {
            let mut at_least_one = vec![Lit::negative(package_var)];
            at_least_one.extend(version_vars.iter().map(|&v| Lit::positive(v)));
            backend.require(Clause::new(at_least_one));
        }
        for &v in &version_vars {
            backend.require(Clause::new(vec![Lit::negative(v), Lit::positive(package_var)]));
        }
    }

    for p in &analysis.reachable_packages {
        for v in &versions_of[p] {
            let from_var = atoms.package_version(&p.to_string(), &v.to_string()).as_var();
            for dep in catalog.dependencies(p, v) {
                if dep.is_weak {
                    continue;
                }
                let target_var = atoms.package(&dep.to_package.to_string()).as_var();
                backend.require(Clause::new(vec![Lit::negative(from_var), Lit::positive(target_var)]));
            }
        }
    }

    let mut formulas = ConstraintFormulas::new();
    for c in &analysis.constraints {
        let target_versions = versions_of
            .get(&c.to_package)
            .cloned()
            .unwrap_or_else(|| allowed.versions_of(catalog, &c.to_package));
        if let Some(formula) = formulas.formula(&c.to_package.to_string(), &mut atoms, &target_versions, &c.constraint) {
            let mut lits = vec![Lit::positive(c.conflict_var.as_var())];
            if let Some(from_var) = c.from_var {
                lits.push(Lit::negative(from_var.as_var()));
            }
            lits.extend(formula.literals().iter().copied());
            backend.require(Clause::new(lits));
        }
    }

    let mut current = backend
        .solve()
        .ok_or_else(|| SolveError::internal("initial clause set is unsatisfiable"))?;

    // Step 1: unknown_packages.
    let mut unknown_packages_step = Step::new("unknown_packages");
    for unknown in analysis.unknown_dependency_requirers.keys() {
        unknown_packages_step.add_term(atoms.package(&unknown.to_string()), 1);
    }
    if let Some(assignment) = run_step(&mut backend, &mut unknown_packages_step, nudge) {
        current = assignment;
    }
    if unknown_packages_step.optimum() > 0 {
        let mut reasons = Vec::new();
        for (unknown, requirers) in &analysis.unknown_dependency_requirers {
            let unknown_var = atoms.package(&unknown.to_string()).as_var();
            if !current.value_of(unknown_var) {
                continue;
            }
            let selected_requirers: Vec<String> = requirers
                .iter()
                .filter(|r| current.value_of(r.as_var()))
                .map(|r| atoms.atom_str(*r).to_string())
                .collect();
            reasons.push(format!("* {unknown} (required by {})", selected_requirers.join(", ")));
        }
        return Err(SolveError::unknown_packages_required(reasons));
    }

    // Step 2: conflicts.
    let mut conflicts_step = Step::new("conflicts");
    for c in &analysis.constraints {
        conflicts_step.add_term(c.conflict_var, 1);
    }
    if let Some(assignment) = run_step(&mut backend, &mut conflicts_step, nudge) {
        current = assignment;
    }
    if conflicts_step.optimum() > 0 {
        let answer = decode_answer(&analysis.reachable_packages, &versions_of, &atoms, &current);
        let roots: HashSet<P> = input.roots().iter().cloned().collect();
        let mut messages = Vec::new();
        for c in &analysis.constraints {
            if !current.value_of(c.conflict_var.as_var()) {
                continue;
            }
            let selected_version = answer.get(&c.to_package).cloned().ok_or_else(|| {
                SolveError::internal(format!("conflict on {} but it has no selected version", c.to_package))
            })?;
            messages.push(explain_conflict(
                c,
                &selected_version,
                &analysis.constraints,
                catalog,
                &answer,
                &roots,
            ));
        }
        return Err(SolveError::constraint_conflict(messages));
    }

    // Step 3: unanticipated_prereleases.
    let mut prereleases_step = Step::new("unanticipated_prereleases");
    for p in &analysis.reachable_packages {
        for v in &versions_of[p] {
            if v.is_prerelease() && !input.is_anticipated_prerelease(p, v) {
                prereleases_step.add_term(atoms.package_version(&p.to_string(), &v.to_string()), 1);
            }
        }
    }
    if let Some(assignment) = run_step(&mut backend, &mut prereleases_step, nudge) {
        current = assignment;
    }
    let needed_to_use_unanticipated_prereleases = prereleases_step.optimum() > 0;

    let to_update: Vec<P> = analysis
        .reachable_packages
        .iter()
        .filter(|p| input.is_upgrading(*p))
        .cloned()
        .collect();

    // Step 4: previous-root incompatibility (conditional).
    let mut previous_root_incompat = Step::new("previous_root_incompat");
    let mut previous_root_major = Step::new("previous_root_major");
    let mut previous_root_minor = Step::new("previous_root_minor");
    let mut previous_root_patch = Step::new("previous_root_patch");
    let mut previous_root_rest = Step::new("previous_root_rest");
    for prev in &analysis.previous_root_dep_versions {
        let vs = &versions_of[&prev.package];
        add_previous_steps(
            &mut atoms,
            pricer,
            &prev.package.to_string(),
            vs,
            &prev.version,
            &mut previous_root_incompat,
            &mut previous_root_major,
            &mut previous_root_minor,
            &mut previous_root_patch,
            &mut previous_root_rest,
        );
    }
    if !input.allow_incompatible_update() {
        for p in &to_update {
            if !input.is_root_dependency(p) {
                continue;
            }
            if let Some(previous) = input.previous_version_of(p) {
                let partition = pricer.partition_versions(&versions_of[p], previous);
                for v in partition.older.iter().chain(partition.higher_major.iter()) {
                    previous_root_incompat.add_term(atoms.package_version(&p.to_string(), &v.to_string()), 1);
                }
            }
        }
        if let Some(assignment) = run_step(&mut backend, &mut previous_root_incompat, nudge) {
            current = assignment;
        }
    }

    // Step 5: update_{major,minor,patch,rest}.
    let mut update_major = Step::new("update_major");
    let mut update_minor = Step::new("update_minor");
    let mut update_patch = Step::new("update_patch");
    let mut update_rest = Step::new("update_rest");
    for p in &to_update {
        add_update_steps(
            &mut atoms,
            pricer,
            &p.to_string(),
            &versions_of[p],
            PriceMode::Update,
            &mut update_major,
            &mut update_minor,
            &mut update_patch,
            &mut update_rest,
        );
    }
    for step in [&mut update_major, &mut update_minor, &mut update_patch, &mut update_rest] {
        if let Some(assignment) = run_step(&mut backend, step, nudge) {
            current = assignment;
        }
    }

    // Step 6: if allowIncompatibleUpdate, minimize previous_root_incompat here instead.
    if input.allow_incompatible_update() {
        if let Some(assignment) = run_step(&mut backend, &mut previous_root_incompat, nudge) {
            current = assignment;
        }
    }

    // Step 7: minimize [previous_root_major, minor, patch, rest] in order.
    for step in [
        &mut previous_root_major,
        &mut previous_root_minor,
        &mut previous_root_patch,
        &mut previous_root_rest,
    ] {
        if let Some(assignment) = run_step(&mut backend, step, nudge) {
            current = assignment;
        }
    }

    if !input.allow_incompatible_update() && previous_root_incompat.optimum() > 0 {
        let mut reasons = Vec::new();
        for prev in &analysis.previous_root_dep_versions {
            if let Some(new_version) = decode_selected(&prev.package, &versions_of[&prev.package], &atoms, &current) {
                if new_version != prev.version {
                    let partition = pricer.partition_versions(&versions_of[&prev.package], &prev.version);
                    let is_incompatible =
                        partition.older.contains(&new_version) || partition.higher_major.contains(&new_version);
                    if is_incompatible {
                        reasons.push(format!(
                            "Breaking change required to top-level dependency: {} {new_version}, was {}",
                            prev.package, prev.version
                        ));
                    }
                }
            }
        }
        if !reasons.is_empty() {
            return Err(SolveError::breaking_change_to_root(reasons));
        }
    }

    // Step 8: previous_indirect_{incompat,major,minor,patch,rest}.
    let mut previous_indirect_incompat = Step::new("previous_indirect_incompat");
    let mut previous_indirect_major = Step::new("previous_indirect_major");
    let mut previous_indirect_minor = Step::new("previous_indirect_minor");
    let mut previous_indirect_patch = Step::new("previous_indirect_patch");
    let mut previous_indirect_rest = Step::new("previous_indirect_rest");
    for (p, v) in input.previous_solution() {
        if !analysis.is_reachable(p) || input.is_root_dependency(p) {
            continue;
        }
        if let Some(vs) = versions_of.get(p) {
            add_previous_steps(
                &mut atoms,
                pricer,
                &p.to_string(),
                vs,
                v,
                &mut previous_indirect_incompat,
                &mut previous_indirect_major,
                &mut previous_indirect_minor,
                &mut previous_indirect_patch,
                &mut previous_indirect_rest,
            );
        }
    }
    for step in [
        &mut previous_indirect_incompat,
        &mut previous_indirect_major,
        &mut previous_indirect_minor,
        &mut previous_indirect_patch,
        &mut previous_indirect_rest,
    ] {
        if let Some(assignment) = run_step(&mut backend, step, nudge) {
            current = assignment;
        }
    }

    // Step 9: new_root_{major,minor,patch,rest}.
    let mut new_root_major = Step::new("new_root_major");
    let mut new_root_minor = Step::new("new_root_minor");
    let mut new_root_patch = Step::new("new_root_patch");
    let mut new_root_rest = Step::new("new_root_rest");
    for p in input.roots() {
        if input.is_in_previous_solution(p) {
            continue;
        }
        if let Some(vs) = versions_of.get(p) {
            add_update_steps(
                &mut atoms,
                pricer,
                &p.to_string(),
                vs,
                PriceMode::Update,
                &mut new_root_major,
                &mut new_root_minor,
                &mut new_root_patch,
                &mut new_root_rest,
            );
        }
    }
    for step in [&mut new_root_major, &mut new_root_minor, &mut new_root_patch, &mut new_root_rest] {
        if let Some(assignment) = run_step(&mut backend, step, nudge) {
            current = assignment;
        }
    }

    // Step 10: pin the current selection of every root/previous/upgrading package.
    for p in &analysis.reachable_packages {
        let pinned = input.is_root_dependency(p) || input.is_in_previous_solution(p) || input.is_upgrading(p);
        if !pinned {
            continue;
        }
        if let Some(selected) = decode_selected(p, &versions_of[p], &atoms, &current) {
            let package_var = atoms.package(&p.to_string()).as_var();
            let version_var = atoms.package_version(&p.to_string(), &selected.to_string()).as_var();
            backend.require(Clause::new(vec![Lit::negative(package_var), Lit::positive(version_var)]));
        }
    }

    // Step 11: new_indirect_{major,minor,patch,rest}.
    let mut new_indirect_major = Step::new("new_indirect_major");
    let mut new_indirect_minor = Step::new("new_indirect_minor");
    let mut new_indirect_patch = Step::new("new_indirect_patch");
    let mut new_indirect_rest = Step::new("new_indirect_rest");
    for p in &analysis.reachable_packages {
        if input.is_root_dependency(p) || input.is_in_previous_solution(p) || input.is_upgrading(p) {
            continue;
        }
        add_update_steps(
            &mut atoms,
            pricer,
            &p.to_string(),
            &versions_of[p],
            PriceMode::GravityWithPatches,
            &mut new_indirect_major,
            &mut new_indirect_minor,
            &mut new_indirect_patch,
            &mut new_indirect_rest,
        );
    }
    for step in [
        &mut new_indirect_major,
        &mut new_indirect_minor,
        &mut new_indirect_patch,
        &mut new_indirect_rest,
    ] {
        if let Some(assignment) = run_step(&mut backend, step, nudge) {
            current = assignment;
        }
    }

    // Step 12: total_packages.
    let mut total_packages = Step::new("total_packages");
    for p in &analysis.reachable_packages {
        total_packages.add_term(atoms.package(&p.to_string()), 1);
    }
    if let Some(assignment) = run_step(&mut backend, &mut total_packages, nudge) {
        current = assignment;
    }

    let answer = decode_answer(&analysis.reachable_packages, &versions_of, &atoms, &current);
    info!("solved: {} packages selected", answer.len());

    let all_answers = if options.all_answers {
        Some(enumerate_all_solutions(
            &mut backend,
            &analysis.reachable_packages,
            &versions_of,
            &mut atoms,
            current,
            answer.clone(),
        ))
    } else {
        None
    };

    Ok(Solution {
        answer,
        needed_to_use_unanticipated_prereleases,
        all_answers,
    })
}

fn run_step<B: SatBackend>(backend: &mut B, step: &mut Step, nudge: &mut dyn FnMut()) -> Option<Assignment> {
    let terms: Vec<(Var, u64)> = step.weighted_terms().map(|(a, w)| (a.as_var(), w)).collect();
    let (assignment, cost) = backend.minimize(&terms, &MinimizeOptions::default(), nudge)?;
    backend.require_at_most(terms, cost);
    step.set_optimum(cost);
    debug!("step {} optimum = {cost}", step.name());
    Some(assignment)
}

fn decode_selected<P: Package, V: Version>(
    package: &P,
    versions: &[V],
    atoms: &AtomTable,
    assignment: &Assignment,
) -> Option<V> {
    versions
        .iter()
        .find(|v| {
            atoms
                .get(&package_version_atom(&package.to_string(), &v.to_string()))
                .map(|id| assignment.value_of(id.as_var()))
                .unwrap_or(false)
        })
        .cloned()
}

fn decode_answer<P: Package, V: Version>(
    reachable_packages: &[P],
    versions_of: &HashMap<P, Vec<V>>,
    atoms: &AtomTable,
    assignment: &Assignment,
) -> HashMap<P, V> {
    let mut answer = HashMap::new();
    for p in reachable_packages {
        if let Some(vs) = versions_of.get(p) {
            if let Some(v) = decode_selected(p, vs, atoms, assignment) {
                answer.insert(p.clone(), v);
            }
        }
    }
    answer
}

/// All-solutions enumeration (§4.5): repeatedly forbid the current exact
/// assignment and re-solve, until the backend reports unsatisfiable.
///
/// Per §4.5 the backend is first asked via `solveAssuming(¬φ)` and only
/// `forbid`s `φ` once that speculative check succeeds; this reference
/// backend's `solve_assuming` takes a conjunctive assumption list, which
/// cannot directly express the disjunctive `¬φ`, so the speculative check
/// and the permanent exclusion are folded into one `forbid` + `solve`
/// call. Observably equivalent: a `None` result stops enumeration either
/// way.
fn enumerate_all_solutions<P, V, B>(
    backend: &mut B,
    reachable_packages: &[P],
    versions_of: &HashMap<P, Vec<V>>,
    atoms: &mut AtomTable,
    first_assignment: Assignment,
    first_answer: HashMap<P, V>,
) -> Vec<HashMap<P, V>>
where
    P: Package,
    V: Version,
    B: SatBackend,
{
    let mut vars: Vec<Var> = Vec::new();
    for p in reachable_packages.iter() {
        for v in versions_of[p].iter() {
            vars.push(atoms.package_version(&p.to_string(), &v.to_string()).as_var());
        }
    }

    let mut answers = vec![first_answer];
    let mut current = first_assignment;
    loop {
        let phi = current.formula_over(&vars);
        let not_phi: Vec<Lit> = phi.literals().iter().map(|&l| l.negate()).collect();
        backend.forbid(Clause::new(not_phi));
        match backend.solve() {
            Some(next) => {
                answers.push(decode_answer(reachable_packages, versions_of, atoms, &next));
                current = next;
            }
            None => break,
        }
    }
    answers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DpllBackend;
    use crate::catalog::OfflineCatalog;
    use crate::dependency::Dependency;
    use crate::pricer::SemverPricer;
    use crate::version::SemanticVersion;
    use crate::version_constraint::RangeConstraint;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn trivial_scenario_s1() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        catalog.add_package_version("A".to_string(), v("1.0.0"));

        let input = Input::new().with_root("A".to_string());
        let solution = solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        )
        .unwrap();

        assert_eq!(solution.answer.get("A"), Some(&v("1.0.0")));
    }

    #[test]
    fn direct_conflict_scenario_s2() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        catalog.add_dependencies(
            "A".to_string(),
            v("1.0.0"),
            vec![Dependency::strong("B".to_string(), RangeConstraint::parse("=2.0.0").unwrap())],
        );
        catalog.add_package_version("B".to_string(), v("1.0.0"));

        let input = Input::new().with_root("A".to_string());
        let err = solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        )
        .unwrap_err();

        assert!(matches!(err, SolveError::ConstraintConflict { .. }));
        assert!(err.to_string().contains("conflict: constraint B @=2.0.0 is not satisfied by B 1.0.0."));
    }

    #[test]
    fn upgrade_preference_scenario_s3() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        catalog.add_package_version("A".to_string(), v("1.0.0"));
        catalog.add_package_version("A".to_string(), v("1.1.0"));

        let sticky_input = Input::new()
            .with_root("A".to_string())
            .with_previous_solution("A".to_string(), v("1.0.0"));
        let sticky = solve::<_, _, _, _, _, DpllBackend>(
            &sticky_input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        )
        .unwrap();
        assert_eq!(sticky.answer.get("A"), Some(&v("1.0.0")));

        let upgrading_input = Input::new()
            .with_root("A".to_string())
            .with_previous_solution("A".to_string(), v("1.0.0"))
            .with_upgrade("A".to_string());
        let upgraded = solve::<_, _, _, _, _, DpllBackend>(
            &upgrading_input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        )
        .unwrap();
        assert_eq!(upgraded.answer.get("A"), Some(&v("1.1.0")));
    }

    #[test]
    fn prerelease_avoidance_scenario_s4() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        catalog.add_package_version("A".to_string(), v("1.0.0-beta"));
        catalog.add_package_version("A".to_string(), v("1.0.0"));

        let input = Input::new().with_root("A".to_string());
        let solution = solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        )
        .unwrap();

        assert_eq!(solution.answer.get("A"), Some(&v("1.0.0")));
        assert!(!solution.needed_to_use_unanticipated_prereleases);
    }

    #[test]
    fn weak_dependency_scenario_s6() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        catalog.add_dependencies(
            "A".to_string(),
            v("1.0.0"),
            vec![Dependency::weak("B".to_string(), RangeConstraint::parse("=1.0.0").unwrap())],
        );
        catalog.add_package_version("B".to_string(), v("1.0.0"));
        catalog.add_package_version("B".to_string(), v("2.0.0"));

        let input = Input::new().with_root("A".to_string());
        let solution = solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        )
        .unwrap();

        assert!(!solution.answer.contains_key("B"));
    }
}
