// SPDX-License-Identifier: MPL-2.0

use std::collections::{HashMap, HashSet};
use std::io::Write;

use depsolve_core::backend::DpllBackend;
use depsolve_core::{CatalogCache, Dependency, Input, OfflineCatalog, RangeConstraint, SemanticVersion, SemverPricer, SolveOptions, VersionConstraint};
use log::LevelFilter;
use proptest::prelude::*;
use varisat::ExtendFormula;

/// Mirrors the teacher's test log setup: `RUST_LOG` makes the solver
/// driver's `log::debug!`/`log::info!` output visible under `cargo test --
/// --nocapture`.
fn init_log() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Trace)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .is_test(true)
        .try_init();
}

const NAMES: [&str; 5] = ["A", "B", "C", "D", "E"];

#[derive(Debug, Clone)]
struct EdgeSpec {
    to_index: usize,
    to_version_index: usize,
    weak: bool,
}

#[derive(Debug, Clone)]
struct PackageSpec {
    version_count: usize,
    // edges[v] is the list of dependencies declared by version `v`.
    edges: Vec<Vec<EdgeSpec>>,
}

type RegistrySpec = Vec<PackageSpec>;

fn version_at(index: usize) -> SemanticVersion {
    SemanticVersion::new(1, index as u32, 0)
}

/// Strategy for one package: 1-3 versions, each declaring 0-2 dependencies
/// on packages later in `NAMES` (so the registry is always a DAG).
fn package_strategy(index: usize, package_count: usize) -> BoxedStrategy<PackageSpec> {
    if index + 1 < package_count {
        let edge = ((index + 1)..package_count, 0..3usize, prop::bool::weighted(0.2)).prop_map(
            |(to_index, to_version_index, weak)| EdgeSpec {
                to_index,
                to_version_index,
                weak,
            },
        );
        (1..=3usize, prop::collection::vec(prop::collection::vec(edge, 0..=2), 3))
            .prop_map(|(version_count, mut edges)| {
                edges.truncate(version_count);
                PackageSpec { version_count, edges }
            })
            .boxed()
    } else {
        (1..=3usize)
            .prop_map(|version_count| PackageSpec {
                version_count,
                edges: vec![Vec::new(); version_count],
            })
            .boxed()
    }
}

/// Builds a small acyclic registry: package `i` may only depend on packages
/// `i+1..`, so reachability from `A` (index 0) is always well-founded.
fn registry_strategy() -> impl Strategy<Value = RegistrySpec> {
    let n = NAMES.len();
    (
        package_strategy(0, n),
        package_strategy(1, n),
        package_strategy(2, n),
        package_strategy(3, n),
        package_strategy(4, n),
    )
        .prop_map(|(a, b, c, d, e)| vec![a, b, c, d, e])
}

/// At-most-one-of over `vars`, via the binary encoding from the teacher's
/// own SAT oracle (`sat_dependency_provider.rs`).
fn sat_at_most_one(solver: &mut impl varisat::ExtendFormula, vars: &[varisat::Var]) {
    if vars.len() <= 1 {
        return;
    } else if vars.len() == 2 {
        solver.add_clause(&[vars[0].negative(), vars[1].negative()]);
        return;
    } else if vars.len() == 3 {
        solver.add_clause(&[vars[0].negative(), vars[1].negative()]);
        solver.add_clause(&[vars[0].negative(), vars[2].negative()]);
        solver.add_clause(&[vars[1].negative(), vars[2].negative()]);
        return;
    }
    let len_bits = vars.len().ilog2() as usize + 1;
    let bits: Vec<varisat::Var> = solver.new_var_iter(len_bits).collect();
    for (i, p) in vars.iter().enumerate() {
        for (j, &bit) in bits.iter().enumerate() {
            solver.add_clause(&[p.negative(), bit.lit(((1 << j) & i) > 0)]);
        }
    }
}

/// Brute-force SAT cross-check for [`DpllBackend`], grounded on the
/// teacher's `SatResolve`. Only strong dependencies become implication
/// clauses, since a weak dependency never forces its target to be selected
/// (it only constrains it if something else pulls it in).
struct SatResolve {
    solver: varisat::Solver<'static>,
    vars_by_package: HashMap<String, Vec<(SemanticVersion, varisat::Var)>>,
}

impl SatResolve {
    fn new(catalog: &OfflineCatalog<String, SemanticVersion, RangeConstraint>) -> Self {
        let mut cnf = varisat::CnfFormula::new();
        let mut all_versions = Vec::new();
        let mut vars_by_package: HashMap<String, Vec<(SemanticVersion, varisat::Var)>> = HashMap::new();

        for package in catalog.packages() {
            let mut versions_for_package = Vec::new();
            for version in catalog.versions(package) {
                let var = cnf.new_var();
                versions_for_package.push(var);
                vars_by_package.entry(package.clone()).or_default().push((version.clone(), var));
                all_versions.push((package.clone(), version, var));
            }
            sat_at_most_one(&mut cnf, &versions_for_package);
        }

        for (package, version, var) in &all_versions {
            for dep in catalog.dependencies(package, version) {
                if dep.is_weak {
                    continue;
                }
                let empty = Vec::new();
                let mut matches: Vec<varisat::Lit> = vars_by_package
                    .get(&dep.to_package)
                    .unwrap_or(&empty)
                    .iter()
                    .filter(|(v, _)| dep.constraint.satisfies(v))
                    .map(|(_, v)| v.positive())
                    .collect();
                matches.push(var.negative());
                cnf.add_clause(&matches);
            }
        }

        let mut solver = varisat::Solver::new();
        solver.add_formula(&cnf);
        solver.solve().expect("varisat default config cannot error");

        Self { solver, vars_by_package }
    }

    fn resolve(&mut self, name: &str, version: &SemanticVersion) -> bool {
        let Some(vers) = self.vars_by_package.get(name) else {
            return false;
        };
        let Some((_, var)) = vers.iter().find(|(v, _)| v == version) else {
            return false;
        };
        self.solver.assume(&[var.positive()]);
        self.solver.solve().expect("varisat default config cannot error")
    }

    fn is_valid_solution(&mut self, answer: &HashMap<String, SemanticVersion>) -> bool {
        let mut assumption = Vec::new();
        for (package, versions) in &self.vars_by_package {
            let selected = answer.get(package);
            for (version, var) in versions {
                assumption.push(var.lit(selected == Some(version)));
            }
        }
        self.solver.assume(&assumption);
        self.solver.solve().expect("varisat default config cannot error")
    }
}

fn build_catalog(registry: &RegistrySpec) -> OfflineCatalog<String, SemanticVersion, RangeConstraint> {
    let mut catalog = OfflineCatalog::new();
    for (index, spec) in registry.iter().enumerate() {
        let name = NAMES[index].to_string();
        for v in 0..spec.version_count {
            let version = version_at(v);
            let mut deps = Vec::new();
            for edge in &spec.edges[v] {
                let to_version_count = registry[edge.to_index].version_count;
                let to_version = version_at(edge.to_version_index % to_version_count);
                let constraint = RangeConstraint::parse(format!("={to_version}")).unwrap();
                let to_name = NAMES[edge.to_index].to_string();
                deps.push(if edge.weak {
                    Dependency::weak(to_name, constraint)
                } else {
                    Dependency::strong(to_name, constraint)
                });
            }
            catalog.add_dependencies(name.clone(), version, deps);
        }
    }
    catalog
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Properties 1-4 (single-version, root coverage, constraint
    /// satisfaction, reachability minimality) hold on every successful
    /// solve over a randomly generated acyclic registry.
    #[test]
    fn universal_properties_hold(registry in registry_strategy()) {
        init_log();
        let catalog = build_catalog(&registry);
        let input = Input::new().with_root("A".to_string());
        let result = depsolve_core::solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        );

        let mut oracle = SatResolve::new(&catalog);
        match &result {
            Ok(solution) => prop_assert!(
                oracle.is_valid_solution(&solution.answer),
                "solver produced an answer the SAT oracle rejects as unsatisfiable"
            ),
            Err(_) => {
                let root_resolvable = catalog.versions(&"A".to_string()).iter().any(|ver| oracle.resolve("A", ver));
                prop_assert!(!root_resolvable, "solver reported unsatisfiable but the SAT oracle found a resolution for A");
            }
        }

        let Ok(solution) = result else { return Ok(()) };
        let answer = &solution.answer;

        // Property 1: single version, known to the catalog.
        for (package, version) in answer {
            let known = catalog.versions(package);
            prop_assert!(known.contains(version), "{package} {version} is not a known version");
        }

        // Property 2: root coverage.
        prop_assert!(answer.contains_key("A"));

        // Property 3: constraint satisfaction for every strong dependency.
        for (package, version) in answer {
            for dep in catalog.dependencies(package, version) {
                if dep.is_weak {
                    continue;
                }
                let selected = answer.get(&dep.to_package);
                prop_assert!(selected.is_some(), "{package} {version} strongly requires {} but it is unselected", dep.to_package);
                let selected = selected.unwrap();
                prop_assert!(
                    dep.constraint.satisfies(selected),
                    "{} {selected} does not satisfy {}",
                    dep.to_package,
                    dep.constraint.raw(),
                );
            }
        }

        // Property 4: reachability minimality, via strong deps from roots.
        let mut reachable = HashSet::new();
        let mut stack = vec!["A".to_string()];
        while let Some(p) = stack.pop() {
            if !reachable.insert(p.clone()) {
                continue;
            }
            if let Some(v) = answer.get(&p) {
                for dep in catalog.dependencies(&p, v) {
                    if !dep.is_weak {
                        stack.push(dep.to_package);
                    }
                }
            }
        }
        for package in answer.keys() {
            prop_assert!(reachable.contains(package), "{package} is in the answer but unreachable from roots");
        }
    }

    /// Property 8: determinism across repeated invocations, and
    /// all-solutions enumeration never repeats a distinct version map.
    #[test]
    fn determinism_and_enumeration_are_well_formed(registry in registry_strategy()) {
        init_log();
        let catalog = build_catalog(&registry);
        let input = Input::new().with_root("A".to_string());

        let first = depsolve_core::solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        );
        let second = depsolve_core::solve::<_, _, _, _, _, DpllBackend>(
            &input,
            &catalog,
            &SemverPricer,
            &SolveOptions::default(),
            &mut || {},
        );

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a.answer, b.answer),
            (Err(_), Err(_)) => {}
            _ => prop_assert!(false, "solve was non-deterministic across identical invocations"),
        }

        let options = SolveOptions { all_answers: true };
        if let Ok(solution) = depsolve_core::solve::<_, _, _, _, _, DpllBackend>(&input, &catalog, &SemverPricer, &options, &mut || {}) {
            let all_answers = solution.all_answers.unwrap_or_default();
            let distinct: HashSet<_> = all_answers.iter().map(|m| {
                let mut entries: Vec<_> = m.iter().map(|(p, v)| (p.clone(), v.clone())).collect();
                entries.sort();
                entries
            }).collect();
            prop_assert_eq!(distinct.len(), all_answers.len(), "all_answers contained a duplicate version map");
            prop_assert!(all_answers.contains(&solution.answer));
        }
    }
}
