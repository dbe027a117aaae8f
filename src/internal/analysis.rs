// SPDX-License-Identifier: MPL-2.0

//! Root triage, reachability, and constraint collection (component C,
//! §4.2).

use std::collections::{HashMap, HashSet};

use crate::catalog::CatalogCache;
use crate::internal::atoms::{AtomId, AtomTable};
use crate::internal::constraint_model::Constraint;
use crate::internal::filter::AllowedVersions;
use crate::package::Package;
use crate::version::Version;
use crate::version_constraint::VersionConstraint;

/// `(p, previousSolution[p])` for every root `p` that is known, was in the
/// previous solution, and is not being upgraded (§4.2).
pub struct PreviousRootDepVersion<P, V> {
    pub package: P,
    pub version: V,
}

/// Outcome of the root-triage + reachability + constraint-collection pass.
pub struct Analysis<P: Package, V: Version, VC> {
    pub unknown_root_deps: Vec<P>,
    pub previous_root_dep_versions: Vec<PreviousRootDepVersion<P, V>>,
    pub reachable_packages: Vec<P>,
    pub constraints: Vec<Constraint<P, V, VC>>,
    /// For each package name discovered only as an unresolvable dependency
    /// target, the package-version atoms that required it (§4.2's "reverse
    /// reference", consumed by the unknown-packages error in §4.4).
    pub unknown_dependency_requirers: HashMap<P, Vec<AtomId>>,
}

impl<P: Package, V: Version, VC: VersionConstraint<V>> Analysis<P, V, VC> {
    /// Runs root triage, reachability DFS, and constraint collection over
    /// `roots` and `top_level_constraints`.
    ///
    /// `previous_solution` and `is_upgrading` feed the previous-root
    /// bookkeeping (§4.2); `is_upgrading` answers `input.isUpgrading(P)`.
    pub fn run<C: CatalogCache<P, V, VC>>(
        catalog: &C,
        allowed: &AllowedVersions<P, V>,
        atoms: &mut AtomTable,
        roots: &[P],
        top_level_constraints: &[(P, VC)],
        previous_solution: &[(P, V)],
        is_upgrading: impl Fn(&P) -> bool,
    ) -> Self {
        let mut unknown_root_deps = Vec::new();
        let mut previous_root_dep_versions = Vec::new();

        for p in roots {
            if !catalog.has_package(p) && allowed.versions_of(catalog, p).is_empty() {
                unknown_root_deps.push(p.clone());
                continue;
            }
            if let Some((_, v)) = previous_solution.iter().find(|(pp, _)| pp == p) {
                if !is_upgrading(p) {
                    previous_root_dep_versions.push(PreviousRootDepVersion {
                        package: p.clone(),
                        version: v.clone(),
                    });
                }
            }
        }

        if !unknown_root_deps.is_empty() {
            return Self {
                unknown_root_deps,
                previous_root_dep_versions,
                reachable_packages: Vec::new(),
                constraints: Vec::new(),
                unknown_dependency_requirers: HashMap::new(),
            };
        }

        let mut reachable_packages = Vec::new();
        let mut visited: HashSet<P> = HashSet::new();
        let mut stack: Vec<P> = roots.to_vec();
        let mut unknown_dependency_requirers: HashMap<P, Vec<AtomId>> = HashMap::new();

        while let Some(p) = stack.pop() {
            if visited.contains(&p) {
                continue;
            }
            visited.insert(p.clone());
            reachable_packages.push(p.clone());

            for v in allowed.versions_of(catalog, &p) {
                let from_atom = atoms.package_version(&p.to_string(), &v.to_string());
                for dep in catalog.dependencies(&p, &v) {
                    if catalog.has_package(&dep.to_package) {
                        if !dep.is_weak {
                            stack.push(dep.to_package.clone());
                        }
                    } else {
                        unknown_dependency_requirers
                            .entry(dep.to_package.clone())
                            .or_default()
                            .push(from_atom);
                    }
                }
            }
        }

        let mut constraints = Vec::new();
        for (package, vc) in top_level_constraints {
            let conflict_var = atoms.conflict(constraints.len());
            constraints.push(Constraint {
                from_var: None,
                from_package_version: None,
                to_package: package.clone(),
                constraint: vc.clone(),
                conflict_var,
            });
        }

        for p in &reachable_packages {
            for v in allowed.versions_of(catalog, p) {
                let from_atom = atoms.package_version(&p.to_string(), &v.to_string());
                for dep in catalog.dependencies(p, &v) {
                    if !catalog.has_package(&dep.to_package) {
                        continue;
                    }
                    let conflict_var = atoms.conflict(constraints.len());
                    constraints.push(Constraint {
                        from_var: Some(from_atom),
                        from_package_version: Some((p.clone(), v.clone())),
                        to_package: dep.to_package.clone(),
                        constraint: dep.constraint.clone(),
                        conflict_var,
                    });
                }
            }
        }

        Self {
            unknown_root_deps,
            previous_root_dep_versions,
            reachable_packages,
            constraints,
            unknown_dependency_requirers,
        }
    }

    pub fn is_reachable(&self, package: &P) -> bool {
        self.reachable_packages.contains(package)
    }
}
