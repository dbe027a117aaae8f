// SPDX-License-Identifier: MPL-2.0

//! Conflict explainer (component H, §4.6).
//!
//! Path enumeration here is deliberately not exhaustive (§9): the
//! "shortest-so-far" pruning trades completeness for termination on dense
//! dependency graphs and must not be "improved" into enumerating every
//! path.

use std::collections::{HashMap, HashSet};

use crate::catalog::CatalogCache;
use crate::internal::constraint_model::Constraint;
use crate::package::Package;
use crate::version::Version;
use crate::version_constraint::VersionConstraint;

/// A reverse dependency path from a conflicting package-version back to a
/// selected root, as produced by `getPathsToPackageVersion` (§4.6).
pub type Path<P, V> = Vec<(P, V)>;

fn has_dep<P, V, VC, C>(catalog: &C, from: &P, from_version: &V, to: &P) -> bool
where
    P: Package,
    V: Version,
    VC: VersionConstraint<V>,
    C: CatalogCache<P, V, VC>,
{
    catalog
        .dependencies(from, from_version)
        .iter()
        .any(|dep| &dep.to_package == to)
}

/// DFS over the selected assignment for paths from a root down to `target`,
/// keeping only paths whose length does not exceed the shortest seen so
/// far (§4.6).
fn paths_to_package_version<P, V, VC, C>(
    target: &(P, V),
    catalog: &C,
    answer: &HashMap<P, V>,
    roots: &HashSet<P>,
    ignore: &mut HashSet<P>,
    shortest: &mut Option<usize>,
) -> Vec<Path<P, V>>
where
    P: Package,
    V: Version,
    VC: VersionConstraint<V>,
    C: CatalogCache<P, V, VC>,
{
    let (package, version) = target;
    match answer.get(package) {
        Some(v) if v == version => {}
        _ => return Vec::new(),
    }

    if roots.contains(package) {
        let path = vec![target.clone()];
        *shortest = Some(shortest.map_or(path.len(), |s| s.min(path.len())));
        return vec![path];
    }

    let mut results: Vec<Path<P, V>> = Vec::new();
    for (candidate, candidate_version) in answer {
        if ignore.contains(candidate) {
            continue;
        }
        if !has_dep::<P, V, VC, C>(catalog, candidate, candidate_version, package) {
            continue;
        }
        ignore.insert(candidate.clone());
        let sub_paths = paths_to_package_version::<P, V, VC, C>(
            &(candidate.clone(), candidate_version.clone()),
            catalog,
            answer,
            roots,
            ignore,
            shortest,
        );
        ignore.remove(candidate);

        for mut sub in sub_paths {
            let mut path = vec![target.clone()];
            path.append(&mut sub);
            if shortest.map_or(true, |s| path.len() <= s) {
                *shortest = Some(shortest.map_or(path.len(), |s| s.min(path.len())));
                results.push(path);
            }
        }
    }

    let bound = *shortest;
    results.retain(|p| bound.map_or(true, |b| p.len() <= b));
    results
}

/// One line of `listConstraintsOnPackage(P)`'s output.
fn format_constraint_line<P: Package, V: Version, VC: VersionConstraint<V>>(
    constraint: &Constraint<P, V, VC>,
    path: &[(P, V)],
) -> String {
    let mut line = format!(
        "* {} @{} <-",
        constraint.to_package,
        constraint.constraint.raw()
    );
    if path.is_empty() {
        line.push_str(" top level");
    } else {
        for (p, v) in path {
            line.push_str(&format!(" {p} {v} <-"));
        }
        line.truncate(line.len() - " <-".len());
    }
    line
}

/// `listConstraintsOnPackage(P)`: one line per constraint whose
/// `to_package == package`, per §4.6.
pub fn list_constraints_on_package<P, V, VC, C>(
    package: &P,
    constraints: &[Constraint<P, V, VC>],
    catalog: &C,
    answer: &HashMap<P, V>,
    roots: &HashSet<P>,
) -> Vec<String>
where
    P: Package,
    V: Version,
    VC: VersionConstraint<V>,
    C: CatalogCache<P, V, VC>,
{
    let mut lines = Vec::new();
    for constraint in constraints.iter().filter(|c| &c.to_package == package) {
        match &constraint.from_package_version {
            None => lines.push(format_constraint_line(constraint, &[])),
            Some(pv) => {
                let mut ignore = HashSet::new();
                let mut shortest = None;
                let paths = paths_to_package_version::<P, V, VC, C>(
                    pv,
                    catalog,
                    answer,
                    roots,
                    &mut ignore,
                    &mut shortest,
                );
                for path in paths {
                    lines.push(format_constraint_line(constraint, &path));
                }
            }
        }
    }
    lines
}

/// Builds the full explanatory message for one violated constraint (§4.6):
/// `"conflict: constraint <P @VC> is not satisfied by <P> <V>."` followed
/// by `listConstraintsOnPackage(P)`.
pub fn explain_conflict<P, V, VC, C>(
    constraint: &Constraint<P, V, VC>,
    selected_version: &V,
    constraints: &[Constraint<P, V, VC>],
    catalog: &C,
    answer: &HashMap<P, V>,
    roots: &HashSet<P>,
) -> String
where
    P: Package,
    V: Version,
    VC: VersionConstraint<V>,
    C: CatalogCache<P, V, VC>,
{
    let mut message = format!(
        "conflict: constraint {} @{} is not satisfied by {} {}.",
        constraint.to_package,
        constraint.constraint.raw(),
        constraint.to_package,
        selected_version
    );
    for line in list_constraints_on_package(&constraint.to_package, constraints, catalog, answer, roots) {
        message.push('\n');
        message.push_str(&line);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OfflineCatalog;
    use crate::dependency::Dependency;
    use crate::version::SemanticVersion;
    use crate::version_constraint::RangeConstraint;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn explains_direct_conflict_from_root() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        catalog.add_dependencies(
            "a".to_string(),
            v("1.0.0"),
            vec![Dependency::strong("b".to_string(), RangeConstraint::parse("=2.0.0").unwrap())],
        );
        catalog.add_package_version("b".to_string(), v("1.0.0"));

        let mut answer = HashMap::new();
        answer.insert("a".to_string(), v("1.0.0"));
        answer.insert("b".to_string(), v("1.0.0"));
        let mut roots = HashSet::new();
        roots.insert("a".to_string());

        let constraint = Constraint {
            from_var: None,
            from_package_version: Some(("a".to_string(), v("1.0.0"))),
            to_package: "b".to_string(),
            constraint: RangeConstraint::parse("=2.0.0").unwrap(),
            conflict_var: crate::internal::atoms::AtomTable::new().conflict(0),
        };

        let message = explain_conflict(&constraint, &v("1.0.0"), &[constraint.clone()], &catalog, &answer, &roots);
        assert!(message.starts_with("conflict: constraint b @=2.0.0 is not satisfied by b 1.0.0."));
        assert!(message.contains("<- a 1.0.0"));
    }

    #[test]
    fn top_level_constraint_has_no_path() {
        let catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        let answer = HashMap::new();
        let roots = HashSet::new();
        let constraint = Constraint {
            from_var: None,
            from_package_version: None,
            to_package: "a".to_string(),
            constraint: RangeConstraint::any(),
            conflict_var: crate::internal::atoms::AtomTable::new().conflict(0),
        };
        let lines = list_constraints_on_package(&"a".to_string(), &[constraint], &catalog, &answer, &roots);
        assert_eq!(lines, vec!["* a @* <- top level".to_string()]);
    }
}
