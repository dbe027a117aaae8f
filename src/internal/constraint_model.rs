// SPDX-License-Identifier: MPL-2.0

//! Constraint records and memoized per-constraint formulas (component B,
//! §4.2/§4.3).

use std::collections::HashMap;

use crate::backend::{Clause, Lit};
use crate::internal::atoms::{AtomId, AtomTable};
use crate::package::Package;
use crate::version::Version;
use crate::version_constraint::VersionConstraint;

/// One `(fromVar?, toPackage, versionConstraint, conflictVar)` tuple, per
/// §3.
///
/// `from_var` is `None` for a top-level constraint; otherwise it is the
/// package-version atom whose dependency produced this constraint, and
/// `from_package_version` carries the same pair directly (rather than
/// requiring the explainer to parse `V` back out of an atom string, which
/// an opaque version type need not support).
#[derive(Debug, Clone)]
pub struct Constraint<P: Package, V, VC> {
    pub from_var: Option<AtomId>,
    pub from_package_version: Option<(P, V)>,
    pub to_package: P,
    pub constraint: VC,
    pub conflict_var: AtomId,
}

/// Memoizes `formula(P, vc)` by the value-equal key `P + "@" + vc.raw`
/// (§4.3, §9's "memoization by value-equal key" note).
#[derive(Debug, Default)]
pub struct ConstraintFormulas {
    memo: HashMap<(String, String), Option<Clause>>,
}

impl ConstraintFormulas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes (or returns the memoized) formula for `(package, vc)`
    /// against `versions`, which must already be `versionsOf(package)`
    /// (i.e. allowed-version-filtered, §4.1).
    ///
    /// Returns `None` for `⊤` (every listed version satisfies `vc`), or
    /// `Some(¬package ∨ ⋁ ok)` otherwise, matching §4.3 exactly.
    pub fn formula<V: Version, VC: VersionConstraint<V>>(
        &mut self,
        package: &str,
        atoms: &mut AtomTable,
        versions: &[V],
        vc: &VC,
    ) -> Option<Clause> {
        let key = (package.to_string(), vc.raw().to_string());
        if let Some(cached) = self.memo.get(&key) {
            return cached.clone();
        }

        let ok: Vec<Lit> = versions
            .iter()
            .filter(|v| vc.satisfies(v))
            .map(|v| Lit::positive(atoms.package_version(package, &v.to_string()).as_var()))
            .collect();

        let formula = if ok.len() == versions.len() {
            None
        } else {
            let package_atom = atoms.package(package);
            let mut lits = vec![Lit::negative(package_atom.as_var())];
            lits.extend(ok);
            Some(Clause::new(lits))
        };

        self.memo.insert(key, formula.clone());
        formula
    }
}
