// SPDX-License-Identifier: MPL-2.0

//! The solver's read-only input for a single `solve` invocation (§3).

use std::collections::HashSet;

use crate::package::Package;
use crate::version::Version;

/// Everything [`crate::solve`] needs, read-only for the duration of the
/// call (§3).
///
/// Built with `with_*` consuming-builder methods, mirroring the teacher's
/// `OfflineDependencyProvider::add_dependencies` style of incremental,
/// method-chained construction.
#[derive(Debug, Clone)]
pub struct Input<P: Package, V: Version, VC> {
    pub(crate) roots: Vec<P>,
    pub(crate) constraints: Vec<(P, VC)>,
    pub(crate) previous_solution: Vec<(P, V)>,
    pub(crate) upgrade: HashSet<P>,
    pub(crate) anticipated_prereleases: Vec<(P, V)>,
    pub(crate) allow_incompatible_update: bool,
}

impl<P: Package, V: Version, VC> Default for Input<P, V, VC> {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            constraints: Vec::new(),
            previous_solution: Vec::new(),
            upgrade: HashSet::new(),
            anticipated_prereleases: Vec::new(),
            allow_incompatible_update: false,
        }
    }
}

impl<P: Package, V: Version, VC> Input<P, V, VC> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root dependency. Roots are deduplicated by [`PartialEq`]
    /// identity; adding the same package twice is a no-op.
    pub fn with_root(mut self, package: P) -> Self {
        if !self.roots.contains(&package) {
            self.roots.push(package);
        }
        self
    }

    pub fn with_roots(mut self, packages: impl IntoIterator<Item = P>) -> Self {
        for p in packages {
            self = self.with_root(p);
        }
        self
    }

    /// Adds a top-level `(package, constraint)` pair.
    pub fn with_constraint(mut self, package: P, constraint: VC) -> Self {
        self.constraints.push((package, constraint));
        self
    }

    /// Records `package`'s version in a previous solve, used for
    /// stickiness and breaking-change detection (§4.4).
    pub fn with_previous_solution(mut self, package: P, version: V) -> Self {
        self.previous_solution.retain(|(p, _)| p != &package);
        self.previous_solution.push((package, version));
        self
    }

    /// Marks `package` for upgrade, exempting it from previous-solution
    /// stickiness.
    pub fn with_upgrade(mut self, package: P) -> Self {
        self.upgrade.insert(package);
        self
    }

    /// Whitelists a prerelease version that should not contribute to the
    /// `unanticipated_prereleases` cost (§4.4 step 3).
    pub fn with_anticipated_prerelease(mut self, package: P, version: V) -> Self {
        self.anticipated_prereleases.push((package, version));
        self
    }

    pub fn with_allow_incompatible_update(mut self, allow: bool) -> Self {
        self.allow_incompatible_update = allow;
        self
    }

    pub fn roots(&self) -> &[P] {
        &self.roots
    }

    pub fn constraints(&self) -> &[(P, VC)] {
        &self.constraints
    }

    pub fn previous_solution(&self) -> &[(P, V)] {
        &self.previous_solution
    }

    pub fn is_root_dependency(&self, package: &P) -> bool {
        self.roots.contains(package)
    }

    pub fn is_in_previous_solution(&self, package: &P) -> bool {
        self.previous_solution.iter().any(|(p, _)| p == package)
    }

    pub fn is_upgrading(&self, package: &P) -> bool {
        self.upgrade.contains(package)
    }

    pub fn is_anticipated_prerelease(&self, package: &P, version: &V) -> bool {
        self.anticipated_prereleases
            .iter()
            .any(|(p, v)| p == package && v == version)
    }

    pub fn allow_incompatible_update(&self) -> bool {
        self.allow_incompatible_update
    }

    pub fn previous_version_of(&self, package: &P) -> Option<&V> {
        self.previous_solution
            .iter()
            .find(|(p, _)| p == package)
            .map(|(_, v)| v)
    }
}
