// SPDX-License-Identifier: MPL-2.0

//! The `CatalogCache` external collaborator (§6) and an in-memory reference
//! implementation, grounded on the teacher crate's `Cache`/`SimpleCache`.

use indexmap::IndexMap;

use crate::dependency::Dependency;
use crate::package::Package;
use crate::version::Version;
use crate::version_constraint::VersionConstraint;

/// Stores the set of versions per package and the dependency list per
/// `(package, version)`, per §6.
///
/// The core only ever reads from a catalog; populating one (from a
/// manifest, a registry index, a lockfile, ...) is out of scope (§1).
pub trait CatalogCache<P: Package, V: Version, VC: VersionConstraint<V>> {
    /// All known versions of `package`, in unspecified order. Empty (not
    /// an error) if `package` is unknown to the catalog — the analysis
    /// pass (§4.2) is what turns "no versions" into an unknown-package
    /// diagnostic.
    fn versions(&self, package: &P) -> Vec<V>;

    /// The declared dependencies of `(package, version)`. Empty if the
    /// pair is unknown or has no dependencies.
    fn dependencies(&self, package: &P, version: &V) -> Vec<Dependency<P, VC, V>>;

    /// Whether the catalog has ever heard of `package` at all, regardless
    /// of whether it has any versions.
    fn has_package(&self, package: &P) -> bool {
        !self.versions(package).is_empty()
    }
}

/// In-memory reference [`CatalogCache`], populated ahead of time.
///
/// Mirrors the teacher's `SimpleCache`: a package-keyed map of version
/// lists plus a `(package, version)`-keyed map of dependency lists.
#[derive(Debug)]
pub struct OfflineCatalog<P: Package, V: Version, VC: VersionConstraint<V>> {
    versions: IndexMap<P, Vec<V>>,
    dependencies: IndexMap<(P, V), Vec<Dependency<P, VC, V>>>,
}

impl<P: Package, V: Version, VC: VersionConstraint<V>> Default for OfflineCatalog<P, V, VC> {
    fn default() -> Self {
        Self {
            versions: IndexMap::new(),
            dependencies: IndexMap::new(),
        }
    }
}

impl<P: Package, V: Version, VC: VersionConstraint<V>> OfflineCatalog<P, V, VC> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a package version, with no dependencies, unless
    /// [`OfflineCatalog::add_dependencies`] is called for it afterwards.
    pub fn add_package_version(&mut self, package: P, version: V) {
        let entry = self.versions.entry(package).or_default();
        if !entry.contains(&version) {
            entry.push(version);
        }
    }

    /// Registers a package version's dependencies, implicitly registering
    /// the version itself.
    pub fn add_dependencies(
        &mut self,
        package: P,
        version: V,
        dependencies: Vec<Dependency<P, VC, V>>,
    ) {
        self.add_package_version(package.clone(), version.clone());
        self.dependencies.insert((package, version), dependencies);
    }

    /// The number of distinct known packages.
    pub fn package_count(&self) -> usize {
        self.versions.len()
    }

    /// The number of distinct known `(package, version)` pairs.
    pub fn version_count(&self) -> usize {
        self.versions.values().map(Vec::len).sum()
    }

    pub fn packages(&self) -> impl Iterator<Item = &P> {
        self.versions.keys()
    }
}

impl<P: Package, V: Version, VC: VersionConstraint<V>> CatalogCache<P, V, VC>
    for OfflineCatalog<P, V, VC>
{
    fn versions(&self, package: &P) -> Vec<V> {
        self.versions.get(package).cloned().unwrap_or_default()
    }

    fn dependencies(&self, package: &P, version: &V) -> Vec<Dependency<P, VC, V>> {
        self.dependencies
            .get(&(package.clone(), version.clone()))
            .cloned()
            .unwrap_or_default()
    }

    fn has_package(&self, package: &P) -> bool {
        self.versions.contains_key(package)
    }
}
