// SPDX-License-Identifier: MPL-2.0

//! Allowed-version filter (component D, §4.1).

use std::collections::HashMap;

use crate::catalog::CatalogCache;
use crate::package::Package;
use crate::version::Version;
use crate::version_constraint::VersionConstraint;

/// Pre-prunes each constrained package's candidate version set by its
/// top-level constraints, before any clause generation.
///
/// Built once per solve; [`AllowedVersions::versions_of`] is what every
/// later component calls instead of going back to the catalog directly
/// (§4.1: "`versionsOf(P)` used elsewhere returns the filtered set if
/// present, otherwise the catalog set").
#[derive(Debug, Default)]
pub struct AllowedVersions<P: Package, V: Version> {
    filtered: HashMap<P, Vec<V>>,
}

/// A top-level package has no version satisfying all of its constraints.
#[derive(Debug, Clone)]
pub struct AllowedVersionsError<P: Package, VC> {
    pub package: P,
    pub constraints: Vec<VC>,
}

impl<P: Package, V: Version> AllowedVersions<P, V> {
    /// Builds the filter from `top_level_constraints`, the ordered
    /// sequence of `(P, vc)` pairs in `input.constraints`.
    pub fn build<VC, C>(
        catalog: &C,
        top_level_constraints: &[(P, VC)],
    ) -> Result<Self, AllowedVersionsError<P, VC>>
    where
        VC: VersionConstraint<V>,
        C: CatalogCache<P, V, VC>,
    {
        let mut by_package: HashMap<P, Vec<&VC>> = HashMap::new();
        for (package, vc) in top_level_constraints {
            by_package.entry(package.clone()).or_default().push(vc);
        }

        let mut filtered = HashMap::new();
        for (package, constraints) in &by_package {
            let catalog_versions = catalog.versions(package);
            if catalog_versions.is_empty() {
                // Left unfiltered; the SAT layer surfaces this as an
                // unknown-package hit (§9's "unfiltered unknown packages"
                // open question).
                continue;
            }
            let mut allowed = catalog_versions;
            for vc in constraints {
                allowed.retain(|v| vc.satisfies(v));
            }
            if allowed.is_empty() {
                return Err(AllowedVersionsError {
                    package: package.clone(),
                    constraints: constraints.iter().map(|&vc| vc.clone()).collect(),
                });
            }
            filtered.insert(package.clone(), allowed);
        }

        Ok(Self { filtered })
    }

    /// `versionsOf(P)`: the filtered set if `P` was constrained, else
    /// whatever the catalog reports.
    pub fn versions_of<VC, C>(&self, catalog: &C, package: &P) -> Vec<V>
    where
        VC: VersionConstraint<V>,
        C: CatalogCache<P, V, VC>,
    {
        self.filtered
            .get(package)
            .cloned()
            .unwrap_or_else(|| catalog.versions(package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::OfflineCatalog;
    use crate::version::SemanticVersion;
    use crate::version_constraint::RangeConstraint;

    #[test]
    fn filters_to_intersection_of_all_constraints_on_a_package() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> =
            OfflineCatalog::new();
        for v in ["1.0.0", "1.5.0", "2.0.0"] {
            catalog.add_package_version("a".to_string(), v.parse().unwrap());
        }
        let constraints = vec![
            ("a".to_string(), RangeConstraint::parse(">=1.0.0").unwrap()),
            ("a".to_string(), RangeConstraint::parse("<2.0.0").unwrap()),
        ];
        let allowed = AllowedVersions::build(&catalog, &constraints).unwrap();
        let versions = allowed.versions_of(&catalog, &"a".to_string());
        assert_eq!(versions.len(), 2);
    }

    #[test]
    fn empty_intersection_is_an_error() {
        let mut catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> =
            OfflineCatalog::new();
        catalog.add_package_version("a".to_string(), "1.0.0".parse().unwrap());
        let constraints = vec![("a".to_string(), RangeConstraint::parse(">=2.0.0").unwrap())];
        let err = AllowedVersions::build(&catalog, &constraints).unwrap_err();
        assert_eq!(err.package, "a");
    }

    #[test]
    fn unknown_package_is_left_unfiltered() {
        let catalog: OfflineCatalog<String, SemanticVersion, RangeConstraint> = OfflineCatalog::new();
        let constraints = vec![("missing".to_string(), RangeConstraint::any())];
        let allowed = AllowedVersions::build(&catalog, &constraints).unwrap();
        assert!(allowed.versions_of(&catalog, &"missing".to_string()).is_empty());
    }
}
