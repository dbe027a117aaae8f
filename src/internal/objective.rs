// SPDX-License-Identifier: MPL-2.0

//! Objective builder: turns pricer output into [`Step`]s (component F,
//! §4.4 steps 4-9, 11).

use crate::internal::atoms::AtomTable;
use crate::internal::step::Step;
use crate::pricer::{PriceMode, PriceTableWithPrevious, VersionPricer};

/// Builds the four `{major, minor, patch, rest}` steps for `package`'s
/// `versions` under `mode`, adding each `pv(package, v)` with its
/// corresponding per-version cost (§4.4 steps 5, 9, 11).
pub fn add_update_steps<V: std::fmt::Display>(
    atoms: &mut AtomTable,
    pricer: &impl VersionPricer<V>,
    package: &str,
    versions: &[V],
    mode: PriceMode,
    major: &mut Step,
    minor: &mut Step,
    patch: &mut Step,
    rest: &mut Step,
) {
    let table = pricer.price_versions(versions, mode);
    for (i, v) in versions.iter().enumerate() {
        let atom = atoms.package_version(package, &v.to_string());
        major.add_term(atom, table.major[i]);
        minor.add_term(atom, table.minor[i]);
        patch.add_term(atom, table.patch[i]);
        rest.add_term(atom, table.rest[i]);
    }
}

/// Builds the five `{incompat, major, minor, patch, rest}` steps for
/// `package`'s `versions` relative to `previous` (§4.4 steps 4, 8).
#[allow(clippy::too_many_arguments)]
pub fn add_previous_steps<V: std::fmt::Display>(
    atoms: &mut AtomTable,
    pricer: &impl VersionPricer<V>,
    package: &str,
    versions: &[V],
    previous: &V,
    incompat: &mut Step,
    major: &mut Step,
    minor: &mut Step,
    patch: &mut Step,
    rest: &mut Step,
) {
    let table: PriceTableWithPrevious = pricer.price_versions_with_previous(versions, previous);
    for (i, v) in versions.iter().enumerate() {
        let atom = atoms.package_version(package, &v.to_string());
        incompat.add_term(atom, table.incompat[i]);
        major.add_term(atom, table.major[i]);
        minor.add_term(atom, table.minor[i]);
        patch.add_term(atom, table.patch[i]);
        rest.add_term(atom, table.rest[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricer::SemverPricer;
    use crate::version::SemanticVersion;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn update_steps_cost_distance_from_newest() {
        let mut atoms = AtomTable::new();
        let versions = vec![v("1.0.0"), v("2.0.0")];
        let mut major = Step::new("update_major");
        let mut minor = Step::new("update_minor");
        let mut patch = Step::new("update_patch");
        let mut rest = Step::new("update_rest");
        add_update_steps(
            &mut atoms,
            &SemverPricer,
            "a",
            &versions,
            PriceMode::Update,
            &mut major,
            &mut minor,
            &mut patch,
            &mut rest,
        );
        assert_eq!(major.weighted_terms().count(), 1); // only 1.0.0 costs anything
    }

    #[test]
    fn previous_steps_flag_incompat() {
        let mut atoms = AtomTable::new();
        let versions = vec![v("1.0.0"), v("2.0.0")];
        let previous = v("1.0.0");
        let mut incompat = Step::new("previous_root_incompat");
        let mut major = Step::new("previous_root_major");
        let mut minor = Step::new("previous_root_minor");
        let mut patch = Step::new("previous_root_patch");
        let mut rest = Step::new("previous_root_rest");
        add_previous_steps(
            &mut atoms,
            &SemverPricer,
            "a",
            &versions,
            &previous,
            &mut incompat,
            &mut major,
            &mut minor,
            &mut patch,
            &mut rest,
        );
        assert_eq!(incompat.weighted_terms().count(), 1); // only 2.0.0 is incompatible
    }
}
