// SPDX-License-Identifier: MPL-2.0

//! The `VersionPricer` external collaborator (§6) and a SemVer-flavored
//! reference implementation.
//!
//! Unlike [`crate::CatalogCache`] and [`crate::VersionConstraint`], which
//! mirror collaborator traits already present in the teacher crate, pricing
//! has no teacher analog (pubgrub has no cost model). The reference impl
//! here follows the version-distance scoring style seen in the corpus's
//! other resolver examples: a version's cost on each axis is the magnitude
//! of its difference from a reference version on that axis, with
//! higher-order axes (major) dominating lower ones (patch) — once two
//! versions differ on a more significant axis, finer axes stop
//! contributing, since the coarser difference already captures "how far".

use crate::version::SemanticVersion;

/// Which bias a [`VersionPricer::price_versions`] call should apply, per §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMode {
    /// Prefer the newest available version: cost grows with distance below
    /// the newest.
    Update,
    /// Prefer the oldest available version, except patch-level differences
    /// are free: used for indirect dependencies the driver does not want to
    /// churn (§4.4 step 11).
    GravityWithPatches,
}

/// Four equal-length, per-version cost vectors, aligned to the `versions`
/// slice passed to [`VersionPricer::price_versions`].
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    pub major: Vec<u64>,
    pub minor: Vec<u64>,
    pub patch: Vec<u64>,
    pub rest: Vec<u64>,
}

impl PriceTable {
    fn with_len(len: usize) -> Self {
        Self {
            major: vec![0; len],
            minor: vec![0; len],
            patch: vec![0; len],
            rest: vec![0; len],
        }
    }
}

/// Five equal-length, per-version cost vectors, aligned to the `versions`
/// slice passed to [`VersionPricer::price_versions_with_previous`].
#[derive(Debug, Clone, Default)]
pub struct PriceTableWithPrevious {
    pub incompat: Vec<u64>,
    pub major: Vec<u64>,
    pub minor: Vec<u64>,
    pub patch: Vec<u64>,
    pub rest: Vec<u64>,
}

impl PriceTableWithPrevious {
    fn with_len(len: usize) -> Self {
        Self {
            incompat: vec![0; len],
            major: vec![0; len],
            minor: vec![0; len],
            patch: vec![0; len],
            rest: vec![0; len],
        }
    }
}

/// A partition of `versions` relative to `previous`, per §6.
#[derive(Debug, Clone, Default)]
pub struct VersionPartition<V> {
    pub older: Vec<V>,
    pub compatible: Vec<V>,
    pub higher_major: Vec<V>,
}

/// Computes per-version integer cost vectors under several costing modes,
/// per §6. Never called by the core to compare versions directly; its
/// output only feeds [`Step`](crate::internal::step::Step) objective terms.
pub trait VersionPricer<V> {
    fn price_versions(&self, versions: &[V], mode: PriceMode) -> PriceTable;
    fn price_versions_with_previous(&self, versions: &[V], previous: &V) -> PriceTableWithPrevious;
    fn partition_versions(&self, versions: &[V], previous: &V) -> VersionPartition<V>;
}

/// Reference [`VersionPricer`] over [`SemanticVersion`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverPricer;

fn abs_diff(a: u32, b: u32) -> u64 {
    a.abs_diff(b) as u64
}

impl VersionPricer<SemanticVersion> for SemverPricer {
    fn price_versions(&self, versions: &[SemanticVersion], mode: PriceMode) -> PriceTable {
        let mut table = PriceTable::with_len(versions.len());
        if versions.is_empty() {
            return table;
        }
        let reference = match mode {
            PriceMode::Update => versions.iter().max().expect("non-empty"),
            PriceMode::GravityWithPatches => versions.iter().min().expect("non-empty"),
        };
        for (i, v) in versions.iter().enumerate() {
            let major = abs_diff(v.major(), reference.major());
            let minor = if major == 0 {
                abs_diff(v.minor(), reference.minor())
            } else {
                0
            };
            let patch = match mode {
                PriceMode::GravityWithPatches => 0,
                PriceMode::Update => {
                    if major == 0 && minor == 0 {
                        abs_diff(v.patch(), reference.patch())
                    } else {
                        0
                    }
                }
            };
            table.major[i] = major;
            table.minor[i] = minor;
            table.patch[i] = patch;
        }
        table
    }

    fn price_versions_with_previous(
        &self,
        versions: &[SemanticVersion],
        previous: &SemanticVersion,
    ) -> PriceTableWithPrevious {
        let mut table = PriceTableWithPrevious::with_len(versions.len());
        for (i, v) in versions.iter().enumerate() {
            let major = abs_diff(v.major(), previous.major());
            let minor = if major == 0 {
                abs_diff(v.minor(), previous.minor())
            } else {
                0
            };
            let patch = if major == 0 && minor == 0 {
                abs_diff(v.patch(), previous.patch())
            } else {
                0
            };
            table.incompat[i] = if v.major() != previous.major() { 1 } else { 0 };
            table.major[i] = major;
            table.minor[i] = minor;
            table.patch[i] = patch;
        }
        table
    }

    fn partition_versions(
        &self,
        versions: &[SemanticVersion],
        previous: &SemanticVersion,
    ) -> VersionPartition<SemanticVersion> {
        let mut partition = VersionPartition::default();
        for v in versions {
            if v.major() > previous.major() {
                partition.higher_major.push(v.clone());
            } else if v.release() < previous.release() {
                partition.older.push(v.clone());
            } else {
                partition.compatible.push(v.clone());
            }
        }
        partition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn update_mode_prefers_newest() {
        let versions = vec![v("1.0.0"), v("1.1.0"), v("2.0.0")];
        let table = SemverPricer.price_versions(&versions, PriceMode::Update);
        assert_eq!(table.major, vec![1, 1, 0]);
        assert_eq!(table.minor[2], 0);
    }

    #[test]
    fn gravity_mode_never_charges_for_patch() {
        let versions = vec![v("1.0.0"), v("1.0.5"), v("1.1.0")];
        let table = SemverPricer.price_versions(&versions, PriceMode::GravityWithPatches);
        assert_eq!(table.patch, vec![0, 0, 0]);
    }

    #[test]
    fn with_previous_flags_major_bump_incompatible() {
        let previous = v("1.2.3");
        let versions = vec![v("1.2.3"), v("1.3.0"), v("2.0.0")];
        let table = SemverPricer.price_versions_with_previous(&versions, &previous);
        assert_eq!(table.incompat, vec![0, 0, 1]);
    }

    #[test]
    fn partition_classifies_by_semver_boundary() {
        let previous = v("1.2.0");
        let versions = vec![v("1.0.0"), v("1.2.5"), v("2.0.0")];
        let partition = SemverPricer.partition_versions(&versions, &previous);
        assert_eq!(partition.older, vec![v("1.0.0")]);
        assert_eq!(partition.compatible, vec![v("1.2.5")]);
        assert_eq!(partition.higher_major, vec![v("2.0.0")]);
    }
}
