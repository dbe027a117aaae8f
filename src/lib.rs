// SPDX-License-Identifier: MPL-2.0

//! A constraint/optimization core for package-version dependency solving.
//!
//! Dependency resolution is modeled as boolean satisfiability with
//! lexicographic pseudo-boolean optimization: every `(package, version)`
//! pair becomes a boolean atom, every declared dependency and top-level
//! constraint becomes a clause, and the "best" solution is whichever
//! satisfying assignment minimizes a fixed sequence of weighted-sum cost
//! axes, each locked in before the next is considered.
//!
//! The core itself never touches a package registry, a lockfile, or the
//! filesystem: [`CatalogCache`], [`VersionConstraint`], [`VersionPricer`]
//! and [`backend::SatBackend`] are the seams a caller plugs in. [`OfflineCatalog`],
//! [`RangeConstraint`], [`SemverPricer`] and [`backend::DpllBackend`] are
//! reference implementations of each, sufficient on their own for a
//! SemVer-flavored resolver and for the test suite.
//!
//! ```
//! use depsolve_core::{Dependency, Input, OfflineCatalog, RangeConstraint, SemverPricer};
//! use depsolve_core::backend::DpllBackend;
//!
//! let mut catalog: OfflineCatalog<String, depsolve_core::SemanticVersion, RangeConstraint> =
//!     OfflineCatalog::new();
//! catalog.add_package_version("left-pad".to_string(), "1.0.0".parse().unwrap());
//!
//! let input = Input::new().with_root("left-pad".to_string());
//! let solution = depsolve_core::solve::<_, _, _, _, _, DpllBackend>(
//!     &input,
//!     &catalog,
//!     &SemverPricer,
//!     &depsolve_core::SolveOptions::default(),
//!     &mut || {},
//! )
//! .unwrap();
//! assert_eq!(solution.answer.get("left-pad").unwrap().to_string(), "1.0.0");
//! ```

mod internal;

pub mod backend;
pub mod catalog;
pub mod dependency;
pub mod error;
pub mod input;
pub mod package;
pub mod pricer;
pub mod solver;
pub mod version;
pub mod version_constraint;

pub use catalog::{CatalogCache, OfflineCatalog};
pub use dependency::Dependency;
pub use error::SolveError;
pub use input::Input;
pub use package::Package;
pub use pricer::{PriceMode, PriceTable, PriceTableWithPrevious, SemverPricer, VersionPartition, VersionPricer};
pub use solver::{solve, SolveOptions, Solution};
pub use version::{SemanticVersion, Version, VersionParseError};
pub use version_constraint::{ConstraintParseError, RangeConstraint, VersionConstraint};
