// SPDX-License-Identifier: MPL-2.0

//! Error surface (§7): a single constraint-solver error kind, differing
//! only in accumulated message content, plus a distinct internal
//! assertion-failure kind for states that should be unreachable.
//!
//! Message assembly happens at the call site (the analysis pass or the
//! solver driver, per §7's "errors accumulate in a per-solve list");
//! each variant here just carries the already-joined text and the
//! structured data a programmatic caller might want.

use std::marker::PhantomData;

use thiserror::Error;

use crate::package::Package;

/// A constraint-solver error (§7).
#[derive(Error, Debug)]
pub enum SolveError<P: Package> {
    /// Root triage found package names with no known versions (§4.2,
    /// §7.1). Raised before clause generation.
    #[error("{message}")]
    UnknownRootDependencies {
        packages: Vec<P>,
        message: String,
    },

    /// No version of `package` satisfies the intersection of its top-level
    /// constraints (§4.1, §7.2).
    #[error("{message}")]
    NoVersionSatisfiesConstraints {
        package: P,
        message: String,
    },

    /// A package reachable only through a dependency the catalog cannot
    /// resolve was nonetheless selected (§4.4 step 1, §7.3a).
    #[error("{message}")]
    UnknownPackagesRequired { message: String },

    /// A constraint was violated and waived (§4.4 step 2, §4.6, §7.3b).
    #[error("{message}")]
    ConstraintConflict { message: String },

    /// A root's optimal version would break compatibility with the
    /// previous solution and `allow_incompatible_update` was not set
    /// (§4.4 step 4, §7.3c).
    #[error("{message}\n\nrun again with --allow-incompatible-update to allow this")]
    BreakingChangeToRoot { message: String },

    /// A state the implementation asserts cannot occur: a defect signal,
    /// not user input (§7).
    #[error("internal solver invariant violated: {message}")]
    Internal {
        message: String,
        #[doc(hidden)]
        _marker: PhantomData<P>,
    },
}

impl<P: Package> SolveError<P> {
    pub(crate) fn unknown_root_dependencies(packages: Vec<P>) -> Self {
        let plural = if packages.len() == 1 { "y" } else { "ies" };
        let lines: Vec<String> = packages.iter().map(|p| format!("* {p}")).collect();
        let message = format!("unknown root dependenc{plural}:\n{}", lines.join("\n"));
        Self::UnknownRootDependencies { packages, message }
    }

    pub(crate) fn no_version_satisfies_constraints(package: P, constraints: &[String]) -> Self {
        let message = format!(
            "no version of {package} satisfies its constraints:\n{}",
            constraints.iter().map(|c| format!("* {c}")).collect::<Vec<_>>().join("\n")
        );
        Self::NoVersionSatisfiesConstraints { package, message }
    }

    pub(crate) fn unknown_packages_required(reasons: Vec<String>) -> Self {
        Self::UnknownPackagesRequired {
            message: format!("unknown package(s) required:\n{}", reasons.join("\n")),
        }
    }

    pub(crate) fn constraint_conflict(messages: Vec<String>) -> Self {
        Self::ConstraintConflict {
            message: messages.join("\n\n"),
        }
    }

    pub(crate) fn breaking_change_to_root(reasons: Vec<String>) -> Self {
        Self::BreakingChangeToRoot {
            message: reasons.join("\n"),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            _marker: PhantomData,
        }
    }
}
