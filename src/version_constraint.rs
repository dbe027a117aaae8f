// SPDX-License-Identifier: MPL-2.0

//! The `VersionConstraint` external collaborator (§6) and a reference
//! implementation built on the sibling `version-ranges` crate.

use std::fmt::{Debug, Display};

use version_ranges::Ranges;

use crate::version::{SemanticVersion, Version};

/// Decides whether a version string satisfies a raw version constraint,
/// per §6.
///
/// The core never parses or interprets `raw()`; it is opaque text threaded
/// through for diagnostics (conflict messages quote it verbatim, per §4.6).
pub trait VersionConstraint<V: Version>: Clone + Debug {
    /// The constraint's original source text, quoted verbatim in conflict
    /// explanations.
    fn raw(&self) -> &str;

    /// Whether `version` satisfies this constraint.
    fn satisfies(&self, version: &V) -> bool;
}

/// Reference [`VersionConstraint`] over [`SemanticVersion`], built on
/// [`version_ranges::Ranges`].
///
/// Accepts a small comparator grammar: `*` (any version), `1.2.3` or
/// `=1.2.3` (both exact), `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`, and
/// `^1.2.3` (caret: same major version, or same major.minor when major is
/// `0`). Multiple comparators may be joined with a comma to mean their
/// conjunction, e.g. `>=1.2.0, <2.0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeConstraint {
    raw: String,
    range: Ranges<SemanticVersion>,
}

impl RangeConstraint {
    /// The constraint matching every version.
    pub fn any() -> Self {
        Self {
            raw: "*".to_string(),
            range: Ranges::full(),
        }
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, ConstraintParseError> {
        let raw = raw.into();
        let mut range = Ranges::full();
        for comparator in raw.split(',') {
            let comparator = comparator.trim();
            if comparator.is_empty() {
                continue;
            }
            range = range.intersection(&parse_comparator(&raw, comparator)?);
        }
        Ok(Self { raw, range })
    }
}

impl Display for RangeConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl VersionConstraint<SemanticVersion> for RangeConstraint {
    fn raw(&self) -> &str {
        &self.raw
    }

    fn satisfies(&self, version: &SemanticVersion) -> bool {
        self.range.contains(version)
    }
}

fn parse_comparator(full: &str, comparator: &str) -> Result<Ranges<SemanticVersion>, ConstraintParseError> {
    let version_err = |e: crate::version::VersionParseError| ConstraintParseError::BadVersion {
        full_constraint: full.to_string(),
        source: e,
    };

    if comparator == "*" {
        return Ok(Ranges::full());
    }
    if let Some(rest) = comparator.strip_prefix(">=") {
        let v: SemanticVersion = rest.trim().parse().map_err(version_err)?;
        return Ok(Ranges::higher_than(v));
    }
    if let Some(rest) = comparator.strip_prefix('>') {
        let v: SemanticVersion = rest.trim().parse().map_err(version_err)?;
        return Ok(Ranges::strictly_higher_than(v));
    }
    if let Some(rest) = comparator.strip_prefix("<=") {
        let v: SemanticVersion = rest.trim().parse().map_err(version_err)?;
        return Ok(Ranges::lower_than(v));
    }
    if let Some(rest) = comparator.strip_prefix('<') {
        let v: SemanticVersion = rest.trim().parse().map_err(version_err)?;
        return Ok(Ranges::strictly_lower_than(v));
    }
    if let Some(rest) = comparator.strip_prefix('^') {
        let v: SemanticVersion = rest.trim().parse().map_err(version_err)?;
        let upper = if v.major() > 0 {
            v.bump_major()
        } else {
            v.bump_minor()
        };
        return Ok(Ranges::between(v, upper));
    }
    if let Some(rest) = comparator.strip_prefix('=') {
        let v: SemanticVersion = rest.trim().parse().map_err(version_err)?;
        return Ok(Ranges::singleton(v));
    }
    if !comparator.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ConstraintParseError::Malformed {
            full_constraint: full.to_string(),
            comparator: comparator.to_string(),
        });
    }
    let v: SemanticVersion = comparator.parse().map_err(version_err)?;
    Ok(Ranges::singleton(v))
}

/// Error parsing a [`RangeConstraint`] from its raw text.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConstraintParseError {
    #[error("constraint '{full_constraint}' has an unrecognized comparator '{comparator}'")]
    Malformed {
        full_constraint: String,
        comparator: String,
    },
    #[error("constraint '{full_constraint}' contains an invalid version: {source}")]
    BadVersion {
        full_constraint: String,
        #[source]
        source: crate::version::VersionParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SemanticVersion {
        s.parse().unwrap()
    }

    #[test]
    fn any_matches_everything() {
        let c = RangeConstraint::any();
        assert!(c.satisfies(&v("0.0.1")));
        assert!(c.satisfies(&v("99.0.0")));
    }

    #[test]
    fn equals_prefix_and_bare_digit_are_both_exact() {
        let prefixed = RangeConstraint::parse("=1.2.3").unwrap();
        let bare = RangeConstraint::parse("1.2.3").unwrap();
        assert!(prefixed.satisfies(&v("1.2.3")));
        assert!(!prefixed.satisfies(&v("1.2.4")));
        assert!(bare.satisfies(&v("1.2.3")));
        assert!(!bare.satisfies(&v("1.2.4")));
    }

    #[test]
    fn caret_constrains_to_compatible_major() {
        let c = RangeConstraint::parse("^1.2.0").unwrap();
        assert!(c.satisfies(&v("1.2.0")));
        assert!(c.satisfies(&v("1.9.9")));
        assert!(!c.satisfies(&v("2.0.0")));
        assert!(!c.satisfies(&v("1.1.9")));
    }

    #[test]
    fn caret_on_zero_major_constrains_to_minor() {
        let c = RangeConstraint::parse("^0.2.0").unwrap();
        assert!(c.satisfies(&v("0.2.5")));
        assert!(!c.satisfies(&v("0.3.0")));
    }

    #[test]
    fn conjunction_of_comparators() {
        let c = RangeConstraint::parse(">=1.0.0, <2.0.0").unwrap();
        assert!(c.satisfies(&v("1.5.0")));
        assert!(!c.satisfies(&v("2.0.0")));
        assert!(!c.satisfies(&v("0.9.0")));
    }

    #[test]
    fn raw_text_is_preserved_verbatim() {
        let c = RangeConstraint::parse(">=1.0.0, <2.0.0").unwrap();
        assert_eq!(c.raw(), ">=1.0.0, <2.0.0");
    }

    #[test]
    fn rejects_unknown_comparator() {
        assert_eq!(
            RangeConstraint::parse("~1.0.0"),
            Err(ConstraintParseError::Malformed {
                full_constraint: "~1.0.0".to_string(),
                comparator: "~1.0.0".to_string(),
            })
        );
    }
}
