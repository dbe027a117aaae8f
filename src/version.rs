// SPDX-License-Identifier: MPL-2.0

//! Trait and reference implementation for package versions.

use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use thiserror::Error;

/// Opaque non-empty version string, per §3.
///
/// The core never compares two versions directly; it only ever asks a
/// [`crate::VersionConstraint`] whether one satisfies it, or a
/// [`crate::VersionPricer`] to rank/cost a set of them. The only thing the
/// core itself derives from a `Version` is whether it denotes a prerelease,
/// via the presence of a hyphen in its [Display] form.
///
/// Automatically implemented for any type already implementing
/// [Clone] + [Eq] + [Hash](std::hash::Hash) + [Debug] + [Display].
pub trait Version: Clone + Eq + std::hash::Hash + Debug + Display {
    /// A hyphen in the version's string form marks a prerelease (§3).
    fn is_prerelease(&self) -> bool {
        self.to_string().contains('-')
    }
}

impl<T: Clone + Eq + std::hash::Hash + Debug + Display> Version for T {}

/// Reference version scheme: `major.minor.patch[-prerelease]`.
///
/// Not required by the core (which treats versions as opaque), but used by
/// the reference [`crate::VersionConstraint`] and [`crate::VersionPricer`]
/// implementations, and by the test suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: u32,
    prerelease: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    pub fn prerelease(major: u32, minor: u32, patch: u32, label: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Some(label.into()),
        }
    }

    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// The release (non-prerelease) version, ignoring any prerelease label.
    pub fn release(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }

    pub fn bump_patch(&self) -> Self {
        Self::new(self.major, self.minor, self.patch + 1)
    }

    pub fn bump_minor(&self) -> Self {
        Self::new(self.major, self.minor + 1, 0)
    }

    pub fn bump_major(&self) -> Self {
        Self::new(self.major + 1, 0, 0)
    }
}

/// Error creating [`SemanticVersion`] from a string.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("version {full_version} must contain 3 numbers separated by dots, optionally followed by -prerelease")]
    NotThreeParts { full_version: String },
    #[error("cannot parse '{version_part}' in '{full_version}' as u32: {parse_error}")]
    ParseIntError {
        full_version: String,
        version_part: String,
        parse_error: String,
    },
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (release, prerelease) = match s.split_once('-') {
            Some((release, pre)) => (release, Some(pre.to_string())),
            None => (s, None),
        };

        let parse_u32 = |part: &str| {
            part.parse::<u32>().map_err(|e| VersionParseError::ParseIntError {
                full_version: s.to_string(),
                version_part: part.to_string(),
                parse_error: e.to_string(),
            })
        };

        let mut parts = release.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(major), Some(minor), Some(patch), None) => Ok(Self {
                major: parse_u32(major)?,
                minor: parse_u32(minor)?,
                patch: parse_u32(patch)?,
                prerelease,
            }),
            _ => Err(VersionParseError::NotThreeParts {
                full_version: s.to_string(),
            }),
        }
    }
}

impl Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_versions() {
        assert_eq!("1.2.3".parse(), Ok(SemanticVersion::new(1, 2, 3)));
    }

    #[test]
    fn parses_prerelease_versions() {
        assert_eq!(
            "1.2.3-beta.1".parse(),
            Ok(SemanticVersion::prerelease(1, 2, 3, "beta.1"))
        );
        assert!("1.2.3-beta.1".parse::<SemanticVersion>().unwrap().is_prerelease());
    }

    #[test]
    fn rejects_malformed_versions() {
        assert_eq!(
            "1.2".parse::<SemanticVersion>(),
            Err(VersionParseError::NotThreeParts {
                full_version: "1.2".to_owned()
            })
        );
    }

    #[test]
    fn display_roundtrips() {
        let v: SemanticVersion = "1.2.3-rc.1".parse().unwrap();
        assert_eq!(v.to_string(), "1.2.3-rc.1");
    }
}
