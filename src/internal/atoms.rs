// SPDX-License-Identifier: MPL-2.0

//! Canonical atom encoding and dense id interning (component A, §3 + its
//! expansion).
//!
//! The canonical string form (`"<P> <V>"`, bare `"<P>"`, `"conflict#<i>"`)
//! remains an atom's logical identity — used for equality, hashing, and the
//! explainer's output — but every atom is interned into a dense [`AtomId`]
//! the moment it is first referenced. The SAT backend only ever sees
//! [`AtomId`]s (by way of [`AtomId::as_var`]); nothing outside this module
//! compares atom strings for SAT purposes.

use std::fmt;

use indexmap::IndexSet;

use crate::backend::Var;

/// Dense integer id an [`AtomTable`] assigns to an atom string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(u32);

impl AtomId {
    /// The backend variable this atom corresponds to. Valid because
    /// [`AtomTable`] interns atoms in the same order the solver driver
    /// allocates backend variables for them (§4.4).
    pub fn as_var(self) -> Var {
        Var::new(self.0)
    }
}

impl From<Var> for AtomId {
    fn from(var: Var) -> Self {
        AtomId(var.index())
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Canonical string form `"<P> <V>"` for a package-version atom.
pub fn package_version_atom(package: &str, version: &str) -> String {
    format!("{package} {version}")
}

/// Canonical string form `"conflict#<i>"` for a constraint's waiver atom.
pub fn conflict_atom(index: usize) -> String {
    format!("conflict#{index}")
}

/// Splits a package-version atom string back into `(package, version)`.
///
/// Per §9's design note: detection is by space presence in the atom
/// string, since neither a package name nor a version string may contain
/// one (§3).
pub fn parse_package_version(atom: &str) -> Option<(&str, &str)> {
    atom.split_once(' ')
}

/// Interns atom strings into dense [`AtomId`]s, preserving string identity
/// at the boundary.
#[derive(Debug, Default)]
pub struct AtomTable {
    atoms: IndexSet<String>,
}

impl AtomTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `atom`, returning its existing id if already known.
    pub fn intern(&mut self, atom: impl Into<String>) -> AtomId {
        let (index, _) = self.atoms.insert_full(atom.into());
        AtomId(index as u32)
    }

    /// The atom `"<P>"` meaning "some version of P is selected".
    pub fn package(&mut self, package: &str) -> AtomId {
        self.intern(package.to_string())
    }

    /// The atom `"<P> <V>"` meaning "version V of P is selected".
    pub fn package_version(&mut self, package: &str, version: &str) -> AtomId {
        self.intern(package_version_atom(package, version))
    }

    /// The atom `"conflict#<i>"` for the i-th constraint.
    pub fn conflict(&mut self, index: usize) -> AtomId {
        self.intern(conflict_atom(index))
    }

    /// Looks up an already-interned atom without creating a new one.
    pub fn get(&self, atom: &str) -> Option<AtomId> {
        self.atoms.get_index_of(atom).map(|i| AtomId(i as u32))
    }

    /// The canonical string form of an atom, for display/explainer use.
    pub fn atom_str(&self, id: AtomId) -> &str {
        self.atoms
            .get_index(id.0 as usize)
            .expect("AtomId always refers to a previously interned atom")
    }

    /// Number of distinct atoms interned so far; also the number of backend
    /// variables the driver must allocate.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}
