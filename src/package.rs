// SPDX-License-Identifier: MPL-2.0

//! Trait for identifying packages.
//! Automatically implemented for types implementing
//! [Clone] + [Eq] + [Hash] + [Debug] + [Display](std::fmt::Display).

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Opaque non-empty package name, per §3.
///
/// Automatically implemented for any type that already implements
/// [Clone] + [Eq] + [Hash] + [Debug] + [Display](std::fmt::Display); a
/// common choice is [String] or `&'static str`.
pub trait Package: Clone + Eq + Hash + Debug + Display {}

impl<T: Clone + Eq + Hash + Debug + Display> Package for T {}
