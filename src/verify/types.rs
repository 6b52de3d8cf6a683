// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type wrappers that make an unclosed hierarchy unrepresentable.
//!
//! The oracle trusts each symbol's interface set to be flattened already. A
//! `ClosedHierarchy` checks that once, at construction, and the guarantee holds
//! for as long as the wrapper lives.
//!
//! | Type                    | What's Guaranteed                                      |
//! |-------------------------|--------------------------------------------------------|
//! | `ClosedHierarchy`       | Every interface set is closed and names real interfaces|
//! | `VerificationReport<S>` | Both finalize results, taken from the same aggregate   |
//!
//! # Example
//!
//! ```ignore
//! let hierarchy = ClosedHierarchy::new(symbols)?;
//! for ty in hierarchy.concrete() {
//!     system.add_concrete_type(ty.clone());
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{CastRequest, TypeId, TypeRef, Violation};

/// Error type for hierarchy invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// Two symbols were given the same id.
    DuplicateId { id: TypeId, first: String, second: String },
    /// An interface set refers to an id with no symbol.
    UnknownInterface { ty: String, interface: TypeId },
    /// An interface set refers to a class or struct.
    NotAnInterface { ty: String, member: String },
    /// A type lists itself among its own interfaces.
    SelfReference { ty: String },
    /// `ty` implements `via`, which extends `missing`, but `ty` lacks `missing`.
    NotClosed { ty: String, via: String, missing: String },
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantError::DuplicateId { id, first, second } => {
                write!(f, "type id {} used by both {} and {}", id, first, second)
            }
            InvariantError::UnknownInterface { ty, interface } => {
                write!(f, "{} refers to unknown interface {}", ty, interface)
            }
            InvariantError::NotAnInterface { ty, member } => {
                write!(f, "{} lists {} as an interface but it is not one", ty, member)
            }
            InvariantError::SelfReference { ty } => {
                write!(f, "{} lists itself among its interfaces", ty)
            }
            InvariantError::NotClosed { ty, via, missing } => {
                write!(
                    f,
                    "{} implements {} but not {} which {} extends",
                    ty, via, missing, via
                )
            }
        }
    }
}

impl std::error::Error for InvariantError {}

/// A set of symbols whose interface sets are known to be transitively closed.
///
/// # Invariants (enforced at construction)
/// - ids are unique
/// - every member of an interface set is a known interface symbol
/// - no symbol lists itself
/// - `I ∈ t.all_interfaces ∧ J ∈ I.all_interfaces ⇒ J ∈ t.all_interfaces`
#[derive(Debug, Clone, Default)]
pub struct ClosedHierarchy {
    symbols: BTreeMap<TypeId, TypeRef>,
}

impl ClosedHierarchy {
    pub fn new(symbols: impl IntoIterator<Item = TypeRef>) -> Result<Self, InvariantError> {
        let mut by_id: BTreeMap<TypeId, TypeRef> = BTreeMap::new();
        for sym in symbols {
            if let Some(existing) = by_id.get(&sym.id()) {
                return Err(InvariantError::DuplicateId {
                    id: sym.id(),
                    first: existing.name().to_string(),
                    second: sym.name().to_string(),
                });
            }
            by_id.insert(sym.id(), sym);
        }

        for sym in by_id.values() {
            if sym.implements(sym.id()) {
                return Err(InvariantError::SelfReference {
                    ty: sym.name().to_string(),
                });
            }
            for iface_id in sym.all_interfaces() {
                let iface = by_id
                    .get(iface_id)
                    .ok_or_else(|| InvariantError::UnknownInterface {
                        ty: sym.name().to_string(),
                        interface: *iface_id,
                    })?;
                if !iface.is_interface() {
                    return Err(InvariantError::NotAnInterface {
                        ty: sym.name().to_string(),
                        member: iface.name().to_string(),
                    });
                }
                if let Some(missing) = iface
                    .all_interfaces()
                    .iter()
                    .find(|inherited| !sym.implements(**inherited))
                {
                    return Err(InvariantError::NotClosed {
                        ty: sym.name().to_string(),
                        via: iface.name().to_string(),
                        missing: by_id
                            .get(missing)
                            .map_or_else(|| missing.to_string(), |m| m.name().to_string()),
                    });
                }
            }
        }

        Ok(Self { symbols: by_id })
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeRef> {
        self.symbols.get(&id)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.symbols.values()
    }

    /// Symbols worth registering in a type universe.
    pub fn concrete(&self) -> impl Iterator<Item = &TypeRef> {
        self.symbols.values().filter(|t| t.is_concrete())
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<TypeId, TypeRef> {
        &self.symbols
    }
}

/// Both finalize results for one unit of work.
#[derive(Debug, Clone)]
pub struct VerificationReport<S> {
    /// Concrete types that break a declared implication.
    pub violations: Vec<Violation>,
    /// Casts that no single implication justifies, in registration order.
    pub unsafe_casts: Vec<CastRequest<S>>,
    /// Size of the type universe when the report was taken.
    pub types_checked: usize,
    /// Number of distinct implications.
    pub implications: usize,
    /// Number of cast requests evaluated.
    pub casts_checked: usize,
}

impl<S> VerificationReport<S> {
    /// No violations and no unsafe casts.
    pub fn is_sound(&self) -> bool {
        self.violations.is_empty() && self.unsafe_casts.is_empty()
    }

    pub fn finding_count(&self) -> usize {
        self.violations.len() + self.unsafe_casts.len()
    }
}
