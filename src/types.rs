// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the constraint engine.
//!
//! A program is reduced to three kinds of facts: type symbols (with their
//! already-flattened interface sets), implication rules between interfaces,
//! and requested casts. Every struct here is immutable once built; the engine
//! only ever shares them behind `Arc`.
//!
//! | Type              | Meaning                                                 |
//! |-------------------|---------------------------------------------------------|
//! | `TypeId`          | Opaque handle, the only thing compared for identity     |
//! | `TypeSymbol`      | Name, kind, and transitively closed interface set       |
//! | `Implication`     | "implementing `from` obligates implementing `to`"       |
//! | `CastRequest<S>`  | A `from -> to` conversion tagged with a host site token |
//! | `Violation`       | A concrete type that breaks an implication              |
//!
//! # Invariants
//!
//! - **TypeSymbol**: `all_interfaces` is closed under interface inheritance.
//!   If `I ∈ t.all_interfaces` and `J ∈ I.all_interfaces` then `J ∈ t.all_interfaces`.
//!   The engine never re-derives this; the host's hierarchy resolver does.
//!
//! - **Implication**: identity is the pair `(from.id, to.id)`. Names are for
//!   display only and play no part in equality or hashing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// =============================================================================
// IDENTITY
// =============================================================================

/// Type-safe handle for an interned type.
///
/// Two symbols are the same type iff their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for table indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TypeId {
    fn from(id: u32) -> Self {
        TypeId(id)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What sort of declaration a symbol came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Interface,
    Class,
    Struct,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Interface => "interface",
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// TYPE SYMBOLS
// =============================================================================

/// A resolved type together with every interface it implements.
///
/// `all_interfaces` must already be transitively closed when the symbol is
/// built. Equality and hashing look at `id` only.
#[derive(Debug, Clone)]
pub struct TypeSymbol {
    id: TypeId,
    name: String,
    kind: TypeKind,
    is_abstract: bool,
    all_interfaces: BTreeSet<TypeId>,
}

/// Shared handle to a type symbol. Cheap to clone across threads.
pub type TypeRef = Arc<TypeSymbol>;

impl TypeSymbol {
    pub fn new(
        id: TypeId,
        name: impl Into<String>,
        kind: TypeKind,
        is_abstract: bool,
        all_interfaces: impl IntoIterator<Item = TypeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            is_abstract,
            all_interfaces: all_interfaces.into_iter().collect(),
        }
    }

    /// Wrap in an `Arc` for registration.
    pub fn into_ref(self) -> TypeRef {
        Arc::new(self)
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// The flattened set of implemented (or, for interfaces, extended) interfaces.
    #[inline]
    pub fn all_interfaces(&self) -> &BTreeSet<TypeId> {
        &self.all_interfaces
    }

    /// Membership in the flattened interface set. Does not count `self`.
    #[inline]
    pub fn implements(&self, interface: TypeId) -> bool {
        self.all_interfaces.contains(&interface)
    }

    /// Whether the type can be instantiated and implements at least one interface.
    ///
    /// Only these types can ever witness or break an implication, so hosts use
    /// this to filter what they register.
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract && !self.is_interface() && !self.all_interfaces.is_empty()
    }
}

impl PartialEq for TypeSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeSymbol {}

impl Hash for TypeSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// IMPLICATIONS
// =============================================================================

/// A declared guarantee: every implementer of `from` also implements `to`.
#[derive(Debug, Clone)]
pub struct Implication {
    pub from: TypeRef,
    pub to: TypeRef,
}

impl Implication {
    pub fn new(from: TypeRef, to: TypeRef) -> Self {
        Self { from, to }
    }

    /// Structural identity of the rule.
    #[inline]
    pub fn key(&self) -> (TypeId, TypeId) {
        (self.from.id(), self.to.id())
    }

    /// True if `concrete` implements `from` but not `to`.
    #[inline]
    pub fn fails_on(&self, concrete: &TypeSymbol) -> bool {
        concrete.implements(self.from.id()) && !concrete.implements(self.to.id())
    }
}

impl PartialEq for Implication {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Implication {}

impl Hash for Implication {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Implication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.from, self.to)
    }
}

// =============================================================================
// CASTS AND FINDINGS
// =============================================================================

/// A requested `from -> to` conversion.
///
/// `site` is whatever the host needs to point back at the call; the engine
/// never inspects it.
#[derive(Debug, Clone)]
pub struct CastRequest<S> {
    pub from: TypeRef,
    pub to: TypeRef,
    pub site: S,
}

impl<S> CastRequest<S> {
    pub fn new(from: TypeRef, to: TypeRef, site: S) -> Self {
        Self { from, to, site }
    }
}

impl<S> fmt::Display for CastRequest<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as {}", self.from, self.to)
    }
}

/// A concrete type that implements `implication.from` but not `implication.to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    pub failing: TypeRef,
    pub implication: Implication,
}

impl Violation {
    pub fn new(failing: TypeRef, implication: Implication) -> Self {
        Self {
            failing,
            implication,
        }
    }

    /// Ordering key used to make reports reproducible.
    pub(crate) fn sort_key(&self) -> (&str, &str, &str, TypeId, TypeId, TypeId) {
        (
            self.failing.name(),
            self.implication.from.name(),
            self.implication.to.name(),
            self.failing.id(),
            self.implication.from.id(),
            self.implication.to.id(),
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} implements {} but not {}",
            self.failing, self.implication.from, self.implication.to
        )
    }
}
