// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The type universe: every concrete type the host has seen.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{TypeId, TypeRef};

#[derive(Debug, Default)]
pub struct TypeUniverse {
    types: RwLock<BTreeMap<TypeId, TypeRef>>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Returns `false` if it was already present.
    ///
    /// Accepts anything, including abstract or interface-less types. Those can
    /// never show up in a violation because they implement no rule's `from`.
    pub fn insert(&self, ty: TypeRef) -> bool {
        let mut types = self.types.write();
        if types.contains_key(&ty.id()) {
            return false;
        }
        types.insert(ty.id(), ty);
        true
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.types.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    pub fn snapshot(&self) -> Vec<TypeRef> {
        self.types.read().values().cloned().collect()
    }

    /// Types whose interface set shares at least one member with `interfaces`.
    pub fn implementing_any(&self, interfaces: &BTreeSet<TypeId>) -> Vec<TypeRef> {
        if interfaces.is_empty() {
            return Vec::new();
        }
        self.types
            .read()
            .values()
            .filter(|ty| !ty.all_interfaces().is_disjoint(interfaces))
            .cloned()
            .collect()
    }
}
