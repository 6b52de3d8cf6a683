// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The implication registry: a concurrent set of declared rules.
//!
//! Rules are keyed by `(from.id, to.id)` in a `BTreeMap`, which gives set
//! semantics and a deterministic iteration order. No validation happens here;
//! whether both endpoints are interfaces is the host's business.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Implication, TypeId, TypeRef};

#[derive(Debug, Default)]
pub struct ImplicationRegistry {
    rules: RwLock<BTreeMap<(TypeId, TypeId), Implication>>,
}

impl ImplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `from => to`. Returns `false` if the rule was already present.
    pub fn insert(&self, from: TypeRef, to: TypeRef) -> bool {
        let rule = Implication::new(from, to);
        let mut rules = self.rules.write();
        if rules.contains_key(&rule.key()) {
            return false;
        }
        rules.insert(rule.key(), rule);
        true
    }

    pub fn contains(&self, from: TypeId, to: TypeId) -> bool {
        self.rules.read().contains_key(&(from, to))
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// Copy out every rule in key order.
    ///
    /// Symbols are behind `Arc`, so this only bumps reference counts.
    pub fn snapshot(&self) -> Vec<Implication> {
        self.rules.read().values().cloned().collect()
    }

    /// Every interface that appears on the left of some rule.
    pub fn from_interfaces(&self) -> BTreeSet<TypeId> {
        self.rules.read().keys().map(|&(from, _)| from).collect()
    }
}
