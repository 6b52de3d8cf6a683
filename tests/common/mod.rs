//! Shared test utilities and fixtures.

#![allow(dead_code)]

use proptest::prelude::*;
use safecast::testing::TypeFixture;
use safecast::{ConstrainedTypeSystem, TypeRef};

// ============================================================================
// FIXTURE PATHS
// ============================================================================

/// Sample compilation mirroring the shapes program.
pub const SAMPLE_DIR: &str = "data/sample";

// ============================================================================
// RANDOM WORLDS
// ============================================================================

/// A random but well-formed program: closed interface sets, rules between
/// interfaces, and casts. Rules are index pairs into `interfaces`. Casts go
/// to an interface from either an interface or a concrete type.
#[derive(Debug, Clone)]
pub struct World {
    pub interfaces: Vec<TypeRef>,
    pub concrete: Vec<TypeRef>,
    pub rules: Vec<(usize, usize)>,
    pub casts: Vec<(TypeRef, TypeRef)>,
}

/// Raw choices a `World` is built from.
#[derive(Debug, Clone)]
pub struct WorldShape {
    /// For interface `i`, which earlier interfaces it extends (indices taken mod `i`).
    pub extends: Vec<Vec<usize>>,
    /// For each concrete type, which interfaces it implements directly.
    pub implements: Vec<Vec<usize>>,
    pub rules: Vec<(usize, usize)>,
    pub casts: Vec<(usize, usize)>,
    /// Casts from concrete type `c % concrete.len()` to interface `i`.
    pub concrete_casts: Vec<(usize, usize)>,
}

pub fn world_shape_strategy() -> impl Strategy<Value = WorldShape> {
    (2usize..8).prop_flat_map(|n| {
        let index = 0..n;
        (
            prop::collection::vec(prop::collection::vec(0..n, 0..3), n),
            prop::collection::vec(prop::collection::vec(index.clone(), 1..4), 0..8),
            prop::collection::vec((index.clone(), index.clone()), 0..6),
            prop::collection::vec((index.clone(), index.clone()), 0..10),
            prop::collection::vec((0usize..8, index), 0..4),
        )
            .prop_map(|(extends, implements, rules, casts, concrete_casts)| WorldShape {
                extends,
                implements,
                rules,
                casts,
                concrete_casts,
            })
    })
}

impl WorldShape {
    pub fn build(&self) -> World {
        let mut fx = TypeFixture::new();
        let mut interfaces: Vec<TypeRef> = Vec::new();
        for (i, parents) in self.extends.iter().enumerate() {
            // Only earlier interfaces, so the hierarchy stays acyclic.
            let extends: Vec<&TypeRef> = if i == 0 {
                Vec::new()
            } else {
                parents.iter().map(|p| &interfaces[p % i]).collect()
            };
            let iface = fx.interface(&format!("I{}", i), &extends);
            interfaces.push(iface);
        }
        let concrete: Vec<TypeRef> = self
            .implements
            .iter()
            .enumerate()
            .map(|(c, direct)| {
                let direct: Vec<&TypeRef> = direct.iter().map(|i| &interfaces[*i]).collect();
                fx.class(&format!("C{}", c), &direct)
            })
            .collect();
        let mut casts: Vec<(TypeRef, TypeRef)> = self
            .casts
            .iter()
            .map(|&(f, t)| (interfaces[f].clone(), interfaces[t].clone()))
            .collect();
        if !concrete.is_empty() {
            casts.extend(
                self.concrete_casts
                    .iter()
                    .map(|&(c, t)| (concrete[c % concrete.len()].clone(), interfaces[t].clone())),
            );
        }
        World {
            interfaces,
            concrete,
            rules: self.rules.clone(),
            casts,
        }
    }
}

impl World {
    /// Register everything, casts tagged with their index.
    pub fn system(&self) -> ConstrainedTypeSystem<usize> {
        let system = ConstrainedTypeSystem::new();
        for ty in &self.concrete {
            system.add_concrete_type(ty.clone());
        }
        for &(f, t) in &self.rules {
            system.add_implication(self.interfaces[f].clone(), self.interfaces[t].clone());
        }
        for (site, (from, to)) in self.casts.iter().enumerate() {
            system.add_cast(from.clone(), to.clone(), site);
        }
        system
    }
}
