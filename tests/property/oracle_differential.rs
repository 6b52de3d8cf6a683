//! Differential testing: the engine against the naive oracles.
//!
//! If they disagree, the oracle is right.

use std::collections::BTreeSet;

use proptest::prelude::*;
use safecast::{derives_from, TypeRef};

use super::common::world_shape_strategy;
use super::oracles::{oracle_derives, oracle_is_safe, oracle_violations};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The restricted, parallel check finds exactly the naive cross product.
    #[test]
    fn diff_violations(shape in world_shape_strategy()) {
        let world = shape.build();
        let system = world.system();

        let rules: Vec<(TypeRef, TypeRef)> = world
            .rules
            .iter()
            .map(|&(f, t)| (world.interfaces[f].clone(), world.interfaces[t].clone()))
            .collect();
        let expected = oracle_violations(&world.concrete, &rules);

        let got: BTreeSet<_> = system
            .check_implication_constraints()
            .iter()
            .map(|v| (v.failing.id(), v.implication.from.id(), v.implication.to.id()))
            .collect();

        prop_assert_eq!(got, expected);
    }

    /// A cast is reported unsafe exactly when the oracle finds no rule for it.
    #[test]
    fn diff_cast_safety(shape in world_shape_strategy()) {
        let world = shape.build();
        let system = world.system();

        let rules: Vec<(TypeRef, TypeRef)> = world
            .rules
            .iter()
            .map(|&(f, t)| (world.interfaces[f].clone(), world.interfaces[t].clone()))
            .collect();
        let expected: Vec<usize> = world
            .casts
            .iter()
            .enumerate()
            .filter(|(_, (from, to))| !oracle_is_safe(&rules, from, to))
            .map(|(site, _)| site)
            .collect();

        let got: Vec<usize> = system.find_unsafe_casts().iter().map(|c| c.site).collect();
        prop_assert_eq!(got, expected);
    }

    /// `derives_from` agrees with the oracle on every pair of types.
    #[test]
    fn diff_derives_from(shape in world_shape_strategy()) {
        let world = shape.build();
        let all: Vec<&TypeRef> = world.interfaces.iter().chain(world.concrete.iter()).collect();
        for a in &all {
            for b in &all {
                prop_assert_eq!(derives_from(a, b), oracle_derives(a, b), "{} vs {}", a, b);
            }
        }
    }
}
