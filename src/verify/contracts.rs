// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts for the finalize queries.
//!
//! Debug-mode assertions that re-check each reported finding against the
//! definitions in `types` and `oracle`. They:
//!
//! 1. Are **zero-cost in release builds** (use `debug_assert!`)
//! 2. Fail at the point where a wrong finding is produced, not where it is rendered
//! 3. Restate the definitions directly, without the restriction shortcut
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function            | Property                                            |
//! |------------------------------|-----------------------------------------------------|
//! | `check_violation_sound`      | failing type implements `from` and not `to`         |
//! | `check_violations_unique`    | one finding per (type, rule) pair                   |
//! | `check_cast_unwitnessed`     | no registered rule subsumes an unsafe cast          |
//! | `check_interface_set_closed` | a symbol's interface set is transitively closed     |

use std::collections::{BTreeMap, HashSet};

use crate::oracle::subsumes;
use crate::types::{CastRequest, Implication, TypeId, TypeRef, TypeSymbol, Violation};

// ============================================================================
// VIOLATION CONTRACTS
// ============================================================================

/// Check that a reported violation really breaks its rule.
///
/// # Panics (debug builds only)
/// Panics if the failing type does not implement `from`, or does implement `to`.
#[inline]
pub fn check_violation_sound(violation: &Violation) {
    let ty = &violation.failing;
    let rule = &violation.implication;
    debug_assert!(
        ty.implements(rule.from.id()),
        "Contract violation: Violation.Sound - {} does not implement {}",
        ty,
        rule.from
    );
    debug_assert!(
        !ty.implements(rule.to.id()),
        "Contract violation: Violation.Sound - {} implements {} so {} holds",
        ty,
        rule.to,
        rule
    );
}

/// Check that no (type, rule) pair is reported twice.
#[inline]
pub fn check_violations_unique(violations: &[Violation]) {
    let mut seen = HashSet::with_capacity(violations.len());
    for (i, v) in violations.iter().enumerate() {
        let fresh = seen.insert((v.failing.id(), v.implication.key()));
        debug_assert!(
            fresh,
            "Contract violation: Violations.Unique - violations[{}] ({}) reported twice",
            i,
            v
        );
    }
}

// ============================================================================
// CAST CONTRACTS
// ============================================================================

/// Check that an unsafe cast has no witnessing rule.
///
/// # Panics (debug builds only)
/// Panics if some rule in `rules` subsumes the cast.
#[inline]
pub fn check_cast_unwitnessed<S>(cast: &CastRequest<S>, rules: &[Implication]) {
    for rule in rules {
        debug_assert!(
            !subsumes(rule, &cast.from, &cast.to),
            "Contract violation: UnsafeCast.Unwitnessed - {} is justified by {}",
            cast,
            rule
        );
    }
}

// ============================================================================
// HIERARCHY CONTRACTS
// ============================================================================

/// Check that `symbol`'s interface set already contains everything its
/// interfaces extend.
///
/// `lookup` maps ids to symbols; ids missing from it are skipped.
#[inline]
pub fn check_interface_set_closed(symbol: &TypeSymbol, lookup: &BTreeMap<TypeId, TypeRef>) {
    for iface in symbol.all_interfaces() {
        let Some(iface) = lookup.get(iface) else {
            continue;
        };
        for inherited in iface.all_interfaces() {
            debug_assert!(
                symbol.implements(*inherited),
                "Contract violation: InterfaceSet.Closed - {} implements {} \
                 but is missing {} which {} extends",
                symbol,
                iface,
                inherited,
                iface
            );
        }
    }
}
