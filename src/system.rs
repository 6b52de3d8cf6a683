// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The constrained type system: registration plus the two finalize queries.
//!
//! # Protocol
//!
//! ```text
//!  collect (any thread, any order)          verify (once, after a barrier)
//! ┌──────────────────────────────┐        ┌──────────────────────────────────┐
//! │ add_concrete_type(t)         │        │ check_implication_constraints()  │
//! │ add_implication(from, to)    │ ─────▶ │ find_unsafe_casts()              │
//! │ add_cast(from, to, site)     │        │                                  │
//! └──────────────────────────────┘        └──────────────────────────────────┘
//! ```
//!
//! Every registration method takes `&self` and is safe to call from many threads
//! at once; inserts commute, so any interleaving yields the same aggregate.
//!
//! The engine cannot tell when registration is over. Callers must establish a
//! happens-before edge between the last `add_*` call and the first finalize
//! query (joining the worker threads, or finishing a rayon scope, is enough).
//! The two queries only read, and may run concurrently or in either order.

use parking_lot::Mutex;
use tracing::{debug, info};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::oracle::find_witness;
use crate::registry::ImplicationRegistry;
use crate::types::{CastRequest, Implication, TypeRef, TypeSymbol, Violation};
use crate::universe::TypeUniverse;
use crate::verify::{contracts, VerificationReport};

/// Accumulated facts for one unit of work.
///
/// `S` is the host's site token for casts. The engine stores and returns it
/// untouched.
#[derive(Debug)]
pub struct ConstrainedTypeSystem<S = ()> {
    implications: ImplicationRegistry,
    types: TypeUniverse,
    casts: Mutex<Vec<CastRequest<S>>>,
}

impl<S> Default for ConstrainedTypeSystem<S> {
    fn default() -> Self {
        Self {
            implications: ImplicationRegistry::new(),
            types: TypeUniverse::new(),
            casts: Mutex::new(Vec::new()),
        }
    }
}

impl<S> ConstrainedTypeSystem<S> {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // REGISTRATION
    // ========================================================================

    /// Declare `from => to`. Returns `false` if the rule was already declared.
    pub fn add_implication(&self, from: TypeRef, to: TypeRef) -> bool {
        debug!(from = from.name(), to = to.name(), "register implication");
        self.implications.insert(from, to)
    }

    /// Add a concrete type to the universe. Returns `false` if already present.
    ///
    /// Hosts should pass only types where `TypeSymbol::is_concrete` holds; any
    /// other type is accepted but can never be reported.
    pub fn add_concrete_type(&self, ty: TypeRef) -> bool {
        debug!(ty = ty.name(), interfaces = ty.all_interfaces().len(), "register type");
        self.types.insert(ty)
    }

    /// Record a cast request. Every call is kept, including repeats.
    pub fn add_cast(&self, from: TypeRef, to: TypeRef, site: S) {
        debug!(from = from.name(), to = to.name(), "register cast");
        self.casts.lock().push(CastRequest::new(from, to, site));
    }

    pub fn implication_count(&self) -> usize {
        self.implications.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn cast_count(&self) -> usize {
        self.casts.lock().len()
    }

    pub fn implications(&self) -> Vec<Implication> {
        self.implications.snapshot()
    }

    pub fn types(&self) -> Vec<TypeRef> {
        self.types.snapshot()
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Is a cast from `from` to `to` justified by some registered rule?
    pub fn is_safe(&self, from: &TypeSymbol, to: &TypeSymbol) -> bool {
        find_witness(&self.implications.snapshot(), from, to).is_some()
    }

    /// The rule that justifies `from -> to`, if any.
    pub fn witness(&self, from: &TypeSymbol, to: &TypeSymbol) -> Option<Implication> {
        find_witness(&self.implications.snapshot(), from, to).cloned()
    }
}

impl<S: Clone + Send + Sync> ConstrainedTypeSystem<S> {
    /// Cast requests in registration order.
    pub fn casts(&self) -> Vec<CastRequest<S>> {
        self.casts.lock().clone()
    }

    // ========================================================================
    // FINALIZE
    // ========================================================================

    /// Every (concrete type, rule) pair where the type implements the rule's
    /// `from` but not its `to`.
    ///
    /// Only types implementing at least one `from` interface are examined;
    /// the rest cannot fail any rule. Exactly one violation per failing pair,
    /// sorted by (type, from, to) name.
    pub fn check_implication_constraints(&self) -> Vec<Violation> {
        let rules = self.implications.snapshot();
        let domain = self
            .types
            .implementing_any(&self.implications.from_interfaces());

        #[cfg(feature = "parallel")]
        let mut violations: Vec<Violation> = domain
            .par_iter()
            .flat_map_iter(|ty| failures_on(ty, &rules))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let mut violations: Vec<Violation> =
            domain.iter().flat_map(|ty| failures_on(ty, &rules)).collect();

        violations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        for v in &violations {
            contracts::check_violation_sound(v);
        }
        contracts::check_violations_unique(&violations);

        info!(
            types = domain.len(),
            rules = rules.len(),
            violations = violations.len(),
            "checked implication constraints"
        );
        violations
    }

    /// Every cast request that no single registered rule subsumes, in
    /// registration order.
    pub fn find_unsafe_casts(&self) -> Vec<CastRequest<S>> {
        let rules = self.implications.snapshot();
        let casts = self.casts.lock().clone();

        #[cfg(feature = "parallel")]
        let unsafe_casts: Vec<CastRequest<S>> = casts
            .par_iter()
            .filter(|c| find_witness(&rules, &c.from, &c.to).is_none())
            .cloned()
            .collect();

        #[cfg(not(feature = "parallel"))]
        let unsafe_casts: Vec<CastRequest<S>> = casts
            .iter()
            .filter(|c| find_witness(&rules, &c.from, &c.to).is_none())
            .cloned()
            .collect();

        for cast in &unsafe_casts {
            contracts::check_cast_unwitnessed(cast, &rules);
        }

        info!(
            casts = casts.len(),
            rules = rules.len(),
            unsafe_casts = unsafe_casts.len(),
            "checked cast safety"
        );
        unsafe_casts
    }

    /// Run both finalize queries and bundle the results.
    pub fn verify(&self) -> VerificationReport<S> {
        VerificationReport {
            violations: self.check_implication_constraints(),
            unsafe_casts: self.find_unsafe_casts(),
            types_checked: self.type_count(),
            implications: self.implication_count(),
            casts_checked: self.cast_count(),
        }
    }
}

/// All violations of `rules` by a single type.
fn failures_on<'a>(
    ty: &'a TypeRef,
    rules: &'a [Implication],
) -> impl Iterator<Item = Violation> + 'a {
    rules
        .iter()
        .filter(move |rule| rule.fails_on(ty))
        .map(move |rule| Violation::new(ty.clone(), rule.clone()))
}
