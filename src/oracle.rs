// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The type relation oracle and the subsumption test built on top of it.
//!
//! `derives_from` is the only relation the engine ever asks about. It reads
//! the precomputed interface set and nothing else, so it is O(log n) and has
//! no failure mode.
//!
//! # Subsumption
//!
//! A rule `F => T` justifies a cast `A -> B` when the rule's guarantee is at
//! least as strong as what the cast needs:
//!
//! ```text
//!   A ──derives_from──▶ F ══rule══▶ T ──derives_from──▶ B
//!   (source may be more specific)      (rule may promise more)
//! ```
//!
//! Covariant on the source, contravariant on the target. One rule must carry
//! the whole cast; rules are never chained.

use crate::types::{Implication, TypeSymbol};

/// Is `candidate` the same type as `base`, or does it implement it?
#[inline]
pub fn derives_from(candidate: &TypeSymbol, base: &TypeSymbol) -> bool {
    candidate.id() == base.id() || candidate.implements(base.id())
}

/// Does `rule` on its own prove that casting `from` to `to` cannot fail?
#[inline]
pub fn subsumes(rule: &Implication, from: &TypeSymbol, to: &TypeSymbol) -> bool {
    derives_from(from, &rule.from) && derives_from(&rule.to, to)
}

/// Find the first rule in `rules` that witnesses `from -> to`.
pub fn find_witness<'a, I>(rules: I, from: &TypeSymbol, to: &TypeSymbol) -> Option<&'a Implication>
where
    I: IntoIterator<Item = &'a Implication>,
{
    rules.into_iter().find(|rule| subsumes(rule, from, to))
}
