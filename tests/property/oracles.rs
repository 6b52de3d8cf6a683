//! Reference oracles for differential testing.
//!
//! Deliberately naive: no restriction of the universe to `from`
//! implementers, no early exit, plain membership tests. Slow but obviously
//! correct.

use std::collections::BTreeSet;

use safecast::{TypeId, TypeRef, TypeSymbol};

/// `candidate` is `base`, or implements it.
pub fn oracle_derives(candidate: &TypeSymbol, base: &TypeSymbol) -> bool {
    candidate.id() == base.id() || candidate.all_interfaces().iter().any(|i| *i == base.id())
}

/// Every (type, from, to) triple where the type implements `from` but not `to`.
///
/// Full cross product of universe and rules.
pub fn oracle_violations(
    universe: &[TypeRef],
    rules: &[(TypeRef, TypeRef)],
) -> BTreeSet<(TypeId, TypeId, TypeId)> {
    let mut out = BTreeSet::new();
    for ty in universe {
        for (from, to) in rules {
            let has_from = ty.all_interfaces().contains(&from.id());
            let has_to = ty.all_interfaces().contains(&to.id());
            if has_from && !has_to {
                out.insert((ty.id(), from.id(), to.id()));
            }
        }
    }
    out
}

/// Some single rule (F, T) with `from` deriving from F and T deriving from `to`.
pub fn oracle_is_safe(rules: &[(TypeRef, TypeRef)], from: &TypeSymbol, to: &TypeSymbol) -> bool {
    rules
        .iter()
        .any(|(f, t)| oracle_derives(from, f) && oracle_derives(t, to))
}
