// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer: type-level invariants and runtime contracts.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Type-level wrappers** (`ClosedHierarchy`) that refuse to exist unless
//!    every interface set is flattened. The oracle's one assumption holds by
//!    construction.
//!
//! 2. **Runtime contracts** that panic in debug builds when a finalize query
//!    reports something the definitions do not support. Zero-cost in release.
//!
//! Use both. The wrapper catches bad input from the host; the contracts catch
//! bugs in the checkers.

mod types;
pub mod contracts;

pub use types::*;
