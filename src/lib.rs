//! Implication constraints between interfaces, and the downcasts they license.
//!
//! A program declares rules like "every implementer of `IShape` also implements
//! `IDrawing`". This crate checks two things against those rules:
//!
//! 1. every concrete type actually honours every rule, and
//! 2. every requested interface-to-interface cast is justified by one rule.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │  types.rs   │────▶│  oracle.rs   │────▶│      system.rs       │
//! │ (TypeSymbol,│     │(derives_from,│     │(ConstrainedTypeSystem│
//! │ Implication)│     │ find_witness)│     │ register + finalize) │
//! └─────────────┘     └──────────────┘     └──────────────────────┘
//!        │                                    ▲            ▲
//!        │            ┌──────────────┐        │            │
//!        │            │ registry.rs  │────────┘            │
//!        │            │ universe.rs  │                     │
//!        │            └──────────────┘                     │
//!        ▼                                                 │
//! ┌─────────────────────────────────────┐    ┌─────────────────────────┐
//! │               verify/               │    │          host/          │
//! │ (ClosedHierarchy, contracts,        │◀───│ (TypeTable, Recognizer, │
//! │  VerificationReport)                │    │  Analyzer, loading)     │
//! └─────────────────────────────────────┘    └─────────────────────────┘
//! ```
//!
//! The engine (`types`, `oracle`, `registry`, `universe`, `system`) knows
//! nothing about files or syntax. The host turns a serialized program model
//! into engine calls and engine findings into located diagnostics.
//!
//! # Usage
//!
//! ```ignore
//! use safecast::ConstrainedTypeSystem;
//!
//! let system: ConstrainedTypeSystem<&str> = ConstrainedTypeSystem::new();
//! system.add_concrete_type(circle);
//! system.add_implication(ishape.clone(), idrawing.clone());
//! system.add_cast(ishape, idrawing, "Program.cs:14");
//!
//! assert!(system.check_implication_constraints().is_empty());
//! assert!(system.find_unsafe_casts().is_empty());
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod host;
pub mod oracle;
pub mod registry;
pub mod system;
pub mod testing;
pub mod types;
pub mod universe;
pub mod verify;

pub use config::HostConfig;
pub use diagnostics::{Diagnostic, Location, RuleCode, Severity};
pub use error::{Error, Result};
pub use host::{analyze, AnalysisOutcome, Analyzer, TypeTable};
pub use oracle::{derives_from, find_witness, subsumes};
pub use registry::ImplicationRegistry;
pub use system::ConstrainedTypeSystem;
pub use types::{
    CastRequest, Implication, TypeId, TypeKind, TypeRef, TypeSymbol, Violation,
};
pub use universe::TypeUniverse;
pub use verify::{ClosedHierarchy, InvariantError, VerificationReport};
