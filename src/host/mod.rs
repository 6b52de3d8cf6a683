// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The host: feeds a program model into the engine and reports findings.
//!
//! # Pipeline
//!
//! ```text
//! units ──▶ TypeTable::resolve ──▶ register_types ─┐
//!                                                   ├──▶ finalize ──▶ diagnostics
//! units ──▶ Recognizer (per unit, in parallel) ────┘
//! ```
//!
//! Everything before `finalize` only adds facts and may run in any order on
//! any thread. `run` joins all of it before the finalize queries start.

pub mod hierarchy;
pub mod load;
pub mod model;
pub mod recognize;

pub use hierarchy::TypeTable;
pub use load::{
    load_compilation, load_compilation_with_progress, load_unit, Compilation, MANIFEST_FILE_NAME,
};
pub use model::{AttributeArgument, AttributeDecl, InvocationDecl, Position, TypeDecl, Unit};
pub use recognize::Recognizer;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::config::HostConfig;
use crate::diagnostics::{sort_diagnostics, Diagnostic, Location, Severity};
use crate::error::{exit_code, Result};
use crate::system::ConstrainedTypeSystem;
use crate::types::TypeRef;
use crate::verify::VerificationReport;

/// One analysis session over one compilation.
#[derive(Debug)]
pub struct Analyzer {
    config: HostConfig,
    table: TypeTable,
    system: ConstrainedTypeSystem<Location>,
}

impl Analyzer {
    /// Resolve the type hierarchy of `units`. Nothing is registered yet.
    pub fn new(config: HostConfig, units: &[Unit]) -> Result<Self> {
        config.validate()?;
        let table = TypeTable::resolve(units)?;
        Ok(Self {
            config,
            table,
            system: ConstrainedTypeSystem::new(),
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn table(&self) -> &TypeTable {
        &self.table
    }

    pub fn system(&self) -> &ConstrainedTypeSystem<Location> {
        &self.system
    }

    /// Register every concrete type. Returns how many were added.
    pub fn register_types(&self) -> usize {
        let concrete: Vec<&TypeRef> = self.table.hierarchy().concrete().collect();

        #[cfg(feature = "parallel")]
        let added = concrete
            .par_iter()
            .filter(|ty| self.system.add_concrete_type(TypeRef::clone(ty)))
            .count();

        #[cfg(not(feature = "parallel"))]
        let added = concrete
            .iter()
            .filter(|ty| self.system.add_concrete_type(TypeRef::clone(ty)))
            .count();

        added
    }

    /// Recognize rules and casts in one unit.
    pub fn analyze_unit(&self, unit: &Unit) -> Vec<Diagnostic> {
        Recognizer::new(&self.config, &self.table).unit(unit, &self.system)
    }

    /// Run both finalize queries and turn the findings into diagnostics.
    ///
    /// Must only be called once every `register_types`/`analyze_unit` call
    /// has returned.
    pub fn finalize(&self) -> (Vec<Diagnostic>, VerificationReport<Location>) {
        let report = self.system.verify();

        let mut diagnostics: Vec<Diagnostic> = report
            .violations
            .iter()
            .map(|v| {
                let at = self
                    .table
                    .location(v.failing.id())
                    .cloned()
                    .unwrap_or_else(|| Location::new(v.failing.name(), 1, 1));
                Diagnostic::implication_violated(v, at)
            })
            .collect();
        diagnostics.extend(report.unsafe_casts.iter().map(Diagnostic::unsafe_cast));

        (diagnostics, report)
    }

    /// Register types, recognize all units, then finalize.
    pub fn run(&self, units: &[Unit]) -> AnalysisOutcome {
        let registered = self.register_types();

        #[cfg(feature = "parallel")]
        let mut diagnostics: Vec<Diagnostic> = units
            .par_iter()
            .flat_map_iter(|unit| self.analyze_unit(unit))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let mut diagnostics: Vec<Diagnostic> = units
            .iter()
            .flat_map(|unit| self.analyze_unit(unit))
            .collect();

        let (findings, report) = self.finalize();
        diagnostics.extend(findings);
        sort_diagnostics(&mut diagnostics);

        info!(
            units = units.len(),
            types = registered,
            diagnostics = diagnostics.len(),
            "analysis complete"
        );
        AnalysisOutcome {
            diagnostics,
            report,
        }
    }
}

/// Resolve, register, recognize and finalize in one call.
pub fn analyze(config: HostConfig, units: &[Unit]) -> Result<AnalysisOutcome> {
    Ok(Analyzer::new(config, units)?.run(units))
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Sorted by location, then code.
    pub diagnostics: Vec<Diagnostic>,
    pub report: VerificationReport<Location>,
}

impl AnalysisOutcome {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// `FINDINGS` if any error (or, when asked, any warning) was reported.
    pub fn exit_code(&self, treat_warnings_as_errors: bool) -> i32 {
        let failing = self.error_count() > 0 || (treat_warnings_as_errors && self.warning_count() > 0);
        if failing {
            exit_code::FINDINGS
        } else {
            exit_code::CLEAN
        }
    }
}
