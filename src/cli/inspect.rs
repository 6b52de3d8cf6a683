// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `safecast inspect`: a boxed view of what the engine was fed.
//!
//! Runs the same registration as `check` but stops short of reporting.
//! Each cast is shown with its verdict and, when safe, the rule that
//! justifies it.

use super::display::{
    banner, dimmed, kind_label, location_label, name_label, pad_right, row, section_bot,
    section_mid, section_top, verdict_badge,
};
use crate::config::HostConfig;
use crate::error::Result;
use crate::host::{Analyzer, Compilation};
use crate::types::TypeKind;

pub fn print(config: HostConfig, compilation: &Compilation) -> Result<()> {
    let analyzer = Analyzer::new(config, &compilation.units)?;
    let registered = analyzer.register_types();
    let mut shape_diagnostics = 0;
    for unit in &compilation.units {
        shape_diagnostics += analyzer.analyze_unit(unit).len();
    }

    let table = analyzer.table();
    let system = analyzer.system();

    banner(&format!("safecast inspect: {}", compilation.root.display()));

    section_top(&format!("TYPES ({} declared, {} concrete)", table.len(), registered));
    let name_width = table
        .hierarchy()
        .iter()
        .map(|t| t.name().len())
        .max()
        .unwrap_or(0)
        + 2;
    for ty in table.hierarchy().iter() {
        let mut interfaces = table.interface_names(ty);
        interfaces.sort_unstable();
        let label = if ty.is_abstract() && !ty.is_interface() {
            format!("abstract {}", ty.kind())
        } else {
            ty.kind().to_string()
        };
        row(&format!(
            "  {}{}  {}",
            pad_right(&name_label(ty.name()), name_width),
            pad_right(&kind_label_text(ty.kind(), &label), 16),
            dimmed(&interfaces.join(", "))
        ));
    }

    let implications = system.implications();
    section_mid(&format!("IMPLICATIONS ({})", implications.len()));
    if implications.is_empty() {
        row(&dimmed("  (none)"));
    }
    for rule in &implications {
        row(&format!("  {} => {}", rule.from, rule.to));
    }

    let casts = system.casts();
    section_mid(&format!("CASTS ({})", casts.len()));
    if casts.is_empty() {
        row(&dimmed("  (none)"));
    }
    for cast in &casts {
        let witness = system.witness(&cast.from, &cast.to);
        let verdict = verdict_badge(witness.is_some());
        let via = witness
            .map(|rule| dimmed(&format!("via {}", rule)))
            .unwrap_or_default();
        row(&format!(
            "  {}  {}  {} {}",
            pad_right(&location_label(&cast.site), 24),
            pad_right(&verdict, 8),
            cast,
            via
        ));
    }

    if shape_diagnostics > 0 {
        section_mid("NOTES");
        row(&format!(
            "  {} shape diagnostics; run `safecast check` for details",
            shape_diagnostics
        ));
    }
    section_bot();
    Ok(())
}

fn kind_label_text(kind: TypeKind, label: &str) -> String {
    if label == kind.as_str() {
        kind_label(kind)
    } else {
        dimmed(label)
    }
}
