// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rendering an analysis outcome as text or JSON.

use std::io::{self, Write};

use serde::Serialize;

use super::display::{code_label, location_label, paint, severity_label, Tone};
use crate::diagnostics::Diagnostic;
use crate::host::AnalysisOutcome;

/// One line per diagnostic: `path:line:col: severity CODE: message`.
pub fn write_text<W: Write>(out: &mut W, outcome: &AnalysisOutcome) -> io::Result<()> {
    for d in &outcome.diagnostics {
        writeln!(
            out,
            "{}: {} {}: {}",
            location_label(&d.location),
            severity_label(d.severity),
            code_label(d.code),
            d.message
        )?;
    }
    out.flush()
}

#[derive(Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    types: usize,
    implications: usize,
    casts: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: &'a [Diagnostic],
    summary: Summary,
}

/// A single pretty-printed JSON document with diagnostics and counts.
pub fn write_json<W: Write>(out: &mut W, outcome: &AnalysisOutcome) -> io::Result<()> {
    let report = JsonReport {
        diagnostics: &outcome.diagnostics,
        summary: Summary {
            errors: outcome.error_count(),
            warnings: outcome.warning_count(),
            types: outcome.report.types_checked,
            implications: outcome.report.implications,
            casts: outcome.report.casts_checked,
        },
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    out.flush()
}

/// `✅ No findings ...` or `❌ 2 errors, 1 warning ...`.
pub fn summary_line(outcome: &AnalysisOutcome) -> String {
    let errors = outcome.error_count();
    let warnings = outcome.warning_count();
    let scope = format!(
        "({} types, {} implications, {} casts)",
        outcome.report.types_checked, outcome.report.implications, outcome.report.casts_checked
    );

    if errors == 0 && warnings == 0 {
        return format!("✅ {} {}", paint(Tone::Ok, "No findings"), scope);
    }
    let counts = format!(
        "{} {}, {} {}",
        errors,
        plural(errors, "error"),
        warnings,
        plural(warnings, "warning")
    );
    if errors > 0 {
        format!("❌ {} {}", paint(Tone::Error, &counts), scope)
    } else {
        format!("⚠️  {} {}", paint(Tone::Warning, &counts), scope)
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
