// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Diagnostics reported by the host.
//!
//! The engine hands back structured facts (violations, unsafe casts); this
//! module turns those, plus the host's own shape checks, into located
//! messages.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::types::{CastRequest, Violation};

/// Diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RuleCode {
    /// SC0000: an `Implies` argument names a non-interface type.
    #[serde(rename = "SC0000")]
    ImpliesNotInterface,
    /// SC0001: the `To<T>` type argument is not an interface.
    #[serde(rename = "SC0001")]
    CastTargetNotInterface,
    /// SC0002: the `Safely` argument is not statically typed as an interface.
    #[serde(rename = "SC0002")]
    CastSourceNotInterface,
    /// SC0003: a concrete type breaks a declared implication.
    #[serde(rename = "SC0003")]
    ImplicationViolated,
    /// SC0004: no declared implication justifies a cast.
    #[serde(rename = "SC0004")]
    UnsafeCast,
    /// SC0005: a rule or cast mentions a type the model does not declare.
    #[serde(rename = "SC0005")]
    UnresolvedType,
}

impl RuleCode {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCode::ImpliesNotInterface => "SC0000",
            RuleCode::CastTargetNotInterface => "SC0001",
            RuleCode::CastSourceNotInterface => "SC0002",
            RuleCode::ImplicationViolated => "SC0003",
            RuleCode::UnsafeCast => "SC0004",
            RuleCode::UnresolvedType => "SC0005",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RuleCode::ImpliesNotInterface => "Implies parameters must be interfaces",
            RuleCode::CastTargetNotInterface => "'To' parameter must be an interface",
            RuleCode::CastSourceNotInterface => "'Safely' argument must be typed as an interface",
            RuleCode::ImplicationViolated => "Implication fails on concrete type",
            RuleCode::UnsafeCast => "Unsafe cast",
            RuleCode::UnresolvedType => "Unresolved type",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RuleCode::UnresolvedType => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A position in a source file. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub path: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.path, self.line, self.column).cmp(&(&other.path, other.line, other.column))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: RuleCode,
    pub severity: Severity,
    pub title: &'static str,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    fn new(code: RuleCode, message: String, location: Location) -> Self {
        Self {
            code,
            severity: code.severity(),
            title: code.title(),
            message,
            location,
        }
    }

    pub fn implies_not_interface(location: Location) -> Self {
        Self::new(
            RuleCode::ImpliesNotInterface,
            "Constraint error: 'Implies' parameters must be interfaces".to_string(),
            location,
        )
    }

    pub fn cast_target_not_interface(type_name: &str, location: Location) -> Self {
        Self::new(
            RuleCode::CastTargetNotInterface,
            format!(
                "Safe cast error: 'To' type parameter must be an interface but is {}",
                type_name
            ),
            location,
        )
    }

    pub fn cast_source_not_interface(type_name: &str, location: Location) -> Self {
        Self::new(
            RuleCode::CastSourceNotInterface,
            format!(
                "Safe cast error: 'Safely' argument must be typed as an interface, but its type is {}",
                type_name
            ),
            location,
        )
    }

    pub fn implication_violated(violation: &Violation, location: Location) -> Self {
        let from = violation.implication.from.name();
        let to = violation.implication.to.name();
        Self::new(
            RuleCode::ImplicationViolated,
            format!(
                "Implication error: {from} implies {to} yet {} implements {from} but not {to}",
                violation.failing.name()
            ),
            location,
        )
    }

    /// Located at the cast's own site.
    pub fn unsafe_cast(cast: &CastRequest<Location>) -> Self {
        let from = cast.from.name();
        let to = cast.to.name();
        Self::new(
            RuleCode::UnsafeCast,
            format!(
                "Safe cast error: trying to cast from {from} to {to} but {from} does not imply {to}"
            ),
            cast.site.clone(),
        )
    }

    pub fn unresolved_type(type_name: &str, location: Location) -> Self {
        Self::new(
            RuleCode::UnresolvedType,
            format!("Unresolved type '{}' ignored", type_name),
            location,
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.code, self.message
        )
    }
}

/// Sort by (location, code) so output is stable across runs and thread counts.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then(a.code.cmp(&b.code))
            .then_with(|| a.message.cmp(&b.message))
    });
}
