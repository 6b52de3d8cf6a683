// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the host layer and CLI.
//!
//! The engine itself never fails: violations and unsafe casts are findings,
//! not errors. Everything here is about getting a well-formed program model
//! into the engine in the first place.

use std::path::PathBuf;

use thiserror::Error;

use crate::verify::InvariantError;

/// Process exit codes for the safecast CLI.
pub mod exit_code {
    /// No findings.
    pub const CLEAN: i32 = 0;
    /// At least one error diagnostic was reported.
    pub const FINDINGS: i32 = 1;
    /// Bad configuration, bad CLI arguments, or a malformed program model.
    pub const CONFIG_ERROR: i32 = 2;
    /// File not found, permission denied, and friends.
    pub const IO_ERROR: i32 = 3;
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported manifest version {found} (expected {expected})")]
    ManifestVersion { found: u32, expected: u32 },

    #[error("type {name} is declared more than once")]
    DuplicateType { name: String },

    #[error("unknown type {name} referenced in {unit}")]
    UnknownType { name: String, unit: String },

    #[error("inheritance cycle through {name}")]
    InheritanceCycle { name: String },

    #[error("invalid hierarchy for {ty}: {reason}")]
    InvalidHierarchy { ty: String, reason: String },

    #[error("hierarchy invariant broken: {0}")]
    Invariant(#[from] InvariantError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The process exit code this error maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io { .. } => exit_code::IO_ERROR,
            _ => exit_code::CONFIG_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
