// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Host configuration.
//!
//! Names the syntactic forms the host recognizes. Every field has a default,
//! so an empty `{}` (or no file at all) gives the stock `Constraint.Implies`
//! attribute and `To<T>.Safely(x)` call.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// File name looked up next to `manifest.json` when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "safecast.json";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct HostConfig {
    /// Attribute that declares an implication, e.g. `Constraint.Implies`.
    pub implies_attribute: String,
    /// Generic receiver type of the cast call, e.g. `To`.
    pub cast_type: String,
    /// Method name of the cast call, e.g. `Safely`.
    pub cast_method: String,
    /// Exit with `FINDINGS` on warnings as well as errors.
    pub treat_warnings_as_errors: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            implies_attribute: "Constraint.Implies".to_string(),
            cast_type: "To".to_string(),
            cast_method: "Safely".to_string(),
            treat_warnings_as_errors: false,
        }
    }
}

impl HostConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: HostConfig = serde_json::from_str(&content).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration for an input: explicit file, then
    /// `safecast.json` in the input directory, then defaults.
    pub fn discover(explicit: Option<&Path>, input: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let dir = if input.is_dir() {
            input
        } else {
            input.parent().unwrap_or(Path::new("."))
        };
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("impliesAttribute", &self.implies_attribute),
            ("castType", &self.cast_type),
            ("castMethod", &self.cast_method),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}
