// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading a compilation from disk.
//!
//! Input is either a directory holding `manifest.json`, or a single unit
//! file. Unit files are independent, so a manifest's units are read and
//! parsed in parallel. Order follows the manifest regardless of which thread
//! finishes first; type ids depend on it.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::error::{Error, Result};
use crate::host::model::{Manifest, Unit, MANIFEST_VERSION};

/// Manifest file name inside a compilation directory.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Every unit of one compilation, in manifest order.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The directory units were resolved against.
    pub root: PathBuf,
    pub units: Vec<Unit>,
}

/// Load a compilation from a manifest directory or a single unit file.
pub fn load_compilation(input: &Path) -> Result<Compilation> {
    if !input.is_dir() {
        return single_unit(input);
    }
    let manifest = read_manifest(input)?;

    #[cfg(feature = "parallel")]
    let units = manifest
        .units
        .par_iter()
        .map(|name| load_unit(&input.join(name)))
        .collect::<Result<Vec<Unit>>>()?;

    #[cfg(not(feature = "parallel"))]
    let units = manifest
        .units
        .iter()
        .map(|name| load_unit(&input.join(name)))
        .collect::<Result<Vec<Unit>>>()?;

    debug!(root = %input.display(), units = units.len(), "loaded compilation");
    Ok(Compilation {
        root: input.to_path_buf(),
        units,
    })
}

/// Load a compilation, advancing `progress` once per unit.
#[cfg(feature = "parallel")]
pub fn load_compilation_with_progress(input: &Path, progress: &ProgressBar) -> Result<Compilation> {
    if !input.is_dir() {
        let compilation = single_unit(input)?;
        progress.inc(1);
        return Ok(compilation);
    }
    let manifest = read_manifest(input)?;
    let total = manifest.units.len();
    progress.set_length(total as u64);
    let counter = AtomicUsize::new(0);

    let units = manifest
        .units
        .par_iter()
        .map(|name| {
            let unit = load_unit(&input.join(name))?;

            let count = counter.fetch_add(1, Ordering::Relaxed) + 1;
            progress.set_position(count as u64);
            progress.set_message(format!("{}/{}", count, total));

            Ok(unit)
        })
        .collect::<Result<Vec<Unit>>>()?;

    Ok(Compilation {
        root: input.to_path_buf(),
        units,
    })
}

/// Non-parallel fallback (no progress reporting).
#[cfg(not(feature = "parallel"))]
pub fn load_compilation_with_progress(input: &Path) -> Result<Compilation> {
    load_compilation(input)
}

fn single_unit(path: &Path) -> Result<Compilation> {
    let unit = load_unit(path)?;
    let root = path
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok(Compilation {
        root,
        units: vec![unit],
    })
}

fn read_manifest(dir: &Path) -> Result<Manifest> {
    let path = dir.join(MANIFEST_FILE_NAME);
    let manifest: Manifest = read_json(&path)?;
    if manifest.version != MANIFEST_VERSION {
        return Err(Error::ManifestVersion {
            found: manifest.version,
            expected: MANIFEST_VERSION,
        });
    }
    Ok(manifest)
}

/// Read one unit file. A unit without `path` is named after its file.
pub fn load_unit(path: &Path) -> Result<Unit> {
    let mut unit: Unit = read_json(path)?;
    if unit.path.is_empty() {
        unit.path = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
    }
    Ok(unit)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
