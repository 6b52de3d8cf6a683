//! Loading compilations from disk, including the failure modes.

use std::fs;
use std::path::Path;

use safecast::error::exit_code;
use safecast::host::{load_compilation, MANIFEST_FILE_NAME};
use safecast::{Analyzer, Error, HostConfig};
use tempfile::TempDir;

use super::common::SAMPLE_DIR;

#[test]
fn test_sample_loads_in_manifest_order() {
    let compilation = load_compilation(Path::new(SAMPLE_DIR)).unwrap();
    let paths: Vec<&str> = compilation.units.iter().map(|u| u.path.as_str()).collect();
    assert_eq!(paths, vec!["Shapes.cs", "Program.cs"]);
}

#[test]
fn test_single_unit_file() {
    let path = Path::new(SAMPLE_DIR).join("shapes.json");
    let compilation = load_compilation(&path).unwrap();
    assert_eq!(compilation.units.len(), 1);
    assert_eq!(compilation.units[0].types.len(), 6);
}

#[test]
fn test_missing_manifest_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_compilation(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }), "got {err}");
    assert_eq!(err.exit_code(), exit_code::IO_ERROR);
}

#[test]
fn test_invalid_manifest_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(MANIFEST_FILE_NAME), "{ version: 1 }").unwrap();
    let err = load_compilation(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Json { .. }));
    assert_eq!(err.exit_code(), exit_code::CONFIG_ERROR);
    assert!(err.to_string().contains("invalid JSON"));
}

#[test]
fn test_cycle_rejected_at_resolution() {
    let compilation = load_compilation(Path::new("data/invalid")).unwrap();
    let err = Analyzer::new(HostConfig::default(), &compilation.units).unwrap_err();
    assert!(matches!(err, Error::InheritanceCycle { .. }));
}

#[test]
fn test_duplicate_across_units_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"types": [{"name": "IA", "kind": "interface"}]}"#).unwrap();
    fs::write(dir.path().join("b.json"), r#"{"types": [{"name": "IA", "kind": "interface"}]}"#).unwrap();
    fs::write(
        dir.path().join(MANIFEST_FILE_NAME),
        r#"{"version": 1, "units": ["a.json", "b.json"]}"#,
    )
    .unwrap();

    let compilation = load_compilation(dir.path()).unwrap();
    let err = Analyzer::new(HostConfig::default(), &compilation.units).unwrap_err();
    assert!(matches!(err, Error::DuplicateType { ref name } if name == "IA"));
}
