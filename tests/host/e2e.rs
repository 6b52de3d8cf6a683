//! End-to-end tests for the `safecast` binary.

use std::fs;
use std::process::{Command, Output};

use safecast::error::exit_code;
use tempfile::TempDir;

use super::common::SAMPLE_DIR;

fn safecast(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_safecast"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run safecast")
}

#[test]
fn test_check_sample_text() {
    let out = safecast(&["check", "--input", SAMPLE_DIR]);
    assert_eq!(out.status.code(), Some(exit_code::FINDINGS));

    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6, "stdout was:\n{}", stdout);
    assert_eq!(
        lines[4],
        "Program.cs:41:33: error SC0004: Safe cast error: trying to cast from IShape to INotImplemented but IShape does not imply INotImplemented"
    );

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("6 errors, 0 warnings"), "stderr was:\n{}", stderr);
}

#[test]
fn test_check_sample_json() {
    let out = safecast(&["check", "--input", SAMPLE_DIR, "--format", "json"]);
    assert_eq!(out.status.code(), Some(exit_code::FINDINGS));

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["summary"]["errors"], 6);
    assert_eq!(value["diagnostics"][5]["code"], "SC0003");
    assert_eq!(value["diagnostics"][5]["location"]["path"], "Shapes.cs");
}

#[test]
fn test_check_clean_program() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("clean.json"),
        r#"{
            "path": "Clean.cs",
            "types": [
                {"name": "IShape", "kind": "interface"},
                {"name": "IDrawing", "kind": "interface"},
                {"name": "Circle", "kind": "class", "interfaces": ["IShape", "IDrawing"]}
            ],
            "attributes": [
                {"name": "Constraint.Implies", "arguments": [{"typeof": "IShape"}, {"typeof": "IDrawing"}]}
            ],
            "invocations": [
                {"receiver": "To", "typeArguments": ["IDrawing"], "method": "Safely", "arguments": ["IShape"]}
            ]
        }"#,
    )
    .unwrap();

    let input = dir.path().join("clean.json");
    let out = safecast(&["check", "--input", input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(exit_code::CLEAN));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_warnings_as_errors_from_sibling_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ghost.json"),
        r#"{
            "types": [{"name": "IShape", "kind": "interface"}],
            "invocations": [
                {"receiver": "To", "typeArguments": ["IGhost"], "method": "Safely", "arguments": ["IShape"]}
            ]
        }"#,
    )
    .unwrap();
    let input = dir.path().join("ghost.json");
    let input = input.to_str().unwrap();

    let out = safecast(&["check", "--input", input]);
    assert_eq!(out.status.code(), Some(exit_code::CLEAN));
    assert!(String::from_utf8_lossy(&out.stdout).contains("warning SC0005"));

    fs::write(dir.path().join("safecast.json"), r#"{"treatWarningsAsErrors": true}"#).unwrap();
    let out = safecast(&["check", "--input", input]);
    assert_eq!(out.status.code(), Some(exit_code::FINDINGS));
}

#[test]
fn test_missing_input_exit_code() {
    let out = safecast(&["check", "--input", "data/does-not-exist.json"]);
    assert_eq!(out.status.code(), Some(exit_code::IO_ERROR));
    assert!(String::from_utf8_lossy(&out.stderr).contains("❌"));
}

#[test]
fn test_bad_config_exit_code() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{"castMethod": ""}"#).unwrap();

    let out = safecast(&[
        "check",
        "--input",
        SAMPLE_DIR,
        "--config",
        config.to_str().unwrap(),
    ]);
    assert_eq!(out.status.code(), Some(exit_code::CONFIG_ERROR));
}

#[test]
fn test_inspect_sample() {
    let out = safecast(&["inspect", "--input", SAMPLE_DIR]);
    assert_eq!(out.status.code(), Some(exit_code::CLEAN));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("IMPLICATIONS (2)"));
    assert!(stdout.contains("IShape => IDrawing"));
    assert!(stdout.contains("[unsafe]"));
    assert!(stdout.contains("via IShape => IDrawing"));
}
