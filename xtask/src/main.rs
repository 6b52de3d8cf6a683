//! Custom cargo commands for the safecast crate.
//!
//! Usage:
//!   cargo xtask verify    - Run full verification suite
//!   cargo xtask test      - Run all tests
//!   cargo xtask check     - Quick check
//!   cargo xtask sample    - Run the binary against data/sample
//!   cargo xtask bench     - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Rule codes the binary can emit. Each must be documented in the README.
const RULE_CODES: &[&str] = &["SC0000", "SC0001", "SC0002", "SC0003", "SC0004", "SC0005"];

/// Minimum number of runtime contracts expected in `src/verify/contracts.rs`.
const MIN_CONTRACTS: usize = 4;

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("sample") => sample()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify    Run full verification suite (contracts + tests + clippy + rule codes)
  test      Run all Rust tests, with and without the parallel feature
  check     Quick check (cargo check + test + clippy)
  sample    Run `safecast check` on the bundled sample compilation
  bench     Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("safecast Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking contract markers...");
    check_contract_markers()?;
    println!("✓ Contracts present\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running Rust tests without default features...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential build passed\n");

    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[5/5] Checking rule codes are documented...");
    verify_rule_codes()?;
    println!("✓ Rule codes documented\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])?;
    run_cargo(&["test", "--no-default-features"])
}

/// Quick check
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// The sample has findings, so exit code 1 is the expected outcome.
fn sample() -> Result<()> {
    let root = project_root()?;
    let status = Command::new("cargo")
        .args(["run", "--quiet", "--", "check", "--input", "data/sample"])
        .current_dir(&root)
        .status()
        .context("Failed to run safecast on the sample")?;

    match status.code() {
        Some(1) => Ok(()),
        Some(code) => bail!("expected findings (exit 1) on the sample, got exit {}", code),
        None => bail!("safecast was terminated by a signal"),
    }
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

fn check_contract_markers() -> Result<()> {
    let root = project_root()?;
    let contracts = std::fs::read_to_string(root.join("src/verify/contracts.rs"))
        .context("Failed to read src/verify/contracts.rs")?;

    let count = contracts.matches("Contract violation:").count();
    if count < MIN_CONTRACTS {
        bail!(
            "Expected at least {} contract checks, found {}. Someone may have removed them!",
            MIN_CONTRACTS,
            count
        );
    }

    Ok(())
}

fn verify_rule_codes() -> Result<()> {
    let root = project_root()?;

    let diagnostics = std::fs::read_to_string(root.join("src/diagnostics.rs"))
        .context("Failed to read src/diagnostics.rs")?;
    let readme = std::fs::read_to_string(root.join("README.md")).context("Failed to read README.md")?;

    for code in RULE_CODES {
        if !diagnostics.contains(&format!("\"{}\"", code)) {
            bail!("{} is not defined in src/diagnostics.rs", code);
        }
        if !readme.contains(&format!("`{}`", code)) {
            bail!("{} is not documented in README.md", code);
        }
    }

    Ok(())
}
