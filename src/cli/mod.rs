// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions and command runners for the safecast binary.
//!
//! Two subcommands: `check` to analyze a compilation and report diagnostics,
//! and `inspect` to show what the engine would see (types, rules, casts)
//! without judging it.

pub mod display;
pub mod inspect;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::config::HostConfig;
use crate::error::{Error, Result};
use crate::host::{analyze, load_compilation_with_progress, Compilation};

#[derive(Parser)]
#[command(
    name = "safecast",
    about = "Checks interface implications and the casts that rely on them",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a compilation and report diagnostics
    Check {
        /// Directory containing manifest.json, or a single unit file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Host configuration file (defaults to safecast.json next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the types, implications and casts found in a compilation
    Inspect {
        /// Directory containing manifest.json, or a single unit file
        #[arg(short, long)]
        input: PathBuf,

        /// Host configuration file (defaults to safecast.json next to the input)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Run `check`, print the report, and return the process exit code.
pub fn run_check(input: &Path, config: Option<&Path>, format: OutputFormat) -> Result<i32> {
    let config = HostConfig::discover(config, input)?;
    let treat_warnings_as_errors = config.treat_warnings_as_errors;
    let compilation = load(input)?;

    let outcome = analyze(config, &compilation.units)?;

    let mut stdout = std::io::stdout().lock();
    let written = match format {
        OutputFormat::Text => output::write_text(&mut stdout, &outcome),
        OutputFormat::Json => output::write_json(&mut stdout, &outcome),
    };
    written.map_err(|source| Error::Io {
        path: PathBuf::from("<stdout>"),
        source,
    })?;

    if format == OutputFormat::Text {
        eprintln!("{}", output::summary_line(&outcome));
    }
    Ok(outcome.exit_code(treat_warnings_as_errors))
}

/// Run `inspect` and print the boxed summary.
pub fn run_inspect(input: &Path, config: Option<&Path>) -> Result<()> {
    let config = HostConfig::discover(config, input)?;
    let compilation = load(input)?;
    inspect::print(config, &compilation)
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

#[cfg(feature = "parallel")]
fn load(input: &Path) -> Result<Compilation> {
    let progress = ProgressBar::new(1);
    if !atty::is(atty::Stream::Stderr) {
        progress.set_draw_target(ProgressDrawTarget::hidden());
    }
    progress.set_style(create_progress_style());
    progress.set_prefix("Loading");
    progress.set_message("units...");

    let compilation = load_compilation_with_progress(input, &progress)?;
    progress.finish_and_clear();
    Ok(compilation)
}

#[cfg(not(feature = "parallel"))]
fn load(input: &Path) -> Result<Compilation> {
    load_compilation_with_progress(input)
}
