// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing_subscriber::EnvFilter;

use safecast::cli::{run_check, run_inspect, Cli, Commands};
use safecast::error::exit_code;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins when no -v is given
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check {
            input,
            format,
            config,
        } => run_check(&input, config.as_deref(), format),
        Commands::Inspect { input, config } => {
            run_inspect(&input, config.as_deref()).map(|()| exit_code::CLEAN)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
