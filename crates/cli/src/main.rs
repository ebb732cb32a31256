// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow unwrap in test code
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! txkeep - shared transaction log tracker CLI

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{append, clean, merge, status, watch};
use std::path::PathBuf;
use txkeep_core::LogLevel;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "txkeep",
    version,
    about = "Merge and reclaim a transaction log shared by several authors"
)]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = "txkeep.toml")]
    config: PathBuf,

    /// More log output (-v status, -vv detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a record to the log
    Append(append::AppendArgs),
    /// Run one pass as the current author
    Merge,
    /// Delete records every regular author has consumed
    Clean,
    /// Show cursors and the deletion boundary
    Status,
    /// Run passes whenever the log changes, until Ctrl-C
    Watch(watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let mut config = CliConfig::load(&cli.config)?;
    config.tracker.log_level = match cli.verbose {
        0 => config.tracker.log_level,
        1 => LogLevel::Status,
        _ => LogLevel::Detail,
    };

    match cli.command {
        Commands::Append(args) => append::handle(args, &config).await,
        Commands::Merge => merge::handle(&config).await,
        Commands::Clean => clean::handle(&config).await,
        Commands::Status => status::handle(&config).await,
        Commands::Watch(args) => watch::handle(args, &config).await,
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
