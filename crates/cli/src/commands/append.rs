// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `txkeep append` - write a record as any author

use super::open_log;
use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use txkeep_adapters::TransactionLog;
use txkeep_core::{AuthorName, Origin};

#[derive(Args)]
pub struct AppendArgs {
    /// Author writing the record
    #[arg(long)]
    pub author: String,

    /// Mark the record as imported by remote mirroring
    #[arg(long)]
    pub mirrored: bool,

    /// Payload as JSON
    pub payload: String,
}

pub async fn handle(args: AppendArgs, config: &CliConfig) -> Result<()> {
    let author = AuthorName::new(args.author)?;
    let payload: serde_json::Value =
        serde_json::from_str(&args.payload).context("payload is not valid JSON")?;
    let origin = if args.mirrored {
        Origin::Mirrored
    } else {
        Origin::Local
    };

    let tx = open_log(config)?.append(&author, origin, payload).await?;
    println!("appended {} at {}", tx.author, tx.timestamp);
    Ok(())
}
