//! Ping command - check backend connectivity

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use trendbnb_query::QueryEngine;

/// Ping command arguments
#[derive(Args, Debug)]
pub struct PingArgs {
    /// Config file path (uses [query] section)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the ping command
pub async fn run(args: PingArgs) -> Result<()> {
    let resolved = super::build_resolved_config(args.config.as_ref())?;

    let engine =
        QueryEngine::from_resolved_config(&resolved).context("failed to create query engine")?;

    engine
        .health_check()
        .await
        .context("backend health check failed")?;

    println!("{} backend ok", engine.backend_name());
    Ok(())
}
