//! Trendbnb - rental market trend analytics
//!
//! # Usage
//!
//! ```bash
//! # Compute a chart specification (JSON on stdout)
//! trendbnb chart price-by-year --city Paris
//! trendbnb chart seasonality --cities Paris,Brooklyn --years 2022,2023 --normalize
//!
//! # Raw SQL passthrough
//! trendbnb query "SELECT city, COUNT(*) FROM listing GROUP BY city" --format json
//!
//! # Filter-control option lists
//! trendbnb catalog cities
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Trendbnb - rental market trend analytics
#[derive(Parser, Debug)]
#[command(name = "trendbnb")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a chart specification for an analytical view
    Chart(cmd::chart::ChartArgs),

    /// Execute a raw SQL query (SELECT only)
    Query(cmd::query::QueryArgs),

    /// List filter-control options (cities, review years)
    Catalog(cmd::catalog::CatalogArgs),

    /// Check backend connectivity
    Ping(cmd::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Chart(mut args) => {
            // CLI global --config wins when both are specified
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            // Degraded queries log warnings; make them visible
            init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
            cmd::chart::run(args).await
        }
        Command::Query(mut args) => {
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            // Query doesn't need logging - just outputs to stdout
            cmd::query::run(args).await
        }
        Command::Catalog(mut args) => {
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            cmd::catalog::run(args).await
        }
        Command::Ping(mut args) => {
            if args.config.is_none() && cli.config.is_some() {
                args.config = cli.config;
            }
            cmd::ping::run(args).await
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
