//! Catalog command - list filter-control options
//!
//! # Usage
//!
//! ```bash
//! trendbnb catalog cities          # cities by listing count
//! trendbnb catalog review-cities   # cities by reviewed-listing count
//! trendbnb catalog years           # years with at least one review
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use trendbnb_analytics::TrendsEngine;
use trendbnb_query::QueryEngine;

/// Catalog command arguments
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Which option list to print
    #[arg(value_enum)]
    list: CatalogKind,

    /// Config file path (uses [query] section)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Available catalog listings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// Cities ranked by listing count
    Cities,
    /// Cities ranked by reviewed-listing count
    ReviewCities,
    /// Distinct review years
    Years,
}

/// Run the catalog command
pub async fn run(args: CatalogArgs) -> Result<()> {
    let resolved = super::build_resolved_config(args.config.as_ref())?;
    let schema = resolved.schema.clone();

    let query_engine =
        QueryEngine::from_resolved_config(&resolved).context("failed to create query engine")?;

    let mut engine = TrendsEngine::new(Box::new(query_engine));
    if let Some(schema) = schema {
        engine = engine.with_schema(schema);
    }

    match args.list {
        CatalogKind::Cities => {
            for city in engine.listing_cities().await? {
                println!("{}", city);
            }
        }
        CatalogKind::ReviewCities => {
            for city in engine.review_cities().await? {
                println!("{}", city);
            }
        }
        CatalogKind::Years => {
            for year in engine.review_years().await? {
                println!("{}", year);
            }
        }
    }

    Ok(())
}
