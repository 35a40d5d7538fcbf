//! Chart command - compute a chart specification for an analytical view
//!
//! Runs the full pipeline (template, query, shaping, rendering) for one
//! view and prints the resulting chart specification as JSON. A web UI
//! would call the same engine methods; the CLI is just the in-repo
//! consumer.
//!
//! # Usage
//!
//! ```bash
//! trendbnb chart price-by-month --city Paris
//! trendbnb chart cleanliness --country France
//! trendbnb chart seasonality --cities Paris,Brooklyn --years 2022,2023 --normalize
//! trendbnb chart popularity --city Paris --lookback 8
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use trendbnb_analytics::{city_or_default, country_or_default, lookback_or_default, TrendsEngine};
use trendbnb_charts::render;
use trendbnb_charts::ChartSpec;
use trendbnb_query::QueryEngine;

/// Chart command arguments
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// View to compute
    #[arg(value_enum)]
    view: ViewKind,

    /// City for single-city views
    #[arg(long)]
    city: Option<String>,

    /// Cities for multi-city views (comma-separated)
    #[arg(long, value_delimiter = ',')]
    cities: Vec<String>,

    /// Country for the cleanliness view
    #[arg(long)]
    country: Option<String>,

    /// Years for the seasonality view (comma-separated)
    #[arg(long, value_delimiter = ',')]
    years: Vec<i32>,

    /// Lookback window in years for the popularity view
    #[arg(long)]
    lookback: Option<u32>,

    /// Min-max normalize the seasonality series
    #[arg(long)]
    normalize: bool,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Config file path (uses [query] section)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// The analytical views the chart command can compute
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Monthly price change candlestick
    PriceByMonth,
    /// Yearly price change candlestick
    PriceByYear,
    /// Cleanliness bars with percentage-change overlay
    Cleanliness,
    /// Review volume per month across years
    Seasonality,
    /// Review volume per year
    Popularity,
    /// New hosts per month
    NewHosts,
    /// Average review score per month
    ReviewScore,
    /// Average rating per price bucket
    PriceBuckets,
    /// Multi-listing hosts ranked by review volume
    HostActivity,
}

/// Run the chart command
pub async fn run(args: ChartArgs) -> Result<()> {
    let resolved = super::build_resolved_config(args.config.as_ref())?;
    let schema = resolved.schema.clone();

    let query_engine =
        QueryEngine::from_resolved_config(&resolved).context("failed to create query engine")?;

    let mut engine = TrendsEngine::new(Box::new(query_engine));
    if let Some(schema) = schema {
        engine = engine.with_schema(schema);
    }

    let spec = compute_chart(&engine, &args).await?;

    if args.compact {
        println!("{}", serde_json::to_string(&spec)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&spec)?);
    }

    Ok(())
}

/// Run the pipeline for one view and render its chart
async fn compute_chart(engine: &TrendsEngine, args: &ChartArgs) -> Result<ChartSpec> {
    let city = city_or_default(args.city.as_deref().unwrap_or(""));
    let country = country_or_default(args.country.as_deref().unwrap_or(""));

    let spec = match args.view {
        ViewKind::PriceByMonth => {
            let table = engine.price_change_by_month(&city).await?;
            render::price_candlestick(&table, &city)
        }
        ViewKind::PriceByYear => {
            let table = engine.price_change_by_year(&city).await?;
            render::price_candlestick(&table, &city)
        }
        ViewKind::Cleanliness => {
            let table = engine.cleanliness_by_year(&country).await?;
            render::cleanliness_chart(&table, &country)
        }
        ViewKind::Seasonality => {
            let set = engine
                .seasonality_by_month(&args.cities, &args.years, args.normalize)
                .await?;
            render::seasonality_chart(&set, args.normalize)
        }
        ViewKind::Popularity => {
            let table = engine.popularity_by_year(&city, args.lookback).await?;
            render::popularity_chart(&table, &city, lookback_or_default(args.lookback))
        }
        ViewKind::NewHosts => {
            let set = engine.new_hosts_by_month(&args.cities).await?;
            render::new_hosts_chart(&set)
        }
        ViewKind::ReviewScore => {
            let set = engine.review_score_by_month(&args.cities).await?;
            render::review_score_chart(&set)
        }
        ViewKind::PriceBuckets => {
            let table = engine.price_rating_buckets(&city).await?;
            render::bucket_chart(&table, &city)
        }
        ViewKind::HostActivity => {
            let table = engine.host_activity(&city).await?;
            render::host_activity_chart(&table, &city)
        }
    };

    Ok(spec)
}
