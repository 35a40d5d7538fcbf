//! Trendbnb Analytics Engine
//!
//! Analytical views over a short-term-rental listing dataset: pricing
//! trends, seasonality, cleanliness, host growth, review volume, and
//! popularity, scoped by city or country.
//!
//! # Overview
//!
//! This crate provides the analytics layer for Trendbnb, built on top of
//! `trendbnb-query`. It includes:
//!
//! - **Templates**: parameterized SQL, one template per analytical view
//! - **Shaping**: trend tables, multi-group merges, normalization
//! - **Views**: the [`TrendsEngine`] methods that run the pipeline
//! - **Filters**: geography values, defaults, lookback windows
//!
//! # Usage
//!
//! ```ignore
//! use trendbnb_analytics::TrendsEngine;
//! use trendbnb_query::{QueryConfig, QueryEngine};
//!
//! let query_engine = QueryEngine::from_query_config(&config)?;
//! let engine = TrendsEngine::new(Box::new(query_engine));
//!
//! // One trend table: yearly average price for one city
//! let prices = engine.price_change_by_year("Paris").await?;
//!
//! // One merged series set: review scores for several cities
//! let scores = engine.review_score_by_month(&cities).await?;
//! ```
//!
//! Every call recomputes from scratch; nothing is cached between
//! interactions. Gateway failures degrade to empty results inside the
//! engine, so callers only ever distinguish "has data" from "no data".

pub mod error;
pub mod filter;
pub mod period;
pub mod table;
pub mod templates;
pub mod views;
pub mod window;

#[cfg(test)]
mod templates_test;

// Re-exports for convenience
pub use error::{Result, TrendsError};
pub use filter::{
    city_or_default, country_or_default, lookback_or_default, DEFAULT_CITY, DEFAULT_COUNTRY,
    DEFAULT_LOOKBACK_YEARS,
};
pub use period::{PeriodKind, BUCKET_NAMES, MONTH_NAMES};
pub use table::{
    parse_series, reduce_outer, Reduce, SeriesGroup, SeriesSet, TrendRow, TrendTable,
};
pub use views::hosts::{HostActivityRow, HostActivityTable};
pub use views::TrendsEngine;
