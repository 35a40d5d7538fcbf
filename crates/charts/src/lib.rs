//! Trendbnb Charts
//!
//! Maps shaped analytics tables into serializable chart specifications.
//! The display layer (a web UI, or the CLI printing JSON) consumes
//! [`ChartSpec`] values; nothing here talks to the database.
//!
//! # Overview
//!
//! - **spec**: the [`ChartSpec`]/[`Trace`]/[`Layout`] data types
//! - **render**: one pure render function per analytical view
//! - **axis**: tick policies (month names, `YYYY-MM` anchors, year
//!   integers, price-bucket labels)
//! - **theme**: the single fixed dark theme
//!
//! # Usage
//!
//! ```ignore
//! use trendbnb_charts::render;
//!
//! let table = engine.price_change_by_year("Paris").await?;
//! let spec = render::price_candlestick(&table, "Paris");
//! println!("{}", serde_json::to_string_pretty(&spec)?);
//! ```
//!
//! An empty table renders as a title-only placeholder stating no data was
//! found; render functions never fail.

pub mod axis;
pub mod render;
pub mod spec;
pub mod theme;

#[cfg(test)]
mod render_test;

// Re-exports for convenience
pub use render::{
    bucket_chart, cleanliness_chart, host_activity_chart, new_hosts_chart, no_data,
    popularity_chart, price_candlestick, review_score_chart, seasonality_chart,
};
pub use spec::{Axis, ChartSpec, Layout, Trace};
pub use theme::DARK_TEMPLATE;
