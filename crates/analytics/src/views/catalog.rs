//! Catalog views: option lists for filter controls
//!
//! Unlike the chart views, catalog lookups propagate backend errors: they
//! feed dropdowns and CLI listings, where an explicit failure beats a
//! silently empty list.

use crate::error::Result;
use crate::table::as_i64;
use crate::templates;
use crate::views::TrendsEngine;
use trendbnb_query::QueryResult;

impl TrendsEngine {
    /// Cities ranked by listing count, most listings first
    pub async fn listing_cities(&self) -> Result<Vec<String>> {
        let query = templates::listing_cities(self.schema());
        let result = self.backend().execute(&query).await?;
        Ok(parse_names(&result, "city"))
    }

    /// Cities ranked by reviewed-listing count, most reviews first
    pub async fn review_cities(&self) -> Result<Vec<String>> {
        let query = templates::review_cities(self.schema());
        let result = self.backend().execute(&query).await?;
        Ok(parse_names(&result, "city"))
    }

    /// Distinct years with at least one review, ascending
    pub async fn review_years(&self) -> Result<Vec<i32>> {
        let query = templates::review_years(self.schema());
        let result = self.backend().execute(&query).await?;

        let Some(year_idx) = result.find_column("review_year") else {
            return Ok(Vec::new());
        };

        Ok(result
            .rows
            .iter()
            .filter_map(|row| as_i64(row.get(year_idx)).map(|y| y as i32))
            .collect())
    }
}

fn parse_names(result: &QueryResult, column: &str) -> Vec<String> {
    let Some(idx) = result.find_column(column) else {
        return Vec::new();
    };

    result
        .rows
        .iter()
        .filter_map(|row| row.get(idx)?.as_str().map(String::from))
        .collect()
}
