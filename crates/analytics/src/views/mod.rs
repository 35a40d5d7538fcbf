//! Analytical views over the listing dataset
//!
//! Views are organized by domain:
//!
//! - **pricing**: price trends by month/year, price-vs-rating buckets
//! - **reviews**: seasonality, review scores, popularity
//! - **hosts**: host growth, host activity
//! - **catalog**: filter-control option lists (cities, review years)
//!
//! Every view is one method on [`TrendsEngine`]: it builds a parameterized
//! template, executes it through the backend (once per selected filter
//! value), and shapes the raw rows. Gateway failures degrade to an empty
//! result at this boundary, so a broken connection renders like a query
//! that matched nothing.

pub mod catalog;
pub mod hosts;
pub mod pricing;
pub mod reviews;

use trendbnb_query::{QueryBackend, QueryResult, SqlQuery};

/// Engine that runs the analytical views against a query backend
///
/// Holds nothing beyond the backend handle and the optional schema
/// qualifier; every call recomputes from scratch.
pub struct TrendsEngine {
    backend: Box<dyn QueryBackend>,
    schema: Option<String>,
}

impl TrendsEngine {
    /// Create a new engine with a backend
    pub fn new(backend: Box<dyn QueryBackend>) -> Self {
        Self {
            backend,
            schema: None,
        }
    }

    /// Qualify table names with a schema/owner prefix
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Get a reference to the underlying query backend
    ///
    /// Useful for executing raw queries outside of the views API.
    pub fn backend(&self) -> &dyn QueryBackend {
        self.backend.as_ref()
    }

    pub(crate) fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Run a query, degrading any gateway failure to an empty result
    ///
    /// Chart views never surface raw errors to the display layer.
    pub(crate) async fn run_or_empty(&self, query: &SqlQuery) -> QueryResult {
        match self.backend.execute(query).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(error = %err, "query failed, treating as empty result");
                QueryResult::empty()
            }
        }
    }
}

/// Replace a missing or all-blank city selection with the view's defaults
pub(crate) fn cities_or(cities: &[String], defaults: &[&str]) -> Vec<String> {
    let selected: Vec<String> = cities
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();

    if selected.is_empty() {
        defaults.iter().map(|d| d.to_string()).collect()
    } else {
        selected
    }
}
