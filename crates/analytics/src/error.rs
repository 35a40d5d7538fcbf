//! Analytics error types

use thiserror::Error;

/// Analytics errors
#[derive(Debug, Error)]
pub enum TrendsError {
    /// A query result was missing an expected column
    #[error("missing column in query result: {0}")]
    MissingColumn(String),

    /// Backend error (from trendbnb-query)
    #[error("backend error: {0}")]
    Backend(#[from] trendbnb_query::QueryError),
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, TrendsError>;
