//! Trendbnb Query - SQL query execution for Trendbnb analytics
//!
//! Provides a unified interface for running parameterized analytical
//! queries against multiple backends:
//! - **ClickHouse**: HTTP interface with server-side bind parameters
//! - **Postgres**: sqlx pool with positional binds
//!
//! Every query carries its filter values as named bind parameters
//! (`:city`, `:min_year`, ...); the backends rewrite those to their native
//! placeholder syntax. User input never gets interpolated into SQL text.
//!
//! # Usage
//!
//! ```ignore
//! use trendbnb_query::{QueryConfig, QueryEngine, SqlQuery};
//!
//! let config = QueryConfig::postgres("postgres://localhost/trendbnb");
//! let engine = QueryEngine::from_query_config(&config)?;
//!
//! let query = SqlQuery::new("SELECT COUNT(*) AS n FROM listing WHERE city = :city")
//!     .bind("city", "Paris");
//! let result = engine.query(&query).await?;
//! println!("Rows: {}", result.row_count);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod params;
pub mod result;

// Re-exports
pub use backend::clickhouse::{ClickHouseBackend, ClickHouseBackendConfig};
pub use backend::postgres::{PostgresBackend, PostgresBackendConfig};
pub use backend::{validate_sql, QueryBackend};
pub use config::{QueryBackendType, QueryConfig, ResolvedQueryConfig};
pub use error::QueryError;
pub use params::{SqlParam, SqlQuery, SqlValue};
pub use result::{Column, DataType, QueryResult};

use std::sync::Arc;

/// Query engine that routes queries to the appropriate backend
pub struct QueryEngine {
    backend: Arc<dyn QueryBackend>,
}

impl QueryEngine {
    /// Create a new query engine with a specific backend
    pub fn new(backend: impl QueryBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create a query engine from resolved config
    pub fn from_resolved_config(config: &ResolvedQueryConfig) -> Result<Self, QueryError> {
        match config.backend {
            QueryBackendType::ClickHouse => {
                let database = config.database.as_deref().unwrap_or("default");
                let mut ch_config = ClickHouseBackendConfig::new(&config.url, database);

                if let (Some(user), Some(pass)) = (&config.username, &config.password) {
                    ch_config = ch_config.with_credentials(user, pass);
                }

                Ok(Self::new(ClickHouseBackend::new(&ch_config)))
            }
            QueryBackendType::Postgres => {
                let pg_config = PostgresBackendConfig::new(&config.url);
                let backend = PostgresBackend::new(&pg_config)?;
                Ok(Self::new(backend))
            }
        }
    }

    /// Create a query engine from query config
    pub fn from_query_config(config: &QueryConfig) -> Result<Self, QueryError> {
        let resolved = ResolvedQueryConfig::from_config(config)?;
        Self::from_resolved_config(&resolved)
    }

    /// Execute a parameterized SQL query
    pub async fn query(&self, query: &SqlQuery) -> Result<QueryResult, QueryError> {
        self.backend.execute(query).await
    }

    /// Check if the backend is healthy
    pub async fn health_check(&self) -> Result<(), QueryError> {
        self.backend.health_check().await
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

/// Output format for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON array of objects
    Json,
    /// CSV format
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

// Implement QueryBackend for QueryEngine so it can be handed to TrendsEngine
#[async_trait::async_trait]
impl QueryBackend for QueryEngine {
    async fn execute(&self, query: &SqlQuery) -> Result<QueryResult, QueryError> {
        self.backend.execute(query).await
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        self.backend.health_check().await
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}
