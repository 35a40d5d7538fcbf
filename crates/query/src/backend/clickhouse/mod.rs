//! ClickHouse backend for analytical queries
//!
//! Executes SQL queries against a ClickHouse database using the HTTP
//! interface. Named `:name` placeholders are rewritten to ClickHouse's
//! server-side `{name:Type}` parameter syntax and the values travel as
//! `param_<name>` URL parameters, so filter values are bound rather than
//! spliced into the SQL text.

use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;

use crate::backend::{validate_sql, QueryBackend};
use crate::error::QueryError;
use crate::params::{split_placeholders, Segment, SqlQuery, SqlValue};
use crate::result::{Column, DataType, QueryResult};

// =============================================================================
// Configuration
// =============================================================================

/// ClickHouse backend configuration
#[derive(Debug, Clone)]
pub struct ClickHouseBackendConfig {
    /// ClickHouse HTTP URL (e.g., "http://localhost:8123")
    pub url: String,

    /// Database name
    pub database: String,

    /// Username for authentication (optional)
    pub username: Option<String>,

    /// Password for authentication (optional)
    pub password: Option<String>,

    /// Max execution time in seconds
    pub max_execution_time: u64,
}

impl Default for ClickHouseBackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8123".into(),
            database: "default".into(),
            username: None,
            password: None,
            max_execution_time: 60,
        }
    }
}

impl ClickHouseBackendConfig {
    /// Create a new config with URL and database
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Default::default()
        }
    }

    /// Set authentication credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

// =============================================================================
// Backend Implementation
// =============================================================================

/// ClickHouse backend for SQL queries using the HTTP interface
#[derive(Clone)]
pub struct ClickHouseBackend {
    client: reqwest::Client,
    config: ClickHouseBackendConfig,
}

impl std::fmt::Debug for ClickHouseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickHouseBackend")
            .field("url", &self.config.url)
            .field("database", &self.config.database)
            .finish()
    }
}

impl ClickHouseBackend {
    /// Create a new ClickHouse backend from config
    pub fn new(config: &ClickHouseBackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config: config.clone(),
        }
    }

    /// Create from URL and database directly
    pub fn from_url(url: impl Into<String>, database: impl Into<String>) -> Self {
        let config = ClickHouseBackendConfig::new(url, database);
        Self::new(&config)
    }

    /// Build the request URL with the query and its bind parameters
    fn build_url(&self, query: &str, params: &[(String, String)]) -> String {
        let mut url = format!(
            "{}/?database={}&max_execution_time={}",
            self.config.url, self.config.database, self.config.max_execution_time
        );

        url.push_str("&query=");
        url.push_str(&urlencoding::encode(query));

        for (name, value) in params {
            url.push_str(&format!(
                "&param_{}={}",
                name,
                urlencoding::encode(value)
            ));
        }

        url
    }

    /// Execute a query and get the raw response body
    async fn execute_raw(
        &self,
        sql: &str,
        params: &[(String, String)],
    ) -> Result<String, QueryError> {
        let url = self.build_url(sql, params);

        let mut request = self.client.get(&url);

        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request
            .send()
            .await
            .map_err(|e| QueryError::Connection(format!("ClickHouse connection failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Execution(format!(
                "ClickHouse error ({}): {}",
                status, body
            )));
        }

        response
            .text()
            .await
            .map_err(|e| QueryError::Execution(format!("failed to read response: {}", e)))
    }
}

#[async_trait]
impl QueryBackend for ClickHouseBackend {
    async fn execute(&self, query: &SqlQuery) -> Result<QueryResult, QueryError> {
        validate_sql(&query.sql)?;

        let (sql, params) = rewrite_placeholders(query)?;

        let start = Instant::now();

        // JSONEachRow gives one JSON object per line
        let query_with_format = format!("{} FORMAT JSONEachRow", sql.trim().trim_end_matches(';'));
        let response_text = self.execute_raw(&query_with_format, &params).await?;

        let execution_time_ms = start.elapsed().as_millis() as u64;

        if response_text.trim().is_empty() {
            return Ok(QueryResult::new(Vec::new(), Vec::new(), execution_time_ms));
        }

        let json_rows: Vec<HashMap<String, serde_json::Value>> = response_text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    QueryError::Serialization(format!("failed to parse JSON row: {}", e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if json_rows.is_empty() {
            return Ok(QueryResult::new(Vec::new(), Vec::new(), execution_time_ms));
        }

        // Derive columns from the first row's keys
        let first_row = &json_rows[0];
        let column_names: Vec<String> = first_row.keys().cloned().collect();

        let columns: Vec<Column> = column_names
            .iter()
            .map(|name| {
                let value = first_row.get(name).unwrap_or(&serde_json::Value::Null);
                Column::new(name.clone(), infer_data_type(value), true)
            })
            .collect();

        let rows: Vec<Vec<serde_json::Value>> = json_rows
            .iter()
            .map(|row| {
                column_names
                    .iter()
                    .map(|name| row.get(name).cloned().unwrap_or(serde_json::Value::Null))
                    .collect()
            })
            .collect();

        tracing::debug!(
            rows = rows.len(),
            cols = columns.len(),
            time_ms = execution_time_ms,
            "ClickHouse query executed"
        );

        Ok(QueryResult::new(columns, rows, execution_time_ms))
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        self.execute_raw("SELECT 1", &[]).await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "clickhouse"
    }
}

// =============================================================================
// Placeholder Rewriting
// =============================================================================

/// Rewrite `:name` placeholders to `{name:Type}` and collect the rendered
/// parameter values for the URL
fn rewrite_placeholders(query: &SqlQuery) -> Result<(String, Vec<(String, String)>), QueryError> {
    let mut sql = String::with_capacity(query.sql.len());
    let mut params = Vec::new();

    for segment in split_placeholders(&query.sql) {
        match segment {
            Segment::Text(text) => sql.push_str(&text),
            Segment::Param(name) => {
                let value = query
                    .param(&name)
                    .ok_or_else(|| QueryError::Parameter(name.clone()))?;
                sql.push_str(&format!("{{{}:{}}}", name, clickhouse_type(value)));
                if !params.iter().any(|(n, _)| *n == name) {
                    params.push((name, value.render()));
                }
            }
        }
    }

    Ok((sql, params))
}

/// ClickHouse type name for a bind value
fn clickhouse_type(value: &SqlValue) -> &'static str {
    match value {
        SqlValue::Text(_) => "String",
        SqlValue::Int(_) => "Int64",
        SqlValue::Float(_) => "Float64",
        SqlValue::Date(_) => "Date",
    }
}

/// Infer DataType from a JSON value
fn infer_data_type(value: &serde_json::Value) -> DataType {
    match value {
        serde_json::Value::Null => DataType::Unknown,
        serde_json::Value::Bool(_) => DataType::Boolean,
        serde_json::Value::Number(n) => {
            if n.is_f64() {
                DataType::Float64
            } else if n.is_u64() {
                DataType::UInt64
            } else {
                DataType::Int64
            }
        }
        serde_json::Value::String(_) => DataType::String,
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => DataType::Json,
    }
}

/// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        let mut result = String::with_capacity(s.len() * 3);
        for c in s.chars() {
            match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => {
                    result.push(c);
                }
                ' ' => result.push_str("%20"),
                _ => {
                    for byte in c.to_string().as_bytes() {
                        result.push_str(&format!("%{:02X}", byte));
                    }
                }
            }
        }
        result
    }
}

#[cfg(test)]
#[path = "clickhouse_test.rs"]
mod clickhouse_test;
