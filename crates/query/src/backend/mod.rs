//! Query backend trait and implementations

pub mod clickhouse;
pub mod postgres;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::params::SqlQuery;
use crate::result::QueryResult;

/// Query backend trait
///
/// Implemented by the ClickHouse and Postgres backends.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Execute a parameterized SQL query
    async fn execute(&self, query: &SqlQuery) -> Result<QueryResult, QueryError>;

    /// Check if backend is available
    async fn health_check(&self) -> Result<(), QueryError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Validate SQL query - only allow SELECT and WITH (CTE) queries
///
/// This is a guardrail to prevent accidental destructive queries.
/// The caller is trusted (they hold the credentials), so this is not a
/// security boundary - just protection against mistakes.
pub fn validate_sql(sql: &str) -> Result<(), QueryError> {
    let trimmed = sql.trim();
    let upper = trimmed.to_uppercase();

    // Must start with SELECT or WITH (CTE)
    if !upper.starts_with("SELECT") && !upper.starts_with("WITH") {
        return Err(QueryError::InvalidSql(
            "only SELECT and WITH queries are allowed".to_string(),
        ));
    }

    // Block SELECT ... INTO (creates tables in some databases)
    if upper.contains(" INTO ") && !upper.contains("INSERT INTO") {
        return Err(QueryError::InvalidSql(
            "SELECT INTO is not allowed".to_string(),
        ));
    }

    // Disallow multiple statements (e.g., "SELECT 1; DROP TABLE x")
    // Allow trailing semicolon for convenience
    if trimmed.contains(';') && !trimmed.ends_with(';') {
        return Err(QueryError::InvalidSql(
            "multiple statements not allowed".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sql_select() {
        assert!(validate_sql("SELECT * FROM listing").is_ok());
        assert!(validate_sql("  SELECT count(*) FROM review  ").is_ok());
        assert!(validate_sql("select * from listing").is_ok());
    }

    #[test]
    fn test_validate_sql_with() {
        assert!(validate_sql("WITH cte AS (SELECT 1) SELECT * FROM cte").is_ok());
        assert!(validate_sql("with x as (select 1) select * from x").is_ok());
    }

    #[test]
    fn test_validate_sql_invalid() {
        assert!(validate_sql("INSERT INTO listing VALUES (1)").is_err());
        assert!(validate_sql("DELETE FROM listing").is_err());
        assert!(validate_sql("DROP TABLE listing").is_err());
        assert!(validate_sql("UPDATE listing SET x=1").is_err());
        assert!(validate_sql("TRUNCATE TABLE listing").is_err());
    }

    #[test]
    fn test_validate_sql_multiple_statements() {
        assert!(validate_sql("SELECT 1; DROP TABLE listing").is_err());
        assert!(validate_sql("SELECT 1; SELECT 2").is_err());
    }

    #[test]
    fn test_validate_sql_trailing_semicolon_ok() {
        assert!(validate_sql("SELECT * FROM listing;").is_ok());
    }

    #[test]
    fn test_validate_sql_select_into_blocked() {
        assert!(validate_sql("SELECT * INTO new_table FROM listing").is_err());
    }

    #[test]
    fn test_validate_sql_subqueries_ok() {
        assert!(validate_sql("SELECT * FROM (SELECT 1 as x) sub").is_ok());
        assert!(
            validate_sql("SELECT * FROM listing WHERE listing_id IN (SELECT listing_id FROM review)")
                .is_ok()
        );
    }
}
