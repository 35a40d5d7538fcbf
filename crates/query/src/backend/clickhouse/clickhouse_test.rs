//! Tests for ClickHouse backend

use super::*;

// =============================================================================
// Type Inference Tests
// =============================================================================

#[test]
fn test_infer_data_type_null() {
    assert_eq!(infer_data_type(&serde_json::Value::Null), DataType::Unknown);
}

#[test]
fn test_infer_data_type_numbers() {
    assert_eq!(infer_data_type(&serde_json::json!(42)), DataType::UInt64);
    assert_eq!(infer_data_type(&serde_json::json!(-42)), DataType::Int64);
    assert_eq!(infer_data_type(&serde_json::json!(3.25)), DataType::Float64);
}

#[test]
fn test_infer_data_type_string() {
    assert_eq!(
        infer_data_type(&serde_json::json!("Paris")),
        DataType::String
    );
}

#[test]
fn test_infer_data_type_complex() {
    assert_eq!(
        infer_data_type(&serde_json::json!([1, 2, 3])),
        DataType::Json
    );
    assert_eq!(
        infer_data_type(&serde_json::json!({"key": "value"})),
        DataType::Json
    );
}

// =============================================================================
// Placeholder Rewriting Tests
// =============================================================================

#[test]
fn test_rewrite_text_placeholder() {
    let query = SqlQuery::new("SELECT * FROM listing WHERE city = :city").bind("city", "Paris");
    let (sql, params) = rewrite_placeholders(&query).unwrap();

    assert_eq!(sql, "SELECT * FROM listing WHERE city = {city:String}");
    assert_eq!(params, vec![("city".to_string(), "Paris".to_string())]);
}

#[test]
fn test_rewrite_typed_placeholders() {
    let query = SqlQuery::new("WHERE y >= :min_year AND d >= :start")
        .bind("min_year", 2019i64)
        .bind(
            "start",
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
    let (sql, params) = rewrite_placeholders(&query).unwrap();

    assert_eq!(sql, "WHERE y >= {min_year:Int64} AND d >= {start:Date}");
    assert_eq!(params[0], ("min_year".to_string(), "2019".to_string()));
    assert_eq!(params[1], ("start".to_string(), "2024-01-01".to_string()));
}

#[test]
fn test_rewrite_repeated_placeholder_sent_once() {
    let query = SqlQuery::new("WHERE a = :x OR b = :x").bind("x", "v");
    let (sql, params) = rewrite_placeholders(&query).unwrap();

    assert_eq!(sql, "WHERE a = {x:String} OR b = {x:String}");
    assert_eq!(params.len(), 1);
}

#[test]
fn test_rewrite_missing_param_fails() {
    let query = SqlQuery::new("WHERE city = :city");
    let err = rewrite_placeholders(&query).unwrap_err();
    assert!(matches!(err, QueryError::Parameter(name) if name == "city"));
}

// =============================================================================
// URL Encoding Tests
// =============================================================================

#[test]
fn test_url_encode_simple() {
    assert_eq!(urlencoding::encode("hello"), "hello");
    assert_eq!(urlencoding::encode("hello world"), "hello%20world");
}

#[test]
fn test_url_encode_special_chars() {
    assert_eq!(urlencoding::encode("a=b"), "a%3Db");
    assert_eq!(urlencoding::encode("foo&bar"), "foo%26bar");
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_default() {
    let config = ClickHouseBackendConfig::default();
    assert_eq!(config.url, "http://localhost:8123");
    assert_eq!(config.database, "default");
    assert!(config.username.is_none());
    assert!(config.password.is_none());
    assert_eq!(config.max_execution_time, 60);
}

#[test]
fn test_config_with_credentials() {
    let config = ClickHouseBackendConfig::default().with_credentials("reader", "secret");
    assert_eq!(config.username, Some("reader".to_string()));
    assert_eq!(config.password, Some("secret".to_string()));
}

#[test]
fn test_backend_name() {
    let config = ClickHouseBackendConfig::default();
    let backend = ClickHouseBackend::new(&config);
    assert_eq!(backend.name(), "clickhouse");
}

#[test]
fn test_build_url() {
    let backend = ClickHouseBackend::from_url("http://localhost:8123", "trendbnb");
    let url = backend.build_url(
        "SELECT 1",
        &[("city".to_string(), "New York".to_string())],
    );
    assert!(url.contains("database=trendbnb"));
    assert!(url.contains("max_execution_time=60"));
    assert!(url.contains("query=SELECT%201"));
    assert!(url.contains("&param_city=New%20York"));
}

// =============================================================================
// Integration Tests (require running ClickHouse)
// =============================================================================

/// Integration tests that require a running ClickHouse instance.
/// Run with: cargo test -p trendbnb-query -- --ignored
#[tokio::test]
#[ignore = "requires running ClickHouse instance"]
async fn test_health_check() {
    let backend = ClickHouseBackend::from_url("http://localhost:8123", "default");
    let result = backend.health_check().await;
    assert!(result.is_ok(), "health check failed: {:?}", result);
}

#[tokio::test]
#[ignore = "requires running ClickHouse instance"]
async fn test_simple_query() {
    let backend = ClickHouseBackend::from_url("http://localhost:8123", "default");
    let query = SqlQuery::new("SELECT 1 as num, 'hello' as str");
    let result = backend.execute(&query).await;

    assert!(result.is_ok(), "query failed: {:?}", result);
    let result = result.unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(result.columns.len(), 2);
}
