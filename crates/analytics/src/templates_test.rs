//! Tests for the SQL templates

use chrono::NaiveDate;

use self::support::*;
use crate::templates::*;
use trendbnb_query::{validate_sql, SqlValue};

mod support {
    use trendbnb_query::SqlQuery;

    /// Every template must survive the gateway's SELECT/WITH guardrail
    /// and must not splice its bind values into the SQL text.
    pub fn assert_well_formed(query: &SqlQuery) {
        trendbnb_query::validate_sql(&query.sql).expect("template must pass SQL validation");
        for param in &query.params {
            let rendered = param.value.render();
            assert!(
                !query.sql.contains(&rendered) || rendered.parse::<f64>().is_ok(),
                "bind value {:?} must not appear in the SQL text",
                rendered
            );
            assert!(
                query.sql.contains(&format!(":{}", param.name)),
                "placeholder :{} missing from SQL",
                param.name
            );
        }
    }
}

#[test]
fn test_table_name_qualification() {
    assert_eq!(table_name(None, "listing"), "listing");
    assert_eq!(table_name(Some("owner"), "listing"), "owner.listing");
}

#[test]
fn test_price_change_by_month() {
    let query = price_change_by_month(None, "Paris");
    assert_well_formed(&query);

    assert_eq!(query.param("city"), Some(&SqlValue::Text("Paris".into())));
    assert!(query.sql.contains("listing_year * 100 + listing_month AS period"));
    assert!(query.sql.contains("LAG(avg_daily_price) OVER (ORDER BY listing_year, listing_month)"));
    // Monthly prices round to whole units
    assert!(query.sql.contains("ROUND(avg_daily_price, 0) AS avg_price"));
    assert!(query.sql.contains("ROUND((avg_daily_price - prev_avg_price) / prev_avg_price * 100, 2)"));
    // First period has no previous month: change is NULL
    assert!(query.sql.contains("ELSE NULL"));
    assert!(query.sql.trim_end().ends_with("ORDER BY period"));
}

#[test]
fn test_price_change_by_year() {
    let query = price_change_by_year(None, "Paris");
    assert_well_formed(&query);

    assert!(query.sql.contains("LAG(avg_daily_price) OVER (ORDER BY listing_year)"));
    // Yearly prices keep two decimals
    assert!(query.sql.contains("ROUND(avg_daily_price, 2) AS avg_price"));
    assert!(query.sql.contains("ELSE NULL"));
    assert!(query.sql.trim_end().ends_with("ORDER BY period"));
}

#[test]
fn test_cleanliness_first_period_is_zero() {
    // The one view whose first-period change is 0 instead of NULL
    let query = cleanliness_by_year(None, "France");
    assert_well_formed(&query);

    assert_eq!(query.param("country"), Some(&SqlValue::Text("France".into())));
    assert!(query.sql.contains("ELSE 0"));
    assert!(!query.sql.contains("ELSE NULL"));
    assert!(query.sql.contains("d.cleanliness IS NOT NULL"));
    assert!(query.sql.contains("l.last_review IS NOT NULL"));
}

#[test]
fn test_seasonality_window_bounds_are_bound() {
    let start = NaiveDate::from_ymd_opt(2022, 6, 15).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
    let query = seasonality_by_month(None, "Brooklyn", start, end);
    assert_well_formed(&query);

    assert_eq!(query.param("start_date"), Some(&SqlValue::Date(start)));
    assert_eq!(query.param("end_date"), Some(&SqlValue::Date(end)));
    assert!(query.sql.contains("r.review_date >= :start_date"));
    assert!(query.sql.contains("r.review_date < :end_date"));
    // Months come back ascending, never the source's descending order
    assert!(query.sql.trim_end().ends_with("ORDER BY period"));
}

#[test]
fn test_popularity_by_year() {
    let query = popularity_by_year(None, "Paris", 2019);
    assert_well_formed(&query);

    assert_eq!(query.param("min_year"), Some(&SqlValue::Int(2019)));
    assert!(query.sql.contains("r.review_date >= l.first_review"));
    assert!(query.sql.contains("SUM(review_count) AS total_reviews"));
    assert!(query.sql.trim_end().ends_with("ORDER BY period"));
}

#[test]
fn test_new_hosts_by_month() {
    let query = new_hosts_by_month(None, "London", 201406);
    assert_well_formed(&query);

    assert_eq!(query.param("min_period"), Some(&SqlValue::Int(201406)));
    assert!(query
        .sql
        .contains("EXTRACT(YEAR FROM h.host_since) * 100 + EXTRACT(MONTH FROM h.host_since)"));
    assert!(query.sql.contains("COUNT(DISTINCT host_id) AS new_hosts"));
}

#[test]
fn test_review_score_by_month() {
    let query = review_score_by_month(None, "Paris", 200906);
    assert_well_formed(&query);

    assert!(query.sql.contains("AVG(rating) AS avg_score"));
    assert!(query.sql.contains("review_month >= :min_period"));
}

#[test]
fn test_price_bucket_boundaries() {
    let query = price_rating_buckets(None, "Paris");
    assert_well_formed(&query);

    // 49.99 is low, 50 and 150 are medium, 150.01 is high
    assert!(query.sql.contains("WHEN daily_price < 50 THEN 1"));
    assert!(query.sql.contains("WHEN daily_price BETWEEN 50 AND 150 THEN 2"));
    assert!(query.sql.contains("ELSE 3"));
    assert!(query.sql.contains("ROUND(bucket_rating, 2) AS avg_rating"));
    assert!(query.sql.trim_end().ends_with("ORDER BY period"));
}

#[test]
fn test_host_activity() {
    let query = host_activity(None, "Paris");
    assert_well_formed(&query);

    assert!(query.sql.contains("h.host_listing_count > 1"));
    assert!(query.sql.contains("ROUND(COUNT(r.review_id) / 12.0, 2) AS avg_monthly_reviews"));
    assert!(query.sql.contains("ORDER BY avg_monthly_reviews DESC"));
}

#[test]
fn test_catalog_templates() {
    for query in [listing_cities(None), review_cities(None), review_years(None)] {
        assert_well_formed(&query);
        assert!(query.params.is_empty());
    }

    assert!(listing_cities(None).sql.contains("ORDER BY listing_count DESC"));
    assert!(review_cities(None).sql.contains("ORDER BY review_count DESC"));
    assert!(review_years(None).sql.contains("DISTINCT EXTRACT(YEAR FROM review_date)"));
}

#[test]
fn test_schema_qualifier_applies_to_every_table() {
    let query = review_score_by_month(Some("owner"), "Paris", 200906);
    assert!(query.sql.contains("owner.listing l"));
    assert!(query.sql.contains("owner.review r"));
    assert!(query.sql.contains("owner.detailed_review dr"));
}

#[test]
fn test_geography_is_never_interpolated() {
    // A hostile city name must stay out of the SQL text entirely
    let hostile = "Paris'; DROP TABLE listing; --";
    let query = price_change_by_month(None, hostile);

    assert!(!query.sql.contains(hostile));
    assert!(validate_sql(&query.sql).is_ok());
    assert_eq!(query.param("city"), Some(&SqlValue::Text(hostile.into())));
}
