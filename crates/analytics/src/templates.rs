//! SQL templates for the analytical views
//!
//! One template per view, parameterized by geography (always a bind
//! parameter, never spliced into the SQL text) and, where applicable, by
//! window bounds computed in [`crate::window`]. The templates stick to
//! portable SQL (CTEs, `EXTRACT`, `LAG ... OVER`) so both backends run
//! them unchanged.
//!
//! Percentage-change views compute
//! `ROUND((curr - prev) / prev * 100, 2)` against the immediately
//! preceding period and emit NULL when there is no previous period. The
//! one exception is [`cleanliness_by_year`], which emits 0 for the first
//! period instead; that asymmetry comes from the system this reimplements
//! and is preserved.

use chrono::NaiveDate;

use trendbnb_query::SqlQuery;

/// Qualify a table name with the configured schema/owner, if any
pub fn table_name(schema: Option<&str>, table: &str) -> String {
    match schema {
        Some(owner) => format!("{}.{}", owner, table),
        None => table.to_string(),
    }
}

/// Monthly average daily price with month-over-month percentage change
///
/// Period key is `year*100 + month` of the listing's first review. The
/// average price is rounded to whole units, the change to 2 decimals.
pub fn price_change_by_month(schema: Option<&str>, city: &str) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let sql = format!(
        "WITH monthly_price AS (
    SELECT
        EXTRACT(YEAR FROM l.first_review) AS listing_year,
        EXTRACT(MONTH FROM l.first_review) AS listing_month,
        AVG(l.daily_price) AS avg_daily_price
    FROM {listing} l
    WHERE l.city = :city AND l.first_review IS NOT NULL
    GROUP BY EXTRACT(YEAR FROM l.first_review), EXTRACT(MONTH FROM l.first_review)
),
price_change AS (
    SELECT
        listing_year * 100 + listing_month AS period,
        avg_daily_price,
        LAG(avg_daily_price) OVER (ORDER BY listing_year, listing_month) AS prev_avg_price
    FROM monthly_price
)
SELECT
    period,
    ROUND(avg_daily_price, 0) AS avg_price,
    CASE
        WHEN prev_avg_price IS NOT NULL THEN
            ROUND((avg_daily_price - prev_avg_price) / prev_avg_price * 100, 2)
        ELSE NULL
    END AS pct_change
FROM price_change
ORDER BY period"
    );

    SqlQuery::new(sql).bind("city", city)
}

/// Yearly average daily price with year-over-year percentage change
///
/// Same shape as [`price_change_by_month`] at calendar-year granularity;
/// the average price keeps 2 decimals here.
pub fn price_change_by_year(schema: Option<&str>, city: &str) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let sql = format!(
        "WITH yearly_price AS (
    SELECT
        EXTRACT(YEAR FROM l.first_review) AS listing_year,
        AVG(l.daily_price) AS avg_daily_price
    FROM {listing} l
    WHERE l.city = :city AND l.first_review IS NOT NULL
    GROUP BY EXTRACT(YEAR FROM l.first_review)
),
price_change AS (
    SELECT
        listing_year AS period,
        avg_daily_price,
        LAG(avg_daily_price) OVER (ORDER BY listing_year) AS prev_avg_price
    FROM yearly_price
)
SELECT
    period,
    ROUND(avg_daily_price, 2) AS avg_price,
    CASE
        WHEN prev_avg_price IS NOT NULL THEN
            ROUND((avg_daily_price - prev_avg_price) / prev_avg_price * 100, 2)
        ELSE NULL
    END AS pct_change
FROM price_change
ORDER BY period"
    );

    SqlQuery::new(sql).bind("city", city)
}

/// Yearly average cleanliness sub-score with year-over-year percentage
/// change, scoped to a country
///
/// The first year's percentage change is 0, not NULL (preserved source
/// behavior).
pub fn cleanliness_by_year(schema: Option<&str>, country: &str) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let detailed_review = table_name(schema, "detailed_review");
    let sql = format!(
        "WITH clean_years AS (
    SELECT
        EXTRACT(YEAR FROM l.first_review) AS clean_year,
        AVG(d.cleanliness) AS clean_avg
    FROM {listing} l
    JOIN {detailed_review} d ON l.listing_id = d.listing_id
    WHERE l.country = :country
      AND d.cleanliness IS NOT NULL
      AND l.last_review IS NOT NULL
    GROUP BY EXTRACT(YEAR FROM l.first_review)
),
clean_change AS (
    SELECT
        clean_year AS period,
        clean_avg,
        LAG(clean_avg) OVER (ORDER BY clean_year) AS prev_clean_avg
    FROM clean_years
)
SELECT
    period,
    ROUND(clean_avg, 2) AS clean_avg,
    CASE
        WHEN prev_clean_avg IS NOT NULL THEN
            ROUND((clean_avg - prev_clean_avg) / prev_clean_avg * 100, 2)
        ELSE 0
    END AS pct_change
FROM clean_change
ORDER BY period"
    );

    SqlQuery::new(sql).bind("country", country)
}

/// Review count per calendar month within one 12-month window
///
/// The window bounds come from [`crate::window::seasonality_window`];
/// the period key is the month number 1-12.
pub fn seasonality_by_month(
    schema: Option<&str>,
    city: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let review = table_name(schema, "review");
    let sql = format!(
        "WITH monthly_reviews AS (
    SELECT
        EXTRACT(MONTH FROM r.review_date) AS review_month,
        COUNT(r.review_id) AS review_count
    FROM {review} r
    JOIN {listing} l ON r.listing_id = l.listing_id
    WHERE l.city = :city
      AND r.review_date >= :start_date
      AND r.review_date < :end_date
    GROUP BY EXTRACT(MONTH FROM r.review_date)
)
SELECT review_month AS period, review_count
FROM monthly_reviews
ORDER BY period"
    );

    SqlQuery::new(sql)
        .bind("city", city)
        .bind("start_date", start)
        .bind("end_date", end)
}

/// Total reviews per review year, bounded by a lookback window
///
/// Only reviews on or after the listing's own first review count.
pub fn popularity_by_year(schema: Option<&str>, city: &str, min_year: i64) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let review = table_name(schema, "review");
    let sql = format!(
        "WITH review_counts AS (
    SELECT
        EXTRACT(YEAR FROM r.review_date) AS review_year,
        COUNT(r.review_id) AS review_count
    FROM {review} r
    JOIN {listing} l ON r.listing_id = l.listing_id
    WHERE l.city = :city
      AND r.review_date >= l.first_review
      AND EXTRACT(YEAR FROM r.review_date) >= :min_year
    GROUP BY EXTRACT(YEAR FROM r.review_date)
)
SELECT review_year AS period, SUM(review_count) AS total_reviews
FROM review_counts
GROUP BY review_year
ORDER BY period"
    );

    SqlQuery::new(sql).bind("city", city).bind("min_year", min_year)
}

/// Distinct new hosts per registration month (`year*100 + month`),
/// bounded below by `min_period`
pub fn new_hosts_by_month(schema: Option<&str>, city: &str, min_period: i64) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let host = table_name(schema, "host");
    let sql = format!(
        "WITH host_data AS (
    SELECT
        h.host_id,
        EXTRACT(YEAR FROM h.host_since) * 100 + EXTRACT(MONTH FROM h.host_since) AS registration_month
    FROM {host} h
    JOIN {listing} l ON h.host_id = l.host_id
    WHERE l.city = :city
)
SELECT registration_month AS period, COUNT(DISTINCT host_id) AS new_hosts
FROM host_data
WHERE registration_month >= :min_period
GROUP BY registration_month
ORDER BY period"
    );

    SqlQuery::new(sql)
        .bind("city", city)
        .bind("min_period", min_period)
}

/// Average review rating per review month (`year*100 + month`), bounded
/// below by `min_period`
pub fn review_score_by_month(schema: Option<&str>, city: &str, min_period: i64) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let review = table_name(schema, "review");
    let detailed_review = table_name(schema, "detailed_review");
    let sql = format!(
        "WITH review_data AS (
    SELECT
        EXTRACT(YEAR FROM r.review_date) * 100 + EXTRACT(MONTH FROM r.review_date) AS review_month,
        dr.rating
    FROM {listing} l
    JOIN {review} r ON l.listing_id = r.listing_id
    JOIN {detailed_review} dr ON r.listing_id = dr.listing_id
    WHERE l.city = :city
)
SELECT review_month AS period, AVG(rating) AS avg_score
FROM review_data
WHERE review_month >= :min_period
GROUP BY review_month
ORDER BY period"
    );

    SqlQuery::new(sql)
        .bind("city", city)
        .bind("min_period", min_period)
}

/// Average rating per price bucket: bucket 1 below 50, bucket 2 from 50 to
/// 150 inclusive, bucket 3 above 150
pub fn price_rating_buckets(schema: Option<&str>, city: &str) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let detailed_review = table_name(schema, "detailed_review");
    let sql = format!(
        "WITH listing_ratings AS (
    SELECT
        l.listing_id,
        l.daily_price,
        AVG(dr.rating) AS listing_rating
    FROM {listing} l
    LEFT JOIN {detailed_review} dr ON l.listing_id = dr.listing_id
    WHERE l.city = :city
    GROUP BY l.listing_id, l.daily_price
),
price_buckets AS (
    SELECT
        CASE
            WHEN daily_price < 50 THEN 1
            WHEN daily_price BETWEEN 50 AND 150 THEN 2
            ELSE 3
        END AS bucket,
        AVG(listing_rating) AS bucket_rating
    FROM listing_ratings
    GROUP BY CASE
            WHEN daily_price < 50 THEN 1
            WHEN daily_price BETWEEN 50 AND 150 THEN 2
            ELSE 3
        END
)
SELECT bucket AS period, ROUND(bucket_rating, 2) AS avg_rating
FROM price_buckets
ORDER BY period"
    );

    SqlQuery::new(sql).bind("city", city)
}

/// Hosts with more than one listing in a city, ranked by average monthly
/// reviews across their listings
pub fn host_activity(schema: Option<&str>, city: &str) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let host = table_name(schema, "host");
    let review = table_name(schema, "review");
    let sql = format!(
        "WITH multi_listings AS (
    SELECT h.host_id, h.name, l.listing_id
    FROM {host} h
    JOIN {listing} l ON h.host_id = l.host_id
    WHERE l.city = :city AND h.host_listing_count > 1
),
host_reviews AS (
    SELECT
        ml.host_id,
        ml.name,
        COUNT(r.review_id) AS total_reviews,
        ROUND(COUNT(r.review_id) / 12.0, 2) AS avg_monthly_reviews
    FROM multi_listings ml
    LEFT JOIN {review} r ON ml.listing_id = r.listing_id
    GROUP BY ml.host_id, ml.name
)
SELECT host_id, name, total_reviews, avg_monthly_reviews
FROM host_reviews
ORDER BY avg_monthly_reviews DESC"
    );

    SqlQuery::new(sql).bind("city", city)
}

/// Cities ranked by listing count, most listings first
pub fn listing_cities(schema: Option<&str>) -> SqlQuery {
    let listing = table_name(schema, "listing");
    SqlQuery::new(format!(
        "SELECT city, COUNT(city) AS listing_count
FROM {listing}
GROUP BY city
ORDER BY listing_count DESC"
    ))
}

/// Cities ranked by reviewed-listing count, most reviews first
pub fn review_cities(schema: Option<&str>) -> SqlQuery {
    let listing = table_name(schema, "listing");
    let review = table_name(schema, "review");
    let detailed_review = table_name(schema, "detailed_review");
    SqlQuery::new(format!(
        "WITH reviewed AS (
    SELECT l.city AS city
    FROM {listing} l
    JOIN {review} r ON l.listing_id = r.listing_id
    JOIN {detailed_review} dr ON r.listing_id = dr.listing_id
)
SELECT city, COUNT(city) AS review_count
FROM reviewed
GROUP BY city
ORDER BY review_count DESC"
    ))
}

/// Distinct years with at least one review, ascending
pub fn review_years(schema: Option<&str>) -> SqlQuery {
    let review = table_name(schema, "review");
    SqlQuery::new(format!(
        "SELECT DISTINCT EXTRACT(YEAR FROM review_date) AS review_year
FROM {review}
ORDER BY review_year"
    ))
}
