//! Pricing views: price trends and price-vs-rating buckets

use crate::error::Result;
use crate::filter;
use crate::period::PeriodKind;
use crate::table::TrendTable;
use crate::templates;
use crate::views::TrendsEngine;

impl TrendsEngine {
    /// Monthly average daily price with month-over-month percentage change
    ///
    /// Blank city falls back to the default city. Periods are
    /// `year*100 + month` of the listing's first review, ascending.
    pub async fn price_change_by_month(&self, city: &str) -> Result<TrendTable> {
        let city = filter::city_or_default(city);
        let query = templates::price_change_by_month(self.schema(), &city);
        let result = self.run_or_empty(&query).await;
        TrendTable::parse(
            &result,
            PeriodKind::YearMonth,
            "period",
            "avg_price",
            Some("pct_change"),
        )
    }

    /// Yearly average daily price with year-over-year percentage change
    pub async fn price_change_by_year(&self, city: &str) -> Result<TrendTable> {
        let city = filter::city_or_default(city);
        let query = templates::price_change_by_year(self.schema(), &city);
        let result = self.run_or_empty(&query).await;
        TrendTable::parse(
            &result,
            PeriodKind::Year,
            "period",
            "avg_price",
            Some("pct_change"),
        )
    }

    /// Average review rating per price bucket (low/medium/high)
    pub async fn price_rating_buckets(&self, city: &str) -> Result<TrendTable> {
        let city = filter::city_or_default(city);
        let query = templates::price_rating_buckets(self.schema(), &city);
        let result = self.run_or_empty(&query).await;
        TrendTable::parse(&result, PeriodKind::PriceBucket, "period", "avg_rating", None)
    }
}

#[cfg(test)]
mod tests {
    use crate::views::testing::{rows, StaticBackend};
    use crate::views::TrendsEngine;

    #[tokio::test]
    async fn test_price_change_by_year_parses_rows() {
        let backend = StaticBackend::empty().with_geo_result(
            "Paris",
            rows(
                &["period", "avg_price", "pct_change"],
                vec![
                    vec![
                        serde_json::json!(2022),
                        serde_json::json!(100.0),
                        serde_json::Value::Null,
                    ],
                    vec![
                        serde_json::json!(2023),
                        serde_json::json!(120.0),
                        serde_json::json!(20.0),
                    ],
                ],
            ),
        );
        let engine = TrendsEngine::new(Box::new(backend));

        let table = engine.price_change_by_year("Paris").await.unwrap();
        assert_eq!(table.periods(), vec![2022, 2023]);
        assert_eq!(table.rows[0].pct_change, None);
        assert_eq!(table.rows[1].pct_change, Some(20.0));
    }

    #[tokio::test]
    async fn test_blank_city_uses_default() {
        let backend = StaticBackend::empty().with_geo_result(
            "Paris",
            rows(
                &["period", "avg_price", "pct_change"],
                vec![vec![
                    serde_json::json!(2023),
                    serde_json::json!(80.0),
                    serde_json::Value::Null,
                ]],
            ),
        );
        let engine = TrendsEngine::new(Box::new(backend));

        // Blank input routes to the default city and finds its data
        let table = engine.price_change_by_year("").await.unwrap();
        assert_eq!(table.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_city_yields_empty_table() {
        let engine = TrendsEngine::new(Box::new(StaticBackend::empty()));
        let table = engine.price_change_by_month("Atlantis").await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_degrades_to_empty() {
        let engine = TrendsEngine::new(Box::new(StaticBackend::failing()));
        let table = engine.price_rating_buckets("Paris").await.unwrap();
        assert!(table.is_empty());
    }
}
