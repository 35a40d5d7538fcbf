//! Review views: seasonality, review scores, popularity

use chrono::{NaiveDate, Utc};

use crate::error::Result;
use crate::filter;
use crate::period::PeriodKind;
use crate::table::{parse_series, reduce_outer, Reduce, SeriesSet, TrendTable};
use crate::templates;
use crate::views::{cities_or, TrendsEngine};
use crate::window;

/// Cities queried when no selection was made
pub const DEFAULT_REVIEW_CITIES: [&str; 2] = ["Paris", "Brooklyn"];

/// How far back the review-score view looks
pub const REVIEW_SCORE_LOOKBACK_YEARS: u32 = 15;

impl TrendsEngine {
    /// Review volume per calendar month, aggregated across the selected
    /// years, one series per selected city
    ///
    /// Per city and year, one query counts reviews in that year's
    /// 12-month window. The per-year series are combined NaN-aware (sum
    /// when normalizing, mean otherwise), then the per-city series are
    /// outer-merged on month. With `normalize`, each city's series is
    /// min-max normalized after aggregation.
    pub async fn seasonality_by_month(
        &self,
        cities: &[String],
        years: &[i32],
        normalize: bool,
    ) -> Result<SeriesSet> {
        self.seasonality_from(Utc::now().date_naive(), cities, years, normalize)
            .await
    }

    /// [`Self::seasonality_by_month`] with an explicit reference date
    pub async fn seasonality_from(
        &self,
        today: NaiveDate,
        cities: &[String],
        years: &[i32],
        normalize: bool,
    ) -> Result<SeriesSet> {
        use chrono::Datelike;

        let cities = cities_or(cities, &DEFAULT_REVIEW_CITIES);
        let years: Vec<i32> = if years.is_empty() {
            vec![today.year() - 1, today.year()]
        } else {
            years.to_vec()
        };

        let mut groups = Vec::with_capacity(cities.len());
        for city in &cities {
            let mut per_year = Vec::with_capacity(years.len());
            for &year in &years {
                let (start, end) = window::seasonality_window(today, year);
                let query = templates::seasonality_by_month(self.schema(), city, start, end);
                let result = self.run_or_empty(&query).await;
                per_year.push(parse_series(&result, "period", "review_count"));
            }
            let reduce = if normalize { Reduce::Sum } else { Reduce::Mean };
            groups.push((city.clone(), reduce_outer(&per_year, reduce)));
        }

        let set = SeriesSet::merge(PeriodKind::Month, groups);
        Ok(if normalize { set.normalize() } else { set })
    }

    /// Yearly average cleanliness sub-score for a country, with
    /// year-over-year percentage change
    ///
    /// The first year's change is 0 rather than NULL; see the template.
    pub async fn cleanliness_by_year(&self, country: &str) -> Result<TrendTable> {
        let country = filter::country_or_default(country);
        let query = templates::cleanliness_by_year(self.schema(), &country);
        let result = self.run_or_empty(&query).await;
        TrendTable::parse(
            &result,
            PeriodKind::Year,
            "period",
            "clean_avg",
            Some("pct_change"),
        )
    }

    /// Average review score per month, one series per selected city
    pub async fn review_score_by_month(&self, cities: &[String]) -> Result<SeriesSet> {
        self.review_score_from(Utc::now().date_naive(), cities)
            .await
    }

    /// [`Self::review_score_by_month`] with an explicit reference date
    pub async fn review_score_from(
        &self,
        today: NaiveDate,
        cities: &[String],
    ) -> Result<SeriesSet> {
        let cities = cities_or(cities, &DEFAULT_REVIEW_CITIES);
        let min_period = window::min_yearmonth(today, REVIEW_SCORE_LOOKBACK_YEARS);

        let mut groups = Vec::with_capacity(cities.len());
        for city in &cities {
            let query = templates::review_score_by_month(self.schema(), city, min_period);
            let result = self.run_or_empty(&query).await;
            groups.push((city.clone(), parse_series(&result, "period", "avg_score")));
        }

        Ok(SeriesSet::merge(PeriodKind::YearMonth, groups))
    }

    /// Total reviews per year over a lookback window
    ///
    /// A missing or zero lookback uses the default window.
    pub async fn popularity_by_year(
        &self,
        city: &str,
        lookback_years: Option<u32>,
    ) -> Result<TrendTable> {
        self.popularity_from(Utc::now().date_naive(), city, lookback_years)
            .await
    }

    /// [`Self::popularity_by_year`] with an explicit reference date
    pub async fn popularity_from(
        &self,
        today: NaiveDate,
        city: &str,
        lookback_years: Option<u32>,
    ) -> Result<TrendTable> {
        let city = filter::city_or_default(city);
        let lookback = filter::lookback_or_default(lookback_years);
        let min_year = window::min_year(today, lookback);

        let query = templates::popularity_by_year(self.schema(), &city, min_year);
        let result = self.run_or_empty(&query).await;
        TrendTable::parse(&result, PeriodKind::Year, "period", "total_reviews", None)
    }
}
