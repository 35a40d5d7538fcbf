//! Host views: host growth and host activity

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter;
use crate::period::PeriodKind;
use crate::table::{as_f64, as_i64, parse_series, SeriesSet};
use crate::templates;
use crate::views::{cities_or, TrendsEngine};
use crate::window;
use trendbnb_query::QueryResult;

/// Cities queried when no selection was made
pub const DEFAULT_HOST_CITIES: [&str; 2] = ["London", "Paris"];

/// How far back the host-growth view looks
pub const HOST_LOOKBACK_YEARS: u32 = 10;

/// One host in the activity ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostActivityRow {
    /// Host identifier
    pub host_id: i64,
    /// Host display name
    pub name: String,
    /// Total reviews across the host's listings
    pub total_reviews: i64,
    /// Average reviews per month (total / 12)
    pub avg_monthly_reviews: f64,
}

/// Hosts ranked by average monthly reviews, busiest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostActivityTable {
    /// Ranked rows
    pub rows: Vec<HostActivityRow>,
}

impl HostActivityTable {
    /// Check if the ranking has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn parse(result: &QueryResult) -> Self {
        let (Some(id_idx), Some(name_idx), Some(total_idx), Some(avg_idx)) = (
            result.find_column("host_id"),
            result.find_column("name"),
            result.find_column("total_reviews"),
            result.find_column("avg_monthly_reviews"),
        ) else {
            return Self { rows: Vec::new() };
        };

        let rows = result
            .rows
            .iter()
            .filter_map(|row| {
                Some(HostActivityRow {
                    host_id: as_i64(row.get(id_idx))?,
                    name: row.get(name_idx)?.as_str()?.to_string(),
                    total_reviews: as_i64(row.get(total_idx))?,
                    avg_monthly_reviews: as_f64(row.get(avg_idx))?,
                })
            })
            .collect();

        Self { rows }
    }
}

impl TrendsEngine {
    /// Distinct new hosts per registration month, one series per selected
    /// city
    pub async fn new_hosts_by_month(&self, cities: &[String]) -> Result<SeriesSet> {
        self.new_hosts_from(Utc::now().date_naive(), cities).await
    }

    /// [`Self::new_hosts_by_month`] with an explicit reference date
    pub async fn new_hosts_from(
        &self,
        today: NaiveDate,
        cities: &[String],
    ) -> Result<SeriesSet> {
        let cities = cities_or(cities, &DEFAULT_HOST_CITIES);
        let min_period = window::min_yearmonth(today, HOST_LOOKBACK_YEARS);

        let mut groups = Vec::with_capacity(cities.len());
        for city in &cities {
            let query = templates::new_hosts_by_month(self.schema(), city, min_period);
            let result = self.run_or_empty(&query).await;
            groups.push((city.clone(), parse_series(&result, "period", "new_hosts")));
        }

        Ok(SeriesSet::merge(PeriodKind::YearMonth, groups))
    }

    /// Multi-listing hosts ranked by average monthly reviews
    pub async fn host_activity(&self, city: &str) -> Result<HostActivityTable> {
        let city = filter::city_or_default(city);
        let query = templates::host_activity(self.schema(), &city);
        let result = self.run_or_empty(&query).await;
        Ok(HostActivityTable::parse(&result))
    }
}
