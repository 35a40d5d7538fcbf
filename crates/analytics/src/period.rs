//! Period keys and labels
//!
//! Every shaped table is keyed by an integer period whose meaning depends
//! on the [`PeriodKind`]: a calendar month (1-12), a calendar year, a
//! `year*100 + month` composite, or a price bucket (1-3).

use serde::{Deserialize, Serialize};

/// The time (or price) bucket a metric is aggregated over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// Calendar month, 1-12
    Month,
    /// Calendar year
    Year,
    /// `year*100 + month` composite (e.g. 202407)
    YearMonth,
    /// Price bucket: 1 low, 2 medium, 3 high
    PriceBucket,
}

/// Abbreviated month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Price bucket display labels for buckets 1-3
pub const BUCKET_NAMES: [&str; 3] = ["Low", "Medium", "High"];

/// Compose a `year*100 + month` period key
pub fn ym(year: i32, month: u32) -> i64 {
    year as i64 * 100 + month as i64
}

/// Format a `year*100 + month` period key as `YYYY-MM`
pub fn ym_label(period: i64) -> String {
    format!("{:04}-{:02}", period / 100, period % 100)
}

/// Abbreviated name for a 1-based month period
pub fn month_name(month: i64) -> &'static str {
    if month < 1 {
        return "?";
    }
    MONTH_NAMES.get(month as usize - 1).copied().unwrap_or("?")
}

/// Display label for a price bucket period
pub fn bucket_label(bucket: i64) -> &'static str {
    if bucket < 1 {
        return "?";
    }
    BUCKET_NAMES.get(bucket as usize - 1).copied().unwrap_or("?")
}

/// Display label for a period of the given kind
pub fn label(kind: PeriodKind, period: i64) -> String {
    match kind {
        PeriodKind::Month => month_name(period).to_string(),
        PeriodKind::Year => period.to_string(),
        PeriodKind::YearMonth => ym_label(period),
        PeriodKind::PriceBucket => bucket_label(period).to_string(),
    }
}
