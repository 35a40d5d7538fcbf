//! Shaped result tables
//!
//! Raw query results are shaped into one of two forms before rendering:
//! a [`TrendTable`] for single-geography views (period, value, optional
//! percentage change) or a [`SeriesSet`] for multi-group views (one value
//! column per selected city, outer-merged on the period key).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendsError};
use crate::period::PeriodKind;
use trendbnb_query::QueryResult;

/// One row of a single-geography trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    /// Period key (meaning depends on the table's [`PeriodKind`])
    pub period: i64,
    /// Aggregated value for the period
    pub value: f64,
    /// Percentage change vs. the previous period, when the view computes
    /// one
    pub pct_change: Option<f64>,
}

/// A single-geography trend table, ascending by period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendTable {
    /// What the period key means
    pub kind: PeriodKind,
    /// Rows in ascending period order
    pub rows: Vec<TrendRow>,
}

impl TrendTable {
    /// Create an empty table
    pub fn empty(kind: PeriodKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    /// Shape a raw query result into a trend table
    ///
    /// Looks up columns by (lower-case) name. The percentage-change column
    /// is optional: views without one pass `None`, and a missing column
    /// yields `None` for every row. Rows with a null period or value are
    /// skipped.
    pub fn parse(
        result: &QueryResult,
        kind: PeriodKind,
        period_col: &str,
        value_col: &str,
        pct_col: Option<&str>,
    ) -> Result<Self> {
        if result.is_empty() {
            return Ok(Self::empty(kind));
        }

        let period_idx = result
            .find_column(period_col)
            .ok_or_else(|| TrendsError::MissingColumn(period_col.to_string()))?;
        let value_idx = result
            .find_column(value_col)
            .ok_or_else(|| TrendsError::MissingColumn(value_col.to_string()))?;
        let pct_idx = pct_col.and_then(|c| result.find_column(c));

        let mut rows = Vec::with_capacity(result.row_count);
        for row in &result.rows {
            let period = match as_i64(row.get(period_idx)) {
                Some(p) => p,
                None => continue,
            };
            let value = match as_f64(row.get(value_idx)) {
                Some(v) => v,
                None => continue,
            };
            let pct_change = pct_idx.and_then(|i| as_f64(row.get(i)));
            rows.push(TrendRow {
                period,
                value,
                pct_change,
            });
        }

        Ok(Self { kind, rows })
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Period keys in row order
    pub fn periods(&self) -> Vec<i64> {
        self.rows.iter().map(|r| r.period).collect()
    }

    /// Smallest value in the table (for axis anchoring)
    pub fn min_value(&self) -> Option<f64> {
        self.rows
            .iter()
            .map(|r| r.value)
            .fold(None, |acc, v| match acc {
                Some(m) if m <= v => Some(m),
                _ => Some(v),
            })
    }
}

/// One named group of a multi-group series (one selected city)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGroup {
    /// Group name (the filter value it was queried for)
    pub name: String,
    /// One value per period in the set, `None` where this group has no
    /// data for the period
    pub values: Vec<Option<f64>>,
}

/// A multi-group series, outer-merged on the period key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSet {
    /// What the period key means
    pub kind: PeriodKind,
    /// Union of all groups' periods, ascending
    pub periods: Vec<i64>,
    /// One group per selected filter value, in selection order
    pub groups: Vec<SeriesGroup>,
}

impl SeriesSet {
    /// Full outer merge of per-group `(period, value)` series
    ///
    /// The period set is the union of every group's periods, ascending.
    /// Groups missing a period hold `None` there; no period present in any
    /// group is dropped.
    pub fn merge(kind: PeriodKind, groups: Vec<(String, Vec<(i64, f64)>)>) -> Self {
        let periods: Vec<i64> = groups
            .iter()
            .flat_map(|(_, series)| series.iter().map(|(p, _)| *p))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let groups = groups
            .into_iter()
            .map(|(name, series)| {
                let by_period: HashMap<i64, f64> = series.into_iter().collect();
                SeriesGroup {
                    name,
                    values: periods.iter().map(|p| by_period.get(p).copied()).collect(),
                }
            })
            .collect();

        Self {
            kind,
            periods,
            groups,
        }
    }

    /// Check if no group produced any row
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Group names in selection order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Min-max normalize each group's values independently:
    /// `(v - min) / (max - min)` over the group's present values. A
    /// constant series maps to all zeros.
    pub fn normalize(mut self) -> Self {
        for group in &mut self.groups {
            let present: Vec<f64> = group.values.iter().filter_map(|v| *v).collect();
            let (Some(min), Some(max)) = (
                present.iter().copied().reduce(f64::min),
                present.iter().copied().reduce(f64::max),
            ) else {
                continue;
            };

            for value in group.values.iter_mut().flatten() {
                *value = if max > min {
                    (*value - min) / (max - min)
                } else {
                    0.0
                };
            }
        }
        self
    }
}

/// How to reduce several per-year series into one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    /// Sum the values present for each period
    Sum,
    /// Average the values present for each period
    Mean,
}

/// Reduce several `(period, value)` series into one, NaN-aware: each
/// output period averages or sums only the series that have a value there.
/// The output covers the union of all input periods, ascending.
pub fn reduce_outer(series: &[Vec<(i64, f64)>], reduce: Reduce) -> Vec<(i64, f64)> {
    let mut by_period: HashMap<i64, (f64, usize)> = HashMap::new();
    for s in series {
        for (period, value) in s {
            let entry = by_period.entry(*period).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let periods: BTreeSet<i64> = by_period.keys().copied().collect();
    periods
        .into_iter()
        .map(|p| {
            let (sum, count) = by_period[&p];
            let value = match reduce {
                Reduce::Sum => sum,
                Reduce::Mean => sum / count as f64,
            };
            (p, value)
        })
        .collect()
}

/// Extract a `(period, value)` series from a raw result, skipping rows
/// with a null period or value. Returns an empty series when either
/// column is absent.
pub fn parse_series(result: &QueryResult, period_col: &str, value_col: &str) -> Vec<(i64, f64)> {
    let (Some(period_idx), Some(value_idx)) =
        (result.find_column(period_col), result.find_column(value_col))
    else {
        return Vec::new();
    };

    result
        .rows
        .iter()
        .filter_map(|row| {
            let period = as_i64(row.get(period_idx))?;
            let value = as_f64(row.get(value_idx))?;
            Some((period, value))
        })
        .collect()
}

/// Read a JSON scalar as an integer period key
///
/// Accepts numbers and numeric strings (ClickHouse renders 64-bit
/// integers as strings in JSON output by default).
pub(crate) fn as_i64(value: Option<&serde_json::Value>) -> Option<i64> {
    let value = value?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok().map(|f| f.round() as i64)))
}

/// Read a JSON scalar as a float value
pub(crate) fn as_f64(value: Option<&serde_json::Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_i64().map(|i| i as f64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}
