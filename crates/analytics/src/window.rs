//! Lookback window calculations
//!
//! Views bound their date ranges in Rust and pass the bounds as bind
//! parameters, so the SQL templates stay free of database-specific date
//! arithmetic.

use chrono::{Datelike, Duration, NaiveDate};

use crate::period::ym;

/// The 12-month review window for one selected year: starts `12k` months
/// before `today` (where `k = today's year - selected year`) and runs for
/// 12 months.
pub fn seasonality_window(today: NaiveDate, year: i32) -> (NaiveDate, NaiveDate) {
    let months_back = 12 * (today.year() - year);
    let start = shift_months(today, -months_back);
    let end = shift_months(start, 12);
    (start, end)
}

/// First calendar year inside a lookback window of `years` years
pub fn min_year(today: NaiveDate, years: u32) -> i64 {
    (today.year() - years as i32) as i64
}

/// First `year*100 + month` period inside a lookback window of `years`
/// years
pub fn min_yearmonth(today: NaiveDate, years: u32) -> i64 {
    ym(today.year() - years as i32, today.month())
}

/// Shift a date by a number of months (positive or negative)
///
/// If the target day doesn't exist (e.g., Jan 31 + 1 month), uses the last
/// day of the target month.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total_months = date.month() as i32 + months;
    let year_delta = if total_months <= 0 {
        (total_months - 12) / 12
    } else {
        (total_months - 1) / 12
    };

    let new_year = date.year() + year_delta;
    let new_month = ((total_months - 1).rem_euclid(12) + 1) as u32;

    date.with_year(new_year)
        .and_then(|d| d.with_month(new_month))
        .or_else(|| {
            NaiveDate::from_ymd_opt(new_year, new_month, date.day())
                .or_else(|| last_day_of_month(new_year, new_month))
        })
        .unwrap_or(date)
}

/// Last day of the given month
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month.map(|d| d - Duration::days(1))
}
