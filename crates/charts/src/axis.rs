//! Axis tick policies
//!
//! Tick placement is positional: `tickvals` index into the categorical x
//! values of the traces, `ticktext` carries the formatted labels.
//!
//! - Month axes label every month present with its abbreviated name.
//! - `year*100 + month` axes label only anchor months (January/July, or
//!   January/April/July for the host-growth view), formatted `YYYY-MM`.
//! - Year axes use integer ticks.
//! - The price-bucket axis uses the fixed Low/Medium/High labels.

use trendbnb_analytics::period;

use crate::spec::Axis;

/// Anchor months for half-year tick spacing (January, July)
pub const HALF_YEAR_ANCHORS: [i64; 2] = [1, 7];

/// Anchor months for quarter-ish tick spacing (January, April, July)
pub const QUARTER_ANCHORS: [i64; 3] = [1, 4, 7];

/// Month axis: one tick per month present, labeled Jan..Dec
pub fn month_axis(periods: &[i64]) -> Axis {
    Axis {
        title: Some("Month".to_string()),
        tickmode: Some("array".to_string()),
        tickvals: Some((0..periods.len() as i64).collect()),
        ticktext: Some(periods.iter().map(|p| period::month_name(*p).to_string()).collect()),
        tickangle: Some(45),
        ..Default::default()
    }
}

/// `year*100 + month` axis: ticks only at anchor months, labeled `YYYY-MM`
pub fn yearmonth_axis(periods: &[i64], anchors: &[i64]) -> Axis {
    let mut tickvals = Vec::new();
    let mut ticktext = Vec::new();
    for (idx, p) in periods.iter().enumerate() {
        if anchors.contains(&(p % 100)) {
            tickvals.push(idx as i64);
            ticktext.push(period::ym_label(*p));
        }
    }

    Axis {
        title: Some("Date".to_string()),
        tickmode: Some("array".to_string()),
        tickvals: Some(tickvals),
        ticktext: Some(ticktext),
        tickangle: Some(45),
        ..Default::default()
    }
}

/// Year axis: integer ticks, one per year
pub fn year_axis() -> Axis {
    Axis {
        title: Some("Year".to_string()),
        tickmode: Some("linear".to_string()),
        dtick: Some(1.0),
        ..Default::default()
    }
}

/// Price-bucket axis: fixed Low/Medium/High labels for the buckets present
pub fn bucket_axis(periods: &[i64]) -> Axis {
    Axis {
        title: Some("Price Range".to_string()),
        tickmode: Some("array".to_string()),
        tickvals: Some((0..periods.len() as i64).collect()),
        ticktext: Some(periods.iter().map(|p| period::bucket_label(*p).to_string()).collect()),
        ..Default::default()
    }
}
