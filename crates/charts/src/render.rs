//! Chart rendering: shaped tables in, chart specs out
//!
//! Every render function is a pure mapping from a shaped table to a
//! [`ChartSpec`]. Empty input renders the "no data" placeholder: a title
//! naming the filter value and an empty trace list, never an error.

use trendbnb_analytics::{period, HostActivityTable, SeriesSet, TrendTable};

use crate::axis::{self, HALF_YEAR_ANCHORS, QUARTER_ANCHORS};
use crate::spec::{Axis, ChartSpec, Trace};
use crate::theme::dark_layout;

/// Title-only placeholder for an empty result
pub fn no_data(filter_desc: &str) -> ChartSpec {
    ChartSpec {
        title: format!(
            "No data was found for {}. Please try a different selection.",
            filter_desc
        ),
        traces: Vec::new(),
        layout: dark_layout(Axis::default(), Axis::default()),
    }
}

/// Pseudo-candlestick price chart with an average-price overlay
///
/// The open approximates the previous period's price from the percentage
/// change (`open = close * (1 - pct/100)`); high, low, and close all carry
/// the current price. This is a deliberately approximate visual encoding,
/// not a true OHLC.
pub fn price_candlestick(table: &TrendTable, city: &str) -> ChartSpec {
    if table.is_empty() {
        return no_data(&format!("the city: {}", city));
    }

    let x: Vec<String> = labels(table);
    let close: Vec<f64> = table.rows.iter().map(|r| r.value).collect();
    let open: Vec<f64> = table
        .rows
        .iter()
        .map(|r| open_price(r.value, r.pct_change))
        .collect();

    let traces = vec![
        Trace::Candlestick {
            name: "Price Change".to_string(),
            x: x.clone(),
            open,
            high: close.clone(),
            low: close.clone(),
            close: close.clone(),
        },
        Trace::Line {
            name: "Average Price".to_string(),
            x,
            y: close.into_iter().map(Some).collect(),
            mode: "lines+markers".to_string(),
            yaxis: None,
        },
    ];

    ChartSpec {
        title: format!("Average Price Change in {}", city),
        traces,
        layout: dark_layout(
            Axis::titled(period_axis_title(table)),
            Axis::titled("Average Daily Price"),
        ),
    }
}

/// Cleanliness bars with the percentage-change line on a secondary axis
pub fn cleanliness_chart(table: &TrendTable, country: &str) -> ChartSpec {
    if table.is_empty() {
        return no_data(&format!("the country: {}", country));
    }

    let x: Vec<String> = labels(table);

    let traces = vec![
        Trace::Bar {
            name: "Average Cleanliness".to_string(),
            x: x.clone(),
            y: table.rows.iter().map(|r| Some(r.value)).collect(),
        },
        Trace::Line {
            name: "Cleanliness % Change".to_string(),
            x,
            y: table.rows.iter().map(|r| r.pct_change).collect(),
            mode: "lines+markers".to_string(),
            yaxis: Some("y2".to_string()),
        },
    ];

    let mut layout = dark_layout(
        axis::year_axis(),
        Axis {
            title: Some("Average Cleanliness".to_string()),
            tickmode: Some("linear".to_string()),
            tick0: table.min_value(),
            dtick: Some(0.5),
            ..Default::default()
        },
    );
    layout.yaxis2 = Some(Axis {
        title: Some("Percentage Change".to_string()),
        overlaying: Some("y".to_string()),
        side: Some("right".to_string()),
        ..Default::default()
    });

    ChartSpec {
        title: "Cleanliness Change Over Time".to_string(),
        traces,
        layout,
    }
}

/// One line per city over calendar months
pub fn seasonality_chart(set: &SeriesSet, normalize: bool) -> ChartSpec {
    if set.is_empty() {
        return no_data(&cities_desc(set));
    }

    let y_title = if normalize {
        "Reviewed Listings [arb.]"
    } else {
        "Reviewed Listings [Count]"
    };

    ChartSpec {
        title: if normalize {
            "Seasonality Trends Over Time (Normalized)".to_string()
        } else {
            "Seasonality Trends Over Time".to_string()
        },
        traces: group_lines(set, "lines"),
        layout: dark_layout(axis::month_axis(&set.periods), Axis::titled(y_title)),
    }
}

/// Review volume per year for one city
pub fn popularity_chart(table: &TrendTable, city: &str, lookback_years: u32) -> ChartSpec {
    if table.is_empty() {
        return no_data(&format!(
            "the city: {} ({} years)",
            city, lookback_years
        ));
    }

    let traces = vec![Trace::Line {
        name: "Total Reviews".to_string(),
        x: labels(table),
        y: table.rows.iter().map(|r| Some(r.value)).collect(),
        mode: "lines+markers".to_string(),
        yaxis: None,
    }];

    let mut yaxis = Axis::titled("Total Reviews");
    yaxis.rangemode = Some("tozero".to_string());

    ChartSpec {
        title: format!(
            "Popularity of Listings Over Time in {} ({} years)",
            city, lookback_years
        ),
        traces,
        layout: dark_layout(axis::year_axis(), yaxis),
    }
}

/// One line per city of new-host counts, ticks at January/April/July
pub fn new_hosts_chart(set: &SeriesSet) -> ChartSpec {
    if set.is_empty() {
        return no_data(&cities_desc(set));
    }

    ChartSpec {
        title: "Number of New Hosts per Month".to_string(),
        traces: group_lines(set, "lines"),
        layout: dark_layout(
            axis::yearmonth_axis(&set.periods, &QUARTER_ANCHORS),
            Axis::titled("Number of New Hosts"),
        ),
    }
}

/// One line per city of average review scores, ticks at January/July
pub fn review_score_chart(set: &SeriesSet) -> ChartSpec {
    if set.is_empty() {
        return no_data(&cities_desc(set));
    }

    ChartSpec {
        title: "Average Review Trend".to_string(),
        traces: group_lines(set, "lines"),
        layout: dark_layout(
            axis::yearmonth_axis(&set.periods, &HALF_YEAR_ANCHORS),
            Axis::titled("Average Review Score per Month"),
        ),
    }
}

/// Average rating across the three price buckets
pub fn bucket_chart(table: &TrendTable, city: &str) -> ChartSpec {
    if table.is_empty() {
        return no_data(&format!("the city: {}", city));
    }

    let traces = vec![Trace::Line {
        name: "Average Rating".to_string(),
        x: labels(table),
        y: table.rows.iter().map(|r| Some(r.value)).collect(),
        mode: "lines+markers".to_string(),
        yaxis: None,
    }];

    ChartSpec {
        title: "Listing Price and Average Review Score Rating".to_string(),
        traces,
        layout: dark_layout(
            axis::bucket_axis(&table.periods()),
            Axis {
                title: Some("Average Rating".to_string()),
                tickmode: Some("linear".to_string()),
                tick0: table.min_value(),
                dtick: Some(0.25),
                ..Default::default()
            },
        ),
    }
}

/// Bar ranking of multi-listing hosts by average monthly reviews
pub fn host_activity_chart(table: &HostActivityTable, city: &str) -> ChartSpec {
    if table.is_empty() {
        return no_data(&format!("the city: {}", city));
    }

    let traces = vec![Trace::Bar {
        name: "Avg Monthly Reviews".to_string(),
        x: table.rows.iter().map(|r| r.name.clone()).collect(),
        y: table
            .rows
            .iter()
            .map(|r| Some(r.avg_monthly_reviews))
            .collect(),
    }];

    ChartSpec {
        title: format!("Host Listing Activity in {}", city),
        traces,
        layout: dark_layout(Axis::titled("Host"), Axis::titled("Avg Monthly Reviews")),
    }
}

/// Previous-price approximation for the candlestick open
pub(crate) fn open_price(close: f64, pct_change: Option<f64>) -> f64 {
    match pct_change {
        Some(pct) => close * (1.0 - pct / 100.0),
        None => close,
    }
}

fn labels(table: &TrendTable) -> Vec<String> {
    table
        .rows
        .iter()
        .map(|r| period::label(table.kind, r.period))
        .collect()
}

fn period_axis_title(table: &TrendTable) -> &'static str {
    match table.kind {
        trendbnb_analytics::PeriodKind::Year => "Year",
        _ => "Month",
    }
}

fn group_lines(set: &SeriesSet, mode: &str) -> Vec<Trace> {
    let x: Vec<String> = set
        .periods
        .iter()
        .map(|p| period::label(set.kind, *p))
        .collect();

    set.groups
        .iter()
        .map(|group| Trace::Line {
            name: group.name.clone(),
            x: x.clone(),
            y: group.values.clone(),
            mode: mode.to_string(),
            yaxis: None,
        })
        .collect()
}

fn cities_desc(set: &SeriesSet) -> String {
    format!("the selected cities: {}", set.group_names().join(", "))
}
