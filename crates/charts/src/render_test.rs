//! Tests for chart rendering

use trendbnb_analytics::{PeriodKind, SeriesSet, TrendRow, TrendTable};

use crate::render::*;
use crate::spec::Trace;
use crate::theme::DARK_TEMPLATE;

fn year_table(rows: Vec<(i64, f64, Option<f64>)>) -> TrendTable {
    TrendTable {
        kind: PeriodKind::Year,
        rows: rows
            .into_iter()
            .map(|(period, value, pct_change)| TrendRow {
                period,
                value,
                pct_change,
            })
            .collect(),
    }
}

// =============================================================================
// No-Data Policy Tests
// =============================================================================

#[test]
fn test_no_data_has_title_and_zero_traces() {
    let spec = no_data("the city: Atlantis");
    assert!(!spec.has_data());
    assert_eq!(
        spec.title,
        "No data was found for the city: Atlantis. Please try a different selection."
    );
    assert_eq!(spec.layout.template, DARK_TEMPLATE);
}

#[test]
fn test_empty_tables_render_as_no_data() {
    let empty_year = TrendTable::empty(PeriodKind::Year);
    let empty_set = SeriesSet::merge(PeriodKind::Month, vec![("Paris".to_string(), vec![])]);

    assert!(!price_candlestick(&empty_year, "Atlantis").has_data());
    assert!(!cleanliness_chart(&empty_year, "Atlantis").has_data());
    assert!(!popularity_chart(&empty_year, "Atlantis", 5).has_data());
    assert!(!bucket_chart(&empty_year, "Atlantis").has_data());

    let spec = seasonality_chart(&empty_set, false);
    assert!(!spec.has_data());
    assert!(spec.title.contains("Paris"));
}

// =============================================================================
// Candlestick Tests
// =============================================================================

#[test]
fn test_open_price_approximates_previous() {
    // prev=100, curr=110 means pct=10; the open lands near the previous
    assert_eq!(open_price(110.0, Some(10.0)), 99.0);
    // First period has no pct: open equals close
    assert_eq!(open_price(100.0, None), 100.0);
}

#[test]
fn test_candlestick_end_to_end() {
    let table = year_table(vec![(2022, 100.0, None), (2023, 120.0, Some(20.0))]);
    let spec = price_candlestick(&table, "Paris");

    assert_eq!(spec.title, "Average Price Change in Paris");
    assert_eq!(spec.traces.len(), 2);

    let Trace::Candlestick {
        x,
        open,
        high,
        low,
        close,
        ..
    } = &spec.traces[0]
    else {
        panic!("first trace must be the candlestick");
    };
    assert_eq!(x, &vec!["2022".to_string(), "2023".to_string()]);
    assert_eq!(open, &vec![100.0, 96.0]);
    assert_eq!(close, &vec![100.0, 120.0]);
    assert_eq!(high, close);
    assert_eq!(low, close);

    let Trace::Line { mode, y, .. } = &spec.traces[1] else {
        panic!("second trace must be the average-price line");
    };
    assert_eq!(mode, "lines+markers");
    assert_eq!(y, &vec![Some(100.0), Some(120.0)]);
}

#[test]
fn test_candlestick_monthly_labels() {
    let table = TrendTable {
        kind: PeriodKind::YearMonth,
        rows: vec![TrendRow {
            period: 202307,
            value: 90.0,
            pct_change: None,
        }],
    };
    let spec = price_candlestick(&table, "Paris");

    let Trace::Candlestick { x, .. } = &spec.traces[0] else {
        panic!("first trace must be the candlestick");
    };
    assert_eq!(x, &vec!["2023-07".to_string()]);
}

// =============================================================================
// Secondary-Axis Tests
// =============================================================================

#[test]
fn test_cleanliness_pct_line_on_secondary_axis() {
    let table = year_table(vec![(2022, 4.5, Some(0.0)), (2023, 4.7, Some(4.44))]);
    let spec = cleanliness_chart(&table, "France");

    let Trace::Line { yaxis, y, .. } = &spec.traces[1] else {
        panic!("second trace must be the percentage line");
    };
    assert_eq!(yaxis.as_deref(), Some("y2"));
    assert_eq!(y, &vec![Some(0.0), Some(4.44)]);

    let y2 = spec.layout.yaxis2.as_ref().expect("secondary axis");
    assert_eq!(y2.overlaying.as_deref(), Some("y"));
    assert_eq!(y2.side.as_deref(), Some("right"));

    // Primary axis anchors at the smallest bar
    assert_eq!(spec.layout.yaxis.tick0, Some(4.5));
    assert_eq!(spec.layout.yaxis.dtick, Some(0.5));
}

// =============================================================================
// Multi-Group Line Tests
// =============================================================================

#[test]
fn test_seasonality_one_line_per_city_with_gaps() {
    let set = SeriesSet::merge(
        PeriodKind::Month,
        vec![
            ("Paris".to_string(), vec![(1, 10.0), (2, 20.0)]),
            ("Brooklyn".to_string(), vec![(2, 5.0), (3, 8.0)]),
        ],
    );
    let spec = seasonality_chart(&set, false);

    assert_eq!(spec.traces.len(), 2);
    let Trace::Line { name, y, .. } = &spec.traces[1] else {
        panic!("expected line traces");
    };
    assert_eq!(name, "Brooklyn");
    // Gap at the merged period Brooklyn is missing
    assert_eq!(y, &vec![None, Some(5.0), Some(8.0)]);

    assert_eq!(
        spec.layout.xaxis.ticktext,
        Some(vec!["Jan".to_string(), "Feb".to_string(), "Mar".to_string()])
    );
}

#[test]
fn test_seasonality_normalized_title() {
    let set = SeriesSet::merge(
        PeriodKind::Month,
        vec![("Paris".to_string(), vec![(1, 1.0)])],
    );
    assert_eq!(
        seasonality_chart(&set, true).title,
        "Seasonality Trends Over Time (Normalized)"
    );
}

#[test]
fn test_review_score_anchor_ticks() {
    let set = SeriesSet::merge(
        PeriodKind::YearMonth,
        vec![(
            "Paris".to_string(),
            vec![(202301, 4.0), (202304, 4.1), (202307, 4.2)],
        )],
    );
    let spec = review_score_chart(&set);

    // January and July only
    assert_eq!(spec.layout.xaxis.tickvals, Some(vec![0, 2]));

    // The host view adds April to the anchors
    let spec = new_hosts_chart(&set);
    assert_eq!(spec.layout.xaxis.tickvals, Some(vec![0, 1, 2]));
}

// =============================================================================
// Year and Bucket Axis Tests
// =============================================================================

#[test]
fn test_popularity_year_axis() {
    let table = year_table(vec![(2021, 500.0, None), (2022, 800.0, None)]);
    let spec = popularity_chart(&table, "Paris", 5);

    assert_eq!(
        spec.title,
        "Popularity of Listings Over Time in Paris (5 years)"
    );
    assert_eq!(spec.layout.xaxis.dtick, Some(1.0));
    assert_eq!(spec.layout.yaxis.rangemode.as_deref(), Some("tozero"));
}

#[test]
fn test_bucket_chart_labels() {
    let table = TrendTable {
        kind: PeriodKind::PriceBucket,
        rows: vec![
            TrendRow {
                period: 1,
                value: 4.2,
                pct_change: None,
            },
            TrendRow {
                period: 2,
                value: 4.5,
                pct_change: None,
            },
            TrendRow {
                period: 3,
                value: 4.7,
                pct_change: None,
            },
        ],
    };
    let spec = bucket_chart(&table, "Paris");

    assert_eq!(
        spec.layout.xaxis.ticktext,
        Some(vec![
            "Low".to_string(),
            "Medium".to_string(),
            "High".to_string(),
        ])
    );
    assert_eq!(spec.layout.yaxis.dtick, Some(0.25));
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_spec_serializes_for_the_ui() {
    let table = year_table(vec![(2022, 100.0, None)]);
    let spec = popularity_chart(&table, "Paris", 5);

    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["layout"]["template"], "plotly_dark");
    assert_eq!(json["traces"][0]["type"], "line");
    // Unset axis options stay out of the payload
    assert!(json["layout"]["xaxis"].get("overlaying").is_none());
    assert!(json["layout"].get("yaxis2").is_none());
}
