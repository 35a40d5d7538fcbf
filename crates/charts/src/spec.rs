//! Chart specification types
//!
//! A [`ChartSpec`] is the only artifact that crosses the UI boundary: a
//! serializable description of traces and layout that any plotly-style
//! display layer can draw. Categorical x values travel as strings; tick
//! placement is positional (indices into the x values).

use serde::{Deserialize, Serialize};

/// A renderable chart: title, data traces, and layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart title
    pub title: String,
    /// Data traces; empty for a "no data" placeholder
    pub traces: Vec<Trace>,
    /// Axis and theme configuration
    pub layout: Layout,
}

impl ChartSpec {
    /// Check whether the chart carries any data series
    pub fn has_data(&self) -> bool {
        !self.traces.is_empty()
    }
}

/// One data trace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    /// Line/scatter trace; `None` y values render as gaps
    Line {
        /// Legend name
        name: String,
        /// Categorical x values
        x: Vec<String>,
        /// One y value per x, `None` where the group has no data
        y: Vec<Option<f64>>,
        /// Plotly mode string ("lines", "lines+markers")
        mode: String,
        /// Secondary-axis assignment ("y2"), if any
        #[serde(skip_serializing_if = "Option::is_none")]
        yaxis: Option<String>,
    },
    /// Bar trace
    Bar {
        /// Legend name
        name: String,
        /// Categorical x values
        x: Vec<String>,
        /// Bar heights
        y: Vec<Option<f64>>,
    },
    /// Candlestick trace (open/high/low/close per x)
    Candlestick {
        /// Legend name
        name: String,
        /// Categorical x values
        x: Vec<String>,
        /// Open prices
        open: Vec<f64>,
        /// High prices
        high: Vec<f64>,
        /// Low prices
        low: Vec<f64>,
        /// Close prices
        close: Vec<f64>,
    },
}

/// Chart layout: theme plus axes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Visual theme name (always the dark theme)
    pub template: String,
    /// Whether to render the legend
    pub showlegend: bool,
    /// Horizontal axis
    pub xaxis: Axis,
    /// Primary vertical axis
    pub yaxis: Axis,
    /// Secondary vertical axis (percentage-change overlays)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
}

/// Axis configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Axis {
    /// Axis title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tick mode ("array" for explicit ticks, "linear" for stepped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<String>,
    /// Tick positions (indices into the categorical x values)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<i64>>,
    /// Tick labels, parallel to `tickvals`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
    /// Tick label rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    /// Tick step (linear mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    /// First tick (linear mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick0: Option<f64>,
    /// Overlay target for secondary axes ("y")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    /// Side for secondary axes ("right")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// Range mode ("tozero")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangemode: Option<String>,
}

impl Axis {
    /// Axis with just a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}
