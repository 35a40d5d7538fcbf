//! Chart theme
//!
//! Every chart renders with the single fixed dark theme; there is no
//! per-chart theme logic.

use crate::spec::{Axis, Layout};

/// The one template name charts are rendered with
pub const DARK_TEMPLATE: &str = "plotly_dark";

/// Base layout with the dark theme applied
pub fn dark_layout(xaxis: Axis, yaxis: Axis) -> Layout {
    Layout {
        template: DARK_TEMPLATE.to_string(),
        showlegend: true,
        xaxis,
        yaxis,
        yaxis2: None,
    }
}
