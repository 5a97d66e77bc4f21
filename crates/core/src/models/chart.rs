use serde::{Deserialize, Serialize};

/// A single point for the close-price area chart.
///
/// Generated by the core, rendered as-is by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Date label, copied from the price row
    pub date: String,

    /// Close rounded to 2 decimal places; `None` when the row had no close
    pub close_rounded: Option<f64>,
}
