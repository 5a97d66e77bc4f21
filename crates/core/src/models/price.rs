use serde::{Deserialize, Serialize};

/// One row of a company's daily price series (`GET /prices`).
///
/// Wire field names are capitalised by the provider (`Date`, `Open`, ...);
/// they are mapped onto snake_case fields here. A `null` number decodes to
/// `None` and is treated as non-numeric by the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Date label exactly as emitted by the provider (usually ISO `YYYY-MM-DD`)
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Open")]
    pub open: Option<f64>,

    #[serde(rename = "High")]
    pub high: Option<f64>,

    #[serde(rename = "Low")]
    pub low: Option<f64>,

    #[serde(rename = "Close")]
    pub close: Option<f64>,
}

impl PriceRow {
    /// Wire field names in declared order. Used as the export header.
    pub const FIELDS: [&'static str; 5] = ["Date", "Open", "High", "Low", "Close"];

    pub fn new(date: impl Into<String>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date: date.into(),
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close: Some(close),
        }
    }

    /// The numeric fields in `FIELDS` order (after `Date`).
    pub fn values(&self) -> [Option<f64>; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

/// Server-side summary statistics for one company (`GET /stats`).
/// Opaque to the client; only formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub latest_close: Option<f64>,

    #[serde(rename = "high_52wk")]
    pub high_52_week: Option<f64>,

    #[serde(rename = "low_52wk")]
    pub low_52_week: Option<f64>,

    pub avg_volume: Option<f64>,
}
