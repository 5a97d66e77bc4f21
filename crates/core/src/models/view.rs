use serde::{Deserialize, Serialize};

/// A price row with every numeric cell pre-formatted for the table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTableRow {
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// One labelled tile on the "Key Stats (52-Week)" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}
