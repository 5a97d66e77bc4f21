use serde::{Deserialize, Serialize};

/// A listed company as returned by `GET /companies`.
///
/// Immutable once fetched. `symbol` is the unique key; the provider's
/// response order is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Company {
    /// Ticker symbol (e.g., "RELIANCE.NS", "AAPL")
    pub symbol: String,

    /// Display name (e.g., "Reliance Industries")
    pub name: String,
}

impl Company {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}
