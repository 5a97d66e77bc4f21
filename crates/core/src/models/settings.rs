use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Environment variable that overrides `api_base_url`.
pub const API_URL_ENV: &str = "STOCK_DASHBOARD_API_URL";

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Number formatting conventions used by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    /// `12,34,567.89`, Indian lakh/crore grouping
    #[default]
    #[serde(rename = "en-IN")]
    EnIn,
    /// `1,234,567.89`
    #[serde(rename = "en-US")]
    EnUs,
    /// `1.234.567,89`
    #[serde(rename = "de-DE")]
    DeDe,
}

impl NumberLocale {
    pub fn group_separator(&self) -> char {
        match self {
            NumberLocale::EnIn | NumberLocale::EnUs => ',',
            NumberLocale::DeDe => '.',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::EnIn | NumberLocale::EnUs => '.',
            NumberLocale::DeDe => ',',
        }
    }

    /// Whether digits above the first thousand group in pairs (`12,34,567`).
    pub fn uses_indian_grouping(&self) -> bool {
        matches!(self, NumberLocale::EnIn)
    }
}

impl std::fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberLocale::EnIn => write!(f, "en-IN"),
            NumberLocale::EnUs => write!(f, "en-US"),
            NumberLocale::DeDe => write!(f, "de-DE"),
        }
    }
}

/// Dashboard configuration. Every field has a default, so a partial JSON
/// document (or `{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the data provider, without a trailing slash.
    pub api_base_url: String,

    /// Locale for all displayed numbers.
    pub locale: NumberLocale,

    /// Prefix for price-valued stat cards (e.g., "₹", "$").
    pub currency_symbol: String,

    /// Per-request transport timeout. Ignored on wasm32.
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            locale: NumberLocale::default(),
            currency_symbol: "₹".to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, then validate them.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()
    }

    /// Load settings from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Apply `STOCK_DASHBOARD_API_URL` if it is set and non-empty.
    pub fn with_env_overrides(self) -> Result<Self, CoreError> {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self {
                api_base_url: url.trim().to_string(),
                ..self
            }
            .validate(),
            _ => Ok(self),
        }
    }

    /// Check the base URL scheme and strip trailing slashes.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        let url = self.api_base_url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::InvalidConfig(format!(
                "api_base_url '{}' must start with http:// or https://",
                self.api_base_url
            )));
        }
        self.api_base_url = url.to_string();
        Ok(self)
    }
}
