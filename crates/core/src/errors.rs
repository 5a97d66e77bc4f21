use thiserror::Error;

/// Which provider endpoint a request was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Companies,
    Prices,
    Stats,
}

impl Resource {
    /// The message shown to the user when a request for this resource
    /// fails, regardless of whether it was a transport or decode failure.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Resource::Companies => "Failed to load companies",
            Resource::Prices => "Price fetch failed",
            Resource::Stats => "Stats fetch failed",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Companies => write!(f, "companies"),
            Resource::Prices => write!(f, "prices"),
            Resource::Stats => write!(f, "stats"),
        }
    }
}

/// Unified error type for the entire stock-dashboard-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error ({resource}): {message}")]
    Network {
        resource: Resource,
        message: String,
    },

    #[error("Decode error ({resource}): {message}")]
    Decode {
        resource: Resource,
        message: String,
    },

    // ── Dashboard ───────────────────────────────────────────────────
    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl CoreError {
    /// Build a `Network` error from a reqwest failure, redacting the query
    /// string so symbols and any future credentials stay out of logs.
    pub fn network(resource: Resource, e: reqwest::Error) -> Self {
        CoreError::Network {
            resource,
            message: sanitize(&e.to_string()),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, CoreError::Network { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, CoreError::Decode { .. })
    }

    /// The endpoint this error came from, if it came from one.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            CoreError::Network { resource, .. } | CoreError::Decode { resource, .. } => {
                Some(*resource)
            }
            _ => None,
        }
    }

    /// Generic message suitable for display. Network and decode failures
    /// of the same resource are indistinguishable here.
    pub fn user_message(&self) -> String {
        match self.resource() {
            Some(resource) => resource.failure_message().to_string(),
            None => self.to_string(),
        }
    }
}

fn sanitize(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::InvalidConfig(e.to_string())
    }
}
