use super::company::Company;
use super::price::{PriceRow, Stats};

/// Monotonically increasing identity of a Selection. A fetch result is only
/// committed while its originating id is still the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SelectionId(pub u64);

impl SelectionId {
    #[must_use]
    pub fn next(self) -> Self {
        SelectionId(self.0 + 1)
    }
}

impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

impl std::fmt::Display for SelectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionStatus::Idle => write!(f, "Idle"),
            SelectionStatus::Loading => write!(f, "Loading"),
            SelectionStatus::Ready => write!(f, "Ready"),
            SelectionStatus::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    Idle,
    Loading {
        company: Company,
    },
    Ready {
        company: Company,
        price_rows: Vec<PriceRow>,
        stats: Stats,
    },
    Failed {
        company: Company,
        error_message: String,
    },
}

/// The company currently being viewed and the outcome of fetching its data.
///
/// Only constructible through the state constructors below, so a Ready
/// selection always has stats and a Failed one never carries rows. A
/// Selection is replaced wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    id: SelectionId,
    state: State,
}

impl Default for Selection {
    fn default() -> Self {
        Self::idle(SelectionId::default())
    }
}

impl Selection {
    pub fn idle(id: SelectionId) -> Self {
        Self {
            id,
            state: State::Idle,
        }
    }

    pub fn loading(id: SelectionId, company: Company) -> Self {
        Self {
            id,
            state: State::Loading { company },
        }
    }

    pub fn ready(id: SelectionId, company: Company, price_rows: Vec<PriceRow>, stats: Stats) -> Self {
        Self {
            id,
            state: State::Ready {
                company,
                price_rows,
                stats,
            },
        }
    }

    pub fn failed(id: SelectionId, company: Company, error_message: impl Into<String>) -> Self {
        Self {
            id,
            state: State::Failed {
                company,
                error_message: error_message.into(),
            },
        }
    }

    pub fn id(&self) -> SelectionId {
        self.id
    }

    pub fn status(&self) -> SelectionStatus {
        match self.state {
            State::Idle => SelectionStatus::Idle,
            State::Loading { .. } => SelectionStatus::Loading,
            State::Ready { .. } => SelectionStatus::Ready,
            State::Failed { .. } => SelectionStatus::Failed,
        }
    }

    /// `None` only while Idle.
    pub fn company(&self) -> Option<&Company> {
        match &self.state {
            State::Idle => None,
            State::Loading { company }
            | State::Ready { company, .. }
            | State::Failed { company, .. } => Some(company),
        }
    }

    /// Loaded price rows. Empty unless Ready.
    pub fn price_rows(&self) -> &[PriceRow] {
        match &self.state {
            State::Ready { price_rows, .. } => price_rows,
            _ => &[],
        }
    }

    pub fn stats(&self) -> Option<&Stats> {
        match &self.state {
            State::Ready { stats, .. } => Some(stats),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            State::Failed { error_message, .. } => Some(error_message.as_str()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status() == SelectionStatus::Loading
    }
}
