use super::company::Company;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryStatus {
    Loading,
    Loaded,
    Failed,
}

/// The sidebar company list. Its failure is tracked separately from any
/// Selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyDirectory {
    pub status: DirectoryStatus,

    /// Provider response order.
    pub companies: Vec<Company>,

    pub error_message: Option<String>,
}

impl Default for CompanyDirectory {
    fn default() -> Self {
        Self {
            status: DirectoryStatus::Loading,
            companies: Vec::new(),
            error_message: None,
        }
    }
}

impl CompanyDirectory {
    pub fn loaded(companies: Vec<Company>) -> Self {
        Self {
            status: DirectoryStatus::Loaded,
            companies,
            error_message: None,
        }
    }

    pub fn failed(error_message: impl Into<String>) -> Self {
        Self {
            status: DirectoryStatus::Failed,
            companies: Vec::new(),
            error_message: Some(error_message.into()),
        }
    }

    /// Back to Loading, keeping whatever companies are already listed.
    pub fn begin_reload(&mut self) {
        self.status = DirectoryStatus::Loading;
        self.error_message = None;
    }

    pub fn is_loading(&self) -> bool {
        self.status == DirectoryStatus::Loading
    }

    /// Exact symbol match.
    pub fn find(&self, symbol: &str) -> Option<&Company> {
        self.companies.iter().find(|c| c.symbol == symbol)
    }
}
