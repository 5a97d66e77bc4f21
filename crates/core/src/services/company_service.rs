use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::company::Company;
use crate::models::directory::CompanyDirectory;
use crate::providers::traits::MarketDataProvider;

/// Loads and holds the company list shown in the sidebar.
///
/// A failed load is recorded on the directory and returned to the caller;
/// it never touches the Selection. Overlapping loads resolve in favour of
/// the most recently started one.
pub struct CompanyService {
    provider: Arc<dyn MarketDataProvider>,
    directory: watch::Sender<CompanyDirectory>,
    generation: AtomicU64,
}

impl CompanyService {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        let (directory, _) = watch::channel(CompanyDirectory::default());
        Self {
            provider,
            directory,
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the company list. Returns how many companies were loaded.
    ///
    /// While the request is in flight the directory reports Loading but
    /// keeps the previously loaded companies, so lookups keep working
    /// during a reload.
    pub async fn load(&self) -> Result<usize, CoreError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.directory.send_modify(CompanyDirectory::begin_reload);

        let result = self.provider.list_companies().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer load owns the directory now
            return result.map(|companies| companies.len());
        }

        match result {
            Ok(companies) => {
                let count = companies.len();
                info!(provider = self.provider.name(), count, "companies loaded");
                self.directory.send_replace(CompanyDirectory::loaded(companies));
                Ok(count)
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "company list failed");
                self.directory.send_replace(CompanyDirectory::failed(e.user_message()));
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn directory(&self) -> CompanyDirectory {
        self.directory.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CompanyDirectory> {
        self.directory.subscribe()
    }

    /// Look up a loaded company by exact symbol.
    #[must_use]
    pub fn find(&self, symbol: &str) -> Option<Company> {
        self.directory.borrow().find(symbol).cloned()
    }
}
