use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::company::Company;
use crate::models::selection::{Selection, SelectionId};
use crate::providers::traits::MarketDataProvider;

/// What happened to the result of one `select_company` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitOutcome {
    /// Both fetches succeeded and the Selection is now Ready.
    Ready,
    /// A fetch failed and the Selection is now Failed.
    Failed,
    /// A newer selection replaced this one before its fetches settled;
    /// the results were discarded.
    Superseded,
}

/// Owns the single live `Selection`.
///
/// The controller is the only writer. Readers take snapshots with
/// `current_selection()` or follow changes through `subscribe()`. Every
/// transition replaces the whole Selection and bumps its `SelectionId`;
/// fetch results are committed only if the id they started under is still
/// current, so a slow response for an old company can never overwrite a
/// newer one.
pub struct SelectionController {
    provider: Arc<dyn MarketDataProvider>,
    state: watch::Sender<Selection>,
}

impl SelectionController {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        let (state, _) = watch::channel(Selection::default());
        Self { provider, state }
    }

    /// Start viewing `company`.
    ///
    /// The Loading selection is published before this returns; the
    /// returned future issues `get_prices` and `get_stats` concurrently and
    /// commits their combined outcome. If either fails, the first failure
    /// to resolve sets the message and the other call is dropped. Calling
    /// this again (for any company, including the same one) supersedes the
    /// pending call.
    pub fn select_company(&self, company: Company) -> impl Future<Output = CommitOutcome> + '_ {
        let id = self.begin(company.clone());
        let provider = Arc::clone(&self.provider);

        async move {
            let symbol = company.symbol.clone();
            let fetched = tokio::try_join!(provider.get_prices(&symbol), provider.get_stats(&symbol));

            let next = match fetched {
                Ok((price_rows, stats)) => {
                    debug!(%id, %symbol, rows = price_rows.len(), "fetch pair succeeded");
                    Selection::ready(id, company, price_rows, stats)
                }
                Err(e) => {
                    warn!(%id, %symbol, error = %e, "fetch pair failed");
                    Selection::failed(id, company, e.user_message())
                }
            };

            self.commit(next)
        }
    }

    /// Snapshot of the live Selection.
    #[must_use]
    pub fn current_selection(&self) -> Selection {
        self.state.borrow().clone()
    }

    /// Receiver notified on every Selection replacement.
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.state.subscribe()
    }

    /// Return to Idle. Any in-flight selection becomes stale.
    pub fn clear(&self) {
        self.state.send_modify(|current| {
            *current = Selection::idle(current.id().next());
        });
        debug!("selection cleared");
    }

    /// Whether `symbol` is the company currently loading.
    #[must_use]
    pub fn is_loading(&self, symbol: &str) -> bool {
        let current = self.state.borrow();
        current.is_loading() && current.company().is_some_and(|c| c.symbol == symbol)
    }

    // ── Internal ────────────────────────────────────────────────────

    /// Replace the live Selection with a fresh Loading one. Id allocation
    /// and publication happen under the same write lock.
    fn begin(&self, company: Company) -> SelectionId {
        let symbol = company.symbol.clone();
        let mut id = SelectionId::default();
        self.state.send_modify(|current| {
            id = current.id().next();
            *current = Selection::loading(id, company);
        });
        info!(%id, %symbol, "selection started");
        id
    }

    fn commit(&self, next: Selection) -> CommitOutcome {
        let id = next.id();
        let outcome = if next.error_message().is_some() {
            CommitOutcome::Failed
        } else {
            CommitOutcome::Ready
        };

        let committed = self.state.send_if_modified(|current| {
            if current.id() == id {
                *current = next;
                true
            } else {
                false
            }
        });

        if committed {
            info!(%id, ?outcome, "selection committed");
            outcome
        } else {
            debug!(%id, "discarding stale fetch result");
            CommitOutcome::Superseded
        }
    }
}
