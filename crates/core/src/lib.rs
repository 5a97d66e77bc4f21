pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::future::Future;
use std::sync::Arc;

use models::{
    chart::ChartPoint,
    company::Company,
    directory::CompanyDirectory,
    export::ExportFile,
    selection::Selection,
    settings::Settings,
    view::{PriceTableRow, StatCard},
};
use providers::{http_client::DataClient, traits::MarketDataProvider};
use services::{
    company_service::CompanyService,
    export_generator::ExportGenerator,
    selection_controller::{CommitOutcome, SelectionController},
    view_builder::DerivedViewBuilder,
};
use tokio::sync::watch;

use errors::CoreError;

/// Main entry point for the stock dashboard core library.
///
/// Holds the company list, the live Selection and the view/export services.
/// All methods take `&self`: state lives behind the services' own
/// single-writer channels, so a `Dashboard` can be shared with the renderer.
#[must_use]
pub struct Dashboard {
    settings: Settings,
    company_service: CompanyService,
    selection_controller: SelectionController,
    view_builder: DerivedViewBuilder,
    export_generator: ExportGenerator,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let selection = self.selection_controller.current_selection();
        f.debug_struct("Dashboard")
            .field("api_base_url", &self.settings.api_base_url)
            .field("companies", &self.company_service.directory().companies.len())
            .field("selection", &selection.status())
            .finish()
    }
}

impl Dashboard {
    /// Create a dashboard talking HTTP to `settings.api_base_url`.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let settings = settings.validate()?;
        let client = DataClient::new(&settings);
        Ok(Self::build(settings, Arc::new(client)))
    }

    /// Create a dashboard over any provider implementation.
    pub fn with_provider(
        settings: Settings,
        provider: Arc<dyn MarketDataProvider>,
    ) -> Result<Self, CoreError> {
        let settings = settings.validate()?;
        Ok(Self::build(settings, provider))
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Companies ───────────────────────────────────────────────────

    /// Fetch the company list. A failure is also recorded on `companies()`.
    pub async fn load_companies(&self) -> Result<usize, CoreError> {
        self.company_service.load().await
    }

    #[must_use]
    pub fn companies(&self) -> CompanyDirectory {
        self.company_service.directory()
    }

    pub fn subscribe_companies(&self) -> watch::Receiver<CompanyDirectory> {
        self.company_service.subscribe()
    }

    /// Clear the selection and reload the company list. Companies loaded
    /// earlier stay listed, and selectable by symbol, until the reload
    /// completes.
    pub async fn refresh(&self) -> Result<usize, CoreError> {
        self.selection_controller.clear();
        self.company_service.load().await
    }

    // ── Selection ───────────────────────────────────────────────────

    /// Select a loaded company by symbol. The Loading state is visible as
    /// soon as this returns `Ok`; await the future for the outcome.
    pub fn select_company(
        &self,
        symbol: &str,
    ) -> Result<impl Future<Output = CommitOutcome> + '_, CoreError> {
        let company = self
            .company_service
            .find(symbol)
            .ok_or_else(|| CoreError::UnknownCompany(symbol.to_string()))?;
        Ok(self.selection_controller.select_company(company))
    }

    /// Select a company that need not be in the directory.
    pub fn select(&self, company: Company) -> impl Future<Output = CommitOutcome> + '_ {
        self.selection_controller.select_company(company)
    }

    #[must_use]
    pub fn current_selection(&self) -> Selection {
        self.selection_controller.current_selection()
    }

    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.selection_controller.subscribe()
    }

    /// Whether `symbol` is the company whose data is currently loading.
    #[must_use]
    pub fn is_loading(&self, symbol: &str) -> bool {
        self.selection_controller.is_loading(symbol)
    }

    // ── Derived views ───────────────────────────────────────────────

    #[must_use]
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.view_builder
            .chart_points(self.current_selection().price_rows())
    }

    #[must_use]
    pub fn price_table(&self) -> Vec<PriceTableRow> {
        self.view_builder
            .price_table(self.current_selection().price_rows())
    }

    /// Stat tiles, or `None` unless the Selection is Ready.
    #[must_use]
    pub fn stat_cards(&self) -> Option<Vec<StatCard>> {
        self.current_selection()
            .stats()
            .map(|stats| self.view_builder.stat_cards(stats))
    }

    #[must_use]
    pub fn view_builder(&self) -> &DerivedViewBuilder {
        &self.view_builder
    }

    // ── Export ──────────────────────────────────────────────────────

    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.current_selection().price_rows().is_empty()
    }

    /// CSV of the loaded rows, or `None` when nothing is loaded.
    #[must_use]
    pub fn export_csv(&self) -> Option<ExportFile> {
        let selection = self.current_selection();
        let company = selection.company()?;
        self.export_generator
            .build_export(selection.price_rows(), &company.symbol)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, provider: Arc<dyn MarketDataProvider>) -> Self {
        let company_service = CompanyService::new(Arc::clone(&provider));
        let selection_controller = SelectionController::new(provider);
        let view_builder = DerivedViewBuilder::from_settings(&settings);
        let export_generator = ExportGenerator::new();

        Self {
            settings,
            company_service,
            selection_controller,
            view_builder,
            export_generator,
        }
    }
}
