//! Billdesk Core - business logic for the Billdesk invoicing client
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (Invoice, InvoiceDraft, Session, etc.)
//! - **ports**: Trait definitions for external dependencies (backend API, session storage)
//! - **services**: Stores and view models
//! - **adapters**: Concrete implementations (reqwest HTTP client, session file)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::{FileSessionStore, HttpBackend};
use config::Config;
use ports::{AnalyticsApi, AuthApi, InvoiceApi, ProductApi, SessionStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    AnalyticsResult, Invoice, InvoiceDraft, InvoiceStatus, Product, Session, SessionHandle,
    SessionState,
};
pub use services::{EntryPoint, LogEvent, LoggingService};

/// Main context for Billdesk operations
///
/// Builds every store and service once, wiring them to the same backend
/// client and session handle.
pub struct BilldeskContext {
    pub config: Config,
    pub app_dir: PathBuf,
    pub session: SessionService,
    pub invoices: Arc<InvoiceStore>,
    pub composer: InvoiceComposer,
    pub analytics: AnalyticsService,
    pub logger: Option<Arc<LoggingService>>,
}

impl BilldeskContext {
    /// Create a context backed by the HTTP API and `session.json`
    ///
    /// The persisted session is restored before returning.
    pub fn new(app_dir: &Path, logger: Option<Arc<LoggingService>>) -> Result<Self> {
        let config = Config::load(app_dir)?;
        if config.rejected_base_url.is_some() {
            services::logging::record(
                &logger,
                LogEvent::new("config_invalid_base_url").with_error("Invalid API base URL, using default"),
            );
        }
        let handle = SessionHandle::new();
        let backend = Arc::new(HttpBackend::new(&config, handle.clone())?);
        let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(app_dir));

        let context = Self::from_parts(config, app_dir, backend, store, handle, logger);
        context.session.restore();
        Ok(context)
    }

    /// Assemble a context from explicit parts
    ///
    /// The session is left `Unknown` until [`SessionService::restore`] runs.
    pub fn from_parts<B>(
        config: Config,
        app_dir: &Path,
        backend: Arc<B>,
        store: Arc<dyn SessionStore>,
        handle: SessionHandle,
        logger: Option<Arc<LoggingService>>,
    ) -> Self
    where
        B: AuthApi + InvoiceApi + ProductApi + AnalyticsApi + 'static,
    {
        let auth: Arc<dyn AuthApi> = backend.clone();
        let invoice_api: Arc<dyn InvoiceApi> = backend.clone();
        let product_api: Arc<dyn ProductApi> = backend.clone();
        let analytics_api: Arc<dyn AnalyticsApi> = backend;

        let session = SessionService::new(auth, store, handle, logger.clone());
        let invoices = Arc::new(InvoiceStore::new(invoice_api.clone(), logger.clone()));
        let composer = InvoiceComposer::new(invoice_api, product_api, Arc::clone(&invoices), logger.clone());
        let analytics = AnalyticsService::new(analytics_api, logger.clone());

        Self {
            config,
            app_dir: app_dir.to_path_buf(),
            session,
            invoices,
            composer,
            analytics,
            logger,
        }
    }

    /// Guard a view against the current session
    pub fn route(&self, route: Route) -> RouteOutcome {
        guard(route, &self.session.state())
    }
}
