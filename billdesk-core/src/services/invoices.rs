//! Invoice collection store
//!
//! Holds the invoices shown on the dashboard. Every mutation re-fetches
//! `GET /invoices/recent`; the server is the only source of truth.
//!
//! Each reload takes a new generation number. A response is applied only
//! if no newer reload started while it was in flight, so an overtaken
//! slow response can never overwrite fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::result::{Error, Result};
use crate::domain::Invoice;
use crate::ports::InvoiceApi;
use crate::services::logging::{record, LogEvent, LoggingService};

/// Shown when the invoice list cannot be fetched
pub const MSG_LOAD_FAILED: &str = "Failed to load invoices";

pub const MSG_PDF_NOT_AVAILABLE: &str = "PDF not available yet";
pub const MSG_PDF_FAILED: &str = "Failed to download PDF";

/// Result of looking up an invoice's PDF
#[derive(Debug)]
pub enum PdfLink {
    Available(String),
    NotAvailable,
    Failed(Error),
}

impl PdfLink {
    /// Message for the view, `None` when there is a URL to open
    pub fn message(&self) -> Option<&'static str> {
        match self {
            PdfLink::Available(_) => None,
            PdfLink::NotAvailable => Some(MSG_PDF_NOT_AVAILABLE),
            PdfLink::Failed(_) => Some(MSG_PDF_FAILED),
        }
    }
}

/// Point-in-time copy of the store
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSnapshot {
    pub invoices: Vec<Invoice>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for InvoiceSnapshot {
    fn default() -> Self {
        // Nothing has been fetched yet
        Self {
            invoices: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// What happened to a reload's response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Applied,
    /// A newer reload started first; the response was discarded
    Stale,
}

pub struct InvoiceStore {
    api: Arc<dyn InvoiceApi>,
    state: Mutex<InvoiceSnapshot>,
    generation: AtomicU64,
    logger: Option<Arc<LoggingService>>,
}

impl InvoiceStore {
    pub fn new(api: Arc<dyn InvoiceApi>, logger: Option<Arc<LoggingService>>) -> Self {
        Self {
            api,
            state: Mutex::new(InvoiceSnapshot::default()),
            generation: AtomicU64::new(0),
            logger,
        }
    }

    fn lock(&self) -> MutexGuard<'_, InvoiceSnapshot> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn snapshot(&self) -> InvoiceSnapshot {
        self.lock().clone()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.lock().invoices.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Generation of the most recently started reload
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Re-fetch the invoice list
    ///
    /// On failure the list is emptied and the error message set; the
    /// error is also returned so callers can react to an expired session.
    /// A response overtaken by a newer reload is dropped either way.
    pub async fn reload(&self) -> Result<ReloadOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = self.api.fetch_recent().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            record(
                &self.logger,
                LogEvent::new("stale_response")
                    .with_endpoint("GET /invoices/recent")
                    .with_error_details(format!("generation {}", generation)),
            );
            return Ok(ReloadOutcome::Stale);
        }

        let mut state = self.lock();
        state.loading = false;
        match result {
            Ok(invoices) => {
                state.invoices = invoices;
                Ok(ReloadOutcome::Applied)
            }
            Err(e) => {
                state.invoices.clear();
                state.error = Some(MSG_LOAD_FAILED.to_string());
                drop(state);
                record(
                    &self.logger,
                    LogEvent::new("invoices_load_failed")
                        .with_endpoint("GET /invoices/recent")
                        .with_error(e.to_string()),
                );
                Err(e)
            }
        }
    }

    /// A new invoice was created; re-sync with the server
    pub async fn add_invoice(&self, _created: &Invoice) -> Result<ReloadOutcome> {
        self.reload().await
    }

    /// Delete an invoice, then reload
    ///
    /// Returns whether the backend accepted the deletion. Failures are
    /// logged; only a rejected token is returned as an error, so the
    /// session can be ended.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        match self.api.delete_invoice(id).await {
            Ok(()) => {
                let _ = self.reload().await;
                Ok(true)
            }
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("invoice_delete_failed")
                        .with_endpoint("DELETE /invoices/{id}")
                        .with_error(e.to_string()),
                );
                if e.is_unauthorized() {
                    Err(e)
                } else {
                    Ok(false)
                }
            }
        }
    }

    /// Look up the generated PDF of an invoice
    pub async fn pdf_link(&self, id: i64) -> PdfLink {
        match self.api.fetch_pdf_url(id).await {
            Ok(Some(url)) => PdfLink::Available(url),
            Ok(None) => PdfLink::NotAvailable,
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("pdf_download_failed")
                        .with_endpoint("GET /invoices/{id}/pdf")
                        .with_error(e.to_string()),
                );
                PdfLink::Failed(e)
            }
        }
    }
}
