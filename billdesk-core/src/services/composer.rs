//! Invoice composer - catalog loading and draft submission

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::{InvoiceDraft, Product};
use crate::ports::{InvoiceApi, ProductApi};
use crate::services::invoices::InvoiceStore;
use crate::services::logging::{record, LogEvent, LoggingService};

/// Shown when creation fails without a server-provided message
pub const MSG_CREATE_FAILED: &str = "Failed to create invoice";

/// Where the front end goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Dashboard,
}

pub struct InvoiceComposer {
    invoices: Arc<dyn InvoiceApi>,
    products: Arc<dyn ProductApi>,
    store: Arc<InvoiceStore>,
    logger: Option<Arc<LoggingService>>,
}

impl InvoiceComposer {
    pub fn new(
        invoices: Arc<dyn InvoiceApi>,
        products: Arc<dyn ProductApi>,
        store: Arc<InvoiceStore>,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        Self {
            invoices,
            products,
            store,
            logger,
        }
    }

    /// Product catalog for the line item pickers
    ///
    /// A failed fetch is logged and yields an empty catalog.
    pub async fn load_catalog(&self) -> Vec<Product> {
        match self.products.fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("catalog_load_failed")
                        .with_endpoint("GET /products")
                        .with_error(e.to_string()),
                );
                Vec::new()
            }
        }
    }

    /// Post the draft, then reload the invoice store exactly once
    ///
    /// The draft is left untouched on failure so the user can retry.
    pub async fn submit(&self, draft: &InvoiceDraft) -> Result<Navigation> {
        let request = draft.to_request()?;

        let created = match self.invoices.create_invoice(&request).await {
            Ok(invoice) => invoice,
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("invoice_create_failed")
                        .with_endpoint("POST /invoices")
                        .with_error(e.to_string()),
                );
                return Err(e);
            }
        };

        record(
            &self.logger,
            LogEvent::new("invoice_created").with_endpoint("POST /invoices"),
        );

        // Reload failures land in the store's error state
        let _ = self.store.add_invoice(&created).await;
        Ok(Navigation::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use crate::domain::result::Error;
    use crate::domain::{Invoice, InvoiceRequest, InvoiceStatus};

    #[derive(Default)]
    struct FakeBackend {
        created: Mutex<Vec<InvoiceRequest>>,
        fetches: AtomicUsize,
        fail_create: bool,
        fail_products: bool,
    }

    #[async_trait]
    impl InvoiceApi for FakeBackend {
        async fn fetch_recent(&self) -> Result<Vec<Invoice>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Invoice> {
            if self.fail_create {
                return Err(Error::Api {
                    status: 400,
                    message: Some("Product out of stock".to_string()),
                });
            }
            self.created.lock().unwrap().push(request.clone());
            Ok(Invoice::new(500, request.customer_name.clone(), request.status))
        }

        async fn delete_invoice(&self, _id: i64) -> Result<()> {
            Ok(())
        }

        async fn fetch_pdf_url(&self, _id: i64) -> Result<Option<String>> {
            Ok(None)
        }
    }

    #[async_trait]
    impl ProductApi for FakeBackend {
        async fn fetch_products(&self) -> Result<Vec<Product>> {
            if self.fail_products {
                return Err(Error::Network("Connection timed out".to_string()));
            }
            Ok(vec![Product::new(1, "Consulting hour", Decimal::new(100, 0))])
        }
    }

    fn composer(backend: Arc<FakeBackend>) -> InvoiceComposer {
        let store = Arc::new(InvoiceStore::new(backend.clone(), None));
        InvoiceComposer::new(backend.clone(), backend, store, None)
    }

    #[tokio::test]
    async fn test_submit_reloads_once_and_navigates() {
        let backend = Arc::new(FakeBackend::default());
        let composer = composer(backend.clone());

        let catalog = composer.load_catalog().await;
        let mut draft = InvoiceDraft::new();
        draft.set_client_name("Acme Traders");
        let key = draft.items()[0].key;
        draft.select_product(key, 1, &catalog);

        assert_eq!(composer.submit(&draft).await.unwrap(), Navigation::Dashboard);
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(backend.created.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_posted() {
        let backend = Arc::new(FakeBackend::default());
        let composer = composer(backend.clone());

        let err = composer.submit(&InvoiceDraft::new()).await.unwrap_err();
        assert_eq!(err.user_message(MSG_CREATE_FAILED), "Client name is required");
        assert!(backend.created.lock().unwrap().is_empty());
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_server_message() {
        let backend = Arc::new(FakeBackend {
            fail_create: true,
            ..Default::default()
        });
        let composer = composer(backend.clone());

        let mut draft = InvoiceDraft::new();
        draft.set_client_name("Acme Traders");
        let key = draft.items()[0].key;
        draft.select_product(key, 1, &[Product::new(1, "Consulting hour", Decimal::new(100, 0))]);
        draft.set_status(InvoiceStatus::Paid);

        let err = composer.submit(&draft).await.unwrap_err();
        assert_eq!(err.user_message(MSG_CREATE_FAILED), "Product out of stock");
        assert_eq!(backend.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_catalog_failure_yields_empty() {
        let backend = Arc::new(FakeBackend {
            fail_products: true,
            ..Default::default()
        });
        assert!(composer(backend).load_catalog().await.is_empty());
    }
}
