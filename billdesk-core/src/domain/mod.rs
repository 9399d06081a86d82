//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod analytics;
pub mod draft;
mod invoice;
mod product;
pub mod result;
mod session;
pub(crate) mod wire;

pub use analytics::{AnalyticsResult, NlpAnomaly, RiskAnalysis};
pub use draft::{
    compute_totals, DraftLineItem, DraftTotals, InvoiceDraft, InvoiceRequest, InvoiceRequestItem,
    MSG_AMOUNT_TOO_LARGE, TAX_RATE,
};
pub use invoice::{Invoice, InvoiceLine, InvoiceStatus};
pub use product::{find_product, Product};
pub use session::{Session, SessionHandle, SessionState, User};
