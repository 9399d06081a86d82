//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific view or feature area.

pub mod analytics;
pub mod composer;
pub mod dashboard;
pub mod invoices;
pub mod logging;
pub mod router;
mod session;
pub mod validation;

pub use analytics::{AnalyticsService, AnalyticsView, RiskTone, DEFAULT_INVOICE_ID};
pub use composer::{InvoiceComposer, Navigation, MSG_CREATE_FAILED};
pub use dashboard::{filter_invoices, DashboardRow, DashboardView, StatusFilter, StatusTone};
pub use invoices::{InvoiceSnapshot, InvoiceStore, PdfLink, ReloadOutcome};
pub use logging::{EntryPoint, EventCount, LogEntry, LogEvent, LoggingService};
pub use router::{guard, resolve, Route, RouteOutcome};
pub use session::{SessionService, MSG_LOGIN_FAILED, MSG_REGISTRATION_FAILED};
