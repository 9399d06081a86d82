//! Dashboard view model - search, status filter and table rows

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Invoice, InvoiceStatus};
use crate::services::invoices::InvoiceSnapshot;

pub const MSG_LOADING: &str = "Loading invoices...";
pub const MSG_EMPTY: &str = "No invoices found.";

/// Status filter of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: Option<InvoiceStatus>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == Some(*wanted),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<InvoiceStatus>().map(StatusFilter::Only)
    }
}

/// Invoices matching both the search text and the status filter
///
/// The search matches the client name case-insensitively or the invoice
/// id as a substring. A missing client name counts as empty.
pub fn filter_invoices(invoices: &[Invoice], search: &str, filter: StatusFilter) -> Vec<Invoice> {
    let needle = search.to_lowercase();
    invoices
        .iter()
        .filter(|invoice| {
            let name = invoice.customer_name.as_deref().unwrap_or("").to_lowercase();
            let matches_search = name.contains(&needle) || invoice.id.to_string().contains(search);
            matches_search && filter.matches(invoice.status)
        })
        .cloned()
        .collect()
}

/// Color family of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Paid,
    Unpaid,
    Overdue,
    Neutral,
}

impl From<Option<InvoiceStatus>> for StatusTone {
    fn from(status: Option<InvoiceStatus>) -> Self {
        match status {
            Some(InvoiceStatus::Paid) => StatusTone::Paid,
            Some(InvoiceStatus::Unpaid) => StatusTone::Unpaid,
            Some(InvoiceStatus::Overdue) => StatusTone::Overdue,
            None => StatusTone::Neutral,
        }
    }
}

/// One table row, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardRow {
    pub id: i64,
    pub client: String,
    pub date: String,
    pub amount: String,
    pub status: String,
    pub tone: StatusTone,
}

impl From<&Invoice> for DashboardRow {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            client: invoice
                .customer_name
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "-".to_string()),
            date: invoice
                .created_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            amount: format_amount(invoice.amount()),
            status: invoice
                .status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            tone: StatusTone::from(invoice.status),
        }
    }
}

/// Rupee amount with two decimals
pub fn format_amount(amount: Decimal) -> String {
    format!("₹{:.2}", amount.round_dp(2))
}

/// What the dashboard shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Loading,
    Error(String),
    Empty,
    Rows(Vec<DashboardRow>),
}

impl DashboardView {
    /// Build the view from a store snapshot and the current filter inputs
    pub fn build(snapshot: &InvoiceSnapshot, search: &str, filter: StatusFilter) -> Self {
        if snapshot.loading {
            return DashboardView::Loading;
        }
        if let Some(error) = &snapshot.error {
            return DashboardView::Error(error.clone());
        }

        let rows: Vec<DashboardRow> = filter_invoices(&snapshot.invoices, search, filter)
            .iter()
            .map(DashboardRow::from)
            .collect();

        if rows.is_empty() {
            DashboardView::Empty
        } else {
            DashboardView::Rows(rows)
        }
    }
}
