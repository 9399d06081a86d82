//! Invoice draft - an invoice under construction
//!
//! A draft holds the client details and an ordered list of line items.
//! Totals are never stored: every call to [`InvoiceDraft::totals`]
//! recomputes them from the current items. Arithmetic is checked, so an
//! amount too large for `Decimal` is a validation error. A draft always
//! keeps at least one line item.
//!
//! Quantities and prices are not range-checked here; negative values are
//! passed through to the backend, which owns that validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::invoice::InvoiceStatus;
use super::product::{find_product, Product};
use super::result::{Error, Result};

/// Fixed tax rate applied to the subtotal (18%)
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

pub const MSG_AMOUNT_TOO_LARGE: &str = "Invoice amount is too large";

/// One line of a draft
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLineItem {
    /// Stable identity of the line within the draft
    pub key: Uuid,
    pub product_id: Option<i64>,
    pub quantity: i64,
    /// Copied from the catalog when the product is selected
    pub unit_price: Decimal,
}

impl DraftLineItem {
    pub fn blank() -> Self {
        Self {
            key: Uuid::new_v4(),
            product_id: None,
            quantity: 1,
            unit_price: Decimal::ZERO,
        }
    }

    /// `quantity × unit_price`, `None` on overflow
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

/// Derived financial totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DraftTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute subtotal, tax and total over a list of line items
pub fn compute_totals(items: &[DraftLineItem]) -> Result<DraftTotals> {
    let too_large = || Error::validation(MSG_AMOUNT_TOO_LARGE);

    let mut subtotal = Decimal::ZERO;
    for item in items {
        let line = item.line_total().ok_or_else(too_large)?;
        subtotal = subtotal.checked_add(line).ok_or_else(too_large)?;
    }
    let tax = subtotal.checked_mul(TAX_RATE).ok_or_else(too_large)?;
    let total = subtotal.checked_add(tax).ok_or_else(too_large)?;

    Ok(DraftTotals { subtotal, tax, total })
}

/// Line of the create-invoice payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequestItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// Body of `POST /invoices`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub customer_name: String,
    pub due_date: Option<NaiveDate>,
    pub status: InvoiceStatus,
    pub items: Vec<InvoiceRequestItem>,
}

/// Page-local state for composing a new invoice
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    client_name: String,
    due_date: Option<NaiveDate>,
    status: InvoiceStatus,
    items: Vec<DraftLineItem>,
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceDraft {
    /// New draft with a single blank line item and status `UNPAID`
    pub fn new() -> Self {
        Self {
            client_name: String::new(),
            due_date: None,
            status: InvoiceStatus::Unpaid,
            items: vec![DraftLineItem::blank()],
        }
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn items(&self) -> &[DraftLineItem] {
        &self.items
    }

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.client_name = name.into();
    }

    pub fn set_due_date(&mut self, date: Option<NaiveDate>) {
        self.due_date = date;
    }

    pub fn set_status(&mut self, status: InvoiceStatus) {
        self.status = status;
    }

    /// Append a blank line item and return its key
    pub fn add_item(&mut self) -> Uuid {
        let item = DraftLineItem::blank();
        let key = item.key;
        self.items.push(item);
        key
    }

    /// Remove a line item. Returns false (and leaves the draft unchanged)
    /// when it is the only item left or the key is unknown.
    pub fn remove_item(&mut self, key: Uuid) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.key != key);
        self.items.len() != before
    }

    /// Change the quantity of a line item. Returns false for an unknown key.
    pub fn set_quantity(&mut self, key: Uuid, quantity: i64) -> bool {
        match self.item_mut(key) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Select a catalog product for a line item, copying its current price.
    ///
    /// The price is captured once; later catalog changes do not touch the
    /// draft. An unknown product id leaves the line unchanged.
    pub fn select_product(&mut self, key: Uuid, product_id: i64, catalog: &[Product]) -> bool {
        let Some(product) = find_product(catalog, product_id) else {
            return false;
        };
        let price = product.price;
        match self.item_mut(key) {
            Some(item) => {
                item.product_id = Some(product_id);
                item.unit_price = price;
                true
            }
            None => false,
        }
    }

    /// Current totals, recomputed from the line items
    pub fn totals(&self) -> Result<DraftTotals> {
        compute_totals(&self.items)
    }

    /// Check the fields the payload cannot be built without
    pub fn validate(&self) -> Result<()> {
        if self.client_name.trim().is_empty() {
            return Err(Error::validation("Client name is required"));
        }
        if self.items.iter().any(|item| item.product_id.is_none()) {
            return Err(Error::validation("Select a product for every line item"));
        }
        self.totals()?;
        Ok(())
    }

    /// Build the create-invoice payload
    pub fn to_request(&self) -> Result<InvoiceRequest> {
        self.validate()?;
        let items = self
            .items
            .iter()
            .filter_map(|item| {
                item.product_id.map(|product_id| InvoiceRequestItem {
                    product_id,
                    quantity: item.quantity,
                })
            })
            .collect();

        Ok(InvoiceRequest {
            customer_name: self.client_name.trim().to_string(),
            due_date: self.due_date,
            status: self.status,
            items,
        })
    }

    fn item_mut(&mut self, key: Uuid) -> Option<&mut DraftLineItem> {
        self.items.iter_mut().find(|item| item.key == key)
    }
}
