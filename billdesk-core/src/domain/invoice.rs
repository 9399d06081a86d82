//! Invoice domain model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::wire::{deserialize_id, deserialize_optional_amount};

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    Unpaid,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 3] = [Self::Unpaid, Self::Paid, Self::Overdue];

    /// Wire representation (`UNPAID`, `PAID`, `OVERDUE`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Paid => "PAID",
            Self::Overdue => "OVERDUE",
        }
    }

    /// Human label used by forms
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unpaid => "Unpaid",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        Self::Unpaid
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    /// Case-insensitive parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNPAID" => Ok(Self::Unpaid),
            "PAID" => Ok(Self::Paid),
            "OVERDUE" => Ok(Self::Overdue),
            other => Err(format!("Unknown invoice status: {}", other)),
        }
    }
}

impl Serialize for InvoiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Status as received from the backend; anything unrecognised becomes `None`
fn deserialize_lenient_status<'de, D>(deserializer: D) -> Result<Option<InvoiceStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// A persisted line item as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub total: Option<Decimal>,
}

/// An invoice created by the backend. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_lenient_status")]
    pub status: Option<InvoiceStatus>,
    #[serde(default)]
    pub items: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn new(id: i64, customer_name: impl Into<String>, status: InvoiceStatus) -> Self {
        Self {
            id,
            invoice_number: None,
            customer_name: Some(customer_name.into()),
            created_at: None,
            total_amount: None,
            status: Some(status),
            items: Vec::new(),
        }
    }

    /// Total amount, treating a missing value as zero
    pub fn amount(&self) -> Decimal {
        self.total_amount.unwrap_or_default()
    }
}
