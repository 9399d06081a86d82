//! Backend API ports
//!
//! The REST backend (auth, invoice CRUD, product catalog, PDF links, AI
//! analytics) is an external collaborator. Services only see these traits;
//! the HTTP adapter and test fakes implement them.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::{AnalyticsResult, Invoice, InvoiceRequest, Product};

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Reply of `POST /auth/login`
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Account role chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Client,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Client => f.write_str("Client"),
            Role::Admin => f.write_str("Admin"),
        }
    }
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Authentication endpoints (no bearer token required)
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<()>;
}

/// Invoice endpoints
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    /// `GET /invoices/recent`
    async fn fetch_recent(&self) -> Result<Vec<Invoice>>;

    /// `POST /invoices`
    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Invoice>;

    /// `DELETE /invoices/{id}`
    async fn delete_invoice(&self, id: i64) -> Result<()>;

    /// `GET /invoices/{id}/pdf`, `None` when no PDF has been generated yet
    async fn fetch_pdf_url(&self, id: i64) -> Result<Option<String>>;
}

/// Product catalog endpoint
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// AI analytics endpoint
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn fetch_analytics(&self, invoice_id: i64) -> Result<AnalyticsResult>;
}
