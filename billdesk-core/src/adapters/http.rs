//! Billdesk backend HTTP client
//!
//! Implements the backend ports over the REST API. Every call except the
//! auth endpoints carries `Authorization: Bearer <token>`, read from the
//! shared session handle at request time.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::config::{normalize_base_url, Config};
use crate::domain::result::{Error, Result};
use crate::domain::{AnalyticsResult, Invoice, InvoiceRequest, Product, SessionHandle};
use crate::ports::{
    AnalyticsApi, AuthApi, InvoiceApi, LoginRequest, LoginResponse, ProductApi, RegisterRequest,
};

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP adapter for the backend API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl HttpBackend {
    /// Create a client from configuration
    pub fn new(config: &Config, session: SessionHandle) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Create a client for an explicit base URL
    pub fn with_base_url(base_url: &str, session: SessionHandle) -> Result<Self> {
        let base_url = normalize_base_url(base_url).map_err(|e| Error::Config(e.to_string()))?;
        let mut config = Config::default();
        config.api_base_url = base_url;
        Self::new(&config, session)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token, failing early when there is no session
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.session.token().ok_or(Error::Unauthorized)?;
        Ok(builder.bearer_auth(token))
    }

    async fn send(&self, builder: RequestBuilder, authenticated: bool) -> Result<Response> {
        let response = builder.send().await.map_err(map_request_error)?;
        check_response_status(response, authenticated).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.authorized(self.client.get(self.url(path)))?;
        let response = self.send(builder, true).await?;
        parse_json(response).await
    }
}

/// Map request errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Network("Connection timed out".to_string())
    } else if error.is_connect() {
        Error::Network("Unable to connect to the billing server".to_string())
    } else {
        Error::Network(format!("Request failed: {}", error))
    }
}

/// Turn non-success statuses into errors, keeping the server message
async fn check_response_status(response: Response, authenticated: bool) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if authenticated && status == StatusCode::UNAUTHORIZED {
        return Err(Error::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty());

    if status == StatusCode::NOT_FOUND && message.is_none() {
        return Err(Error::not_found("Resource not found"));
    }

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await.map_err(map_request_error)?;
    Ok(serde_json::from_str(&body)?)
}

/// The PDF endpoint answers with a bare URL (plain text or JSON string)
/// or with `{"pdfUrl": "..."}`
fn parse_pdf_url(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let url = match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::String(s)) => s,
        Ok(JsonValue::Object(map)) => map
            .get("pdfUrl")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_default(),
        Ok(JsonValue::Null) => String::new(),
        Ok(_) => return None,
        Err(_) => trimmed.to_string(),
    };
    let url = url.trim().to_string();
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

#[async_trait]
impl AuthApi for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let builder = self.client.post(self.url("/auth/login")).json(request);
        let response = self.send(builder, false).await?;
        parse_json(response).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let builder = self.client.post(self.url("/auth/register")).json(request);
        self.send(builder, false).await?;
        Ok(())
    }
}

#[async_trait]
impl InvoiceApi for HttpBackend {
    async fn fetch_recent(&self) -> Result<Vec<Invoice>> {
        // The endpoint may answer with `null` when there is nothing to show
        let invoices: Option<Vec<Invoice>> = self.get_json("/invoices/recent").await?;
        Ok(invoices.unwrap_or_default())
    }

    async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Invoice> {
        let builder = self.authorized(self.client.post(self.url("/invoices")).json(request))?;
        let response = self.send(builder, true).await?;
        parse_json(response).await
    }

    async fn delete_invoice(&self, id: i64) -> Result<()> {
        let builder = self.authorized(self.client.delete(self.url(&format!("/invoices/{}", id))))?;
        self.send(builder, true).await?;
        Ok(())
    }

    async fn fetch_pdf_url(&self, id: i64) -> Result<Option<String>> {
        let builder = self.authorized(self.client.get(self.url(&format!("/invoices/{}/pdf", id))))?;
        let response = self.send(builder, true).await?;
        let body = response.text().await.map_err(map_request_error)?;
        Ok(parse_pdf_url(&body))
    }
}

#[async_trait]
impl ProductApi for HttpBackend {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let products: Option<Vec<Product>> = self.get_json("/products").await?;
        Ok(products.unwrap_or_default())
    }
}

#[async_trait]
impl AnalyticsApi for HttpBackend {
    async fn fetch_analytics(&self, invoice_id: i64) -> Result<AnalyticsResult> {
        self.get_json(&format!("/invoices/ai/{}/analyze", invoice_id)).await
    }
}
