//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    /// Form input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Backend rejected the bearer token (HTTP 401)
    #[error("Session expired or not authorized")]
    Unauthorized,

    /// Backend answered with a non-success status
    #[error("Backend error (HTTP {status}){}", message_suffix(.message))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Message supplied by the backend in its error body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message: Some(m), .. } if !m.trim().is_empty() => Some(m.as_str()),
            _ => None,
        }
    }

    /// Human-readable message for a view: the server message when the
    /// backend provided one, otherwise `fallback`.
    ///
    /// Validation errors keep their own text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default()
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
