//! Session domain model

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Minimal user record kept alongside the token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }
}

/// An authenticated identity and its opaque bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: User::new(email),
            token: token.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }
}

/// Session lifecycle
///
/// `Unknown` until the persisted session has been read, then either
/// `Anonymous` or `Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(s) => Some(s),
            _ => None,
        }
    }
}

/// Shared handle to the current session state
///
/// Created once at the composition root and handed to the session service
/// (the only writer) and to adapters that need the bearer token.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SessionState {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub(crate) fn set(&self, state: SessionState) {
        match self.inner.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }

    /// Bearer token of the authenticated session, if any
    pub fn token(&self) -> Option<String> {
        self.state().session().map(|s| s.token.clone())
    }
}
