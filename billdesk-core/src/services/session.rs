//! Session service - authentication lifecycle
//!
//! Owns the `Unknown → Anonymous | Authenticated` state machine. The
//! persisted session is read once by [`SessionService::restore`]; login
//! writes it, logout and expiry clear it.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Session, SessionHandle, SessionState};
use crate::ports::{AuthApi, LoginRequest, RegisterRequest, Role, SessionStore};
use crate::services::logging::{record, LogEvent, LoggingService};
use crate::services::validation::{validate_login, validate_registration};

/// Shown when login fails without a server-provided message
pub const MSG_LOGIN_FAILED: &str = "Invalid email or password";

/// Shown when registration fails without a server-provided message
pub const MSG_REGISTRATION_FAILED: &str = "Registration failed";

/// Service for the authenticated session
pub struct SessionService {
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    handle: SessionHandle,
    logger: Option<Arc<LoggingService>>,
}

impl SessionService {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        store: Arc<dyn SessionStore>,
        handle: SessionHandle,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        Self {
            auth,
            store,
            handle,
            logger,
        }
    }

    pub fn state(&self) -> SessionState {
        self.handle.state()
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Read the persisted session and leave the `Unknown` state
    ///
    /// A missing, partial or unreadable record yields `Anonymous`.
    pub fn restore(&self) -> SessionState {
        let state = match self.store.load() {
            Ok(Some(session)) => SessionState::Authenticated(session),
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("session_restore_failed").with_error(e.to_string()),
                );
                SessionState::Anonymous
            }
        };
        self.handle.set(state.clone());
        state
    }

    /// Validate the form, authenticate and persist the session
    ///
    /// Validation failures never reach the network. On failure the
    /// current state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        validate_login(email, password)?;
        self.authenticate(email, password).await
    }

    /// Create an account, then log into it
    ///
    /// A login failure after a successful registration is reported as a
    /// registration failure without a server message.
    pub async fn register(&self, name: &str, email: &str, password: &str, role: Role) -> Result<Session> {
        validate_registration(name, email, password)?;

        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        };

        if let Err(e) = self.auth.register(&request).await {
            record(
                &self.logger,
                LogEvent::new("register_failed")
                    .with_endpoint("POST /auth/register")
                    .with_error(e.to_string()),
            );
            return Err(e);
        }
        record(&self.logger, LogEvent::new("register_succeeded"));

        self.authenticate(email, password)
            .await
            .map_err(|e| Error::Other(format!("Login after registration failed: {}", e)))
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = match self.auth.login(&request).await {
            Ok(response) => response,
            Err(e) => {
                record(
                    &self.logger,
                    LogEvent::new("login_failed")
                        .with_endpoint("POST /auth/login")
                        .with_error(e.to_string()),
                );
                return Err(e);
            }
        };

        let session = Session::new(email, response.token);
        if let Err(e) = self.store.save(&session) {
            // The session still holds for this process
            record(
                &self.logger,
                LogEvent::new("session_persist_failed").with_error(e.to_string()),
            );
        }

        self.handle.set(SessionState::Authenticated(session.clone()));
        record(&self.logger, LogEvent::new("login_succeeded"));
        Ok(session)
    }

    /// Forget the session here and on disk
    pub fn logout(&self) {
        self.end_session("logout");
    }

    /// The backend rejected the token; behaves like logout
    pub fn expire(&self) {
        self.end_session("session_expired");
    }

    fn end_session(&self, event: &str) {
        if let Err(e) = self.store.clear() {
            record(
                &self.logger,
                LogEvent::new("session_clear_failed").with_error(e.to_string()),
            );
        }
        self.handle.set(SessionState::Anonymous);
        record(&self.logger, LogEvent::new(event));
    }
}
