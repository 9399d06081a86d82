//! Session persistence port

use crate::domain::result::Result;
use crate::domain::Session;

/// Durable storage for the authenticated session
///
/// Read once at startup, written on login, cleared on logout.
pub trait SessionStore: Send + Sync {
    /// Load the persisted session. A record missing either the token or
    /// the user yields `Ok(None)`.
    fn load(&self) -> Result<Option<Session>>;

    fn save(&self, session: &Session) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
