//! In-memory session store

use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::SessionStore;

/// Session store that lives only as long as the process
#[derive(Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a session, as if a previous run had logged in
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let guard = self
            .session
            .lock()
            .map_err(|e| Error::Other(format!("Session store lock poisoned: {}", e)))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| Error::Other(format!("Session store lock poisoned: {}", e)))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|e| Error::Other(format!("Session store lock poisoned: {}", e)))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&Session::new("owner@example.com", "jwt-abc")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().token, "jwt-abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
