//! File-backed session store
//!
//! The session is persisted as `session.json` in the billdesk directory:
//! ```json
//! { "token": "<jwt>", "user": { "email": "owner@example.com" } }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::result::Result;
use crate::domain::{Session, User};
use crate::ports::SessionStore;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionRecord {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Session store writing `session.json` under a directory
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(app_dir: &Path) -> Self {
        Self {
            path: app_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        // A corrupt file reads as signed out rather than failing startup
        let record: SessionRecord = serde_json::from_str(&content).unwrap_or_default();

        match (record.token, record.user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok(Some(Session { user, token })),
            _ => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let record = SessionRecord {
            token: Some(session.token.clone()),
            user: Some(session.user.clone()),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        assert!(store.load().unwrap().is_none());

        let session = Session::new("owner@example.com", "jwt-abc");
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, session);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["token"], "jwt-abc");
        assert_eq!(raw["user"]["email"], "owner@example.com");
    }

    #[test]
    fn test_partial_record_is_signed_out() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        std::fs::write(store.path(), r#"{"token": "jwt-abc"}"#).unwrap();
        assert!(store.load().unwrap().is_none());

        std::fs::write(store.path(), r#"{"user": {"email": "owner@example.com"}}"#).unwrap();
        assert!(store.load().unwrap().is_none());

        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        store.save(&Session::new("owner@example.com", "jwt-abc")).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }
}
