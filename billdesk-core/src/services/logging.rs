//! Logging service - structured event logging to DuckDB
//!
//! Stores privacy-safe events in logs.duckdb. No invoice contents, client
//! names, emails, passwords or tokens are ever logged; events carry the
//! event name, the endpoint or view involved, and error text.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use duckdb::Connection;
use serde::{Deserialize, Serialize};

use crate::log_migrations::LOG_MIGRATIONS;

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    // Lower 16 bits hold the counter (65536 unique IDs per millisecond)
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    ((now_ms() as u64) << 16) | counter
}

/// Current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// Entry point for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Test,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Test => "test",
        }
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..Self::default()
        }
    }

    /// Set the backend endpoint involved, e.g. `GET /invoices/recent`
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the view context
    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Set the command context (for CLI events)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub endpoint: Option<String>,
    pub page: Option<String>,
    pub command: Option<String>,
    pub error_message: Option<String>,
    pub error_details: Option<String>,
}

/// Number of entries recorded for one event name
#[derive(Debug, Clone, Serialize)]
pub struct EventCount {
    pub event: String,
    pub count: u64,
}

const ENTRY_COLUMNS: &str = "id, timestamp, entry_point, app_version, platform, \
     event, endpoint, page, command, error_message, error_details";

fn row_to_entry(row: &duckdb::Row) -> duckdb::Result<LogEntry> {
    Ok(LogEntry {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        entry_point: row.get(2)?,
        app_version: row.get(3)?,
        platform: row.get(4)?,
        event: row.get(5)?,
        endpoint: row.get(6)?,
        page: row.get(7)?,
        command: row.get(8)?,
        error_message: row.get(9)?,
        error_details: row.get(10)?,
    })
}

/// Service for structured event logging
pub struct LoggingService {
    conn: Mutex<Connection>,
    db_path: PathBuf,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Open or create logs.duckdb in the billdesk directory and run any
    /// pending migrations
    pub fn new(app_dir: &Path, entry_point: EntryPoint, app_version: impl Into<String>) -> Result<Self> {
        let db_path = app_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)?;

        let service = Self {
            conn: Mutex::new(conn),
            db_path,
            entry_point,
            app_version: app_version.into(),
            platform: std::env::consts::OS,
        };

        service.run_migrations()?;

        Ok(service)
    }

    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        let table_exists: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM information_schema.tables WHERE table_name = 'sys_migrations'",
                [],
                |row| row.get(0),
            )
            .unwrap_or(false);

        // Bootstrap migrations table if needed
        if !table_exists {
            if let Some((name, sql)) = LOG_MIGRATIONS.iter().find(|(n, _)| *n == "000_migrations.sql") {
                conn.execute_batch(sql)?;
                conn.execute("INSERT INTO sys_migrations (migration_name) VALUES (?)", [name])?;
            }
        }

        let mut stmt = conn.prepare("SELECT migration_name FROM sys_migrations")?;
        let applied: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .filter_map(|r| r.ok())
            .collect();

        for (name, sql) in LOG_MIGRATIONS.iter() {
            if *name == "000_migrations.sql" || applied.iter().any(|a| a == name) {
                continue;
            }
            conn.execute_batch(sql)?;
            conn.execute("INSERT INTO sys_migrations (migration_name) VALUES (?)", [name])?;
        }

        Ok(())
    }

    /// Record an event
    ///
    /// The entry point, app version and platform are added from the
    /// service configuration.
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;

        conn.execute(
            &format!(
                "INSERT INTO sys_logs ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                ENTRY_COLUMNS
            ),
            duckdb::params![
                generate_id(),
                now_ms(),
                self.entry_point.as_str(),
                &self.app_version,
                self.platform,
                &event.event,
                &event.endpoint,
                &event.page,
                &event.command,
                &event.error_message,
                &event.error_details,
            ],
        )?;

        Ok(())
    }

    /// Log a view being rendered
    pub fn log_page(&self, page: &str) -> Result<()> {
        self.log(LogEvent::new("page_opened").with_page(page))
    }

    /// Most recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("", None, limit)
    }

    /// Most recent entries carrying an error, newest first
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("WHERE error_message IS NOT NULL", None, limit)
    }

    /// Most recent entries for one event name, newest first
    pub fn get_by_event(&self, event: &str, limit: usize) -> Result<Vec<LogEntry>> {
        self.query_entries("WHERE event = ?", Some(event), limit)
    }

    fn query_entries(&self, filter: &str, event: Option<&str>, limit: usize) -> Result<Vec<LogEntry>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM sys_logs {} ORDER BY timestamp DESC, id DESC LIMIT ?",
            ENTRY_COLUMNS, filter
        ))?;
        let rows = match event {
            Some(event) => stmt.query_map(duckdb::params![event, limit as i64], row_to_entry)?,
            None => stmt.query_map(duckdb::params![limit as i64], row_to_entry)?,
        };
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Entry counts per event name, most frequent first
    pub fn event_counts(&self) -> Result<Vec<EventCount>> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut stmt = conn.prepare(
            "SELECT event, COUNT(*) AS n FROM sys_logs GROUP BY event ORDER BY n DESC, event",
        )?;
        let counts = stmt
            .query_map([], |row| {
                Ok(EventCount {
                    event: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();
        Ok(counts)
    }

    pub fn count(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let count: u64 = conn.query_row("SELECT COUNT(*) FROM sys_logs", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete logs older than the specified timestamp (unix ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?;
        Ok(deleted as u64)
    }

    /// Delete every entry
    pub fn clear(&self) -> Result<u64> {
        let conn = self.conn.lock().map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let deleted = conn.execute("DELETE FROM sys_logs", [])?;
        Ok(deleted as u64)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Best-effort recording for services holding an optional logger
///
/// Logging failures never break the operation being logged.
pub fn record(logger: &Option<Arc<LoggingService>>, event: LogEvent) {
    if let Some(logger) = logger {
        let _ = logger.log(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logging_service_creation() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
        assert!(service.db_path().exists());
    }

    #[test]
    fn test_reopen_keeps_entries() {
        let dir = tempdir().unwrap();
        {
            let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
            service.log(LogEvent::new("login_succeeded")).unwrap();
        }
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.1").unwrap();
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_log_event() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log(LogEvent::new("invoices_loaded")).unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "invoices_loaded");
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_log_with_context() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Test, "2.0.0").unwrap();

        service
            .log(
                LogEvent::new("invoice_delete_failed")
                    .with_endpoint("DELETE /invoices/{id}")
                    .with_command("delete")
                    .with_error("Backend error (HTTP 500)"),
            )
            .unwrap();

        let entries = service.get_by_event("invoice_delete_failed", 10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].endpoint.as_deref(), Some("DELETE /invoices/{id}"));
        assert_eq!(entries[0].command.as_deref(), Some("delete"));
        assert_eq!(entries[0].entry_point, "test");
        assert_eq!(service.get_errors(10).unwrap().len(), 1);
    }

    #[test]
    fn test_log_error_with_details() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service
            .log(
                LogEvent::new("catalog_load_failed")
                    .with_error("Connection timed out")
                    .with_error_details("GET /products"),
            )
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors[0].error_message.as_deref(), Some("Connection timed out"));
        assert_eq!(errors[0].error_details.as_deref(), Some("GET /products"));
    }

    #[test]
    fn test_counts_and_clear() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log_page("dashboard").unwrap();
        service.log_page("analytics").unwrap();
        service.log(LogEvent::new("command_executed").with_command("create")).unwrap();

        let counts = service.event_counts().unwrap();
        assert_eq!(counts[0].event, "page_opened");
        assert_eq!(counts[0].count, 2);

        assert_eq!(service.delete_before(0).unwrap(), 0);
        assert_eq!(service.clear().unwrap(), 3);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_record_without_logger_is_noop() {
        record(&None, LogEvent::new("ignored"));

        let dir = tempdir().unwrap();
        let service = Arc::new(LoggingService::new(dir.path(), EntryPoint::Test, "1.0.0").unwrap());
        record(&Some(service.clone()), LogEvent::new("recorded"));
        assert_eq!(service.count().unwrap(), 1);
    }
}
