//! Logs command - inspect and prune the local event log

use anyhow::Result;
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_app_dir;
use crate::output;
use billdesk_core::{EntryPoint, LoggingService};

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Show only one event type (e.g. stale_response)
        #[arg(long, conflicts_with = "errors")]
        event: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Delete every entry
        #[arg(long)]
        all: bool,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show counts per event and the database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_logging_service() -> Result<LoggingService> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    LoggingService::new(&app_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

pub fn run(command: LogsCommands) -> Result<()> {
    match command {
        LogsCommands::List {
            limit,
            errors,
            event,
            json,
        } => {
            let service = get_logging_service()?;
            let entries = match (&event, errors) {
                (Some(event), _) => service.get_by_event(event, limit)?,
                (None, true) => service.get_errors(limit)?,
                (None, false) => service.get_recent(limit)?,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }

            if entries.is_empty() {
                println!("No log entries found.");
                return Ok(());
            }

            let mut table = output::create_table(vec!["Time", "Event", "Context", "Error"]);

            for entry in &entries {
                let context = [
                    entry.command.as_deref(),
                    entry.page.as_deref(),
                    entry.endpoint.as_deref(),
                ]
                .iter()
                .filter_map(|&s| s)
                .collect::<Vec<_>>()
                .join(", ");

                let error = match &entry.error_message {
                    Some(message) if errors => message.clone(),
                    Some(_) => "!".red().to_string(),
                    None => String::new(),
                };

                table.add_row(vec![
                    format_timestamp(entry.timestamp),
                    entry.event.clone(),
                    context,
                    error,
                ]);
            }

            println!("{}", table);

            if !errors && event.is_none() {
                let recent_errors = service.get_errors(3)?;
                if !recent_errors.is_empty() {
                    println!();
                    println!("{}", "Recent Errors:".red().bold());
                    for err in &recent_errors {
                        println!(
                            "  {} [{}]: {}",
                            format_timestamp(err.timestamp).dimmed(),
                            err.event,
                            err.error_message.as_deref().unwrap_or("Unknown error")
                        );
                    }
                }
            }
        }
        LogsCommands::Clear {
            older_than_days,
            all,
            force,
            json,
        } => {
            let service = get_logging_service()?;

            if !force && !json {
                let prompt = if all {
                    "Delete all log entries?".to_string()
                } else {
                    format!("Delete logs older than {} days?", older_than_days)
                };
                if !Confirm::new().with_prompt(prompt).default(false).interact()? {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let deleted = if all {
                service.clear()?
            } else {
                let cutoff_ms =
                    Utc::now().timestamp_millis() - (older_than_days as i64 * 24 * 60 * 60 * 1000);
                service.delete_before(cutoff_ms)?
            };

            if json {
                println!("{}", serde_json::json!({"deleted": deleted}));
            } else {
                println!("Deleted {} log entries", deleted);
            }
        }
        LogsCommands::Stats { json } => {
            let service = get_logging_service()?;
            let total = service.count()?;
            let errors = service.get_errors(1000)?.len();
            let counts = service.event_counts()?;
            let db_path = service.db_path().to_path_buf();
            let size_bytes = std::fs::metadata(&db_path).map(|m| m.len()).unwrap_or(0);

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total_entries": total,
                        "error_count": errors,
                        "events": counts,
                        "database_path": db_path.to_string_lossy(),
                        "database_size_bytes": size_bytes
                    })
                );
            } else {
                println!("{}", "Log Statistics".bold());
                println!("  Total entries: {}", total);
                println!("  Errors: {}", errors);
                println!("  Database: {}", db_path.display());
                println!("  Size: {} KiB", size_bytes / 1024);

                if !counts.is_empty() {
                    println!();
                    let mut table = output::create_table(vec!["Event", "Count"]);
                    for c in &counts {
                        table.add_row(vec![c.event.clone(), c.count.to_string()]);
                    }
                    println!("{}", table);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
        assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14 22:13:20");
    }
}
