//! CLI command implementations

pub mod analytics;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod invoice;
pub mod logs;
pub mod products;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use billdesk_core::services::{Route, RouteOutcome};
use billdesk_core::{BilldeskContext, EntryPoint, Error, LoggingService};

use crate::output;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let app_dir = get_app_dir().ok()?;
    std::fs::create_dir_all(&app_dir).ok()?;
    LoggingService::new(&app_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Get the billdesk directory from environment or default
pub fn get_app_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BILLDESK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".billdesk"))
        .context("Could not find home directory")
}

/// Build the context and restore the saved session
pub fn get_context() -> Result<BilldeskContext> {
    let app_dir = get_app_dir()?;

    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create billdesk directory: {:?}", app_dir))?;

    let ctx = BilldeskContext::new(&app_dir, get_logger()).context("Failed to initialize billdesk context")?;
    if let Some(rejected) = &ctx.config.rejected_base_url {
        warn_rejected_url(rejected);
    }
    Ok(ctx)
}

/// Tell the user a saved backend URL was ignored
pub fn warn_rejected_url(rejected: &str) {
    output::warning(&format!(
        "Ignoring invalid backend URL '{}', using {}. Fix it with `billdesk config set-url`.",
        rejected,
        billdesk_core::config::DEFAULT_API_BASE_URL
    ));
}

/// Pass a view through the route guard
///
/// Returns `Ok(false)` when the view redirects to the dashboard because a
/// session already exists; errors when a protected view is requested
/// without one.
pub fn enter_view(ctx: &BilldeskContext, route: Route) -> Result<bool> {
    match ctx.route(route) {
        RouteOutcome::Render(route) => {
            if let Some(logger) = &ctx.logger {
                let _ = logger.log_page(route.path());
            }
            Ok(true)
        }
        RouteOutcome::Redirect(Route::Dashboard) => {
            let email = ctx
                .session
                .state()
                .session()
                .map(|s| s.email().to_string())
                .unwrap_or_default();
            output::info(&format!("Already signed in as {}", email));
            Ok(false)
        }
        RouteOutcome::Redirect(_) => {
            anyhow::bail!("You are not signed in. Run `billdesk login` first.")
        }
        RouteOutcome::Loading | RouteOutcome::Blank => {
            anyhow::bail!("Session is still being restored")
        }
    }
}

/// Turn a core error into the message a view shows
///
/// A rejected token ends the session first.
pub fn view_error(ctx: &BilldeskContext, error: &Error, fallback: &str) -> anyhow::Error {
    if error.is_unauthorized() {
        ctx.session.expire();
        return anyhow::anyhow!("Session expired. Run `billdesk login` to sign in again.");
    }
    anyhow::anyhow!(error.user_message(fallback))
}

/// Spinner for network calls, hidden when stdout is not a terminal
pub fn spinner(message: &str) -> ProgressBar {
    if atty::isnt(atty::Stream::Stdout) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
