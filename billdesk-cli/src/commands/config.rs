//! Config command - show and change the backend address

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use billdesk_core::config::{Config, API_URL_ENV};

use super::{get_app_dir, warn_rejected_url};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point billdesk at another backend
    SetUrl {
        /// Base URL, e.g. https://billing.example.com/api
        url: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let app_dir = get_app_dir()?;
    std::fs::create_dir_all(&app_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&app_dir)?;
            let timeout = config.request_timeout.map(|d| d.as_secs());
            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "apiBaseUrl": config.api_base_url,
                        "requestTimeoutSecs": timeout,
                        "rejectedApiBaseUrl": config.rejected_base_url,
                        "directory": app_dir.to_string_lossy(),
                    })
                );
                return Ok(());
            }
            if let Some(rejected) = &config.rejected_base_url {
                warn_rejected_url(rejected);
            }
            println!("{}", "Configuration".bold());
            println!("  Backend: {}", config.api_base_url);
            match timeout {
                Some(secs) => println!("  Request timeout: {}s", secs),
                None => println!("  Request timeout: none"),
            }
            println!("  Directory: {}", app_dir.display());
            if std::env::var(API_URL_ENV).is_ok() {
                println!("  {}", format!("Backend overridden by {}", API_URL_ENV).dimmed());
            }
        }
        ConfigCommands::SetUrl { url } => {
            let mut config = Config::load(&app_dir)?;
            config.set_api_base_url(&url)?;
            config.save(&app_dir)?;
            println!("{} {}", "Backend set to".green(), config.api_base_url);
        }
    }

    Ok(())
}
