//! Billdesk CLI - invoicing in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use billdesk_core::services::DEFAULT_INVOICE_ID;
use commands::{analytics, auth, config, dashboard, invoice, logs, products};

/// Billdesk - invoices, catalog and AI risk analysis from the terminal
#[derive(Parser)]
#[command(name = "billdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the billing backend
    Login {
        /// Account email
        #[arg(long)]
        email: Option<String>,
        /// Password (prompted if not given; BILLDESK_PASSWORD also works)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,
        /// Account email
        #[arg(long)]
        email: Option<String>,
        /// Password, at least 6 characters
        #[arg(long)]
        password: Option<String>,
        /// Account role
        #[arg(long, value_enum, default_value = "client")]
        role: auth::RoleArg,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in account
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List invoices
    Dashboard {
        /// Filter by client name or invoice id
        #[arg(short, long)]
        search: Option<String>,
        /// Filter by status (ALL, PAID, UNPAID, OVERDUE)
        #[arg(long)]
        status: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an invoice
    Create {
        /// Client name
        #[arg(long)]
        client: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Initial status (PAID, UNPAID, OVERDUE)
        #[arg(long)]
        status: Option<String>,
        /// Line item as PRODUCT_ID:QTY (repeatable)
        #[arg(long = "item")]
        items: Vec<String>,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete an invoice
    Delete {
        /// Invoice id
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Open an invoice's PDF
    Pdf {
        /// Invoice id
        id: i64,
        /// Print the link instead of opening it
        #[arg(long)]
        print_only: bool,
    },

    /// Show the product catalog
    Products {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// AI risk analysis for an invoice
    Analytics {
        /// Invoice id
        #[arg(default_value_t = DEFAULT_INVOICE_ID)]
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => auth::run_login(email, password).await,
        Commands::Register {
            name,
            email,
            password,
            role,
        } => auth::run_register(name, email, password, role).await,
        Commands::Logout => auth::run_logout(),
        Commands::Whoami { json } => auth::run_whoami(json),
        Commands::Dashboard { search, status, json } => dashboard::run(search, status, json).await,
        Commands::Create {
            client,
            due,
            status,
            items,
            yes,
        } => invoice::run_create(client, due, status, items, yes).await,
        Commands::Delete { id, force } => invoice::run_delete(id, force).await,
        Commands::Pdf { id, print_only } => invoice::run_pdf(id, print_only).await,
        Commands::Products { json } => products::run(json).await,
        Commands::Analytics { id, json } => analytics::run(id, json).await,
        Commands::Logs { command } => logs::run(command),
        Commands::Config { command } => config::run(command),
    }
}
