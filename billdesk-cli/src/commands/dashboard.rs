//! Dashboard command - list invoices with search and status filter

use anyhow::Result;
use colored::Colorize;

use billdesk_core::services::dashboard::{MSG_EMPTY, MSG_LOADING};
use billdesk_core::services::{DashboardView, Route, StatusFilter};
use billdesk_core::BilldeskContext;

use super::{enter_view, get_context, spinner, view_error};
use crate::output;

pub async fn run(search: Option<String>, status: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    enter_view(&ctx, Route::Dashboard)?;

    let filter: StatusFilter = match status {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => StatusFilter::All,
    };
    let search = search.unwrap_or_default();

    let bar = spinner(MSG_LOADING);
    let reload = ctx.invoices.reload().await;
    bar.finish_and_clear();

    if let Err(e) = &reload {
        if e.is_unauthorized() {
            return Err(view_error(&ctx, e, ""));
        }
    }

    render(&ctx, &search, filter, json)
}

/// Print the dashboard from the store's current snapshot
pub fn render(ctx: &BilldeskContext, search: &str, filter: StatusFilter, json: bool) -> Result<()> {
    let view = DashboardView::build(&ctx.invoices.snapshot(), search, filter);

    if json {
        let rows = match &view {
            DashboardView::Rows(rows) => rows.clone(),
            DashboardView::Error(message) => anyhow::bail!(message.clone()),
            _ => Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "Invoices".bold());
    if !search.is_empty() || filter != StatusFilter::All {
        println!("{}", format!("Search: \"{}\"  Status: {}", search, filter).dimmed());
    }
    println!();

    match view {
        DashboardView::Loading => println!("{}", MSG_LOADING),
        DashboardView::Error(message) => anyhow::bail!(message),
        DashboardView::Empty => println!("{}", MSG_EMPTY),
        DashboardView::Rows(rows) => {
            let mut table = output::create_table(vec!["Invoice ID", "Client", "Date", "Amount", "Status"]);
            for row in &rows {
                table.add_row(vec![
                    format!("#{}", row.id),
                    row.client.clone(),
                    row.date.clone(),
                    row.amount.clone(),
                    output::status_label(&row.status, row.tone).to_string(),
                ]);
            }
            println!("{}", table);
            println!("{}", format!("{} invoice(s)", rows.len()).dimmed());
        }
    }

    Ok(())
}
