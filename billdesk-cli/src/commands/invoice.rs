//! Invoice commands - create, delete, pdf

use anyhow::Result;
use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use billdesk_core::domain::draft::DraftTotals;
use billdesk_core::domain::find_product;
use billdesk_core::services::dashboard::format_amount;
use billdesk_core::services::{Navigation, PdfLink, Route, StatusFilter, MSG_CREATE_FAILED};
use billdesk_core::services::logging::record;
use billdesk_core::{Error, InvoiceDraft, InvoiceStatus, LogEvent, Product};

use super::{enter_view, get_context, spinner, view_error};
use crate::output;

/// Parse `PRODUCT_ID:QTY` (quantity defaults to 1)
fn parse_item(raw: &str) -> Result<(i64, i64)> {
    let mut parts = raw.splitn(2, ':');
    let product_id = parts
        .next()
        .unwrap_or("")
        .trim()
        .parse::<i64>()
        .map_err(|_| anyhow::anyhow!("Invalid item '{}'. Use PRODUCT_ID:QTY", raw))?;
    let quantity = match parts.next() {
        Some(q) => q
            .trim()
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid quantity in '{}'", raw))?,
        None => 1,
    };
    Ok((product_id, quantity))
}

fn print_draft(draft: &InvoiceDraft, catalog: &[Product]) {
    let mut table = output::create_table(vec!["Product", "Qty", "Price", "Total"]);
    for item in draft.items() {
        let name = item
            .product_id
            .and_then(|id| find_product(catalog, id))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Select product".to_string());
        table.add_row(vec![
            name,
            item.quantity.to_string(),
            format_amount(item.unit_price),
            item.line_total().map(format_amount).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
    print_totals(draft.totals());
}

fn print_totals(totals: Result<DraftTotals, Error>) {
    let totals = match totals {
        Ok(t) => t,
        Err(e) => {
            output::warning(&e.to_string());
            return;
        }
    };
    println!("  Subtotal   {}", format_amount(totals.subtotal));
    println!("  Tax (18%)  {}", format_amount(totals.tax));
    println!("  {}      {}", "Total".bold(), format_amount(totals.total).bold());
}

/// Pick products and quantities until the user stops
fn prompt_items(draft: &mut InvoiceDraft, catalog: &[Product]) -> Result<()> {
    let labels: Vec<String> = catalog
        .iter()
        .map(|p| format!("{} ({})", p.name, format_amount(p.price)))
        .collect();

    let mut key = draft.items()[0].key;
    loop {
        let choice = Select::new()
            .with_prompt("Product")
            .items(&labels)
            .default(0)
            .interact()?;
        draft.select_product(key, catalog[choice].id, catalog);

        let quantity: i64 = Input::new()
            .with_prompt("Quantity")
            .default(1)
            .interact_text()?;
        draft.set_quantity(key, quantity);

        print_totals(draft.totals());

        if !Confirm::new()
            .with_prompt("Add another line item?")
            .default(false)
            .interact()?
        {
            return Ok(());
        }
        key = draft.add_item();
    }
}

pub async fn run_create(
    client: Option<String>,
    due: Option<String>,
    status: Option<String>,
    items: Vec<String>,
    yes: bool,
) -> Result<()> {
    let ctx = get_context()?;
    enter_view(&ctx, Route::CreateInvoice)?;

    let bar = spinner("Loading products...");
    let catalog = ctx.composer.load_catalog().await;
    bar.finish_and_clear();

    if catalog.is_empty() {
        output::warning("No products available.");
    }

    let mut draft = InvoiceDraft::new();

    let client = match client {
        Some(c) => c,
        None => Input::new().with_prompt("Client name").allow_empty(true).interact_text()?,
    };
    draft.set_client_name(client);

    let due = match due {
        Some(d) => Some(d),
        None if items.is_empty() => {
            let d: String = Input::new()
                .with_prompt("Due date (YYYY-MM-DD, empty for none)")
                .allow_empty(true)
                .interact_text()?;
            Some(d).filter(|d| !d.trim().is_empty())
        }
        None => None,
    };
    if let Some(d) = due {
        let date = NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD"))?;
        draft.set_due_date(Some(date));
    }

    let status = match status {
        Some(s) => s.parse::<InvoiceStatus>().map_err(|e| anyhow::anyhow!(e))?,
        None if items.is_empty() => {
            let labels: Vec<&str> = InvoiceStatus::ALL.iter().map(|s| s.label()).collect();
            let choice = Select::new()
                .with_prompt("Status")
                .items(&labels)
                .default(0)
                .interact()?;
            InvoiceStatus::ALL[choice]
        }
        None => InvoiceStatus::default(),
    };
    draft.set_status(status);

    if items.is_empty() {
        if !catalog.is_empty() {
            prompt_items(&mut draft, &catalog)?;
        }
    } else {
        for (i, raw) in items.iter().enumerate() {
            let (product_id, quantity) = parse_item(raw)?;
            let key = if i == 0 { draft.items()[0].key } else { draft.add_item() };
            if !draft.select_product(key, product_id, &catalog) {
                anyhow::bail!("Unknown product id {}", product_id);
            }
            draft.set_quantity(key, quantity);
        }
    }

    println!();
    println!("{} {}", "Invoice for".bold(), draft.client_name());
    print_draft(&draft, &catalog);
    println!();

    if !yes
        && !Confirm::new()
            .with_prompt("Create invoice?")
            .default(true)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let bar = spinner("Creating invoice...");
    let result = ctx.composer.submit(&draft).await;
    bar.finish_and_clear();

    match result {
        Ok(Navigation::Dashboard) => {
            record(&ctx.logger, LogEvent::new("command_executed").with_command("create"));
            output::success("Invoice created");
            println!();
            super::dashboard::render(&ctx, "", StatusFilter::All, false)
        }
        Err(e) => Err(view_error(&ctx, &e, MSG_CREATE_FAILED)),
    }
}

pub async fn run_delete(id: i64, force: bool) -> Result<()> {
    let ctx = get_context()?;
    enter_view(&ctx, Route::Dashboard)?;

    if !force
        && !Confirm::new()
            .with_prompt(format!("Delete invoice #{}?", id))
            .default(false)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    let bar = spinner("Deleting invoice...");
    let result = ctx.invoices.delete(id).await;
    bar.finish_and_clear();

    if result.map_err(|e| view_error(&ctx, &e, ""))? {
        output::success(&format!("Deleted invoice #{}", id));
    } else {
        // Failure details go to the event log only
        output::warning(&format!("Invoice #{} was not deleted. See `billdesk logs list --errors`.", id));
    }
    Ok(())
}

pub async fn run_pdf(id: i64, print_only: bool) -> Result<()> {
    let ctx = get_context()?;
    enter_view(&ctx, Route::Dashboard)?;

    let bar = spinner("Fetching PDF link...");
    let link = ctx.invoices.pdf_link(id).await;
    bar.finish_and_clear();

    match link {
        PdfLink::Available(url) => {
            if print_only {
                println!("{}", url);
            } else {
                output::info(&format!("Opening {}", url));
                open::that(&url)?;
            }
            Ok(())
        }
        PdfLink::Failed(e) if e.is_unauthorized() => Err(view_error(&ctx, &e, "")),
        other => anyhow::bail!(other.message().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("3:2").unwrap(), (3, 2));
        assert_eq!(parse_item("7").unwrap(), (7, 1));
        assert!(parse_item("x:2").is_err());
        assert!(parse_item("3:many").is_err());
    }
}
