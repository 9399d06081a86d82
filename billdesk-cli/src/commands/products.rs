//! Products command - show the product catalog

use anyhow::Result;
use colored::Colorize;

use billdesk_core::services::dashboard::format_amount;
use billdesk_core::services::Route;

use super::{enter_view, get_context, spinner};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    enter_view(&ctx, Route::CreateInvoice)?;

    let bar = spinner("Loading products...");
    let catalog = ctx.composer.load_catalog().await;
    bar.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("No products available.");
        return Ok(());
    }

    println!("{}", "Products".bold());
    let mut table = output::create_table(vec!["ID", "Name", "Price", "Stock"]);
    for product in &catalog {
        table.add_row(vec![
            product.id.to_string(),
            product.name.clone(),
            format_amount(product.price),
            product.stock.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{}", table);
    Ok(())
}
