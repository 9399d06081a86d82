//! Analytics command - AI risk assessment of one invoice

use anyhow::Result;
use colored::Colorize;

use billdesk_core::services::analytics::{MSG_ANALYTICS_FAILED, MSG_ANALYTICS_LOADING};
use billdesk_core::services::{RiskTone, Route};

use super::{enter_view, get_context, spinner, view_error};

/// Bar of `width` cells, the overdue share filled
fn risk_bar(overdue_percent: u8, width: usize) -> String {
    let filled = (overdue_percent as usize * width + 50) / 100;
    format!(
        "{}{}",
        "█".repeat(filled).red(),
        "░".repeat(width - filled.min(width)).dimmed()
    )
}

pub async fn run(invoice_id: i64, json: bool) -> Result<()> {
    let ctx = get_context()?;
    enter_view(&ctx, Route::Analytics)?;

    let bar = spinner(MSG_ANALYTICS_LOADING);
    let result = ctx.analytics.analyze(invoice_id).await;
    bar.finish_and_clear();

    let view = result.map_err(|e| view_error(&ctx, &e, MSG_ANALYTICS_FAILED))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} {}", "AI Invoice Risk Analysis".bold(), format!("#{}", view.invoice_id).dimmed());
    println!();

    let badge = match view.risk_tone {
        RiskTone::Alert => view.risk_status.red().bold(),
        RiskTone::Ok => view.risk_status.green().bold(),
    };
    println!("Risk Assessment  {}", badge);
    if !view.reason.is_empty() {
        println!("  {}", view.reason);
    }
    println!();

    println!("{}", risk_bar(view.overdue_percent, 30));
    println!(
        "Overdue {}%   On time {}%",
        view.overdue_percent.to_string().red(),
        view.on_time_percent
    );
    println!();

    println!("{}", "AI Recommendation".bold());
    println!("  {}", view.recommendation);

    if !view.anomaly_keywords.is_empty() {
        println!();
        println!("{}", "Anomalies detected".yellow().bold());
        println!("  {}", view.anomaly_keywords.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_bar_width() {
        colored::control::set_override(false);
        assert_eq!(risk_bar(0, 10), "░".repeat(10));
        assert_eq!(risk_bar(100, 10), "█".repeat(10));
        assert_eq!(risk_bar(72, 10).chars().filter(|c| *c == '█').count(), 7);
    }
}
