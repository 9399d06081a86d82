//! Terminal output helpers

use colored::{ColoredString, Colorize};
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

use billdesk_core::services::StatusTone;

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Errors go to stderr
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Condensed UTF-8 table that wraps to the terminal width
pub fn create_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// Invoice status colored by tone: paid green, unpaid red, overdue yellow
pub fn status_label(label: &str, tone: StatusTone) -> ColoredString {
    match tone {
        StatusTone::Paid => label.green(),
        StatusTone::Unpaid => label.red(),
        StatusTone::Overdue => label.yellow(),
        StatusTone::Neutral => label.normal(),
    }
}
