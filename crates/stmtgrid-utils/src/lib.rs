//! Utility functions and helpers

use chrono::NaiveDate;

/// Format an amount with a currency symbol prefix, e.g. `Rs1250.50`
pub fn format_money(symbol: &str, value: f64, decimal_places: usize) -> String {
    format!("{}{:.*}", symbol, decimal_places, value)
}

/// Escape text for safe interpolation into HTML element content and attributes
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// CSV export file name for the given day: `transactions-YYYY-MM-DD.csv`
pub fn export_file_name(day: NaiveDate) -> String {
    format!("transactions-{}.csv", day.format("%Y-%m-%d"))
}
