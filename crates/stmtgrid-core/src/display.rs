//! Cell text as the grid shows it
//!
//! Filtering and CSV export read the same strings the table renders.

use stmtgrid_config::CurrencyConfig;
use stmtgrid_extract::Transaction;
use stmtgrid_utils::format_money;

use crate::types::Column;

/// Amount cell text; zero renders empty
pub fn display_amount(tx: &Transaction, currency: &CurrencyConfig) -> String {
    if tx.amount == 0.0 {
        String::new()
    } else {
        format_money(&currency.symbol, tx.amount, currency.decimal_places)
    }
}

/// Balance cell text; absent or zero renders `N/A`
pub fn display_balance(tx: &Transaction, currency: &CurrencyConfig) -> String {
    match tx.balance {
        Some(balance) if balance != 0.0 => format_money(&currency.symbol, balance, currency.decimal_places),
        _ => "N/A".to_string(),
    }
}

/// Text of one cell
pub fn cell_text(column: Column, tx: &Transaction, currency: &CurrencyConfig) -> String {
    match column {
        Column::Date => tx.date.clone(),
        Column::Description => tx.description.clone(),
        Column::Amount => display_amount(tx, currency),
        Column::TransactionType => tx.transaction_type.to_string(),
        Column::Balance => display_balance(tx, currency),
    }
}
