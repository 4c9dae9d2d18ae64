//! CSV export of the visible rows

use stmtgrid_config::CurrencyConfig;
use stmtgrid_extract::Transaction;

use crate::display::cell_text;
use crate::error::{CoreError, CoreResult};
use crate::types::Column;

/// Write a header row plus one record per row, every field quoted.
/// Cells carry the text the grid shows.
pub fn rows_to_csv(rows: &[Transaction], currency: &CurrencyConfig) -> CoreResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer
        .write_record(Column::ALL.iter().map(|c| c.header()))
        .map_err(|e| CoreError::ExportFailed { message: e.to_string() })?;

    for tx in rows {
        writer
            .write_record(Column::ALL.iter().map(|c| cell_text(*c, tx, currency)))
            .map_err(|e| CoreError::ExportFailed { message: e.to_string() })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::ExportFailed { message: e.to_string() })?;
    String::from_utf8(bytes).map_err(|e| CoreError::ExportFailed { message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stmtgrid_extract::TransactionType;

    #[test]
    fn test_header_only_when_empty() {
        let csv = rows_to_csv(&[], &CurrencyConfig::default()).unwrap();
        assert_eq!(csv, "\"Date\",\"Description\",\"Amount\",\"Transaction Type\",\"Balance\"\r\n");
    }

    #[test]
    fn test_rows_are_quoted() {
        let rows = vec![
            Transaction {
                date: "05/01/2025".to_string(),
                description: "Cafe \"Blue\", Main St".to_string(),
                amount: 4.5,
                transaction_type: TransactionType::Debit,
                balance: None,
            },
            Transaction {
                date: "06/01/2025".to_string(),
                description: "Salary".to_string(),
                amount: 1000.0,
                transaction_type: TransactionType::Credit,
                balance: Some(1995.5),
            },
        ];
        let csv = rows_to_csv(&rows, &CurrencyConfig::default()).unwrap();
        let lines: Vec<&str> = csv.split("\r\n").collect();
        assert_eq!(lines[1], "\"05/01/2025\",\"Cafe \"\"Blue\"\", Main St\",\"Rs4.50\",\"Debit\",\"N/A\"");
        assert_eq!(lines[2], "\"06/01/2025\",\"Salary\",\"Rs1000.00\",\"Credit\",\"Rs1995.50\"");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_zero_amount_exports_blank() {
        let rows = vec![Transaction {
            date: "07/01/2025".to_string(),
            description: "Opening balance".to_string(),
            amount: 0.0,
            transaction_type: TransactionType::Credit,
            balance: Some(0.0),
        }];
        let csv = rows_to_csv(&rows, &CurrencyConfig::default()).unwrap();
        assert!(csv.ends_with("\"07/01/2025\",\"Opening balance\",\"\",\"Credit\",\"N/A\"\r\n"));
    }
}
