//! Sorting and filtering of grid rows
//!
//! A `GridQuery` describes what the user is looking at: one sorted column
//! and any number of "contains" filters. The same query drives the table
//! fragment and the CSV export, so the export always matches the screen.

use std::cmp::Ordering;
use std::collections::HashMap;

use stmtgrid_config::CurrencyConfig;
use stmtgrid_extract::Transaction;

use crate::display::cell_text;
use crate::types::{Column, SortDirection};

/// Prefix for per-column filter parameters, e.g. `f_description=coffee`
pub const COLUMN_FILTER_PREFIX: &str = "f_";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridQuery {
    pub sort: Option<(Column, SortDirection)>,
    /// Matches any column
    pub quick_filter: String,
    pub column_filters: HashMap<Column, String>,
}

impl GridQuery {
    /// Build from query-string parameters; unknown columns are ignored
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let sort = params
            .get("sort")
            .and_then(|s| s.parse::<Column>().ok())
            .map(|column| {
                let dir = params
                    .get("dir")
                    .and_then(|d| d.parse().ok())
                    .unwrap_or_default();
                (column, dir)
            });

        let quick_filter = params.get("q").map(|q| q.trim().to_string()).unwrap_or_default();

        let column_filters = params
            .iter()
            .filter_map(|(key, value)| {
                let column = key.strip_prefix(COLUMN_FILTER_PREFIX)?.parse::<Column>().ok()?;
                let value = value.trim();
                (!value.is_empty()).then(|| (column, value.to_string()))
            })
            .collect();

        Self { sort, quick_filter, column_filters }
    }

    /// Encode back to a query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::new();
        if let Some((column, dir)) = self.sort {
            parts.push(format!("sort={}", column));
            parts.push(format!("dir={}", dir));
        }
        if !self.quick_filter.is_empty() {
            parts.push(format!("q={}", urlencoding::encode(&self.quick_filter)));
        }
        // Fixed column order keeps the string stable
        for column in Column::ALL {
            if let Some(value) = self.column_filters.get(&column) {
                parts.push(format!(
                    "{}{}={}",
                    COLUMN_FILTER_PREFIX,
                    column,
                    urlencoding::encode(value)
                ));
            }
        }
        parts.join("&")
    }

    /// Copy of this query sorted by `column`, toggling direction on repeat
    pub fn sorted_by(&self, column: Column) -> Self {
        let dir = match self.sort {
            Some((current, dir)) if current == column => dir.toggled(),
            _ => SortDirection::Asc,
        };
        Self {
            sort: Some((column, dir)),
            ..self.clone()
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.quick_filter.is_empty() || !self.column_filters.is_empty()
    }

    /// Whether a row passes every filter, matched against the cell text shown
    pub fn matches(&self, tx: &Transaction, currency: &CurrencyConfig) -> bool {
        let passes_columns = self
            .column_filters
            .iter()
            .all(|(column, needle)| contains_ignore_case(&cell_text(*column, tx, currency), needle));
        if !passes_columns {
            return false;
        }
        if self.quick_filter.is_empty() {
            return true;
        }
        Column::ALL
            .iter()
            .any(|column| contains_ignore_case(&cell_text(*column, tx, currency), &self.quick_filter))
    }

    /// Filter then sort; the sort is stable so equal keys keep upload order
    pub fn apply(&self, rows: &[Transaction], currency: &CurrencyConfig) -> Vec<Transaction> {
        let mut visible: Vec<Transaction> = rows
            .iter()
            .filter(|tx| self.matches(tx, currency))
            .cloned()
            .collect();

        if let Some((column, dir)) = self.sort {
            visible.sort_by(|a, b| {
                let ord = compare(column, a, b);
                match dir {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        visible
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Ascending order for one column; missing balances sort first
fn compare(column: Column, a: &Transaction, b: &Transaction) -> Ordering {
    match column {
        Column::Date => a.date.cmp(&b.date),
        Column::Description => a.description.cmp(&b.description),
        Column::Amount => a.amount.total_cmp(&b.amount),
        Column::TransactionType => a.transaction_type.to_string().cmp(&b.transaction_type.to_string()),
        Column::Balance => match (a.balance, b.balance) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.total_cmp(&y),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stmtgrid_extract::TransactionType;

    fn tx(date: &str, description: &str, amount: f64, kind: TransactionType, balance: Option<f64>) -> Transaction {
        Transaction {
            date: date.to_string(),
            description: description.to_string(),
            amount,
            transaction_type: kind,
            balance,
        }
    }

    fn rows() -> Vec<Transaction> {
        vec![
            tx("2025-01-03", "Coffee Bean", 4.5, TransactionType::Debit, Some(995.5)),
            tx("2025-01-01", "Salary ACME", 1000.0, TransactionType::Credit, Some(1000.0)),
            tx("2025-01-02", "Grocery", 20.0, TransactionType::Debit, None),
            tx("2025-01-02", "coffee refund", 4.5, TransactionType::Credit, None),
        ]
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let visible = GridQuery::default().apply(&rows(), &CurrencyConfig::default());
        assert_eq!(visible, rows());
    }

    #[test]
    fn test_sort_amount_desc() {
        let query = GridQuery::from_params(&params(&[("sort", "amount"), ("dir", "desc")]));
        let visible = query.apply(&rows(), &CurrencyConfig::default());
        let amounts: Vec<f64> = visible.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![1000.0, 20.0, 4.5, 4.5]);
        // Stable: the two 4.5 rows keep upload order
        assert_eq!(visible[2].description, "Coffee Bean");
    }

    #[test]
    fn test_sort_balance_missing_first() {
        let query = GridQuery::from_params(&params(&[("sort", "balance")]));
        let visible = query.apply(&rows(), &CurrencyConfig::default());
        assert_eq!(visible[0].balance, None);
        assert_eq!(visible[1].balance, None);
        assert_eq!(visible[3].balance, Some(1000.0));
    }

    #[test]
    fn test_quick_filter_is_case_insensitive() {
        let query = GridQuery::from_params(&params(&[("q", "COFFEE")]));
        let visible = query.apply(&rows(), &CurrencyConfig::default());
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_column_filters_combine() {
        let query = GridQuery::from_params(&params(&[
            ("f_description", "coffee"),
            ("f_transaction_type", "debit"),
        ]));
        let visible = query.apply(&rows(), &CurrencyConfig::default());
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].description, "Coffee Bean");
    }

    #[test]
    fn test_filters_match_displayed_text() {
        let currency = CurrencyConfig::default();
        let query = GridQuery::from_params(&params(&[("f_balance", "n/a")]));
        assert_eq!(query.apply(&rows(), &currency).len(), 2);

        let query = GridQuery::from_params(&params(&[("q", "Rs1000.00")]));
        let visible = query.apply(&rows(), &currency);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].description, "Salary ACME");
    }

    #[test]
    fn test_unknown_params_are_ignored() {
        let query = GridQuery::from_params(&params(&[("sort", "payee"), ("f_memo", "x"), ("f_date", "  ")]));
        assert_eq!(query, GridQuery::default());
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = GridQuery::from_params(&params(&[
            ("sort", "date"),
            ("dir", "desc"),
            ("q", "a&b"),
            ("f_amount", "4.5"),
        ]));
        let encoded = query.to_query_string();
        assert_eq!(encoded, "sort=date&dir=desc&q=a%26b&f_amount=4.5");
    }

    #[test]
    fn test_sorted_by_toggles() {
        let query = GridQuery::default().sorted_by(Column::Date);
        assert_eq!(query.sort, Some((Column::Date, SortDirection::Asc)));
        let query = query.sorted_by(Column::Date);
        assert_eq!(query.sort, Some((Column::Date, SortDirection::Desc)));
        let query = query.sorted_by(Column::Amount);
        assert_eq!(query.sort, Some((Column::Amount, SortDirection::Asc)));
    }
}
