//! Grid rendering - HTML fragments for the results card
//!
//! Helper functions:
//! - render_results: Whole results card (statement line, summary, toolbar, grid)
//! - render_summary: Credit/debit totals
//! - render_grid: Sortable table for one query
//! - render_status: Status line

use stmtgrid_config::CurrencyConfig;
use stmtgrid_core::display::cell_text;
use stmtgrid_core::{Column, GridQuery, SortDirection, Status, StatusKind, Workbench};
use stmtgrid_extract::TransactionType;
use stmtgrid_utils::{escape_html, format_money};

const DEBIT_COLOR: &str = "#e74c3c";
const CREDIT_COLOR: &str = "#2ecc71";

fn row_color(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Debit => DEBIT_COLOR,
        TransactionType::Credit => CREDIT_COLOR,
    }
}

/// Status line shown above the tabs
pub fn render_status(status: &Status) -> String {
    let classes = match status.kind {
        StatusKind::Info => "bg-blue-50 border-blue-200 text-blue-800",
        StatusKind::Success => "bg-green-50 border-green-200 text-green-800",
        StatusKind::Error => "bg-red-50 border-red-200 text-red-800",
    };
    format!(
        r#"<div class='border rounded-lg px-4 py-3 {}' role='status' data-status='{}'>{}</div>"#,
        classes,
        status.kind,
        escape_html(&status.message)
    )
}

pub fn render_summary(bench: &Workbench, currency: &CurrencyConfig) -> String {
    let summary = bench.summary();
    let money = |v: f64| format_money(&currency.symbol, v, currency.decimal_places);
    format!(
        r#"<div class='grid grid-cols-3 gap-3'>
            <div class='p-3 rounded-lg border bg-green-50 border-green-100'><p class='text-xs text-green-700'>Total Credit</p><p class='text-xl font-bold' style='color:{}' id='total-credit'>{}</p></div>
            <div class='p-3 rounded-lg border bg-red-50 border-red-100'><p class='text-xs text-red-700'>Total Debit</p><p class='text-xl font-bold' style='color:{}' id='total-debit'>{}</p></div>
            <div class='p-3 rounded-lg border bg-gray-50'><p class='text-xs text-gray-600'>Net</p><p class='text-xl font-bold {}'>{}</p></div>
        </div>"#,
        CREDIT_COLOR,
        money(summary.total_credit),
        DEBIT_COLOR,
        money(summary.total_debit),
        if summary.net() < 0.0 { "text-red-600" } else { "text-green-600" },
        money(summary.net())
    )
}

fn sort_indicator(query: &GridQuery, column: Column) -> &'static str {
    match query.sort {
        Some((current, SortDirection::Asc)) if current == column => " ▲",
        Some((current, SortDirection::Desc)) if current == column => " ▼",
        _ => "",
    }
}

/// Table for the rows `query` selects
///
/// Sort state travels in hidden inputs marked `data-grid-param`, so the
/// filter inputs in the toolbar pick it up through `hx-include`.
pub fn render_grid(bench: &Workbench, query: &GridQuery, currency: &CurrencyConfig) -> String {
    let rows = bench.view(query);

    let mut html = String::new();
    if let Some((column, dir)) = query.sort {
        html.push_str(&format!(
            r#"<input type='hidden' name='sort' value='{}' data-grid-param><input type='hidden' name='dir' value='{}' data-grid-param>"#,
            column, dir
        ));
    }

    html.push_str("<table class='w-full text-sm'><thead><tr class='border-b bg-gray-50'>");
    for column in Column::ALL {
        let next = query.sorted_by(column);
        html.push_str(&format!(
            r#"<th class='text-left px-3 py-2'><button type='button' class='font-semibold hover:text-indigo-600' hx-get='/grid/list?{}' hx-target='#grid'>{}{}</button></th>"#,
            escape_html(&next.to_query_string()),
            column.header(),
            sort_indicator(query, column)
        ));
    }
    html.push_str("</tr></thead><tbody>");

    if rows.is_empty() {
        let message = if query.is_filtered() { "No rows match the filters." } else { "No transactions yet." };
        html.push_str(&format!(
            r#"<tr><td colspan='5' class='text-center py-8 text-gray-500'>{}</td></tr>"#,
            message
        ));
    }

    for tx in &rows {
        let cell = |column: Column| escape_html(&cell_text(column, tx, currency));
        html.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50' style='color:{}'><td class='px-3 py-2 whitespace-nowrap'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right'>{}</td><td class='px-3 py-2'>{}</td><td class='px-3 py-2 text-right'>{}</td></tr>"#,
            row_color(tx.transaction_type),
            cell(Column::Date),
            cell(Column::Description),
            cell(Column::Amount),
            cell(Column::TransactionType),
            cell(Column::Balance)
        ));
    }
    html.push_str("</tbody></table>");

    html.push_str(&format!(
        r#"<p class='text-xs text-gray-500 mt-2'>Showing {} of {} rows</p>"#,
        rows.len(),
        bench.row_count()
    ));
    html
}

fn filter_input(name: &str, placeholder: &str, value: &str) -> String {
    format!(
        r#"<input type='search' name='{}' value='{}' placeholder='{}' data-grid-param
            hx-get='/grid/list' hx-target='#grid' hx-include='[data-grid-param]' hx-trigger='keyup changed delay:300ms, search'
            class='px-2 py-1 text-sm border rounded w-full'>"#,
        name,
        escape_html(value),
        placeholder
    )
}

/// Quick filter plus one filter input per column
fn render_toolbar(query: &GridQuery) -> String {
    let mut filters = String::new();
    for column in Column::ALL {
        let value = query.column_filters.get(&column).map(String::as_str).unwrap_or("");
        filters.push_str(&filter_input(
            &format!("{}{}", stmtgrid_core::view::COLUMN_FILTER_PREFIX, column),
            column.header(),
            value,
        ));
    }

    format!(
        r#"<div class='flex items-center gap-2 mb-3'>
            <div class='flex-1'>{}</div>
            <button type='button' onclick='exportCsv()' class='px-4 py-2 bg-indigo-600 text-white text-sm rounded-lg hover:bg-indigo-700'>Export CSV</button>
            <button type='button' hx-post='/grid/clear' hx-target='#status' class='px-4 py-2 bg-gray-100 text-gray-700 text-sm rounded-lg hover:bg-gray-200'>Clear</button>
        </div>
        <div class='grid grid-cols-5 gap-2 mb-2'>{}</div>"#,
        filter_input("q", "Search all columns...", &query.quick_filter),
        filters
    )
}

fn render_statement_line(bench: &Workbench) -> String {
    let Some(info) = bench.statement() else {
        return String::new();
    };
    let mut parts = vec![format!("<span class='font-medium'>{}</span>", escape_html(&info.file_name))];
    if let Some(holder) = &info.account_holder {
        parts.push(format!("Account holder: {}", escape_html(holder)));
    }
    if let Some(period) = &info.statement_period {
        parts.push(format!("Period: {}", escape_html(period)));
    }
    format!(
        r#"<p class='text-sm text-gray-600 mb-3'>{}</p>"#,
        parts.join(" &middot; ")
    )
}

/// Results card; rendered hidden while the grid is empty
///
/// `oob` marks the card for an out-of-band swap when it rides along with a
/// status response.
pub fn render_results(bench: &Workbench, currency: &CurrencyConfig, oob: bool) -> String {
    let oob_attr = if oob { " hx-swap-oob='true'" } else { "" };
    if bench.is_empty() {
        return format!("<div id='results' class='hidden'{}></div>", oob_attr);
    }

    let query = GridQuery::default();
    format!(
        r#"<div id='results' class='bg-white rounded-xl shadow-sm p-6'{}>
            <div class='flex items-center justify-between mb-3'><h3 class='text-lg font-semibold'>Transactions</h3></div>
            {}
            <div id='summary' class='mb-4'>{}</div>
            {}
            <div id='grid' class='overflow-x-auto'>{}</div>
        </div>"#,
        oob_attr,
        render_statement_line(bench),
        render_summary(bench, currency),
        render_toolbar(&query),
        render_grid(bench, &query, currency)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use stmtgrid_config::MergeMode;
    use stmtgrid_extract::{StatementData, Transaction, UploadSource};

    fn tx(amount: f64, kind: TransactionType, balance: Option<f64>) -> Transaction {
        Transaction {
            date: "01/03/2025".to_string(),
            description: "<b>Shop</b>".to_string(),
            amount,
            transaction_type: kind,
            balance,
        }
    }

    fn bench(rows: Vec<Transaction>) -> Workbench {
        let mut bench = Workbench::new(MergeMode::Append);
        bench.merge(
            StatementData { account_holder: None, statement_period: None, transactions: rows },
            "march.pdf",
            UploadSource::File,
        );
        bench
    }

    #[test]
    fn test_grid_cells_match_export() {
        let bench = bench(vec![tx(12.5, TransactionType::Debit, None)]);
        let html = render_grid(&bench, &GridQuery::default(), &CurrencyConfig::default());
        let csv = bench.export_csv(&GridQuery::default()).unwrap();
        let record = csv.lines().nth(1).unwrap();
        for cell in ["Rs12.50", "N/A", "Debit"] {
            assert!(html.contains(&format!(">{}</td>", cell)));
            assert!(record.contains(&format!("\"{}\"", cell)));
        }
    }

    #[test]
    fn test_summary_labels_show_totals_only() {
        let bench = bench(vec![
            tx(10.0, TransactionType::Debit, None),
            tx(20.0, TransactionType::Credit, None),
        ]);
        let html = render_summary(&bench, &CurrencyConfig::default());
        assert!(html.contains(">Total Credit</p>"));
        assert!(html.contains(">Total Debit</p>"));
        assert!(html.contains("Rs20.00"));
        assert!(!html.contains("Total Credit ("));
    }

    #[test]
    fn test_grid_rows_are_escaped_and_colored() {
        let bench = bench(vec![
            tx(10.0, TransactionType::Debit, None),
            tx(20.0, TransactionType::Credit, Some(30.0)),
        ]);
        let html = render_grid(&bench, &GridQuery::default(), &CurrencyConfig::default());
        assert!(html.contains("&lt;b&gt;Shop&lt;/b&gt;"));
        assert!(!html.contains("<b>Shop"));
        assert!(html.contains(DEBIT_COLOR));
        assert!(html.contains(CREDIT_COLOR));
        assert!(html.contains("Showing 2 of 2 rows"));
    }

    #[test]
    fn test_sort_header_links_toggle() {
        let bench = bench(vec![tx(10.0, TransactionType::Debit, None)]);
        let query = GridQuery::default().sorted_by(Column::Amount);
        let html = render_grid(&bench, &query, &CurrencyConfig::default());
        assert!(html.contains("/grid/list?sort=amount&amp;dir=desc"));
        assert!(html.contains("Amount ▲"));
        assert!(html.contains("name='sort' value='amount'"));
    }

    #[test]
    fn test_results_hidden_when_empty() {
        let empty = Workbench::new(MergeMode::Append);
        assert_eq!(
            render_results(&empty, &CurrencyConfig::default(), true),
            "<div id='results' class='hidden' hx-swap-oob='true'></div>"
        );
    }

    #[test]
    fn test_status_is_escaped() {
        let html = render_status(&Status::error(&"<script>"));
        assert!(html.contains("Error: &lt;script&gt;"));
        assert!(html.contains("data-status='error'"));
    }
}
