//! Transaction grid state and business logic

pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod status;
pub mod types;
pub mod upload;
pub mod view;

use stmtgrid_config::{Config, CurrencyConfig, MergeMode};
use stmtgrid_extract::{StatementData, Transaction, UploadSource};

pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{MergeOutcome, StatementInfo, Summary, SummaryResponse, TransactionsResponse};
pub use status::{Status, StatusKind};
pub use types::{Column, SortDirection};
pub use upload::{upload_and_merge, UploadReport};
pub use view::GridQuery;

/// All rows received this session, in upload order
///
/// The summary is recomputed on every change so it always equals
/// `Summary::from_rows(self.rows())`.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    merge_mode: MergeMode,
    currency: CurrencyConfig,
    rows: Vec<Transaction>,
    summary: Summary,
    statement: Option<StatementInfo>,
}

impl Workbench {
    pub fn new(merge_mode: MergeMode) -> Self {
        Self {
            merge_mode,
            ..Self::default()
        }
    }

    /// Use `currency` for cell text in filters and exports
    pub fn with_currency(mut self, currency: CurrencyConfig) -> Self {
        self.currency = currency;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.grid.merge_mode).with_currency(config.currency.clone())
    }

    pub fn merge_mode(&self) -> MergeMode {
        self.merge_mode
    }

    pub fn currency(&self) -> &CurrencyConfig {
        &self.currency
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Totals over every row, regardless of any filter
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Metadata of the most recent extraction
    pub fn statement(&self) -> Option<&StatementInfo> {
        self.statement.as_ref()
    }

    /// Add the rows of one extraction
    pub fn merge(&mut self, data: StatementData, file_name: &str, source: UploadSource) -> MergeOutcome {
        let info = StatementInfo::from_statement(file_name, source, &data);
        let added = data.transactions.len();

        match self.merge_mode {
            MergeMode::Append => self.rows.extend(data.transactions),
            MergeMode::Replace => self.rows = data.transactions,
        }

        self.summary = Summary::from_rows(&self.rows);
        self.statement = Some(info);

        MergeOutcome {
            added,
            total: self.rows.len(),
        }
    }

    /// Drop every row; the summary returns to zero
    pub fn clear(&mut self) {
        self.rows.clear();
        self.summary = Summary::default();
        self.statement = None;
    }

    /// Rows as displayed for `query`
    pub fn view(&self, query: &GridQuery) -> Vec<Transaction> {
        query.apply(&self.rows, &self.currency)
    }

    /// CSV of exactly the rows `view` returns
    pub fn export_csv(&self, query: &GridQuery) -> CoreResult<String> {
        export::rows_to_csv(&self.view(query), &self.currency)
    }

    pub fn transactions_response(&self, query: &GridQuery) -> TransactionsResponse {
        let transactions = self.view(query);
        TransactionsResponse {
            shown_count: transactions.len(),
            total_count: self.rows.len(),
            transactions,
        }
    }

    pub fn summary_response(&self) -> SummaryResponse {
        SummaryResponse {
            summary: self.summary,
            net: self.summary.net(),
            row_count: self.rows.len(),
            statement: self.statement.clone(),
        }
    }
}

// ==================== Tests ====================
