//! Grid summary and statement metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stmtgrid_extract::{StatementData, Transaction, TransactionType, UploadSource};

/// Credit/debit totals over a row set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_credit: f64,
    pub total_debit: f64,
    pub credit_count: usize,
    pub debit_count: usize,
}

impl Summary {
    /// Sum `amount` by transaction type over every row
    pub fn from_rows(rows: &[Transaction]) -> Self {
        rows.iter().fold(Summary::default(), |mut acc, tx| {
            match tx.transaction_type {
                TransactionType::Credit => {
                    acc.total_credit += tx.amount;
                    acc.credit_count += 1;
                }
                TransactionType::Debit => {
                    acc.total_debit += tx.amount;
                    acc.debit_count += 1;
                }
            }
            acc
        })
    }

    /// Credits minus debits
    pub fn net(&self) -> f64 {
        self.total_credit - self.total_debit
    }

    pub fn is_zero(&self) -> bool {
        self.credit_count == 0 && self.debit_count == 0
    }
}

/// What the extraction service reported about the last statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementInfo {
    pub file_name: String,
    pub source: UploadSource,
    pub account_holder: Option<String>,
    pub statement_period: Option<String>,
    pub transaction_count: usize,
    pub received_at: DateTime<Utc>,
}

impl StatementInfo {
    pub fn from_statement(file_name: &str, source: UploadSource, data: &StatementData) -> Self {
        Self {
            file_name: file_name.to_string(),
            source,
            account_holder: data.account_holder.clone(),
            statement_period: data.statement_period.clone(),
            transaction_count: data.transactions.len(),
            received_at: Utc::now(),
        }
    }
}

/// Result of merging an extraction into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Rows returned by this extraction
    pub added: usize,
    /// Rows in the grid afterwards
    pub total: usize,
}

/// Transactions list response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    /// Rows after filtering
    pub shown_count: usize,
    /// Rows in the grid
    pub total_count: usize,
}

/// Summary response for API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: Summary,
    pub net: f64,
    pub row_count: usize,
    pub statement: Option<StatementInfo>,
}
