//! Upload flow: validate, extract, merge, report

use stmtgrid_extract::{StatementExtractor, UploadFile};
use tokio::sync::RwLock;

use crate::error::{CoreError, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::MergeOutcome;
use crate::status::Status;
use crate::Workbench;

/// What one upload did to the grid
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub status: Status,
    /// `None` when nothing was merged
    pub outcome: Option<MergeOutcome>,
}

impl UploadReport {
    fn failed(error: &CoreError) -> Self {
        Self {
            status: Status::error(error),
            outcome: None,
        }
    }
}

/// Send one file to the extractor and merge the returned rows.
///
/// A missing or empty file is rejected before any request is made. The
/// workbench lock is only taken once the extractor has answered.
pub async fn upload_and_merge(
    workbench: &RwLock<Workbench>,
    extractor: &dyn StatementExtractor,
    file: Option<UploadFile>,
) -> UploadReport {
    let logger = DefaultErrorLogger;

    let file = match file {
        Some(file) if !file.is_empty() => file,
        _ => {
            let error = CoreError::MissingFile;
            logger.log_error(&error, &ErrorContext::new("upload"));
            return UploadReport::failed(&error);
        }
    };

    let file_name = file.file_name.clone();
    let source = file.source;
    log::info!("{} ({} bytes, {})", Status::processing(&file_name).message, file.len(), source);

    let data = match extractor.extract(file).await {
        Ok(data) => data,
        Err(e) => {
            let error = CoreError::from(e);
            logger.log_error(&error, &ErrorContext::new("upload").with_file(&file_name));
            return UploadReport::failed(&error);
        }
    };

    let count = data.transactions.len();
    let outcome = workbench.write().await.merge(data, &file_name, source);
    log::info!(
        "Merged {} transactions from {}; grid now has {}",
        outcome.added,
        file_name,
        outcome.total
    );

    UploadReport {
        status: Status::extracted(count, &file_name),
        outcome: Some(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stmtgrid_config::MergeMode;
    use stmtgrid_extract::{ExtractError, ExtractResult, StatementData, Transaction, TransactionType};

    use crate::status::StatusKind;

    /// Returns `rows` transactions per call, or fails when `rows` is `None`
    struct FakeExtractor {
        rows: Option<usize>,
        calls: AtomicUsize,
    }

    impl FakeExtractor {
        fn returning(rows: usize) -> Self {
            Self { rows: Some(rows), calls: AtomicUsize::new(0) }
        }

        fn failing() -> Self {
            Self { rows: None, calls: AtomicUsize::new(0) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatementExtractor for FakeExtractor {
        async fn extract(&self, _file: UploadFile) -> ExtractResult<StatementData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.rows {
                Some(n) => Ok(StatementData {
                    account_holder: Some("A. Holder".to_string()),
                    statement_period: None,
                    transactions: (0..n)
                        .map(|i| Transaction {
                            date: format!("2025-01-{:02}", i + 1),
                            description: format!("Row {}", i),
                            amount: 10.0,
                            transaction_type: if i % 2 == 0 { TransactionType::Credit } else { TransactionType::Debit },
                            balance: None,
                        })
                        .collect(),
                }),
                None => Err(ExtractError::Service {
                    status: 400,
                    detail: "Unsupported file type.".to_string(),
                }),
            }
        }

        async fn probe(&self) -> ExtractResult<()> {
            Ok(())
        }
    }

    fn pdf(name: &str) -> UploadFile {
        UploadFile::new(name, "application/pdf", Bytes::from_static(b"%PDF-1.4"))
    }

    #[tokio::test]
    async fn test_no_file_makes_no_request() {
        let workbench = RwLock::new(Workbench::new(MergeMode::Append));
        let extractor = FakeExtractor::returning(3);

        let report = upload_and_merge(&workbench, &extractor, None).await;
        assert_eq!(report.status.message, "Error: Please select a PDF file first.");
        assert!(report.outcome.is_none());

        let empty = UploadFile::new("empty.pdf", "application/pdf", Bytes::new());
        let report = upload_and_merge(&workbench, &extractor, Some(empty)).await;
        assert!(report.status.is_error());

        assert_eq!(extractor.calls(), 0);
        assert!(workbench.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_uploads_append() {
        let workbench = RwLock::new(Workbench::new(MergeMode::Append));
        let extractor = FakeExtractor::returning(3);

        upload_and_merge(&workbench, &extractor, Some(pdf("jan.pdf"))).await;
        let report = upload_and_merge(&workbench, &extractor, Some(pdf("feb.pdf"))).await;

        assert_eq!(report.status.kind, StatusKind::Success);
        assert_eq!(report.status.message, "Successfully extracted 3 transactions from feb.pdf.");
        assert_eq!(report.outcome, Some(MergeOutcome { added: 3, total: 6 }));
        assert_eq!(workbench.read().await.row_count(), 6);
        assert_eq!(extractor.calls(), 2);
    }

    #[tokio::test]
    async fn test_replace_mode() {
        let workbench = RwLock::new(Workbench::new(MergeMode::Replace));
        let extractor = FakeExtractor::returning(2);

        upload_and_merge(&workbench, &extractor, Some(pdf("jan.pdf"))).await;
        let report = upload_and_merge(&workbench, &extractor, Some(pdf("feb.pdf"))).await;

        assert_eq!(report.outcome, Some(MergeOutcome { added: 2, total: 2 }));
        let bench = workbench.read().await;
        assert_eq!(bench.statement().map(|s| s.file_name.as_str()), Some("feb.pdf"));
    }

    #[tokio::test]
    async fn test_failure_leaves_grid_untouched() {
        let workbench = RwLock::new(Workbench::new(MergeMode::Append));
        upload_and_merge(&workbench, &FakeExtractor::returning(2), Some(pdf("jan.pdf"))).await;

        let failing = FakeExtractor::failing();
        let report = upload_and_merge(&workbench, &failing, Some(pdf("notes.txt"))).await;

        assert_eq!(report.status.message, "Error: Unsupported file type.");
        assert!(report.outcome.is_none());
        assert_eq!(failing.calls(), 1);
        assert_eq!(workbench.read().await.row_count(), 2);
    }

    #[tokio::test]
    async fn test_zero_rows_is_success() {
        let workbench = RwLock::new(Workbench::new(MergeMode::Append));
        let report = upload_and_merge(&workbench, &FakeExtractor::returning(0), Some(pdf("blank.pdf"))).await;
        assert_eq!(report.status.message, "Successfully extracted 0 transactions from blank.pdf.");
        assert_eq!(report.outcome, Some(MergeOutcome { added: 0, total: 0 }));
    }
}
