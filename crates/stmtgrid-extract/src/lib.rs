//! Statement extraction client
//!
//! Sends a statement PDF or photo to the extraction service and returns the
//! transactions it found.

use async_trait::async_trait;
use std::sync::Arc;

pub mod client;
pub mod error;
pub mod types;

pub use client::{decode_response, HttpExtractor};
pub use error::{ExtractError, ExtractResult};
pub use types::{
    StatementData, Transaction, TransactionType, UploadFile, UploadSource,
    CAPTURE_CONTENT_TYPE, CAPTURE_FILE_NAME,
};

/// Extractor reference type
pub type ExtractorRef = Arc<dyn StatementExtractor>;

/// Anything that turns a statement file into transactions
#[async_trait]
pub trait StatementExtractor: Send + Sync {
    /// Extract transactions from one uploaded file
    async fn extract(&self, file: UploadFile) -> ExtractResult<StatementData>;

    /// Check that the service is reachable
    async fn probe(&self) -> ExtractResult<()>;
}
