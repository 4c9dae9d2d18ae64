//! Wire types exchanged with the extraction service

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// File name given to a camera-captured frame
pub const CAPTURE_FILE_NAME: &str = "capture.jpg";

/// Content type of a camera-captured frame
pub const CAPTURE_CONTENT_TYPE: &str = "image/jpeg";

/// Direction of money movement for a statement line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money in
    Credit,
    /// Money out
    Debit,
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit" => Ok(TransactionType::Credit),
            "debit" => Ok(TransactionType::Debit),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Credit => write!(f, "Credit"),
            TransactionType::Debit => write!(f, "Debit"),
        }
    }
}

/// One parsed line item from a bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction date as printed on the statement
    pub date: String,
    /// Merchant or transaction description
    pub description: String,
    /// Amount in currency units
    pub amount: f64,
    pub transaction_type: TransactionType,
    /// Running balance after the transaction, if the statement shows one
    #[serde(default)]
    pub balance: Option<f64>,
}

/// Successful extraction response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementData {
    #[serde(default)]
    pub account_holder: Option<String>,
    /// Period the statement covers, e.g. "Oct 1 - Oct 31, 2025"
    #[serde(default)]
    pub statement_period: Option<String>,
    pub transactions: Vec<Transaction>,
}

/// Where an upload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadSource {
    /// Chosen through the file input
    File,
    /// Frozen frame from the camera preview
    Camera,
}

impl std::fmt::Display for UploadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadSource::File => write!(f, "file"),
            UploadSource::Camera => write!(f, "camera"),
        }
    }
}

/// A file ready to be sent to the extraction service
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
    pub source: UploadSource,
}

impl UploadFile {
    /// A file chosen by the user
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
            source: UploadSource::File,
        }
    }

    /// A JPEG frame captured from the camera
    pub fn camera(bytes: Bytes) -> Self {
        Self {
            file_name: CAPTURE_FILE_NAME.to_string(),
            content_type: CAPTURE_CONTENT_TYPE.to_string(),
            bytes,
            source: UploadSource::Camera,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_deserialize_without_balance() {
        let tx: Transaction = serde_json::from_str(
            r#"{"date":"01/02/2025","description":"ATM","amount":500.0,"transaction_type":"Debit"}"#,
        )
        .unwrap();
        assert_eq!(tx.transaction_type, TransactionType::Debit);
        assert_eq!(tx.balance, None);
    }

    #[test]
    fn test_transaction_type_rejects_unknown() {
        let result: Result<Transaction, _> = serde_json::from_str(
            r#"{"date":"x","description":"y","amount":1,"transaction_type":"Refund","balance":null}"#,
        );
        assert!(result.is_err());
        assert!("refund".parse::<TransactionType>().is_err());
        assert_eq!("CREDIT".parse::<TransactionType>().unwrap(), TransactionType::Credit);
    }

    #[test]
    fn test_statement_data_optional_metadata() {
        let data: StatementData = serde_json::from_str(r#"{"transactions":[]}"#).unwrap();
        assert!(data.account_holder.is_none());
        assert!(data.transactions.is_empty());
    }

    #[test]
    fn test_camera_upload_file() {
        let file = UploadFile::camera(Bytes::from_static(b"\xff\xd8\xff"));
        assert_eq!(file.file_name, "capture.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.source, UploadSource::Camera);
        assert_eq!(file.len(), 3);
    }
}
