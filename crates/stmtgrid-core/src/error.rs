//! Error types for stmtgrid-core
//!
//! Error codes, severities and suggestion-bearing details for failures in
//! the upload flow and the export path.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use stmtgrid_extract::ExtractError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Upload attempted with no file
    MissingFile,
    /// Extraction service unreachable
    ServiceUnavailable,
    /// Extraction service reported an error
    ExtractionFailed,
    /// Extraction service answered with something unreadable
    InvalidResponse,
    /// CSV export failed
    ExportFailed,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::MissingFile => write!(f, "MISSING_FILE"),
            ErrorCode::ServiceUnavailable => write!(f, "SERVICE_UNAVAILABLE"),
            ErrorCode::ExtractionFailed => write!(f, "EXTRACTION_FAILED"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::ExportFailed => write!(f, "EXPORT_FAILED"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for stmtgrid-core
///
/// `Display` is the user-facing text shown after `Error: `.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Please select a PDF file first.")]
    MissingFile,

    #[error("{message}")]
    ServiceUnavailable { message: String },

    #[error("{detail}")]
    ExtractionFailed { status: u16, detail: String },

    #[error("{message}")]
    InvalidResponse { message: String },

    #[error("CSV export failed: {message}")]
    ExportFailed { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::MissingFile => ErrorCode::MissingFile,
            CoreError::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            CoreError::ExtractionFailed { .. } => ErrorCode::ExtractionFailed,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::ExportFailed { .. } => ErrorCode::ExportFailed,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::MissingFile => ErrorSeverity::Info,
            CoreError::ExtractionFailed { status, .. } if *status < 500 => ErrorSeverity::Warning,
            CoreError::ExtractionFailed { .. } => ErrorSeverity::Error,
            CoreError::ServiceUnavailable { .. } => ErrorSeverity::Error,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::ExportFailed { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::MissingFile => {
                details = details.with_suggestion(
                    "Choose a PDF or image, or capture a photo from the Scan tab.".to_string()
                );
            }
            CoreError::ServiceUnavailable { .. } => {
                details = details.with_suggestion(
                    "Check extractor.endpoint in the configuration.".to_string()
                );
                details = details.with_suggestion(
                    "GET /api/health/extractor reports whether the service answers.".to_string()
                );
            }
            CoreError::ExtractionFailed { status, .. } => {
                details = details.with_detail(serde_json::json!({ "status": status }));
            }
            CoreError::InvalidResponse { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
            }
            _ => {}
        }

        details
    }
}

impl From<ExtractError> for CoreError {
    fn from(error: ExtractError) -> Self {
        match error {
            ExtractError::MissingFile => CoreError::MissingFile,
            e @ ExtractError::Transport { .. } => CoreError::ServiceUnavailable { message: e.to_string() },
            ExtractError::Service { status, detail } => CoreError::ExtractionFailed { status, detail },
            e @ ExtractError::InvalidResponse { .. } => CoreError::InvalidResponse { message: e.to_string() },
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// File involved, if any
    pub file_name: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            file_name: None,
        }
    }

    pub fn with_file(mut self, file_name: &str) -> Self {
        self.file_name = Some(file_name.to_string());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let line = format!(
            "[{}] {} - Operation: {} - File: {:?}",
            error.code(),
            error,
            context.operation,
            context.file_name
        );
        match error.severity() {
            ErrorSeverity::Info => log::info!(target: "stmtgrid::error", "{}", line),
            ErrorSeverity::Warning => log::warn!(target: "stmtgrid::error", "{}", line),
            ErrorSeverity::Error => log::error!(target: "stmtgrid::error", "{}", line),
        }
    }
}

// ==================== Tests ====================
