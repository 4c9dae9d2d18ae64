//! Error types for stmtgrid-extract

use thiserror::Error;

/// Fallback when the service fails without saying why
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

/// Everything that can go wrong between picking a file and getting rows back.
///
/// The `Display` text is what the user sees after the `Error: ` prefix.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Please select a PDF file first.")]
    MissingFile,

    #[error("Could not reach the extraction service: {message}")]
    Transport { message: String },

    #[error("{detail}")]
    Service { status: u16, detail: String },

    #[error("Invalid response from the extraction service: {message}")]
    InvalidResponse { message: String },
}

impl ExtractError {
    /// HTTP status reported by the service, if it answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ExtractError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request was never sent
    pub fn is_local(&self) -> bool {
        matches!(self, ExtractError::MissingFile)
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            "connection failed".to_string()
        } else {
            error.to_string()
        };
        ExtractError::Transport { message }
    }
}

/// Result type with ExtractError
pub type ExtractResult<T> = Result<T, ExtractError>;
