//! User-visible status line

use serde::{Deserialize, Serialize};

/// Shown by the page when the camera cannot be opened
pub const CAMERA_UNAVAILABLE: &str = "Error: Could not access camera. Check permissions.";

/// `DOMException` name for a refused permission prompt
pub const CAMERA_DENIED_ERROR: &str = "NotAllowedError";

/// Shown by the page when the user refused camera access
pub const CAMERA_DENIED: &str =
    "Error: Camera permission denied. Please allow camera access in your browser settings.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// In progress or neutral
    Info,
    Success,
    Error,
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusKind::Info => write!(f, "info"),
            StatusKind::Success => write!(f, "success"),
            StatusKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, message: message.into() }
    }

    /// An error status; the message gets the `Error: ` prefix
    pub fn error(error: &dyn std::fmt::Display) -> Self {
        Self { kind: StatusKind::Error, message: format!("Error: {}", error) }
    }

    pub fn processing(file_name: &str) -> Self {
        Self::info(format!("Processing {}...", file_name))
    }

    pub fn extracted(count: usize, file_name: &str) -> Self {
        Self::success(format!(
            "Successfully extracted {} transactions from {}.",
            count, file_name
        ))
    }

    pub fn cleared() -> Self {
        Self::info("Grid cleared.")
    }

    /// Message for a failed `getUserMedia` call, keyed by the DOMException name
    pub fn camera_failure(error_name: &str) -> Self {
        let message = if error_name == CAMERA_DENIED_ERROR {
            CAMERA_DENIED
        } else {
            CAMERA_UNAVAILABLE
        };
        Self { kind: StatusKind::Error, message: message.to_string() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_message() {
        let status = Status::extracted(12, "march.pdf");
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.message, "Successfully extracted 12 transactions from march.pdf.");
    }

    #[test]
    fn test_error_prefix() {
        let status = Status::error(&"No transactions could be found in the document.");
        assert!(status.is_error());
        assert_eq!(status.message, "Error: No transactions could be found in the document.");
    }

    #[test]
    fn test_camera_failure_messages() {
        assert_eq!(Status::camera_failure("NotAllowedError").message, CAMERA_DENIED);
        assert_eq!(Status::camera_failure("NotFoundError").message, CAMERA_UNAVAILABLE);
        assert!(Status::camera_failure("").is_error());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(StatusKind::Info.to_string(), "info");
        assert_eq!(Status::processing("capture.jpg").message, "Processing capture.jpg...");
        assert_eq!(Status::cleared().kind, StatusKind::Info);
    }
}
