//! HTTP client for the extraction service
//!
//! The service takes `POST <endpoint>/upload` with a multipart `file` field.
//! It answers with `{ transactions: [...] }` on success, or `{ detail }` and a
//! non-2xx status on failure.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

use crate::error::{ExtractError, ExtractResult, UNKNOWN_ERROR};
use crate::types::{StatementData, UploadFile};
use crate::StatementExtractor;

/// Extraction service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: reqwest::Client,
    upload_url: String,
    probe_url: String,
}

impl HttpExtractor {
    /// Build a client for the service rooted at `endpoint`
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> ExtractResult<Self> {
        let base = endpoint.trim().trim_end_matches('/');
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            upload_url: format!("{}/upload", base),
            probe_url: format!("{}/", base),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    fn file_part(file: &UploadFile) -> ExtractResult<Part> {
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name.clone());
        match part.mime_str(&file.content_type) {
            Ok(part) => Ok(part),
            Err(_) => {
                log::warn!(
                    "unusable content type {:?} for {}, sending as octet-stream",
                    file.content_type,
                    file.file_name
                );
                Ok(Part::bytes(file.bytes.to_vec())
                    .file_name(file.file_name.clone())
                    .mime_str("application/octet-stream")?)
            }
        }
    }
}

#[async_trait]
impl StatementExtractor for HttpExtractor {
    async fn extract(&self, file: UploadFile) -> ExtractResult<StatementData> {
        if file.is_empty() {
            return Err(ExtractError::MissingFile);
        }

        log::info!(
            "uploading {} ({} bytes, {}) to {}",
            file.file_name,
            file.len(),
            file.content_type,
            self.upload_url
        );

        let form = Form::new().part("file", Self::file_part(&file)?);
        let resp = self.client.post(&self.upload_url).multipart(form).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;

        decode_response(status, &body)
    }

    async fn probe(&self) -> ExtractResult<()> {
        let resp = self.client.get(&self.probe_url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ExtractError::Service {
                status: status.as_u16(),
                detail: format!("probe returned {}", status),
            })
        }
    }
}

/// Interpret a response from the upload endpoint
pub fn decode_response(status: u16, body: &[u8]) -> ExtractResult<StatementData> {
    if (200..300).contains(&status) {
        return serde_json::from_slice::<StatementData>(body)
            .map_err(|e| ExtractError::InvalidResponse { message: e.to_string() });
    }

    let detail = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => {
                UNKNOWN_ERROR.to_string()
            }
            // Validation errors arrive as a list of objects
            Some(other) => other.to_string(),
        },
        Err(_) => UNKNOWN_ERROR.to_string(),
    };

    log::warn!("extraction service returned {}: {}", status, detail);
    Err(ExtractError::Service { status, detail })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Multipart;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use bytes::Bytes;
    use serde_json::{json, Value};

    async fn fake_upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        while let Some(field) = multipart.next_field().await.unwrap() {
            if field.name() != Some("file") {
                continue;
            }
            let name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field.bytes().await.unwrap();

            if name == "notes.txt" {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Invalid file type. Please upload a PDF or an image (PNG, JPG)."})),
                );
            }
            if name == "crash.pdf" {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
            }

            return (
                StatusCode::OK,
                Json(json!({
                    "account_holder": name,
                    "statement_period": content_type,
                    "transactions": [
                        {"date": "2025-01-02", "description": "Salary", "amount": data.len() as f64,
                         "transaction_type": "Credit", "balance": 1000.0},
                        {"date": "2025-01-03", "description": "Rent", "amount": 400.0,
                         "transaction_type": "Debit", "balance": null}
                    ]
                })),
            );
        }
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "file"], "msg": "Field required"}]})),
        )
    }

    async fn spawn_service() -> String {
        let router = Router::new()
            .route("/", get(|| async { Json(json!({"message": "running"})) }))
            .route("/upload", post(fake_upload));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_extract_sends_file_field() {
        let endpoint = spawn_service().await;
        let extractor = HttpExtractor::new(&endpoint, None).unwrap();
        let file = UploadFile::new("march.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.4"));

        let data = extractor.extract(file).await.unwrap();
        assert_eq!(data.account_holder.as_deref(), Some("march.pdf"));
        assert_eq!(data.statement_period.as_deref(), Some("application/pdf"));
        assert_eq!(data.transactions.len(), 2);
        assert_eq!(data.transactions[0].amount, 8.0);
        assert_eq!(data.transactions[1].balance, None);
    }

    #[tokio::test]
    async fn test_extract_camera_capture() {
        let endpoint = spawn_service().await;
        let extractor = HttpExtractor::new(&format!("{}/", endpoint), None).unwrap();
        let data = extractor
            .extract(UploadFile::camera(Bytes::from_static(b"\xff\xd8\xff\xe0")))
            .await
            .unwrap();
        assert_eq!(data.account_holder.as_deref(), Some("capture.jpg"));
        assert_eq!(data.statement_period.as_deref(), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_extract_surfaces_detail() {
        let endpoint = spawn_service().await;
        let extractor = HttpExtractor::new(&endpoint, None).unwrap();
        let file = UploadFile::new("notes.txt", "text/plain", Bytes::from_static(b"hello"));

        let err = extractor.extract(file).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "Invalid file type. Please upload a PDF or an image (PNG, JPG)."
        );
    }

    #[tokio::test]
    async fn test_extract_without_detail_uses_fallback() {
        let endpoint = spawn_service().await;
        let extractor = HttpExtractor::new(&endpoint, None).unwrap();
        let file = UploadFile::new("crash.pdf", "application/pdf", Bytes::from_static(b"%PDF"));

        let err = extractor.extract(file).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "An unknown error occurred.");
    }

    #[tokio::test]
    async fn test_extract_empty_file_is_rejected_locally() {
        // Nothing listens here; the request must never be attempted.
        let extractor = HttpExtractor::new("http://127.0.0.1:1", None).unwrap();
        let file = UploadFile::new("empty.pdf", "application/pdf", Bytes::new());

        let err = extractor.extract(file).await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(err.to_string(), "Please select a PDF file first.");
    }

    #[tokio::test]
    async fn test_extract_unreachable_service() {
        let extractor = HttpExtractor::new("http://127.0.0.1:1", None).unwrap();
        let file = UploadFile::new("march.pdf", "application/pdf", Bytes::from_static(b"%PDF"));

        let err = extractor.extract(file).await.unwrap_err();
        assert!(matches!(err, ExtractError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_probe() {
        let endpoint = spawn_service().await;
        let extractor = HttpExtractor::new(&endpoint, Some(Duration::from_secs(5))).unwrap();
        assert!(extractor.probe().await.is_ok());
    }

    #[test]
    fn test_upload_url() {
        let extractor = HttpExtractor::new(" https://extract.example.com/ ", None).unwrap();
        assert_eq!(extractor.upload_url(), "https://extract.example.com/upload");
    }

    #[test]
    fn test_decode_validation_detail_list() {
        let err = decode_response(422, br#"{"detail":[{"msg":"Field required"}]}"#).unwrap_err();
        assert!(err.to_string().contains("Field required"));
    }

    #[test]
    fn test_decode_non_json_error_body() {
        let err = decode_response(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "An unknown error occurred.");
    }

    #[test]
    fn test_decode_malformed_success_body() {
        let err = decode_response(200, br#"{"rows":[]}"#).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidResponse { .. }));
    }
}
