//! Upload endpoint - multipart form from the upload and scan tabs

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Html;
use stmtgrid_core::upload_and_merge;
use stmtgrid_extract::{UploadFile, UploadSource, CAPTURE_FILE_NAME};

use crate::routes::grid::{render_results, render_status};
use crate::{is_htmx_request, render_index, ApiError, AppState};

/// Field carrying the file
const FILE_FIELD: &str = "file";
/// Optional field; `camera` marks a captured frame
const SOURCE_FIELD: &str = "source";

fn multipart_error(error: MultipartError, limit: usize) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::BadRequest { message: error.body_text() }
    }
}

/// Pull the file part out of the form. An empty part counts as no file.
pub async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<Option<UploadFile>, ApiError> {
    let mut file: Option<UploadFile> = None;
    let mut from_camera = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(e, limit))? {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
            if !bytes.is_empty() {
                let file_name = if file_name.is_empty() { "upload".to_string() } else { file_name };
                file = Some(UploadFile::new(file_name, content_type, bytes));
            }
        } else if name == SOURCE_FIELD {
            from_camera = field.text().await.map_err(|e| multipart_error(e, limit))? == "camera";
        }
    }

    Ok(file.map(|mut f| {
        if from_camera || f.file_name == CAPTURE_FILE_NAME {
            f.source = UploadSource::Camera;
        }
        f
    }))
}

/// Extract, merge and answer with the status line
///
/// HTMX requests get the status plus an out-of-band results card; plain
/// form posts get the whole page.
pub async fn htmx_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Html<String>, ApiError> {
    let file = read_upload(multipart, state.config.upload.max_bytes).await?;
    let report = upload_and_merge(&state.workbench, state.extractor.as_ref(), file).await;

    if is_htmx_request(&headers) {
        let bench = state.workbench.read().await;
        let results = render_results(&bench, &state.config.currency, true);
        Ok(Html(format!("{}{}", render_status(&report.status), results)))
    } else {
        Ok(Html(render_index(&state, Some(&report.status)).await))
    }
}
