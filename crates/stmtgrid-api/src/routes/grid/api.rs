//! Grid endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_transactions: Filtered/sorted rows (JSON)
//! - api_summary: Totals and last statement (JSON)
//! - htmx_grid_list: Table (HTML fragment)
//! - htmx_grid_summary: Summary (HTML fragment)
//! - htmx_grid_clear: Clear rows (HTMX)
//! - export_csv: CSV attachment of the current view

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use stmtgrid_core::{GridQuery, Status, SummaryResponse, TransactionsResponse};
use stmtgrid_utils::export_file_name;

use super::page::{render_grid, render_results, render_status, render_summary};
use crate::{ApiError, AppState};

pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<TransactionsResponse> {
    let query = GridQuery::from_params(&params);
    let bench = state.workbench.read().await;
    Json(bench.transactions_response(&query))
}

pub async fn api_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let bench = state.workbench.read().await;
    Json(bench.summary_response())
}

pub async fn htmx_grid_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let query = GridQuery::from_params(&params);
    let bench = state.workbench.read().await;
    Html(render_grid(&bench, &query, &state.config.currency))
}

pub async fn htmx_grid_summary(State(state): State<AppState>) -> Html<String> {
    let bench = state.workbench.read().await;
    Html(render_summary(&bench, &state.config.currency))
}

/// Clear every row; returns the status line plus the hidden results card
pub async fn htmx_grid_clear(State(state): State<AppState>) -> Html<String> {
    let mut bench = state.workbench.write().await;
    let dropped = bench.row_count();
    bench.clear();
    log::info!("Grid cleared ({} rows dropped)", dropped);

    Html(format!(
        "{}{}",
        render_status(&Status::cleared()),
        render_results(&bench, &state.config.currency, true)
    ))
}

/// Download the rows the grid currently shows
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let query = GridQuery::from_params(&params);
    let csv = state.workbench.read().await.export_csv(&query)?;
    let file_name = export_file_name(chrono::Utc::now().date_naive());
    log::info!("Exporting {} as CSV", file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
        ],
        csv,
    )
        .into_response())
}
