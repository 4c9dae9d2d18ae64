//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::upload: File and camera uploads
//! - routes::grid: Table, summary, CSV export and clear
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use stmtgrid_config::Config;
use stmtgrid_core::{Status, Workbench};
use stmtgrid_extract::ExtractorRef;
use stmtgrid_utils::escape_html;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub workbench: Arc<RwLock<Workbench>>,
    pub extractor: ExtractorRef,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, extractor: ExtractorRef) -> Self {
        Self {
            workbench: Arc::new(RwLock::new(Workbench::from_config(&config))),
            extractor,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::grid::{api_summary, api_transactions, export_csv, htmx_grid_clear, htmx_grid_list, htmx_grid_summary};
    use routes::settings::{api_settings, page_settings};
    use routes::upload::htmx_upload;

    let body_limit = state.config.upload.max_bytes;
    let cors = cors_layer(&state.config.server.cors_origins);

    let router = Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/health/extractor", get(api_health_extractor))
        .route("/api/transactions", get(api_transactions))
        .route("/api/summary", get(api_summary))
        .route("/api/settings", get(api_settings))
        // Pages
        .route("/", get(index_page))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/upload", post(htmx_upload))
        .route("/grid/list", get(htmx_grid_list))
        .route("/grid/summary", get(htmx_grid_summary))
        .route("/grid/clear", post(htmx_grid_clear))
        .route("/export.csv", get(export_csv))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// CORS for the configured origins; unparsable origins are skipped
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST]),
    )
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Whether the extraction service answers
async fn api_health_extractor(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let endpoint = state.config.extractor.endpoint.clone();
    match state.extractor.probe().await {
        Ok(()) if is_htmx_request(&headers) => Html("reachable".to_string()).into_response(),
        Ok(()) => Json(serde_json::json!({ "reachable": true, "endpoint": endpoint })).into_response(),
        Err(e) => {
            log::warn!("Extraction service probe failed: {}", e);
            if is_htmx_request(&headers) {
                Html(format!("unreachable: {}", escape_html(&e.to_string()))).into_response()
            } else {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({
                        "reachable": false,
                        "endpoint": endpoint,
                        "detail": e.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ display: none; }}
        .htmx-request .htmx-indicator {{ display: flex; }}
        .htmx-request.htmx-indicator {{ display: flex; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        escape_html(title),
        content
    )
}

/// Top bar with the application title
pub fn header_bar(app_title: &str) -> String {
    format!(
        r#"<header class='bg-white border-b'>
    <div class='max-w-5xl mx-auto px-6 py-4 flex items-center justify-between'>
        <a href='/' class='text-xl font-bold text-indigo-600'>{}</a>
        <a href='/settings' class='text-sm text-gray-600 hover:text-indigo-600'>Settings</a>
    </div>
</header>"#,
        escape_html(app_title)
    )
}

fn main_container(inner_content: &str) -> String {
    format!(r#"<main class='max-w-5xl mx-auto p-6'>{}</main>"#, inner_content)
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, inner_content: &str, app_title: &str) -> String {
    let main = main_container(inner_content);
    if is_htmx_request(headers) {
        main
    } else {
        base_html(
            &format!("{} - {}", title, app_title),
            &format!("{}{}", header_bar(app_title), main),
        )
    }
}

/// Full upload page: status line, upload panel, results card
pub async fn render_index(state: &AppState, status: Option<&Status>) -> String {
    let app_title = &state.config.grid.page_title;
    let bench = state.workbench.read().await;

    let inner_content = format!(
        r#"<div id='status' class='mb-4'>{}</div>
        {}
        {}"#,
        status.map(routes::grid::render_status).unwrap_or_default(),
        routes::upload::render_upload_panel(),
        routes::grid::render_results(&bench, &state.config.currency, false)
    );

    base_html(app_title, &format!("{}{}", header_bar(app_title), main_container(&inner_content)))
}

/// Index page
async fn index_page(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state, None).await)
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl-C.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_addr();
    let upload_url = state.config.upload_url();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting server on http://{}", addr);
    log::info!("Uploads are forwarded to {}", upload_url);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
