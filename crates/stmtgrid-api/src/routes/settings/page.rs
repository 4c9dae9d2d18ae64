//! Settings page rendering - Full page endpoints

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use stmtgrid_utils::escape_html;

use crate::AppState;

pub async fn page_settings(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let config = &state.config;

    let timeout = config
        .extractor
        .timeout_secs
        .map(|s| format!("{} s", s))
        .unwrap_or_else(|| "none".to_string());

    let cors = if config.server.cors_origins.is_empty() {
        "same origin only".to_string()
    } else {
        config.server.cors_origins.join(", ")
    };

    let inner_content = format!(
        r#"<div class='mb-6 flex items-center justify-between'><h2 class='text-2xl font-bold'>Settings</h2><a href='/' class='text-sm text-indigo-600 hover:underline'>Back to upload</a></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Listen address</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>CORS origins</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Extraction service</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Upload URL</p><p class='font-medium break-all'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Timeout</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Upload limit</p><p class='font-medium'>{} bytes</p></div>
                <div><p class='text-sm text-gray-500'>Reachable</p><p class='font-medium' hx-get='/api/health/extractor' hx-trigger='load'>checking...</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Grid</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Merge mode</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Currency</p><p class='font-medium'>{} ({} decimals)</p></div>
            </div>
        </div>"#,
        escape_html(&config.bind_addr()),
        escape_html(&cors),
        escape_html(&config.upload_url()),
        timeout,
        config.upload.max_bytes,
        config.grid.merge_mode,
        escape_html(&config.currency.symbol),
        config.currency.decimal_places
    );

    Html(crate::page_response(&headers, "Settings", &inner_content, &config.grid.page_title))
}
