//! Upload routes - File and camera uploads
//!
//! Structure:
//! - api.rs: Multipart upload endpoint
//! - page.rs: Upload panel and camera script

pub mod api;
pub mod page;

pub use api::htmx_upload;
pub use page::render_upload_panel;
