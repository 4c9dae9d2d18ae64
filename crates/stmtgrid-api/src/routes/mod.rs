//! Route modules for the server
//!
//! - upload: File and camera uploads
//! - grid: Table, summary, export and clear
//! - settings: Configuration display
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML rendering

pub mod grid;
pub mod settings;
pub mod upload;
