//! Grid routes - Sortable table, summary, export and clear
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: HTML fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_summary,
    api_transactions,
    export_csv,
    htmx_grid_clear,
    htmx_grid_list,
    htmx_grid_summary,
};

pub use page::{render_grid, render_results, render_status, render_summary};
