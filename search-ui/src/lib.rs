//! Debounced book search over an external catalog.
//!
//! - **`services::controller`**: the query pipeline. Text, limit and field
//!   inputs are deduplicated, the text is debounced, and the latest triple is
//!   sent to the catalog. Only the newest request may update the page state.
//! - **`services::catalog`**: HTTP client for the catalog search endpoint.
//! - **`routes`**: the page and the JSON endpoints behind its controls.

pub mod config;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
