//! Label Desk - beverage label generation and keyword compliance checks.
//!
//! Two independent request handlers sit behind a small axum API:
//! - the **gateway** turns current label text into a replacement label for a
//!   target market by prompting a hosted text-generation service
//! - the **checker** scores label text against a static keyword table per
//!   market and a couple of layout heuristics

pub mod checker;
pub mod config;
pub mod emphasis;
pub mod error;
pub mod gateway;
pub mod http;
pub mod market;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod templates;
pub mod upstream;

pub use error::AppError;
pub use market::Market;
