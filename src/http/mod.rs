//! HTTP server module with optional TLS.
//!
//! Two modes:
//! - **None (default)**: Plain HTTP, for development or behind a reverse proxy
//! - **Manual**: User-provided certificate and key files
//!
//! The server includes:
//! - HTTP to HTTPS redirect (when TLS enabled)
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Certificate hot-reload via SIGHUP

mod redirect;
mod server;
mod shutdown;
pub mod static_files;

pub use server::{start_server, ServerError};
