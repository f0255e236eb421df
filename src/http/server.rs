//! HTTP/HTTPS server startup logic.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;

use crate::config::{HttpServerConfig, TlsConfig, TlsMode};

use super::redirect;
use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("Failed to load TLS configuration: {0}")]
    TlsConfig(String),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Start the HTTP/HTTPS server based on configuration.
///
/// This function blocks until the server shuts down. In-flight requests get
/// up to `shutdown_grace` to finish once a shutdown signal arrives.
pub async fn start_server(
    app: Router,
    http: &HttpServerConfig,
    shutdown_grace: Duration,
) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", http.host, http.port)
        .parse()
        .map_err(|e| ServerError::Address(format!("{}:{}: {}", http.host, http.port, e)))?;

    let handle = Handle::new();

    match http.tls.mode {
        TlsMode::None => start_plain_server(app, addr, handle, shutdown_grace).await,
        TlsMode::Manual => {
            start_manual_tls_server(app, addr, &http.tls, handle, shutdown_grace).await
        }
    }
}

/// Start a plain HTTP server (no TLS).
async fn start_plain_server(
    app: Router,
    addr: SocketAddr,
    handle: Handle,
    shutdown_grace: Duration,
) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server (no TLS)");

    shutdown::setup_shutdown_handler(handle.clone(), shutdown_grace);

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

/// Start HTTPS server with user-provided certificates.
async fn start_manual_tls_server(
    app: Router,
    addr: SocketAddr,
    tls: &TlsConfig,
    handle: Handle,
    shutdown_grace: Duration,
) -> Result<(), ServerError> {
    let (cert_path, key_path) = match (&tls.cert_path, &tls.key_path) {
        (Some(cert), Some(key)) => (cert.clone(), key.clone()),
        _ => {
            return Err(ServerError::TlsConfig(
                "manual TLS requires cert_path and key_path".to_string(),
            ))
        }
    };

    tracing::info!(%addr, cert = %cert_path, key = %key_path, "Starting HTTPS server (manual certs)");

    // reqwest pulls in ring; pin the process-wide provider before rustls picks one
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let rustls_config = RustlsConfig::from_pem_file(&cert_path, &key_path)
        .await
        .map_err(|e| ServerError::TlsConfig(format!("Failed to load certificates: {}", e)))?;

    shutdown::setup_shutdown_handler(handle.clone(), shutdown_grace);
    shutdown::setup_reload_handler(rustls_config.clone(), cert_path, key_path);

    if tls.redirect_http {
        redirect::spawn_redirect_server(tls.redirect_port, addr.port());
    }

    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
