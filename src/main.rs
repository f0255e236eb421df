//! Label Desk: beverage label generation and compliance checklist service.
//!
//! This is the application entry point. It initializes tracing, loads configuration
//! from a TOML file, resolves the API credential, builds the label gateway, sets up
//! the Axum router and starts the HTTP server.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use label_desk::config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use label_desk::gateway::LabelGateway;
use label_desk::http::start_server;
use label_desk::routes::create_router;
use label_desk::state::AppState;
use label_desk::templates::init_templates;

/// Label Desk: generate and check beverage labels for Swiss and EU markets
#[derive(Parser, Debug)]
#[command(name = "label-desk", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "label_desk=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration before tracing so the log format can be honoured
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(path = %args.config, "Loaded configuration");

    // Resolve the credential once; the gateway owns it from here on
    let api_key = config.upstream.resolve_api_key();
    match &api_key {
        Some(_) => tracing::info!(
            env = %config.upstream.api_key_env,
            model = %config.upstream.model,
            timeout_secs = config.upstream.timeout_seconds,
            "API key configured"
        ),
        None if config.upstream.require_api_key => {
            tracing::error!(env = %config.upstream.api_key_env, "API key not set");
            return Err(ConfigError::Validation(format!(
                "{} is not set and upstream.require_api_key = true",
                config.upstream.api_key_env
            ))
            .into());
        }
        None => tracing::warn!(
            env = %config.upstream.api_key_env,
            "API key not set; label generation is disabled, checklist endpoints still work"
        ),
    }

    let gateway = LabelGateway::from_config(&config, api_key)?;

    let tera = init_templates(&config.ui.template_glob)?;
    tracing::info!("Initialized templates");

    tracing::info!(
        max_lines = config.checker.max_lines,
        "Compliance checker ready"
    );

    let http = config.http.clone();
    let shutdown_grace = config.shutdown_grace();
    let state = AppState::new(config, tera, gateway);
    let app = create_router(state);

    start_server(app, &http, shutdown_grace).await?;

    Ok(())
}
