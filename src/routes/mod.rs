//! HTTP route handlers.
//!
//! The JSON API lives under `/api`, carries CORS headers for cross-origin
//! front ends and is never cached. The index page and static assets get
//! short public cache lifetimes.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;
pub mod label;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    middleware,
    routing::get,
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_API, CACHE_CONTROL_INDEX, CACHE_CONTROL_STATIC};
use crate::error::AppError;
use crate::http::static_files::create_static_service;
use crate::market::Market;
use crate::middleware::{preflight_no_content, request_id_layer};
use crate::state::AppState;

/// Build the CORS layer for `/api` from the configured origins.
///
/// `"*"` anywhere in the list allows any origin. Entries that are not valid
/// header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

async fn not_found() -> AppError {
    AppError::NotFound
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    let mut label_routes = Router::new();
    for market in Market::ALL {
        label_routes = label_routes
            .route(
                &format!("/generate-{}", market.slug()),
                label::generate_route(market),
            )
            .route(
                &format!("/validate-{}", market.slug()),
                label::validate_route(market),
            );
    }

    // API - never cached, cross-origin JSON
    let api_routes = label_routes
        .route("/health", get(health::api_health))
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_API),
        ))
        .layer(cors_layer(&state.config.http.cors_allow_origins))
        .layer(middleware::from_fn(preflight_no_content));

    // Index page - short cache, changes only on deploy
    let home_routes = Router::new().route("/", get(home::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_INDEX),
        ),
    );

    // Static files
    let static_routes = Router::new()
        .nest_service("/static", create_static_service(&state.config.ui.static_dir))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .nest("/api", api_routes)
        .merge(home_routes)
        .merge(static_routes)
        .merge(health_routes)
        .fallback(not_found)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
