//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use label_desk::config::{AppConfig, TEMPLATE_GLOB};
use label_desk::gateway::LabelGateway;
use label_desk::routes::create_router;
use label_desk::state::AppState;
use label_desk::templates::init_templates;
use label_desk::upstream::{TextGenerator, UpstreamError};

/// Generator that answers every prompt with a fixed result and counts calls
pub struct FakeGenerator {
    pub calls: AtomicUsize,
    reply: Result<String, UpstreamErrorKind>,
}

#[derive(Clone, Copy)]
pub enum UpstreamErrorKind {
    Timeout,
    Empty,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: Ok(text.to_string()),
        })
    }

    pub fn failing(kind: UpstreamErrorKind) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: Err(kind),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn complete(&self, _prompt: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(UpstreamErrorKind::Timeout) => Err(UpstreamError::Timeout(60)),
            Err(UpstreamErrorKind::Empty) => Err(UpstreamError::EmptyResponse),
        }
    }
}

/// Router over default configuration with the given generator
pub fn test_app(generator: Option<Arc<dyn TextGenerator>>) -> Router {
    test_app_with_config(AppConfig::default(), generator)
}

pub fn test_app_with_config(config: AppConfig, generator: Option<Arc<dyn TextGenerator>>) -> Router {
    let tera = init_templates(TEMPLATE_GLOB).expect("templates should load");
    let gateway = LabelGateway::new(generator).with_max_lines(config.checker.max_lines);
    create_router(AppState::new(config, tera, gateway))
}

pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
