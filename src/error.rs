use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::gateway::GatewayError;
use crate::upstream::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error body shared by every API endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Gateway(GatewayError::Validation(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Gateway(GatewayError::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Gateway(GatewayError::Upstream(UpstreamError::Timeout(_))) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Gateway(GatewayError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Template(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Template(_) | AppError::Internal(_) => {
                tracing::error!("Internal error: {:?}", self);
                "Internal server error".to_string()
            }
            AppError::Gateway(GatewayError::Configuration(_)) => {
                tracing::error!("Generation requested but no API key is configured");
                self.to_string()
            }
            AppError::Gateway(GatewayError::Upstream(_)) => {
                tracing::warn!(status = status.as_u16(), error = %self, "Upstream failure");
                self.to_string()
            }
            _ => {
                tracing::debug!(status = status.as_u16(), error = %self, "Rejected request");
                self.to_string()
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
