//! Label generation and checklist endpoints.
//!
//! Both endpoint families are parameterized by [`Market`]; the router binds
//! one route per market slug to the same handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{post, MethodRouter},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checker::ComplianceReport;
use crate::error::AppError;
use crate::market::Market;
use crate::state::AppState;

/// Request body for both endpoint families
#[derive(Debug, Default, Deserialize)]
pub struct LabelRequest {
    /// Current label text; a missing field is treated as empty
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub output: String,
}

/// `POST /api/generate-{slug}` for `market`
pub fn generate_route(market: Market) -> MethodRouter<AppState> {
    post(
        move |state: State<AppState>, payload: Result<Json<LabelRequest>, JsonRejection>| async move {
            generate(state, market, payload).await
        },
    )
}

/// `POST /api/validate-{slug}` for `market`
pub fn validate_route(market: Market) -> MethodRouter<AppState> {
    post(
        move |state: State<AppState>, payload: Result<Json<LabelRequest>, JsonRejection>| async move {
            validate(state, market, payload).await
        },
    )
}

/// Generate a compliant label for `market` from the submitted text.
#[instrument(name = "label::generate", skip(state, market, payload), fields(market = market.slug()))]
pub async fn generate(
    State(state): State<AppState>,
    market: Market,
    payload: Result<Json<LabelRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;

    let label = state.gateway.generate(&request.text, market).await?;

    Ok(Json(GenerateResponse {
        output: label.into_inner(),
    }))
}

/// Run the keyword checklist for `market` over the submitted text.
#[instrument(name = "label::validate", skip(state, market, payload), fields(market = market.slug()))]
pub async fn validate(
    State(state): State<AppState>,
    market: Market,
    payload: Result<Json<LabelRequest>, JsonRejection>,
) -> Result<Json<ComplianceReport>, AppError> {
    let Json(request) = payload?;

    let report = state.checker.check(&request.text, market);
    tracing::debug!(
        passed = report.passed,
        total = report.total,
        compliant = report.compliant,
        "Checklist evaluated"
    );

    Ok(Json(report))
}
