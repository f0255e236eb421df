//! Handler for the browser front end.

use axum::{extract::State, response::Html};
use serde::Serialize;
use tracing::instrument;

use crate::error::AppError;
use crate::market::Market;
use crate::state::AppState;

/// Market entry rendered into the page
#[derive(Debug, Serialize)]
struct MarketView {
    slug: &'static str,
    name: &'static str,
    regulation: &'static str,
    languages: &'static [&'static str],
}

impl From<Market> for MarketView {
    fn from(market: Market) -> Self {
        Self {
            slug: market.slug(),
            name: market.display_name(),
            regulation: market.regulation(),
            languages: market.languages(),
        }
    }
}

/// Index page with the label editor.
#[instrument(name = "home::index", skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let markets: Vec<MarketView> = Market::ALL.into_iter().map(MarketView::from).collect();

    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("markets", &markets);
    context.insert("generation_enabled", &state.gateway.is_configured());
    context.insert("max_lines", &state.checker.max_lines());

    let html = state.tera.render("index.html", &context)?;
    Ok(Html(html))
}
