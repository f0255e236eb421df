//! Shared application state for request handlers.

use std::sync::Arc;
use tera::Tera;

use crate::checker::ComplianceChecker;
use crate::config::AppConfig;
use crate::gateway::LabelGateway;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Everything here is read-only after startup; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub gateway: Arc<LabelGateway>,
    pub checker: ComplianceChecker,
}

impl AppState {
    /// Creates a new application state; the checker threshold comes from `config`.
    pub fn new(config: AppConfig, tera: Tera, gateway: LabelGateway) -> Self {
        let checker = ComplianceChecker::new(config.checker.max_lines);
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            gateway: Arc::new(gateway),
            checker,
        }
    }
}
