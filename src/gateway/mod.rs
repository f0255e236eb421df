//! Label generation gateway.
//!
//! Builds the market prompt around the caller's label text, hands it to the
//! configured [`TextGenerator`] and returns the generated label verbatim.
//! Identical inputs may produce different labels; nothing is cached.

pub mod prompt;

use std::sync::Arc;
use std::time::Instant;

use crate::config::{AppConfig, DEFAULT_MAX_INPUT_CHARS, DEFAULT_MAX_LABEL_LINES};
use crate::market::Market;
use crate::upstream::{MessagesClient, TextGenerator, UpstreamError};

/// Error message returned when no credential was found at startup
pub const NOT_CONFIGURED_MESSAGE: &str =
    "API not configured. Set the API key environment variable and restart the server.";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Label text produced by the model, including its `**bold**` markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedLabel(String);

impl GeneratedLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

pub struct LabelGateway {
    generator: Option<Arc<dyn TextGenerator>>,
    max_lines: usize,
    max_input_chars: usize,
}

impl LabelGateway {
    /// Create a gateway around an injected generator.
    ///
    /// `None` means no credential was available; every call then fails with
    /// [`GatewayError::Configuration`] without touching the network.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            max_lines: DEFAULT_MAX_LABEL_LINES,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Line bound written into the prompt
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    /// Build the gateway from configuration, creating a Messages API client
    /// when a credential is present.
    pub fn from_config(config: &AppConfig, api_key: Option<String>) -> Result<Self, UpstreamError> {
        let generator: Option<Arc<dyn TextGenerator>> = match api_key {
            Some(key) => Some(Arc::new(MessagesClient::new(&config.upstream, key)?)),
            None => None,
        };

        Ok(Self::new(generator)
            .with_max_lines(config.checker.max_lines)
            .with_max_input_chars(config.gateway.max_input_chars))
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Generate a replacement label for `market` from the caller's current label.
    pub async fn generate(&self, text: &str, market: Market) -> Result<GeneratedLabel, GatewayError> {
        self.validate(text)?;

        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| GatewayError::Configuration(NOT_CONFIGURED_MESSAGE.to_string()))?;

        let prompt = prompt::build_prompt(market, text, self.max_lines);
        let start = Instant::now();

        let output = generator.complete(&prompt).await.inspect_err(|e| {
            tracing::warn!(
                market = market.slug(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "Label generation failed"
            );
        })?;

        tracing::info!(
            market = market.slug(),
            input_chars = text.chars().count(),
            output_chars = output.chars().count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Label generated"
        );

        Ok(GeneratedLabel(output))
    }

    fn validate(&self, text: &str) -> Result<(), GatewayError> {
        if text.trim().is_empty() {
            return Err(GatewayError::Validation("Label text is required".to_string()));
        }
        if text.chars().count() > self.max_input_chars {
            return Err(GatewayError::Validation(format!(
                "Label text too long (max {} characters)",
                self.max_input_chars
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Records prompts and answers with a canned result
    struct FakeGenerator {
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
        reply: Result<String, u16>,
    }

    impl FakeGenerator {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                reply: Ok(text.to_string()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
                reply: Err(status),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(|status| UpstreamError::Status {
                status,
                message: "overloaded".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_returns_generated_text_verbatim() {
        let fake = FakeGenerator::replying("**Savanna Cider**\n\n**SULFITE**");
        let gateway = LabelGateway::new(Some(fake.clone()));

        let label = gateway.generate("Savanna Cider", Market::Eu).await.unwrap();
        assert_eq!(label.as_str(), "**Savanna Cider**\n\n**SULFITE**");
        assert_eq!(fake.calls.load(Ordering::SeqCst), 1);

        let prompt = fake.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Current label: Savanna Cider"));
        assert!(prompt.contains("In English."));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_calling_upstream() {
        let fake = FakeGenerator::replying("unused");
        let gateway = LabelGateway::new(Some(fake.clone()));

        for text in ["", "   \n\t"] {
            let err = gateway.generate(text, Market::Switzerland).await.unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)));
        }
        assert_eq!(fake.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overlong_text_is_rejected() {
        let fake = FakeGenerator::replying("unused");
        let gateway = LabelGateway::new(Some(fake.clone())).with_max_input_chars(5);

        let err = gateway.generate("Cidre!", Market::Eu).await.unwrap_err();
        assert_eq!(err.to_string(), "Label text too long (max 5 characters)");
        // Counted in characters, not bytes
        assert!(gateway.generate("Äpfel", Market::Eu).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_credential_is_configuration_error() {
        let gateway = LabelGateway::new(None);
        assert!(!gateway.is_configured());

        let err = gateway.generate("Savanna Cider", Market::Switzerland).await.unwrap_err();
        assert!(matches!(err, GatewayError::Configuration(_)));
        assert_eq!(err.to_string(), NOT_CONFIGURED_MESSAGE);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_surfaced() {
        let gateway = LabelGateway::new(Some(FakeGenerator::failing(529)));

        let err = gateway.generate("Cider", Market::Eu).await.unwrap_err();
        assert!(matches!(err, GatewayError::Upstream(UpstreamError::Status { status: 529, .. })));
        assert_eq!(err.to_string(), "Generation service returned 529: overloaded");
    }

    #[tokio::test]
    async fn test_prompt_carries_line_bound() {
        let fake = FakeGenerator::replying("ok");
        let gateway = LabelGateway::new(Some(fake.clone())).with_max_lines(8);

        gateway.generate("Cidre", Market::Switzerland).await.unwrap();
        let prompt = fake.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("at most 8 non-empty lines"));
    }
}
