//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines constants for
//! HTTP cache headers, checker and gateway limits, upstream defaults, logging
//! format and default paths. `AppConfig` is the root configuration struct; it is
//! built once at startup and shared read-only.

use const_format::formatcp;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Index page - changes only on deploy
pub const HTTP_CACHE_INDEX_MAX_AGE: u32 = 60;

/// Static assets (CSS, JS) - not fingerprinted, so no immutable hint
pub const HTTP_CACHE_STATIC_MAX_AGE: u32 = 3600;

pub const CACHE_CONTROL_INDEX: &str = formatcp!("public, max-age={}", HTTP_CACHE_INDEX_MAX_AGE);

pub const CACHE_CONTROL_STATIC: &str = formatcp!("public, max-age={}", HTTP_CACHE_STATIC_MAX_AGE);

/// API responses are per-request and never cached
pub const CACHE_CONTROL_API: &str = "no-store";

// =============================================================================
// Checker / Gateway Limits
// =============================================================================

/// Maximum non-empty lines for a label to count as compact.
///
/// Also written into the generation prompt so the model aims for the same bound.
pub const DEFAULT_MAX_LABEL_LINES: usize = 10;

/// Maximum characters of label text accepted by the generation endpoints
pub const DEFAULT_MAX_INPUT_CHARS: usize = 10_000;

// =============================================================================
// Upstream Defaults
// =============================================================================

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.anthropic.com";

pub const DEFAULT_UPSTREAM_MODEL: &str = "claude-opus-4-5-20251101";

pub const DEFAULT_UPSTREAM_MAX_TOKENS: u32 = 2500;

/// Bound on a single generation call, in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the API credential
pub const DEFAULT_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Glob pattern for template files
pub const TEMPLATE_GLOB: &str = "templates/**/*";

/// Directory for static files
pub const STATIC_DIR: &str = "static";

pub const DEFAULT_SITE_NAME: &str = "Label Compliance Agent";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "label_desk=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Text-generation service settings
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub checker: CheckerConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Origins allowed to call `/api/*` cross-origin; `"*"` allows any
    #[serde(default = "HttpServerConfig::default_cors_origins")]
    pub cors_allow_origins: Vec<String>,
    #[serde(default)]
    pub tls: TlsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            cors_allow_origins: Self::default_cors_origins(),
            tls: TlsConfig::default(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    fn default_cors_origins() -> Vec<String> {
        vec!["*".to_string()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Plain HTTP (development, or behind a reverse proxy)
    #[default]
    None,
    /// User-provided certificate and key files
    Manual,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    #[serde(default)]
    pub mode: TlsMode,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
    /// Run a plain HTTP listener that redirects to HTTPS
    #[serde(default)]
    pub redirect_http: bool,
    #[serde(default = "TlsConfig::default_redirect_port")]
    pub redirect_port: u16,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            mode: TlsMode::None,
            cert_path: None,
            key_path: None,
            redirect_http: false,
            redirect_port: Self::default_redirect_port(),
        }
    }
}

impl TlsConfig {
    fn default_redirect_port() -> u16 {
        80
    }
}

/// Text-generation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "UpstreamConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "UpstreamConfig::default_model")]
    pub model: String,
    #[serde(default = "UpstreamConfig::default_max_tokens")]
    pub max_tokens: u32,
    /// Timeout for one generation call in seconds
    #[serde(default = "UpstreamConfig::default_timeout")]
    pub timeout_seconds: u64,
    /// Name of the environment variable holding the credential
    #[serde(default = "UpstreamConfig::default_api_key_env")]
    pub api_key_env: String,
    /// Refuse to start without a credential instead of failing generation requests
    #[serde(default)]
    pub require_api_key: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            timeout_seconds: Self::default_timeout(),
            api_key_env: Self::default_api_key_env(),
            require_api_key: false,
        }
    }
}

impl UpstreamConfig {
    fn default_base_url() -> String {
        DEFAULT_UPSTREAM_BASE_URL.to_string()
    }

    fn default_model() -> String {
        DEFAULT_UPSTREAM_MODEL.to_string()
    }

    fn default_max_tokens() -> u32 {
        DEFAULT_UPSTREAM_MAX_TOKENS
    }

    fn default_timeout() -> u64 {
        DEFAULT_UPSTREAM_TIMEOUT_SECS
    }

    fn default_api_key_env() -> String {
        DEFAULT_API_KEY_ENV.to_string()
    }

    /// Resolve the credential from the process environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the credential through `lookup`; blank values count as absent.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(&self.api_key_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckerConfig {
    /// Maximum non-empty lines for the compact layout check
    #[serde(default = "CheckerConfig::default_max_lines")]
    pub max_lines: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            max_lines: Self::default_max_lines(),
        }
    }
}

impl CheckerConfig {
    fn default_max_lines() -> usize {
        DEFAULT_MAX_LABEL_LINES
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "GatewayConfig::default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_input_chars: Self::default_max_input_chars(),
        }
    }
}

impl GatewayConfig {
    fn default_max_input_chars() -> usize {
        DEFAULT_MAX_INPUT_CHARS
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Site title shown in the header and page title
    #[serde(default = "UiConfig::default_site_name")]
    pub site_name: String,
    #[serde(default = "UiConfig::default_static_dir")]
    pub static_dir: String,
    #[serde(default = "UiConfig::default_template_glob")]
    pub template_glob: String,
    /// Version string, populated at runtime
    #[serde(skip_deserializing, default = "UiConfig::default_version")]
    pub version: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            site_name: Self::default_site_name(),
            static_dir: Self::default_static_dir(),
            template_glob: Self::default_template_glob(),
            version: Self::default_version(),
        }
    }
}

impl UiConfig {
    fn default_site_name() -> String {
        DEFAULT_SITE_NAME.to_string()
    }

    fn default_static_dir() -> String {
        STATIC_DIR.to_string()
    }

    fn default_template_glob() -> String {
        TEMPLATE_GLOB.to_string()
    }

    fn default_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Drain window for in-flight requests on shutdown.
    ///
    /// A generation call may run for the full upstream timeout.
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_seconds)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.checker.max_lines == 0 {
            return Err(ConfigError::Validation(
                "checker.max_lines must be at least 1".to_string(),
            ));
        }
        if self.upstream.timeout_seconds == 0 {
            return Err(ConfigError::Validation(
                "upstream.timeout_seconds must be at least 1".to_string(),
            ));
        }
        if self.upstream.api_key_env.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upstream.api_key_env must name an environment variable".to_string(),
            ));
        }
        if self.http.tls.mode == TlsMode::Manual
            && (self.http.tls.cert_path.is_none() || self.http.tls.key_path.is_none())
        {
            return Err(ConfigError::Validation(
                "http.tls.mode = \"manual\" requires cert_path and key_path".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.http.cors_allow_origins, vec!["*"]);
        assert_eq!(config.http.tls.mode, TlsMode::None);
        assert_eq!(config.upstream.model, DEFAULT_UPSTREAM_MODEL);
        assert_eq!(config.upstream.max_tokens, 2500);
        assert_eq!(config.upstream.timeout_seconds, 60);
        assert!(!config.upstream.require_api_key);
        assert_eq!(config.checker.max_lines, 10);
        assert_eq!(config.gateway.max_input_chars, 10_000);
        assert_eq!(config.ui.site_name, DEFAULT_SITE_NAME);
        assert_eq!(config.ui.version, env!("CARGO_PKG_VERSION"));
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = AppConfig::from_toml(
            r#"
            [http]
            port = 8080
            cors_allow_origins = ["https://labels.example.com"]

            [upstream]
            base_url = "http://127.0.0.1:9999"
            timeout_seconds = 30
            api_key_env = "LABEL_API_KEY"
            require_api_key = true

            [checker]
            max_lines = 8

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.cors_allow_origins, vec!["https://labels.example.com"]);
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.upstream.timeout_seconds, 30);
        assert!(config.upstream.require_api_key);
        assert_eq!(config.checker.max_lines, 8);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_shutdown_grace_follows_upstream_timeout() {
        assert_eq!(AppConfig::default().shutdown_grace(), Duration::from_secs(60));

        let config = AppConfig::from_toml("[upstream]\ntimeout_seconds = 120").unwrap();
        assert_eq!(config.shutdown_grace(), Duration::from_secs(120));
    }

    #[test]
    fn test_zero_line_threshold_is_rejected() {
        let err = AppConfig::from_toml("[checker]\nmax_lines = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_manual_tls_requires_paths() {
        let err = AppConfig::from_toml("[http.tls]\nmode = \"manual\"").unwrap_err();
        assert!(err.to_string().contains("requires cert_path and key_path"));

        let config = AppConfig::from_toml(
            "[http.tls]\nmode = \"manual\"\ncert_path = \"c.pem\"\nkey_path = \"k.pem\"",
        )
        .unwrap();
        assert_eq!(config.http.tls.mode, TlsMode::Manual);
        assert_eq!(config.http.tls.redirect_port, 80);
    }

    #[test]
    fn test_resolve_api_key() {
        let upstream = UpstreamConfig::default();

        let key = upstream.resolve_api_key_with(|name| {
            assert_eq!(name, DEFAULT_API_KEY_ENV);
            Some(" sk-test \n".to_string())
        });
        assert_eq!(key.as_deref(), Some("sk-test"));

        assert_eq!(upstream.resolve_api_key_with(|_| None), None);
        assert_eq!(upstream.resolve_api_key_with(|_| Some("   ".to_string())), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[ui]\nsite_name = \"Cellar Labels\"").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.ui.site_name, "Cellar Labels");
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/label-desk.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = AppConfig::from_toml("[http]\nport = \"eighty\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
