//! Configuration management.
//!
//! Everything here is read once at process start, treated as read-only
//! afterwards, and injected explicitly into the services that need it.
//! There are no module-level globals.

use crate::llm::LlmHttpConfig;

/// Default Ollama backend base address.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama3";

/// Default bind address for the HTTP surface.
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// Process-wide service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Ollama backend base address.
    pub ollama_url: String,
    /// Model identifier passed on every chat call.
    pub model: String,
    /// HTTP client settings for gateway requests.
    pub http: LlmHttpConfig,
    /// Retry policy for the interpretation loop.
    pub retry: RetryConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            http: LlmHttpConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from environment variables.
    ///
    /// Reads `OLLAMA_API_URL` and `OLLAMA_MODEL` for the backend, plus the
    /// `INTENTD_*` overrides for timeouts and retry policy. Unset variables
    /// fall back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            ollama_url: std::env::var("OLLAMA_API_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string()),
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            http: LlmHttpConfig::from_env(),
            retry: RetryConfig::from_env(),
        }
    }

    /// Sets the backend base address.
    #[must_use]
    pub fn with_ollama_url(mut self, url: impl Into<String>) -> Self {
        self.ollama_url = url.into();
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Retry policy for the interpretation loop.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Total attempts before the loop reports exhaustion.
    pub max_attempts: u32,
    /// Sleep between transient failures in milliseconds (0 disables).
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 0,
        }
    }
}

impl RetryConfig {
    /// Loads retry configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("INTENTD_MAX_ATTEMPTS") {
            if let Ok(parsed) = v.parse::<u32>() {
                self.max_attempts = parsed.max(1);
            }
        }
        if let Ok(v) = std::env::var("INTENTD_RETRY_BACKOFF_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.backoff_ms = parsed;
            }
        }
        self
    }
}
