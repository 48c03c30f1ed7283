//! Model gateway abstraction.
//!
//! Provides the chat-call seam between the interpretation pipeline and the
//! model backend. The gateway performs exactly one call per invocation;
//! retrying is the orchestrator's concern.

mod ollama;

pub use ollama::OllamaClient;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single chat message sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`user`, `assistant`, `system`).
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user-role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Trait for chat-completion backends.
pub trait ChatProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Sends a chat request and returns the reply content.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Gateway`] for transport errors, timeouts,
    /// and backend-side error responses; [`crate::Error::MalformedReply`]
    /// when the reply body lacks the expected content field.
    fn chat(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Probes the backend base endpoint for reachability.
    ///
    /// A plain request with no payload; never retried.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::BackendUnreachable`] if the probe fails.
    fn probe(&self) -> Result<()>;
}

/// HTTP client configuration for gateway requests.
#[derive(Debug, Clone, Copy)]
pub struct LlmHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for LlmHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl LlmHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("INTENTD_LLM_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("INTENTD_LLM_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for gateway requests with configured
/// timeouts.
#[must_use]
pub fn build_http_client(config: LlmHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build gateway HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
