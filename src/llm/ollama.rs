//! Ollama (local) gateway client.

use super::{ChatMessage, ChatProvider, LlmHttpConfig, build_http_client};
use crate::config::{DEFAULT_MODEL, DEFAULT_OLLAMA_URL, ServiceConfig};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ollama chat client.
///
/// Holds the backend base address, the model identifier, and a blocking
/// HTTP client. Cheap to clone behind an `Arc`; one instance serves the
/// whole process.
pub struct OllamaClient {
    /// Backend base address.
    endpoint: String,
    /// Model passed on every chat call.
    model: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl OllamaClient {
    /// Creates a new client from `OLLAMA_API_URL` / `OLLAMA_MODEL`,
    /// falling back to the defaults if unset.
    #[must_use]
    pub fn new() -> Self {
        let endpoint =
            std::env::var("OLLAMA_API_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            endpoint,
            model,
            client: build_http_client(LlmHttpConfig::from_env()),
        }
    }

    /// Creates a client from an already-loaded service configuration.
    #[must_use]
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            endpoint: config.ollama_url.clone(),
            model: config.model.clone(),
            client: build_http_client(config.http),
        }
    }

    /// Sets the backend base address.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets HTTP client timeouts for gateway requests.
    #[must_use]
    pub fn with_http_config(mut self, config: LlmHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatProvider for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.endpoint))
            .json(&request)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    provider = "ollama",
                    model = %self.model,
                    error = %e,
                    error_kind = error_kind,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    "Chat request failed"
                );
                Error::Gateway {
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            tracing::error!(
                provider = "ollama",
                model = %self.model,
                status = %status,
                "Chat API returned error status"
            );
            return Err(Error::Gateway {
                cause: format!("API returned status: {status} - {body}"),
            });
        }

        let response: ChatResponse = response.json().map_err(|e| {
            tracing::error!(
                provider = "ollama",
                model = %self.model,
                error = %e,
                "Chat reply is missing the message content"
            );
            Error::MalformedReply {
                cause: format!("reply content field missing: {e}"),
            }
        })?;

        Ok(response.message.content)
    }

    fn probe(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|e| Error::BackendUnreachable {
                cause: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::BackendUnreachable {
                cause: format!("probe returned status: {}", response.status()),
            })
        }
    }
}

/// Request to the Chat API.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Response from the Chat API.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}
