//! # intentd
//!
//! Natural-language intent interpretation service.
//!
//! intentd forwards chat messages from a calling bot to a local Ollama
//! model, asks it to classify the caller's intent, and relays a structured
//! `{action, response}` command back. The core of the crate is the
//! retry-and-parse orchestration around the model call:
//!
//! 1. build a fixed instruction prompt around the caller's message
//! 2. send it to the model backend as a chat completion
//! 3. parse the reply into a [`models::StructuredCommand`]
//! 4. retry the whole cycle on transient failures, up to a fixed bound
//!
//! Interpretation only classifies intent; nothing is executed on the
//! caller's behalf. IPv4 addresses are masked before any caller text or
//! model output reaches the logs.
//!
//! ## Example
//!
//! ```rust,ignore
//! use intentd::config::ServiceConfig;
//! use intentd::llm::OllamaClient;
//! use intentd::models::InterpretationRequest;
//! use intentd::services::InterpretService;
//! use std::sync::Arc;
//!
//! let config = ServiceConfig::from_env();
//! let provider = Arc::new(OllamaClient::from_config(&config));
//! let service = InterpretService::new(provider, config.retry);
//! let command = service.interpret(&InterpretationRequest {
//!     message: "Agrega mi IP 203.0.113.42".to_string(),
//! })?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod llm;
pub mod models;
pub mod observability;
pub mod security;
pub mod server;
pub mod services;

// Re-exports for convenience
pub use config::{RetryConfig, ServiceConfig};
pub use llm::{ChatMessage, ChatProvider, OllamaClient};
pub use models::{Action, InterpretationRequest, StructuredCommand};
pub use security::mask_ips;
pub use services::InterpretService;

/// Error type for intentd operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait
/// implementations. The retry loop consults [`Error::is_transient`] to
/// decide whether an attempt may be re-run.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When | Class |
/// |---------|-------------|-------|
/// | `Gateway` | Transport error, timeout, or backend error status on the chat call | transient |
/// | `MalformedReply` | Reply content missing or not a valid structured command | transient |
/// | `BackendUnreachable` | Health probe against the backend base address fails | fatal |
/// | `InterpretationExhausted` | Every attempt in the retry loop failed transiently | fatal |
/// | `OperationFailed` | Anything else (listener bind, blocking-task join, serialization) | fatal |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The chat call to the model backend failed.
    ///
    /// Raised when:
    /// - The connection cannot be established
    /// - The request times out
    /// - The backend answers with a non-success status
    #[error("model gateway call failed: {cause}")]
    Gateway {
        /// The underlying cause.
        cause: String,
    },

    /// The model reply could not be turned into a structured command.
    ///
    /// Raised when:
    /// - The reply body lacks the expected content field
    /// - The content is not syntactically valid JSON
    /// - The JSON does not match the `{action, response}` contract
    #[error("malformed model reply: {cause}")]
    MalformedReply {
        /// The underlying cause.
        cause: String,
    },

    /// The backend base endpoint did not answer the reachability probe.
    ///
    /// Only raised by the health surface; never retried.
    #[error("model backend is not reachable: {cause}")]
    BackendUnreachable {
        /// The underlying cause.
        cause: String,
    },

    /// Every attempt in the bounded retry loop failed transiently.
    #[error("unable to interpret the request after {attempts} attempts")]
    InterpretationExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// An operation outside the transient taxonomy failed.
    ///
    /// Surfaced immediately without retry.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Whether the retry loop may re-run the attempt that produced this
    /// error.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Gateway { .. } | Self::MalformedReply { .. })
    }
}

/// Result type alias for intentd operations.
pub type Result<T> = std::result::Result<T, Error>;
