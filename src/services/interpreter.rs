//! Interpretation orchestration.
//!
//! One attempt runs the full chain from scratch: build the prompt, call
//! the gateway, parse the reply. The retry loop re-runs transient
//! failures up to the configured bound with no partial-state reuse;
//! fatal failures surface immediately regardless of attempts remaining.

use crate::config::RetryConfig;
use crate::llm::{ChatMessage, ChatProvider};
use crate::models::{InterpretationRequest, StructuredCommand};
use crate::security::mask_ips;
use crate::services::{build_interpretation_prompt, parse_command};
use crate::{Error, Result};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Outcome of a single interpretation attempt.
enum Attempt {
    /// The reply parsed into a structured command.
    Success(StructuredCommand),
    /// A retryable failure (gateway or malformed reply).
    Transient(Error),
    /// A failure outside the transient taxonomy.
    Fatal(Error),
}

/// Orchestrates intent interpretation against a chat provider.
///
/// Holds the injected provider and the retry policy; stateless between
/// requests beyond that.
pub struct InterpretService {
    provider: Arc<dyn ChatProvider>,
    retry: RetryConfig,
}

impl InterpretService {
    /// Creates a service around the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn ChatProvider>, retry: RetryConfig) -> Self {
        Self { provider, retry }
    }

    /// Interprets a message, retrying transient failures up to the bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InterpretationExhausted`] after the final
    /// transient failure. Fatal errors surface unchanged from the attempt
    /// that raised them.
    pub fn interpret(&self, request: &InterpretationRequest) -> Result<StructuredCommand> {
        let provider = self.provider.name();
        let span = tracing::info_span!(
            "interpret.request",
            provider = provider,
            status = tracing::field::Empty
        );
        let _enter = span.enter();

        let start = Instant::now();
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;
            match self.attempt(request) {
                Attempt::Success(command) => {
                    span.record("status", "success");
                    Self::record_attempt(provider, "success");
                    Self::record_outcome(provider, "success", start.elapsed());
                    tracing::info!(
                        attempts,
                        "Interpreted command: {}",
                        mask_ips(&serde_json::to_string(&command).unwrap_or_default())
                    );
                    return Ok(command);
                },
                Attempt::Transient(err) => {
                    Self::record_attempt(provider, "transient");
                    tracing::error!(
                        attempt = attempts,
                        max_attempts,
                        error = %mask_ips(&err.to_string()),
                        "Error interpreting request. Retrying..."
                    );
                    if attempts < max_attempts {
                        metrics::counter!("interpret_retries_total", "provider" => provider)
                            .increment(1);
                        if self.retry.backoff_ms > 0 {
                            std::thread::sleep(Duration::from_millis(self.retry.backoff_ms));
                        }
                    }
                },
                Attempt::Fatal(err) => {
                    span.record("status", "fatal");
                    Self::record_attempt(provider, "fatal");
                    Self::record_outcome(provider, "fatal", start.elapsed());
                    tracing::error!(
                        attempt = attempts,
                        error = %mask_ips(&err.to_string()),
                        "Fatal error interpreting request"
                    );
                    return Err(err);
                },
            }
        }

        span.record("status", "exhausted");
        Self::record_outcome(provider, "exhausted", start.elapsed());
        tracing::error!("Failed to interpret the request after {max_attempts} attempts");
        Err(Error::InterpretationExhausted {
            attempts: max_attempts,
        })
    }

    /// Runs one attempt from scratch: fresh prompt, fresh gateway call,
    /// fresh parse.
    fn attempt(&self, request: &InterpretationRequest) -> Attempt {
        tracing::info!("Interpreting message: {}", mask_ips(&request.message));

        let prompt = build_interpretation_prompt(&request.message);
        let reply = match self.provider.chat(&[ChatMessage::user(prompt)]) {
            Ok(reply) => reply,
            Err(err) if err.is_transient() => return Attempt::Transient(err),
            Err(err) => return Attempt::Fatal(err),
        };
        tracing::debug!("Model reply: {}", mask_ips(&reply));

        match parse_command(&reply) {
            Ok(command) => Attempt::Success(command),
            Err(err) if err.is_transient() => Attempt::Transient(err),
            Err(err) => Attempt::Fatal(err),
        }
    }

    /// Probes backend reachability for the health surface. No retries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnreachable`] when the probe fails.
    pub fn check_backend(&self) -> Result<()> {
        self.provider.probe()
    }

    fn record_attempt(provider: &'static str, status: &'static str) {
        metrics::counter!(
            "interpret_attempts_total",
            "provider" => provider,
            "status" => status
        )
        .increment(1);
    }

    fn record_outcome(provider: &'static str, status: &'static str, elapsed: Duration) {
        metrics::counter!(
            "interpret_requests_total",
            "provider" => provider,
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "interpret_duration_ms",
            "provider" => provider,
            "status" => status
        )
        .record(elapsed.as_secs_f64() * 1000.0);
    }
}
