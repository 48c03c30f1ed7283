//! Data models for the interpretation pipeline.

use serde::{Deserialize, Serialize};

/// Inbound interpretation request.
///
/// One caller-supplied message, consumed by a single interpretation and
/// discarded afterwards. No length bound is enforced at this layer; the
/// HTTP surface caps the request body size.
#[derive(Debug, Clone, Deserialize)]
pub struct InterpretationRequest {
    /// The natural-language message to interpret.
    pub message: String,
}

/// Closed set of actions the model may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// The caller supplied an IPv4 address to be added to the allowlist.
    AddIp,
    /// The caller needs instructions on finding their IP address.
    GetIp,
    /// Conversational message with no actionable intent.
    SmallTalk,
    /// The message did not match any known action.
    Error,
}

impl Action {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddIp => "add_ip",
            Self::GetIp => "get_ip",
            Self::SmallTalk => "small_talk",
            Self::Error => "error",
        }
    }
}

/// Structured command relayed back to the caller.
///
/// The output contract: `action` drawn from the closed set and a free-text
/// Spanish `response` whose meaning depends on the action (the raw IPv4
/// string for `add_ip`, instructional text for `get_ip`, conversational
/// text for `small_talk`, an apology for `error`). Replies that do not
/// deserialize into this shape are malformed, not valid results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredCommand {
    /// Selected action.
    pub action: Action,
    /// User-facing response text.
    pub response: String,
}
