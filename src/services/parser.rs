//! Model reply parsing.

use crate::models::StructuredCommand;
use crate::{Error, Result};

/// Parses model reply content into a structured command.
///
/// Tolerates markdown fences and surrounding prose by extracting the
/// outermost JSON object first. A reply that does not deserialize into
/// the `{action, response}` contract with a known action is a
/// [`Error::MalformedReply`] and eligible for retry.
pub fn parse_command(content: &str) -> Result<StructuredCommand> {
    let json_str = extract_json_from_reply(content);
    serde_json::from_str(json_str).map_err(|e| Error::MalformedReply {
        cause: format!("invalid command JSON: {e}"),
    })
}

/// Extracts JSON from a reply that may contain markdown code blocks or
/// extra text.
fn extract_json_from_reply(reply: &str) -> &str {
    let trimmed = reply.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle ``` ... ``` blocks (without json marker)
    if let Some(start) = trimmed.find("```") {
        let content_start = start + 3;
        // Skip language identifier if present (e.g., "json\n")
        let after_marker = &trimmed[content_start..];
        let json_start = after_marker
            .find('{')
            .map_or(content_start, |pos| content_start + pos);
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle raw JSON (find first { to last })
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
