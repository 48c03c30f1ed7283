//! IPv4 masking.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]
//!
//! Redacts IPv4 dotted quads from text destined for the logs.

use regex::Regex;
use std::sync::LazyLock;

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("static regex: IPv4 pattern")
});

/// Masks every IPv4 dotted quad in `text`, leaving all other content
/// byte-for-byte unchanged.
///
/// `203.0.113.42` becomes `203.****.***.42`. The replacement contains no
/// digit sequences that re-match the pattern, so the transform is
/// idempotent.
#[must_use]
pub fn mask_ips(text: &str) -> String {
    IPV4_REGEX
        .replace_all(text, |caps: &regex::Captures<'_>| mask_quad(&caps[0]))
        .into_owned()
}

/// Masks a single dotted quad, keeping the first and last octet.
///
/// Tokens that do not split into exactly four parts are returned
/// unchanged. The pattern guarantees four parts, so this is a fallback
/// only.
fn mask_quad(ip: &str) -> String {
    let parts: Vec<&str> = ip.split('.').collect();
    if let [first, _, _, last] = parts.as_slice() {
        format!("{first}.****.***.{last}")
    } else {
        ip.to_string()
    }
}
