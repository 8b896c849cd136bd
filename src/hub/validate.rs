//! Syntactic validation for usernames and message content
//!
//! Validation failures are recoverable: they are returned as [`Rejection`]
//! values with a reason the caller can display, and the caller may retry
//! with corrected input.

use super::config::HubConfig;
use super::reject::Rejection;

/// Names that can never be registered, matched case-insensitively
pub const RESERVED_NAMES: &[&str] = &["admin", "root", "system", "server"];

/// Validate a username against the configured rules
///
/// Rules: length within the configured bounds, leading ASCII letter, ASCII
/// letters/digits/underscore only, not a reserved name.
pub fn check_username(name: &str, config: &HubConfig) -> Result<(), Rejection> {
    let len = name.chars().count();

    if len < config.min_username_len {
        return Err(Rejection::InvalidName(format!(
            "name must be at least {} characters",
            config.min_username_len
        )));
    }

    if len > config.max_username_len {
        return Err(Rejection::InvalidName(format!(
            "name must be at most {} characters",
            config.max_username_len
        )));
    }

    let first = name.chars().next().unwrap_or('\0');
    if !first.is_ascii_alphabetic() {
        return Err(Rejection::InvalidName(
            "name must start with a letter".to_string(),
        ));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Rejection::InvalidName(
            "name may only contain letters, digits and underscore".to_string(),
        ));
    }

    if RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name)) {
        return Err(Rejection::InvalidName(format!("'{}' is a reserved name", name)));
    }

    Ok(())
}

/// Validate message content against the configured rules
///
/// Content must be non-empty after trimming, within the length ceiling, and
/// free of NUL and carriage-return bytes. The content itself is stored
/// untrimmed; trimming is only used for the emptiness check.
pub fn check_content(content: &str, config: &HubConfig) -> Result<(), Rejection> {
    if content.trim().is_empty() {
        return Err(Rejection::InvalidContent(
            "message cannot be empty".to_string(),
        ));
    }

    if content.chars().count() > config.max_message_len {
        return Err(Rejection::InvalidContent(format!(
            "message too long (max {} characters)",
            config.max_message_len
        )));
    }

    if content.bytes().any(|b| b == 0 || b == b'\r') {
        return Err(Rejection::InvalidContent(
            "message contains forbidden control characters".to_string(),
        ));
    }

    Ok(())
}
