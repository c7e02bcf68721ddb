//! Chat message validation
//!
//! Structural checks plus a heuristic defense against prompt-injection
//! attempts aimed at a downstream generative backend. The denylist is a
//! fixed product decision: it is checked as literal case-insensitive
//! substrings and is intentionally conservative, so legitimate messages
//! containing one of the phrases are rejected too.

use thiserror::Error;

/// Maximum allowed message length in characters (raw, pre-trim)
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Manipulation phrases rejected regardless of surrounding text
const DENYLIST: [&str; 9] = [
    "ignore previous",
    "system:",
    "assistant:",
    "new instructions",
    "forget everything",
    "jailbreak",
    "prompt injection",
    "override",
    "admin mode",
];

/// Share of non-text characters above which a message is rejected, percent
const MAX_SPECIAL_CHAR_PERCENT: usize = 30;

/// A violated validation rule
///
/// Messages describe the rule generically and never echo the matched
/// content; the offending pattern goes to the audit log only.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    Empty,

    #[error("Message exceeds the maximum length of {MAX_MESSAGE_CHARS} characters")]
    TooLong,

    #[error("Message contains prohibited content")]
    ProhibitedContent,

    #[error("Message contains too many special characters")]
    ExcessiveSpecialCharacters,
}

/// Validates a single inbound chat message
#[derive(Debug, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// Apply the validation rules in order; the first violated rule is the
    /// reported failure. On success the message is returned trimmed.
    pub fn validate(&self, message: &str, client_id: &str) -> Result<String, ValidationError> {
        if message.trim().is_empty() {
            return Err(ValidationError::Empty);
        }

        // Raw length, before trimming
        let total_chars = message.chars().count();
        if total_chars > MAX_MESSAGE_CHARS {
            return Err(ValidationError::TooLong);
        }

        let lowered = message.to_lowercase();
        for pattern in DENYLIST {
            if lowered.contains(pattern) {
                tracing::warn!(
                    client_id,
                    pattern,
                    message_length = total_chars,
                    "Message rejected: prohibited content matched"
                );
                return Err(ValidationError::ProhibitedContent);
            }
        }

        let special_chars = message
            .chars()
            .filter(|c| !c.is_alphanumeric() && !matches!(c, ' ' | '.' | ',' | '!' | '?' | '-'))
            .count();
        if special_chars * 100 > total_chars * MAX_SPECIAL_CHAR_PERCENT {
            return Err(ValidationError::ExcessiveSpecialCharacters);
        }

        Ok(message.trim().to_string())
    }
}
