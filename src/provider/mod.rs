//! Generative provider adapters
//!
//! Each backend is wrapped in an adapter satisfying one capability
//! interface: report availability, generate an answer from a prompt plus
//! context. Shared behavior (system prompt, token budgeting) lives in
//! utilities, not a base type; adapters are selected as trait objects.

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod router;

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use router::ProviderRouter;

use async_trait::async_trait;
use thiserror::Error;

/// Failure of a generative backend call
///
/// Raw upstream error text is logged but never surfaced to the caller.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider {0} is not configured")]
    NotConfigured(&'static str),

    #[error("No generative provider is available")]
    NoneAvailable,

    #[error("Request to {provider} timed out after {timeout_seconds} seconds")]
    Timeout {
        provider: &'static str,
        timeout_seconds: u64,
    },

    #[error("Network error calling {provider}: {reason}")]
    Network {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider} rejected the request: {reason}")]
    Rejected {
        provider: &'static str,
        reason: String,
    },
}

/// Uniform capability over one external generative backend
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Short backend name used in logs and errors
    fn name(&self) -> &'static str;

    /// True iff the backend's credential was present at startup
    fn is_available(&self) -> bool;

    /// Produce an answer for `prompt` grounded in `context`
    ///
    /// `context` is expected to be pre-truncated to the configured token
    /// budget; adapters pass it into the fixed system prompt unchanged.
    async fn generate_response(&self, prompt: &str, context: &str)
    -> Result<String, ProviderError>;
}

/// Fixed system instructions framing the assistant
///
/// Shared verbatim by all three adapters: third-person persona for the
/// portfolio owner, scope restricted to the supplied context, structured
/// text output. Only the owner name and context are interpolated; the
/// template itself is not user-controllable.
pub fn system_prompt(owner_name: &str, context: &str) -> String {
    format!(
        "You are the portfolio assistant for {owner}. Answer questions about {owner} \
         in the third person. Base every answer strictly on the portfolio information \
         below and do not discuss anything outside of it. If the information does not \
         contain the answer, say so politely. Respond with structured text: short \
         paragraphs, and hyphenated lists where they help.\n\n\
         Portfolio information:\n{context}",
        owner = owner_name,
        context = context,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_frames_third_person_persona() {
        let prompt = system_prompt("Quang Tran", "Projects:\n- Demo: a demo");
        assert!(prompt.contains("portfolio assistant for Quang Tran"));
        assert!(prompt.contains("in the third person"));
        assert!(prompt.contains("strictly on the portfolio information"));
        assert!(prompt.ends_with("Projects:\n- Demo: a demo"));
    }

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::Timeout {
            provider: "gemini",
            timeout_seconds: 30,
        };
        assert_eq!(
            err.to_string(),
            "Request to gemini timed out after 30 seconds"
        );

        let err = ProviderError::NotConfigured("openai");
        assert_eq!(err.to_string(), "Provider openai is not configured");
    }
}
