//! Chat orchestration
//!
//! Sequences a chat request through the guard, classification, generation,
//! and fallback stages and assembles the response envelope. Validation and
//! rate limiting always run before any external call.

pub mod responses;

pub use responses::LocalResponder;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{AppError, AppResult};
use crate::guard::{InputValidator, RateDecision, RateLimiter};
use crate::intent::{Intent, IntentClassifier};
use crate::portfolio::{PortfolioDocument, context};
use crate::provider::ProviderRouter;

/// Answer returned to the caller; constructed per request, never persisted
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    pub suggestions: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub intent: Intent,
}

/// Top-level sequencing component for the chat pipeline
pub struct ChatOrchestrator {
    rate_limiter: Arc<RateLimiter>,
    validator: InputValidator,
    classifier: IntentClassifier,
    provider: Arc<ProviderRouter>,
    responder: LocalResponder,
    portfolio: Arc<PortfolioDocument>,
}

impl ChatOrchestrator {
    pub fn new(
        rate_limiter: Arc<RateLimiter>,
        provider: Arc<ProviderRouter>,
        responder: LocalResponder,
        portfolio: Arc<PortfolioDocument>,
    ) -> Self {
        Self {
            rate_limiter,
            validator: InputValidator::new(),
            classifier: IntentClassifier::new(),
            provider,
            responder,
            portfolio,
        }
    }

    /// Run one chat request through the full pipeline
    ///
    /// Order: rate limit, validate, classify, attempt generation, fall back
    /// to the local canned response. Generation failures never surface raw
    /// provider detail; with fallback disabled they yield a fixed apology.
    pub async fn handle(&self, raw_message: &str, client_id: &str) -> AppResult<ResponseEnvelope> {
        match self.rate_limiter.allow(client_id).await {
            RateDecision::Blocked => return Err(AppError::Blocked),
            RateDecision::RateLimited => return Err(AppError::RateLimited),
            RateDecision::Allowed => {}
        }

        let message = self.validator.validate(raw_message, client_id)?;

        // Raw text is never logged; the hash is enough to correlate repeats
        tracing::info!(
            client_id,
            message_hash = %sha256_hex(&message),
            message_length = message.chars().count(),
            "Chat request accepted"
        );

        let intent = self.classifier.classify(&message);
        tracing::debug!(client_id, intent = intent.as_str(), "Message classified");

        if self.provider.is_any_available() {
            let portfolio_context = context::build(&self.portfolio);
            match self.provider.generate(&message, &portfolio_context).await {
                Ok(text) => return Ok(self.responder.generated(text, intent)),
                Err(e) => {
                    // The router already logged the failure detail; record
                    // the degradation decision here
                    if self.provider.fallback_enabled() {
                        tracing::info!(
                            client_id,
                            error = %e,
                            intent = intent.as_str(),
                            "Provider failed, serving local response"
                        );
                    } else {
                        tracing::info!(
                            client_id,
                            error = %e,
                            "Provider failed and fallback is disabled, serving apology"
                        );
                        return Ok(self.responder.apology());
                    }
                }
            }
        }

        Ok(self.responder.respond(intent, &self.portfolio))
    }
}

/// One-way hash used in request logs instead of message text
fn sha256_hex(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut output = String::with_capacity(digest.len() * 2);
    for byte in digest {
        output.push_str(&format!("{byte:02x}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_is_stable_and_hex() {
        let hash = sha256_hex("hello");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, sha256_hex("hello"));
        assert_ne!(hash, sha256_hex("hello!"));
    }

    #[test]
    fn test_envelope_serializes_without_empty_data() {
        let envelope = ResponseEnvelope {
            text: "hi".to_string(),
            data: None,
            suggestions: vec!["a".to_string()],
            timestamp: Utc::now(),
            intent: Intent::Greeting,
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(!json.contains("\"data\""));
        assert!(json.contains("\"intent\":\"greeting\""));
    }
}
