//! Provider selection and failure normalization
//!
//! Selection runs once at startup and is fixed for the process lifetime: a
//! runtime failure of the selected adapter affects only that request and
//! never changes the selection. Every call is bounded by the configured
//! timeout; a timeout is treated like any other provider failure.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ChatMode;
use crate::portfolio::tokens;
use crate::provider::{ProviderAdapter, ProviderError};

/// The three adapters in hybrid priority order
pub struct ProviderSet {
    pub gemini: Arc<dyn ProviderAdapter>,
    pub openai: Arc<dyn ProviderAdapter>,
    pub anthropic: Arc<dyn ProviderAdapter>,
}

/// Routes generation requests to the adapter selected at startup
pub struct ProviderRouter {
    adapter: Option<Arc<dyn ProviderAdapter>>,
    fallback_enabled: bool,
    timeout: Duration,
    context_budget: usize,
}

impl ProviderRouter {
    /// Apply the selection policy for `mode` and fix the result
    ///
    /// `local` selects nothing. Single-provider modes select their adapter
    /// only if its credential is present; otherwise nothing is selected and
    /// requests fall through to local responses. `hybrid` picks the first
    /// available adapter in the order Gemini, OpenAI, Anthropic.
    pub fn select(
        mode: ChatMode,
        providers: ProviderSet,
        fallback_enabled: bool,
        timeout: Duration,
        context_budget: usize,
    ) -> Self {
        let available = |adapter: Arc<dyn ProviderAdapter>| {
            if adapter.is_available() {
                Some(adapter)
            } else {
                tracing::warn!(
                    provider = adapter.name(),
                    "Configured provider has no credential, falling back to local responses"
                );
                None
            }
        };

        let adapter = match mode {
            ChatMode::Local => None,
            ChatMode::Gemini => available(providers.gemini),
            ChatMode::Openai => available(providers.openai),
            ChatMode::Anthropic => available(providers.anthropic),
            ChatMode::Hybrid => [providers.gemini, providers.openai, providers.anthropic]
                .into_iter()
                .find(|adapter| adapter.is_available()),
        };

        match &adapter {
            Some(adapter) => {
                tracing::info!(provider = adapter.name(), ?mode, "Generative provider selected")
            }
            None => tracing::info!(?mode, "No generative provider selected, using local responses"),
        }

        Self {
            adapter,
            fallback_enabled,
            timeout,
            context_budget,
        }
    }

    /// Whether any adapter was selected at startup
    pub fn is_any_available(&self) -> bool {
        self.adapter.is_some()
    }

    /// Name of the selected adapter, if any
    pub fn selected_provider(&self) -> Option<&'static str> {
        self.adapter.as_deref().map(|adapter| adapter.name())
    }

    /// Whether a runtime provider failure should fall back to local responses
    pub fn fallback_enabled(&self) -> bool {
        self.fallback_enabled
    }

    /// Generate an answer via the selected adapter
    ///
    /// The context is truncated to the configured token budget first. The
    /// call is wrapped in the configured timeout; failures are logged here
    /// with full detail and returned as typed errors.
    pub async fn generate(&self, prompt: &str, context: &str) -> Result<String, ProviderError> {
        let adapter = self.adapter.as_ref().ok_or(ProviderError::NoneAvailable)?;

        let truncated = tokens::truncate(context, self.context_budget);

        match tokio::time::timeout(self.timeout, adapter.generate_response(prompt, &truncated))
            .await
        {
            Ok(Ok(text)) => {
                tracing::info!(
                    provider = adapter.name(),
                    response_length = text.len(),
                    "Provider generation succeeded"
                );
                Ok(text)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    provider = adapter.name(),
                    error = %e,
                    "Provider generation failed"
                );
                Err(e)
            }
            Err(_elapsed) => {
                let timeout_seconds = self.timeout.as_secs();
                tracing::warn!(
                    provider = adapter.name(),
                    timeout_seconds,
                    "Provider generation timed out"
                );
                Err(ProviderError::Timeout {
                    provider: adapter.name(),
                    timeout_seconds,
                })
            }
        }
    }
}
