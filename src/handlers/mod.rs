//! HTTP request handlers for the Foliochat API

use std::sync::Arc;
use std::time::Duration;

use crate::chat::{ChatOrchestrator, LocalResponder};
use crate::config::Config;
use crate::guard::RateLimiter;
use crate::portfolio::PortfolioDocument;
use crate::provider::router::ProviderSet;
use crate::provider::{AnthropicProvider, GeminiProvider, OpenAiProvider, ProviderRouter};

pub mod chat;
pub mod health;

/// Application state shared across all handlers
///
/// All fields are Arc'd for cheap cloning across Axum handlers. Provider
/// selection happens here, once, and is immutable for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    orchestrator: Arc<ChatOrchestrator>,
    provider: Arc<ProviderRouter>,
}

impl AppState {
    /// Create the application state from configuration and portfolio data
    ///
    /// Provider credentials are read from the environment exactly once; a
    /// key exported later has no effect until restart.
    pub fn new(config: Config, portfolio: PortfolioDocument) -> Self {
        let owner = config.chat.owner_name.as_str();
        let providers = ProviderSet {
            gemini: Arc::new(GeminiProvider::from_env(&config.providers.gemini, owner)),
            openai: Arc::new(OpenAiProvider::from_env(&config.providers.openai, owner)),
            anthropic: Arc::new(AnthropicProvider::from_env(&config.providers.anthropic, owner)),
        };

        let provider = Arc::new(ProviderRouter::select(
            config.chat.mode,
            providers,
            config.chat.fallback_enabled,
            Duration::from_secs(config.server.request_timeout_seconds),
            config.chat.max_context_tokens,
        ));

        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_seconds),
        ));

        let orchestrator = Arc::new(ChatOrchestrator::new(
            rate_limiter,
            provider.clone(),
            LocalResponder::new(),
            Arc::new(portfolio),
        ));

        Self {
            config: Arc::new(config),
            orchestrator,
            provider,
        }
    }

    /// Get reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get reference to the chat orchestrator
    pub fn orchestrator(&self) -> &ChatOrchestrator {
        &self.orchestrator
    }

    /// Get reference to the provider router
    pub fn provider(&self) -> &ProviderRouter {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_config() -> Config {
        Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 3000

[chat]
mode = "local"
"#,
        )
        .expect("test config should parse")
    }

    #[test]
    fn test_appstate_new_creates_state() {
        let state = AppState::new(create_test_config(), PortfolioDocument::default());
        assert_eq!(state.config().server.port, 3000);
        assert!(!state.provider().is_any_available());
    }

    #[test]
    fn test_appstate_is_clonable() {
        let state = AppState::new(create_test_config(), PortfolioDocument::default());
        let state2 = state.clone();
        assert_eq!(state2.config().server.port, 3000);
    }
}
