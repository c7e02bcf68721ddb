//! Configuration management for Foliochat
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Credentials are never part of the file; adapters read them from the
//! environment at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single generative provider call, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    30
}

/// Operating mode for answer generation
///
/// `local` never attempts generation; single-provider modes pin one backend;
/// `hybrid` picks the first available backend in fixed priority order
/// (Gemini first because its free tier costs nothing, then OpenAI, then
/// Anthropic).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Local,
    Gemini,
    Openai,
    Anthropic,
    Hybrid,
}

/// Chat pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub mode: ChatMode,
    /// When a selected provider fails at runtime, serve the local canned
    /// response for that request instead of an apology
    #[serde(default = "default_true")]
    pub fallback_enabled: bool,
    /// Token budget for the portfolio context sent to providers
    #[serde(default = "default_max_context_tokens")]
    pub max_context_tokens: usize,
    /// Name the assistant persona speaks about in the third person
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    /// Path to the externally maintained portfolio document
    #[serde(default = "default_portfolio_path")]
    pub portfolio_path: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: ChatMode::default(),
            fallback_enabled: default_true(),
            max_context_tokens: default_max_context_tokens(),
            owner_name: default_owner_name(),
            portfolio_path: default_portfolio_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_context_tokens() -> usize {
    crate::portfolio::tokens::DEFAULT_CONTEXT_BUDGET
}

fn default_owner_name() -> String {
    "the portfolio owner".to_string()
}

fn default_portfolio_path() -> String {
    "portfolio.json".to_string()
}

/// Sliding-window rate limit settings for the chat endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
        }
    }
}

fn default_max_requests() -> usize {
    10
}

fn default_window_seconds() -> u64 {
    60
}

/// Per-backend generation settings
///
/// Fields are private to keep validated values immutable after loading.
/// Availability is not configured here: it is the presence of the backend's
/// credential in the environment, checked once at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    model: String,
    #[serde(default = "default_max_output_tokens")]
    max_output_tokens: u32,
    #[serde(default = "default_temperature")]
    temperature: f64,
}

impl ProviderConfig {
    /// Model identifier sent to the backend
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Maximum tokens the backend may generate
    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Sampling temperature
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn with_model(model: &str) -> Self {
        Self {
            model: model.to_string(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_max_output_tokens() -> u32 {
    512
}

fn default_temperature() -> f64 {
    0.7
}

/// The three generative backends
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_gemini")]
    pub gemini: ProviderConfig,
    #[serde(default = "default_openai")]
    pub openai: ProviderConfig,
    #[serde(default = "default_anthropic")]
    pub anthropic: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            gemini: default_gemini(),
            openai: default_openai(),
            anthropic: default_anthropic(),
        }
    }
}

fn default_gemini() -> ProviderConfig {
    ProviderConfig::with_model("gemini-1.5-flash")
}

fn default_openai() -> ProviderConfig {
    ProviderConfig::with_model("gpt-4o-mini")
}

fn default_anthropic() -> ProviderConfig {
    ProviderConfig::with_model("claude-3-5-haiku-latest")
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::error::AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            crate::error::AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            }
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration after parsing
    ///
    /// Called automatically by `from_file()`, but can also be called
    /// explicitly when constructing Config via other means (e.g., in tests).
    pub fn validate(&self) -> crate::error::AppResult<()> {
        for (name, provider) in [
            ("gemini", &self.providers.gemini),
            ("openai", &self.providers.openai),
            ("anthropic", &self.providers.anthropic),
        ] {
            if provider.model.trim().is_empty() {
                return Err(crate::error::AppError::Config(format!(
                    "providers.{}.model must not be empty",
                    name
                )));
            }
            if provider.max_output_tokens == 0 {
                return Err(crate::error::AppError::Config(format!(
                    "providers.{}.max_output_tokens must be greater than 0",
                    name
                )));
            }
            // Standard sampling range; NaN and infinities are rejected too
            if provider.temperature < 0.0
                || provider.temperature > 2.0
                || !provider.temperature.is_finite()
            {
                return Err(crate::error::AppError::Config(format!(
                    "providers.{}.temperature must be a finite number between 0.0 and 2.0, got {}",
                    name, provider.temperature
                )));
            }
        }

        if self.chat.max_context_tokens == 0 {
            return Err(crate::error::AppError::Config(
                "chat.max_context_tokens must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit.max_requests == 0 {
            return Err(crate::error::AppError::Config(
                "rate_limit.max_requests must be greater than 0".to_string(),
            ));
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "rate_limit.window_seconds must be greater than 0".to_string(),
            ));
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(crate::error::AppError::Config(
                "request_timeout_seconds must be greater than 0".to_string(),
            ));
        }
        if self.server.request_timeout_seconds > 300 {
            return Err(crate::error::AppError::Config(format!(
                "request_timeout_seconds cannot exceed 300 seconds (5 minutes), got {}",
                self.server.request_timeout_seconds
            )));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = crate::error::AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(toml_str).map_err(|source| {
            crate::error::AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            }
        })?;

        config.validate()?;
        Ok(config)
    }
}
