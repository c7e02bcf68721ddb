//! Anthropic messages adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::provider::{ProviderAdapter, ProviderError, system_prompt};

const PROVIDER_NAME: &str = "anthropic";
const KEY_ENV: &str = "ANTHROPIC_API_KEY";
const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    http: reqwest::Client,
    model: String,
    max_output_tokens: u32,
    temperature: f64,
    owner_name: String,
    api_key: Option<String>,
    base_url: String,
}

impl AnthropicProvider {
    /// Build the adapter, resolving the credential and base URL from the
    /// environment. Availability is fixed from here on.
    pub fn from_env(config: &ProviderConfig, owner_name: &str) -> Self {
        let api_key = std::env::var(KEY_ENV).ok();
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(config, owner_name, api_key, base_url)
    }

    /// Build the adapter with an explicit credential and endpoint
    pub fn new(
        config: &ProviderConfig,
        owner_name: &str,
        api_key: Option<String>,
        base_url: String,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: config.model().to_string(),
            max_output_tokens: config.max_output_tokens(),
            temperature: config.temperature(),
            owner_name: owner_name.to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url,
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    system: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate_response(
        &self,
        prompt: &str,
        context: &str,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ProviderError::NotConfigured(PROVIDER_NAME))?;

        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_output_tokens,
            temperature: self.temperature,
            system: system_prompt(&self.owner_name, context),
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network {
                provider: PROVIDER_NAME,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::Rejected {
                provider: PROVIDER_NAME,
                reason: format!("status {}: {}", status, detail),
            });
        }

        let parsed: MessagesResponse =
            response.json().await.map_err(|e| ProviderError::Rejected {
                provider: PROVIDER_NAME,
                reason: format!("unparseable response: {}", e),
            })?;

        let content = parsed
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .unwrap_or_default();
        if content.trim().is_empty() {
            return Err(ProviderError::Rejected {
                provider: PROVIDER_NAME,
                reason: "response contained no text".to_string(),
            });
        }

        Ok(content)
    }
}
