//! OpenAI chat-completions adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::provider::{ProviderAdapter, ProviderError, system_prompt};

const PROVIDER_NAME: &str = "openai";
const KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    http: reqwest::Client,
    model: String,
    max_output_tokens: u32,
    temperature: f64,
    owner_name: String,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAiProvider {
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
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl ProviderAdapter for OpenAiProvider {
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

        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt(&self.owner_name, context),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
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

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| ProviderError::Rejected {
                provider: PROVIDER_NAME,
                reason: format!("unparseable response: {}", e),
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn provider_config() -> ProviderConfig {
        let config = crate::config::Config::from_str(
            r#"
[server]
host = "127.0.0.1"
port = 8080
"#,
        )
        .unwrap();
        config.providers.openai
    }

    #[test]
    fn test_unavailable_without_key() {
        let provider = OpenAiProvider::new(
            &provider_config(),
            "Test Owner",
            None,
            DEFAULT_BASE_URL.to_string(),
        );
        assert!(!provider.is_available());
    }

    #[test]
    fn test_empty_key_counts_as_unavailable() {
        let provider = OpenAiProvider::new(
            &provider_config(),
            "Test Owner",
            Some(String::new()),
            DEFAULT_BASE_URL.to_string(),
        );
        assert!(!provider.is_available());
    }

    #[test]
    fn test_available_with_key() {
        let provider = OpenAiProvider::new(
            &provider_config(),
            "Test Owner",
            Some("sk-test".to_string()),
            DEFAULT_BASE_URL.to_string(),
        );
        assert!(provider.is_available());
        assert_eq!(provider.name(), "openai");
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_not_configured() {
        let provider = OpenAiProvider::new(
            &provider_config(),
            "Test Owner",
            None,
            DEFAULT_BASE_URL.to_string(),
        );
        let result = provider.generate_response("hello", "").await;
        assert!(matches!(result, Err(ProviderError::NotConfigured("openai"))));
    }
}
