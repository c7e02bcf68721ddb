//! Google Gemini generateContent adapter
//!
//! First in the hybrid priority order: its free tier makes it the cheapest
//! backend to try.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::provider::{ProviderAdapter, ProviderError, system_prompt};

const PROVIDER_NAME: &str = "gemini";
const KEY_ENV: &str = "GEMINI_API_KEY";
const BASE_URL_ENV: &str = "GEMINI_BASE_URL";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    http: reqwest::Client,
    model: String,
    max_output_tokens: u32,
    temperature: f64,
    owner_name: String,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiProvider {
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
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[async_trait]
impl ProviderAdapter for GeminiProvider {
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

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: system_prompt(&self.owner_name, context),
                }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        let response = self
            .http
            .post(&url)
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

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| ProviderError::Rejected {
                provider: PROVIDER_NAME,
                reason: format!("unparseable response: {}", e),
            })?;

        let content = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts)
            .and_then(|p| p.into_iter().next())
            .and_then(|p| p.text)
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
        config.providers.gemini
    }

    #[test]
    fn test_unavailable_without_key() {
        let provider = GeminiProvider::new(
            &provider_config(),
            "Test Owner",
            None,
            DEFAULT_BASE_URL.to_string(),
        );
        assert!(!provider.is_available());
        assert_eq!(provider.name(), "gemini");
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_not_configured() {
        let provider = GeminiProvider::new(
            &provider_config(),
            "Test Owner",
            None,
            DEFAULT_BASE_URL.to_string(),
        );
        let result = provider.generate_response("hello", "").await;
        assert!(matches!(result, Err(ProviderError::NotConfigured("gemini"))));
    }

    #[test]
    fn test_request_serializes_with_camel_case_fields() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            system_instruction: Content {
                parts: vec![Part {
                    text: "system".to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 500,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("systemInstruction"));
        assert!(json.contains("generationConfig"));
        assert!(json.contains("maxOutputTokens"));
    }
}
