//! Chat endpoint handlers
//!
//! `POST /api/chat` runs the full orchestration pipeline;
//! `GET /api/chat/suggestions` serves a fixed prompt list with no state
//! dependency.

use axum::{Extension, Json, extract::State, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::ResponseEnvelope;
use crate::error::AppError;
use crate::handlers::AppState;
use crate::middleware::{ClientId, RequestId};

/// Chat request from client
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response to client
#[derive(Debug, Clone, Serialize)]
pub struct ChatApiResponse {
    pub response: ResponseEnvelope,
    pub timestamp: DateTime<Utc>,
    pub intent: String,
}

/// POST /api/chat handler
pub async fn handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(client_id): Extension<ClientId>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(
        request_id = %request_id,
        client_id = %client_id,
        message_length = request.message.chars().count(),
        "Received chat request"
    );

    let envelope = state
        .orchestrator()
        .handle(&request.message, client_id.as_str())
        .await
        .inspect_err(|e| {
            tracing::debug!(
                request_id = %request_id,
                client_id = %client_id,
                error = %e,
                "Chat request rejected"
            );
        })?;

    let intent = envelope.intent.as_str().to_string();
    Ok(Json(ChatApiResponse {
        response: envelope,
        timestamp: Utc::now(),
        intent,
    }))
}

/// Example prompts offered to first-time visitors
const SUGGESTED_PROMPTS: [&str; 6] = [
    "What projects have you built?",
    "What are your strongest skills?",
    "Tell me about your career so far",
    "Which technologies do you work with?",
    "What did you study?",
    "How can I get in touch?",
];

/// Suggestions response body
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<&'static str>,
}

/// GET /api/chat/suggestions handler
pub async fn suggestions() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: SUGGESTED_PROMPTS.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_deserializes() {
        let request: ChatRequest = serde_json::from_str(r#"{"message": "Hello!"}"#).unwrap();
        assert_eq!(request.message, "Hello!");
    }

    #[test]
    fn test_chat_request_rejects_non_string_message() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"message": 42}"#).is_err());
        assert!(serde_json::from_str::<ChatRequest>(r#"{}"#).is_err());
    }

    #[tokio::test]
    async fn test_suggestions_are_six_fixed_prompts() {
        let Json(body) = suggestions().await;
        assert_eq!(body.suggestions.len(), 6);
        let Json(again) = suggestions().await;
        assert_eq!(body.suggestions, again.suggestions);
    }

    #[test]
    fn test_api_response_serializes_envelope_under_response_key() {
        let envelope = ResponseEnvelope {
            text: "hi".to_string(),
            data: None,
            suggestions: vec![],
            timestamp: Utc::now(),
            intent: crate::intent::Intent::Greeting,
        };
        let body = ChatApiResponse {
            response: envelope,
            timestamp: Utc::now(),
            intent: "greeting".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["intent"], "greeting");
        assert_eq!(json["response"]["text"], "hi");
        assert!(json["timestamp"].is_string());
    }
}
