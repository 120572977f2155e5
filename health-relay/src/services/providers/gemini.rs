//! Gemini completion provider.
//!
//! Implements single-shot text generation against Google's Gemini API.

use super::{Completion, CompletionProvider, FinishReason, ProviderError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Standing instruction sent with every completion request.
const SYSTEM_INSTRUCTION: &str = "You are a health information assistant. \
Give general, educational information only. Do not diagnose or prescribe. \
Encourage the user to consult a qualified healthcare professional, and to \
seek emergency care immediately for severe or life-threatening symptoms.";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    /// Base URL up to and including the API version segment.
    pub api_base: String,
    pub timeout: Duration,
}

/// Gemini text provider.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method,
            self.config.api_key.expose_secret()
        )
    }

    fn build_request(prompt: &str, context: Option<&str>) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(2);
        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            parts.push(Part {
                text: format!("Context:\n{}", context),
            });
        }
        parts.push(Part {
            text: prompt.to_string(),
        });

        GenerateContentRequest {
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
        }
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let request = Self::build_request(prompt, context);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            has_context = context.is_some(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.without_url().to_string()))?;

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError("Gemini returned no candidates".to_string()))?;

        let finish_reason = match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") => FinishReason::ContentFilter,
            _ => FinishReason::Complete,
        };

        if finish_reason == FinishReason::ContentFilter {
            return Err(ProviderError::ContentFiltered);
        }

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = api_response.usage_metadata.unwrap_or_default();

        Ok(Completion {
            text,
            input_tokens: usage.prompt_token_count.unwrap_or(0),
            output_tokens: usage.candidates_token_count.unwrap_or(0),
            finish_reason,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn spawn_stub(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1beta", addr)
    }

    fn provider(api_base: String, key: &str) -> GeminiProvider {
        GeminiProvider::new(GeminiConfig {
            api_key: Secret::new(key.to_string()),
            model: "gemini-test".to_string(),
            api_base,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn request_places_context_before_prompt() {
        let request = GeminiProvider::build_request("what is a fever?", Some("age 30"));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "Context:\nage 30");
        assert_eq!(value["contents"][0]["parts"][1]["text"], "what is a fever?");
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("health information assistant"));
    }

    #[test]
    fn blank_context_is_dropped() {
        let request = GeminiProvider::build_request("hello", Some("  "));
        assert_eq!(request.contents[0].parts.len(), 1);
    }

    #[tokio::test]
    async fn complete_returns_candidate_text() {
        let router = Router::new().route(
            "/v1beta/models/*method",
            post(
                |Path(method): Path<String>,
                 Query(params): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    assert_eq!(method, "gemini-test:generateContent");
                    assert_eq!(params.get("key").map(String::as_str), Some("secret"));
                    assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
                    Json(json!({
                        "candidates": [{
                            "content": {"role": "model", "parts": [{"text": "Hello"}, {"text": " there"}]},
                            "finishReason": "STOP"
                        }],
                        "usageMetadata": {"promptTokenCount": 3, "candidatesTokenCount": 2}
                    }))
                },
            ),
        );
        let provider = provider(spawn_stub(router).await, "secret");

        let completion = provider.complete("hi", None).await.unwrap();
        assert_eq!(completion.text, "Hello there");
        assert_eq!(completion.input_tokens, 3);
        assert_eq!(completion.output_tokens, 2);
        assert_eq!(completion.finish_reason, FinishReason::Complete);
    }

    #[tokio::test]
    async fn rate_limit_is_reported() {
        let router = Router::new().route(
            "/v1beta/models/*method",
            post(|| async { (axum::http::StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let provider = provider(spawn_stub(router).await, "secret");

        let err = provider.complete("hi", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[tokio::test]
    async fn safety_block_is_content_filtered() {
        let router = Router::new().route(
            "/v1beta/models/*method",
            post(|| async { Json(json!({"candidates": [{"finishReason": "SAFETY"}]})) }),
        );
        let provider = provider(spawn_stub(router).await, "secret");

        let err = provider.complete("hi", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::ContentFiltered));
    }

    #[tokio::test]
    async fn empty_candidates_are_an_error() {
        let router = Router::new().route(
            "/v1beta/models/*method",
            post(|| async { Json(json!({"candidates": []})) }),
        );
        let provider = provider(spawn_stub(router).await, "secret");

        let err = provider.complete("hi", None).await.unwrap_err();
        assert!(matches!(err, ProviderError::ApiError(_)));
    }

    #[tokio::test]
    async fn health_check_requires_api_key() {
        let provider = provider("http://127.0.0.1:9/v1beta".to_string(), "");
        assert!(matches!(
            provider.health_check().await,
            Err(ProviderError::NotConfigured(_))
        ));
    }
}
