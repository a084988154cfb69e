//! Gemini generation provider implementation.
//!
//! This module integrates with the Generative Language API.
//! API reference: https://ai.google.dev/api/generate-content

use crate::client::{GenerationClient, GenerationRequest, GenerationResponse, GenerationUsage};
use serde::{Deserialize, Serialize};
use shopwise_core::{AppError, AppResult};

/// Default API endpoint for the Generative Language API.
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API request format.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Gemini API response format.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

/// Gemini generation client.
pub struct GeminiClient {
    /// Base URL for the API
    base_url: String,

    /// API key sent with every request
    api_key: String,

    /// HTTP client, created once and reused across calls
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a new Gemini client against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_ENDPOINT)
    }

    /// Create a new Gemini client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Convert GenerationRequest to the Gemini wire format.
    fn to_gemini_request(&self, request: &GenerationRequest) -> GeminiRequest {
        let generation_config =
            if request.temperature.is_some() || request.max_tokens.is_some() {
                Some(GeminiGenerationConfig {
                    temperature: request.temperature,
                    max_output_tokens: request.max_tokens,
                })
            } else {
                None
            };

        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction: request.system.as_ref().map(|s| GeminiContent {
                parts: vec![GeminiPart { text: s.clone() }],
            }),
            generation_config,
        }
    }
}

#[async_trait::async_trait]
impl GenerationClient for GeminiClient {
    fn provider_name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationResponse> {
        tracing::info!("Sending generation request to Gemini");
        tracing::debug!("Model: {}", request.model);

        let gemini_request = self.to_gemini_request(request);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to send request to Gemini: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // The API answers 400 INVALID_ARGUMENT when it rejects the
            // request content itself; callers treat that differently
            // from transport or server failures.
            if status == reqwest::StatusCode::BAD_REQUEST {
                return Err(AppError::GenerationValidation(format!(
                    "Gemini rejected the request: {}",
                    error_text
                )));
            }
            return Err(AppError::Backend(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to parse Gemini response: {}", e)))?;

        let content = gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| {
                AppError::Backend("Gemini response contained no candidates".to_string())
            })?;

        let usage = gemini_response
            .usage_metadata
            .map(|u| GenerationUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        tracing::info!("Received generation from Gemini");

        Ok(GenerationResponse {
            content,
            model: request.model.clone(),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_client_creation() {
        let client = GeminiClient::new("test-key");
        assert_eq!(client.provider_name(), "gemini");
        assert_eq!(client.base_url, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_gemini_request_conversion() {
        let client = GeminiClient::new("test-key");
        let request = GenerationRequest::new("Hello", "gemini-2.5-flash")
            .with_temperature(0.7)
            .with_max_tokens(256);

        let gemini_req = client.to_gemini_request(&request);
        assert_eq!(gemini_req.contents.len(), 1);
        assert_eq!(gemini_req.contents[0].parts[0].text, "Hello");

        let config = gemini_req.generation_config.expect("config set");
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_output_tokens, Some(256));
    }

    #[test]
    fn test_gemini_request_without_config() {
        let client = GeminiClient::new("test-key");
        let request = GenerationRequest::new("Hello", "gemini-2.5-flash");

        let gemini_req = client.to_gemini_request(&request);
        assert!(gemini_req.generation_config.is_none());
        assert!(gemini_req.system_instruction.is_none());
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Based on 3 reviews, here is a summary:"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 42, "candidatesTokenCount": 10}
        }"#;

        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        let usage = parsed.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 42);
        assert_eq!(usage.candidates_token_count, 10);
    }
}
