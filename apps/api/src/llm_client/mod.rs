/// LLM Client: the single point of entry for model calls in JobFit.
///
/// No other module talks to the Generative Language API directly. Callers
/// depend on the `TextGenerator` trait so the client can be swapped out in
/// tests.
///
/// Decoding is pinned (temperature 0, top-p 1, top-k 1, 2048 output tokens)
/// so repeated analyses of the same inputs return the same JSON.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

use prompts::with_json_only_prefix;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-pro";
const TEMPERATURE: f32 = 0.0;
const TOP_P: f32 = 1.0;
const TOP_K: u32 = 1;
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not decode model response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty response")]
    EmptyContent,
}

/// One prompt in, one block of text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        Some(text)
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Client for the Google Generative Language `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Points the client at a different API root (local stand-ins).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single call and returns the full decoded response.
    /// Transport, auth and quota failures come back as errors; nothing is retried.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: with_json_only_prefix(prompt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let decoded: GenerateContentResponse = serde_json::from_str(&body)?;

        debug!(
            model = %self.model,
            candidates = decoded.candidates.len(),
            "Model call succeeded"
        );

        Ok(decoded)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        let text = response.text().unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{StatusCode, Uri},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> GeminiClient {
        GeminiClient::new("test-key".to_string(), "gemini-pro".to_string())
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_empty_content_reason() {
        assert_eq!(LlmError::EmptyContent.to_string(), "empty response");
    }

    #[tokio::test]
    async fn test_generate_sends_fixed_config_and_prefix() {
        let router = Router::new().fallback(
            |uri: Uri, Query(params): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                assert_eq!(uri.path(), "/models/gemini-pro:generateContent");
                assert_eq!(params.get("key").map(String::as_str), Some("test-key"));
                let config = &body["generationConfig"];
                assert_eq!(config["temperature"], json!(0.0));
                assert_eq!(config["topP"], json!(1.0));
                assert_eq!(config["topK"], json!(1));
                assert_eq!(config["maxOutputTokens"], json!(2048));
                let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
                assert!(text.starts_with("Respond ONLY with valid JSON."));
                assert!(text.ends_with("\nhello"));
                Json(json!({
                    "candidates": [{"content": {"parts": [{"text": "  {\"JD_Match\": \"80%\"}\n"}]}}]
                }))
            },
        );
        let base = serve(router).await;

        let text = client(base).generate("hello").await.unwrap();
        assert_eq!(text, "{\"JD_Match\": \"80%\"}");
    }

    #[tokio::test]
    async fn test_generate_blank_text_is_empty_content() {
        let router = Router::new().fallback(|| async {
            Json(json!({"candidates": [{"content": {"parts": [{"text": "   "}]}}]}))
        });
        let base = serve(router).await;

        let err = client(base).generate("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let router = Router::new().fallback(|| async {
            (
                StatusCode::FORBIDDEN,
                Json(json!({"error": {"code": 403, "message": "API key not valid"}})),
            )
        });
        let base = serve(router).await;

        let err = client(base).generate("hello").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
