//! Google Gemini `generateContent` client.

use crate::core::{ConfigProvider, TextGenerator};
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AdvisorError::MissingConfigError {
                field: "GEMINI_API_KEY".to_string(),
            })?;

        Self::new(
            api_key,
            config.model(),
            config.api_base(),
            Duration::from_secs(config.request_timeout_secs()),
        )
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Sending {} char prompt to {}", prompt.len(), self.model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Model API response status: {}", status);

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&raw)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| {
                    if raw.is_empty() {
                        status.canonical_reason().unwrap_or("unknown error").to_string()
                    } else {
                        raw
                    }
                });
            tracing::warn!("Model API error {}: {}", status, message);
            return Err(AdvisorError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateResponse = response.json().await?;

        let Some(candidate) = reply.candidates.into_iter().next() else {
            let reason = reply
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!("prompt blocked ({})", reason))
                .unwrap_or_else(|| "model returned no candidates".to_string());
            return Err(AdvisorError::GenerationError { message: reason });
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "UNKNOWN".to_string());
            return Err(AdvisorError::GenerationError {
                message: format!("model returned an empty reply (finish reason: {})", reason),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(
            "test-key",
            "gemini-1.5-pro",
            server.base_url(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_joins_text_parts() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-1.5-pro:generateContent")
                .header("x-goog-api-key", "test-key")
                .json_body(json!({
                    "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
                }));
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Namaste, "}, {"text": "how can I help?"}]},
                    "finishReason": "STOP"
                }]
            }));
        });

        let text = client_for(&server).generate("Hello").await.unwrap();
        mock.assert();
        assert_eq!(text, "Namaste, how can I help?");
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(400).json_body(json!({
                "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
            }));
        });

        let err = client_for(&server).generate("Hello").await.unwrap_err();
        match err {
            AdvisorError::UpstreamError { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("API key not valid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_a_generation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .json_body(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        });

        let err = client_for(&server).generate("Hello").await.unwrap_err();
        match err {
            AdvisorError::GenerationError { message } => assert!(message.contains("SAFETY")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = GeminiClient::new(
            "k",
            "gemini-1.5-flash",
            "https://example.com/",
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }
}
