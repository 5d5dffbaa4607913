//! Generative text service client.
//!
//! The orchestrator only depends on the `SiteGenerator` trait; `GeminiClient`
//! is the production implementation backed by Google's Generative Language API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors from a single generation round-trip.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request to generative service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generative service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("prompt was blocked by the generative service: {0}")]
    Blocked(String),

    #[error("generative service returned no candidates")]
    EmptyResponse,

    #[error("invalid generative service endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("generative service endpoint must be http or https, got {0}")]
    UnsupportedScheme(String),
}

/// Turns a prompt into generated text.
///
/// One call is one request: no streaming, no partial results.
#[async_trait]
pub trait SiteGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Result<String, GenerationError> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GenerationError::Blocked(reason));
        }

        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: url::Url,
    api_key: String,
}

impl GeminiClient {
    /// Build a client for `model` under `base_url`.
    ///
    /// # Errors
    ///
    /// - `base_url` is not an absolute http(s) URL
    /// - the HTTP client cannot be constructed
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let base = url::Url::parse(base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(GenerationError::UnsupportedScheme(
                base.scheme().to_string(),
            ));
        }

        let endpoint = url::Url::parse(&format!(
            "{}/v1beta/models/{}:generateContent",
            base.as_str().trim_end_matches('/'),
            model
        ))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl SiteGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<GenerateContentResponse>().await?.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::json;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base: &str) -> GeminiClient {
        GeminiClient::new(base, "gemini-pro", "test-key".into(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn joins_candidate_parts() {
        let router = Router::new().route(
            "/v1beta/models/gemini-pro:generateContent",
            post(|headers: HeaderMap, Json(body): Json<serde_json::Value>| async move {
                assert_eq!(headers["x-goog-api-key"], "test-key");
                assert_eq!(body["contents"][0]["parts"][0]["text"], "make a site");
                Json(json!({
                    "candidates": [{
                        "content": { "parts": [{ "text": "<!DOCTYPE html>" }, { "text": "<html></html>" }] },
                        "finishReason": "STOP"
                    }]
                }))
            }),
        );
        let base = serve(router).await;

        let text = client(&base).generate("make a site").await.unwrap();
        assert_eq!(text, "<!DOCTYPE html><html></html>");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let router = Router::new().route(
            "/v1beta/models/gemini-pro:generateContent",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let base = serve(router).await;

        let err = client(&base).generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let router = Router::new().route(
            "/v1beta/models/gemini-pro:generateContent",
            post(|| async { Json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })) }),
        );
        let base = serve(router).await;

        let err = client(&base).generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::Blocked(reason) if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_error() {
        let router = Router::new().route(
            "/v1beta/models/gemini-pro:generateContent",
            post(|| async { Json(json!({ "candidates": [] })) }),
        );
        let base = serve(router).await;

        let err = client(&base).generate("prompt").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let result = GeminiClient::new("ftp://example.com", "m", "k".into(), Duration::from_secs(1));
        assert!(result.is_err());
        assert!(GeminiClient::new("not a url", "m", "k".into(), Duration::from_secs(1)).is_err());
    }
}
