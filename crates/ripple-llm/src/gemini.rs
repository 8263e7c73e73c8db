//! Client for the Gemini `generateContent` API.

use std::time::Duration;

use ripple_config::LlmConfig;
use ripple_core::{ChangeEvent, ImpactFeedback};
use serde::{Deserialize, Serialize};

use crate::ImpactAnalyzer;
use crate::error::LlmError;
use crate::extract::extract_feedback;
use crate::http::check_response;
use crate::prompt::build_prompt;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// [`ImpactAnalyzer`] backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::MissingApiKey`] if no key is configured, or
    /// [`LlmError::Http`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model.trim_start_matches("models/"),
        )
    }

    /// Send `prompt` and return the model's raw text reply.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] on transport failure, non-success status, or a
    /// reply without text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };
        let resp = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let data: GenerateResponse = resp.json().await?;
        data.text()
            .ok_or_else(|| LlmError::EmptyResponse(self.config.model.clone()))
    }
}

impl ImpactAnalyzer for GeminiClient {
    async fn analyze(&self, event: &ChangeEvent) -> ImpactFeedback {
        let prompt = build_prompt(event);
        match self.generate(&prompt).await {
            Ok(raw) => extract_feedback(&raw),
            Err(e) => {
                tracing::warn!(doc = %event.changed_doc, error = %e, "LLM call failed");
                ImpactFeedback::fallback(format!("LLM call failed: {e}"))
            }
        }
    }
}
