//! Gemini provider implementation using the `generateContent` endpoint.
//!
//! One non-streaming POST per prayer:
//! `{base_url}/models/{model}:generateContent`, authenticated with the
//! `x-goog-api-key` header. The reply text is the concatenation of the
//! first candidate's text parts.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{GenerationError, GenerationRequest, PrayerProvider};

// ============================================================================
// Gemini API Types
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Deserialize, Debug, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

/// The request body for `generateContent`
#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn prompt_to_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    }
}

/// Joins the first candidate's text parts. Empty text counts as a failure.
fn response_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::new("response has no candidates"))?;

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();

    if text.is_empty() {
        return Err(GenerationError::new("response text is empty"));
    }
    Ok(text)
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini API provider
pub struct GeminiProvider {
    api_key: String,
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key
    /// * `base_url` - API root, e.g. `https://generativelanguage.googleapis.com/v1beta`
    /// * `model` - Model identifier, e.g. `gemini-2.5-flash`
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Sends a request to the generateContent endpoint and returns the response.
    async fn send_request(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<reqwest::Response, GenerationError> {
        let json_body = serde_json::to_string(request)
            .map_err(|e| GenerationError::new(format!("request serialization failed: {e}")))?;
        debug!("Raw Gemini request: {}", json_body);

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
            .map_err(|e| GenerationError::new(format!("network error: {e}")))?;

        debug!("Gemini response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Gemini API error: {} - {}", status, err_body);
            return Err(GenerationError::new(format!(
                "API error (HTTP {status}): {err_body}"
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl PrayerProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GenerationError> {
        let body = prompt_to_request(request.prompt);
        info!(
            "Gemini generateContent request: model={}, prompt_len={}",
            request.model,
            request.prompt.len()
        );

        let response = self.send_request(request.model, &body).await?;
        let raw = response
            .text()
            .await
            .map_err(|e| GenerationError::new(format!("failed to read body: {e}")))?;
        debug!("Raw Gemini response: {}", raw);

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)
            .map_err(|e| GenerationError::new(format!("parse error: {e}")))?;
        response_text(parsed)
    }
}
