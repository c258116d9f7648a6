//! HttpGenerationProvider -- concrete [`GenerationProvider`] over HTTP.
//!
//! Text turns go to the Gemini `generateContent` endpoint; image turns go
//! to a Hugging Face inference endpoint that returns raw image bytes,
//! which are re-encoded as base64 for transport to the client.
//!
//! Both API keys are wrapped in [`secrecy::SecretString`] and are never
//! logged or included in `Debug` output.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use parley_core::generation::GenerationProvider;
use parley_types::error::GenerationError;

use super::types::{GeminiRequest, GeminiResponse};

/// Generation provider backed by Gemini (text) and Hugging Face (image).
///
/// # API Key Security
///
/// Keys are stored as [`SecretString`] and only exposed when constructing
/// HTTP request headers. They never appear in Debug output or tracing logs.
pub struct HttpGenerationProvider {
    client: reqwest::Client,
    gemini_api_key: SecretString,
    hf_api_key: SecretString,
    text_base_url: String,
    text_model: String,
    image_endpoint: String,
}

impl HttpGenerationProvider {
    /// Create a new provider.
    ///
    /// # Arguments
    ///
    /// * `gemini_api_key` - Gemini API key wrapped in SecretString
    /// * `hf_api_key` - Hugging Face API key wrapped in SecretString
    /// * `text_model` - Gemini model identifier (e.g., "gemini-2.5-flash")
    /// * `image_endpoint` - Full URL of the image inference endpoint
    pub fn new(
        gemini_api_key: SecretString,
        hf_api_key: SecretString,
        text_model: String,
        image_endpoint: String,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            gemini_api_key,
            hf_api_key,
            text_base_url: "https://generativelanguage.googleapis.com".to_string(),
            text_model,
            image_endpoint,
        }
    }

    /// Override the text base URL (useful for testing or proxies).
    pub fn with_text_base_url(mut self, base_url: String) -> Self {
        self.text_base_url = base_url;
        self
    }

    /// Full URL of the Gemini generateContent endpoint.
    fn text_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.text_base_url, self.text_model
        )
    }

    fn map_status(status: reqwest::StatusCode, body: String) -> GenerationError {
        match status.as_u16() {
            401 | 403 => GenerationError::AuthenticationFailed,
            429 => GenerationError::RateLimited,
            _ => GenerationError::Provider {
                message: format!("HTTP {status}: {body}"),
            },
        }
    }
}

// HttpGenerationProvider intentionally does NOT derive Debug so the
// SecretString fields can never leak through formatting.

impl GenerationProvider for HttpGenerationProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GeminiRequest::single_turn(prompt);

        let response = self
            .client
            .post(self.text_url())
            .header("x-goog-api-key", self.gemini_api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, error_body));
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Deserialization(format!("failed to parse response: {e}")))?;

        let text = gemini_resp
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GenerationError::Provider {
                message: "empty completion from model".to_string(),
            });
        }

        Ok(text)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(&self.image_endpoint)
            .bearer_auth(self.hf_api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| GenerationError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, error_body));
        }

        let bytes = response.bytes().await.map_err(|e| GenerationError::Provider {
            message: format!("failed to read image bytes: {e}"),
        })?;

        Ok(BASE64.encode(&bytes))
    }
}
