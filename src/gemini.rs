//! Generative-language-model provider client
//!
//! Sends a natural-language prompt to a Gemini-compatible
//! `generateContent` endpoint (query-parameter auth, POST body with one
//! text part) and returns the first candidate's text. The provider is
//! treated as opaque and fallible; callers decide how to degrade.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::Result;
use crate::TripWiseError;
use crate::config::GeminiConfig;

const PROBE_PROMPT: &str =
    "Hello, this is a test message. Please respond with 'OK' if you can read this.";

/// Client for the generative language API
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
    probe_timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from the Gemini configuration
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("TripWise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripWiseError::general(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_seconds.into()),
            probe_timeout: Duration::from_secs(config.probe_timeout_seconds.into()),
        })
    }

    /// Whether a provider key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Length of the configured provider key, 0 when absent
    #[must_use]
    pub fn api_key_len(&self) -> usize {
        self.api_key.as_ref().map_or(0, String::len)
    }

    /// Run a single-turn prompt and return the first candidate's text
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_timeout(prompt, self.timeout).await
    }

    /// Short connectivity check used by the diagnostic endpoint
    pub async fn probe(&self) -> Result<String> {
        self.generate_with_timeout(PROBE_PROMPT, self.probe_timeout)
            .await
    }

    async fn generate_with_timeout(&self, prompt: &str, timeout: Duration) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| TripWiseError::config("Gemini API key is not configured"))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        debug!(
            "Gemini request to {}/models/{}:generateContent ({} chars prompt)",
            self.base_url,
            self.model,
            prompt.len()
        );

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| TripWiseError::api(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Gemini API returned HTTP {}", status);
            return Err(TripWiseError::api(format!("Gemini API error {status}")));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            TripWiseError::api(format!("Failed to parse Gemini response: {e}"))
        })?;

        body.first_text()
            .ok_or_else(|| TripWiseError::api("Gemini response contained no candidate text"))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Response envelope; every layer is optional on the wire
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, if any
    fn first_text(self) -> Option<String> {
        self.candidates?
            .into_iter()
            .next()?
            .content?
            .parts?
            .into_iter()
            .next()?
            .text
    }
}
