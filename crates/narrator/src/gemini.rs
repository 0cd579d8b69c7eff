//! Gemini narrator backend.
//!
//! Calls the `generateContent` endpoint with a fixed low-temperature
//! generation config and JSON response mode, then parses the returned text
//! into a [`NarrativeReport`].
//!
//! The model sometimes wraps its JSON in markdown code fences despite the
//! JSON response mime type, so the raw text is defensively stripped before
//! parsing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swmtrack_core::{NarrativeReport, Narrator, NarratorError};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Instruction prefix sent ahead of every payload. Keeps the model in
/// strict-JSON mode even when the response mime type is ignored.
const SYSTEM_PREAMBLE: &str = "You are a compliance report generator. \
    Always return valid JSON only, no additional text or markdown formatting.";

/// Gemini `generateContent` narrator.
pub struct GeminiNarrator {
    name: String,
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiNarrator {
    /// Create a narrator with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout_secs(api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a narrator with an explicit request timeout.
    pub fn with_timeout_secs(api_key: impl Into<String>, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Override the API base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn request_body(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{SYSTEM_PREAMBLE}\n\n{prompt}"),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.3,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 2048,
                response_mime_type: "application/json".into(),
            },
        }
    }

    /// Pull the first candidate's text out of the API response.
    fn extract_text(resp: GenerateContentResponse) -> Result<String, NarratorError> {
        resp.candidates
            .into_iter()
            .flatten()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().flatten().next())
            .map(|p| p.text)
            .ok_or_else(|| NarratorError::InvalidResponse {
                reason: "no candidate text in response".into(),
                raw: String::new(),
            })
    }

    /// Parse candidate text into a report, tolerating markdown code fences.
    fn parse_report(text: &str) -> Result<NarrativeReport, NarratorError> {
        let cleaned = strip_code_fences(text);
        serde_json::from_str(cleaned).map_err(|e| NarratorError::InvalidResponse {
            reason: format!("response is not a valid narrative report: {e}"),
            raw: text.to_string(),
        })
    }
}

/// Remove a leading ```` ```json ```` / ```` ``` ```` fence and the matching
/// trailing fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();
    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest;
    } else if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }
    cleaned.trim()
}

#[async_trait]
impl Narrator for GeminiNarrator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn render(&self, prompt: &str) -> Result<NarrativeReport, NarratorError> {
        if self.api_key.is_empty() {
            return Err(NarratorError::NotConfigured(
                "Gemini API key is not set".into(),
            ));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = Self::request_body(prompt);

        debug!(narrator = "gemini", model = %self.model, prompt_len = prompt.len(), "Sending render request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NarratorError::Timeout(e.to_string())
                } else {
                    NarratorError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(NarratorError::NotConfigured(
                "Gemini API key was rejected".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(NarratorError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GenerateContentResponse =
            response.json().await.map_err(|e| NarratorError::InvalidResponse {
                reason: format!("Failed to parse Gemini response envelope: {e}"),
                raw: String::new(),
            })?;

        let text = Self::extract_text(api_resp)?;
        Self::parse_report(&text)
    }
}

// --- Gemini API types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Option<Vec<Part>>,
}
