// engine/gemini.rs — non-streaming client for the Gemini generateContent API.
//
// One POST per operation: prompt text in, JSON text out, shaped by a
// declared response schema. No retries, no streaming, no caching.

use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use super::schema::Schema;

/// Google Generative AI API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Gemini API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        /// Google's status label, e.g. "INVALID_ARGUMENT".
        status: Option<String>,
    },
    #[error("prompt blocked: {0}")]
    Blocked(String),
    #[error("model returned no text candidate")]
    EmptyResponse,
    #[error("model returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

// ─── Response DTOs ───────────────────────────────────────────────────────────

/// Google error payload.
#[derive(Debug, Deserialize)]
struct GoogleError {
    code: Option<u16>,
    message: String,
    status: Option<String>,
}

/// Google error wrapper.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Present when the prompt itself was refused.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Thin generateContent client. A missing API key surfaces per call so
/// the server can boot (and `echovibe check` can report) without one.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    /// Run one generateContent call and return the model's JSON text.
    pub async fn generate(
        &self,
        prompt: &str,
        response_schema: &Schema,
    ) -> Result<String, GeminiError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GeminiError::MissingApiKey);
        };

        let url = format!("{}/{}:generateContent", GEMINI_API_BASE, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt, response_schema))
            .send()
            .await?;

        let http_status = response.status();
        if !http_status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(&error_text) {
                return Err(GeminiError::Api {
                    code: parsed.error.code.unwrap_or(http_status.as_u16()),
                    message: parsed.error.message,
                    status: parsed.error.status,
                });
            }
            return Err(GeminiError::Api {
                code: http_status.as_u16(),
                message: error_text,
                status: None,
            });
        }

        first_text(response.json::<GenerateResponse>().await?)
    }
}

/// Request body for a single-shot JSON-mode generation.
fn request_body(prompt: &str, response_schema: &Schema) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        },
    })
}

/// Extract the first candidate's first text part.
fn first_text(response: GenerateResponse) -> Result<String, GeminiError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone())
    {
        return Err(GeminiError::Blocked(reason));
    }

    response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .find_map(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or(GeminiError::EmptyResponse)
}
