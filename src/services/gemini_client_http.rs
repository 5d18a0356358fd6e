//! Gemini API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ApiConfig, AppError, Completion, ModelConfig};
use crate::ports::InferenceClient;

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";
const DEFAULT_STATUS_MESSAGE: &str = "Gemini API request failed";

/// HTTP transport for the Gemini `generateContent` endpoint.
///
/// This client performs a single blocking request per call. There is no
/// retry, streaming, or partial-result handling.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new client for the given model and API configuration.
    pub fn new(api_key: String, model: &str, config: &ApiConfig) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::Authentication("Gemini API key is empty".into()));
        }

        let endpoint = config
            .base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| AppError::config_error(format!("Invalid Gemini endpoint: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Service {
                message: format!("Failed to create HTTP client: {e}"),
                status: None,
            })?;

        Ok(Self { api_key, endpoint, client })
    }

    /// Create from a resolved model configuration.
    pub fn from_config(config: &ModelConfig) -> Result<Self, AppError> {
        Self::new(config.credential.clone(), &config.model, &config.api)
    }

    fn send_request(&self, request: &GenerateContentRequest) -> Result<Completion, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::Service {
                message: format!("HTTP request failed: {e}"),
                status: None,
            })?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: GenerateContentResponse = serde_json::from_str(&body_text)
                .map_err(|e| AppError::Service {
                    message: format!("Failed to parse response: {e}"),
                    status: Some(status.as_u16()),
                })?;

            let text = api_response.text();
            if text.is_empty() {
                return Err(AppError::EmptyResponse);
            }
            return Ok(Completion::new(text));
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(AppError::Authentication(message));
        }

        Err(AppError::Service { message, status: Some(status.as_u16()) })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts, verbatim.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect::<String>())
            .unwrap_or_default()
    }
}

/// Extract a human-readable message from a Gemini error envelope.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl InferenceClient for HttpGeminiClient {
    fn complete(&self, prompt: &str) -> Result<Completion, AppError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
        };

        self.send_request(&request)
    }
}
