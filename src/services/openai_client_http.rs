//! OpenAI chat-completions client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{ApiConfig, AppError, Completion, ModelConfig};
use crate::ports::InferenceClient;
use crate::services::gemini_client_http::extract_error_message;

const DEFAULT_STATUS_MESSAGE: &str = "OpenAI API request failed";

/// HTTP transport for the OpenAI chat-completions endpoint.
///
/// Single blocking request per call, no retry or streaming.
#[derive(Clone)]
pub struct HttpOpenAiClient {
    api_key: String,
    model: String,
    endpoint: Url,
    client: Client,
}

impl std::fmt::Debug for HttpOpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpOpenAiClient {
    /// Create a new client for the given model and API configuration.
    pub fn new(api_key: String, model: &str, config: &ApiConfig) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::Authentication("OpenAI API key is empty".into()));
        }

        let endpoint = config
            .base_url
            .join("v1/chat/completions")
            .map_err(|e| AppError::config_error(format!("Invalid OpenAI endpoint: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Service {
                message: format!("Failed to create HTTP client: {e}"),
                status: None,
            })?;

        Ok(Self { api_key, model: model.to_string(), endpoint, client })
    }

    /// Create from a resolved model configuration.
    pub fn from_config(config: &ModelConfig) -> Result<Self, AppError> {
        Self::new(config.credential.clone(), &config.model, &config.api)
    }

    fn send_request(&self, request: &ChatCompletionRequest) -> Result<Completion, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
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
            let api_response: ChatCompletionResponse = serde_json::from_str(&body_text)
                .map_err(|e| AppError::Service {
                    message: format!("Failed to parse response: {e}"),
                    status: Some(status.as_u16()),
                })?;

            let text = api_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default();

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
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl InferenceClient for HttpOpenAiClient {
    fn complete(&self, prompt: &str) -> Result<Completion, AppError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage { role: "user".to_string(), content: prompt.to_string() }],
        };

        self.send_request(&request)
    }
}
