//! Inference service port definition.

use crate::domain::{AppError, Completion};

/// Port for single-shot text generation.
///
/// One call performs exactly one blocking round-trip and returns the
/// service's text verbatim. Callers decide what to do with failures; the
/// client never retries.
pub trait InferenceClient {
    fn complete(&self, prompt: &str) -> Result<Completion, AppError>;
}

/// Mock client for testing and `--mock` runs without API calls.
#[derive(Debug, Clone, Default)]
pub struct MockInferenceClient;

impl InferenceClient for MockInferenceClient {
    fn complete(&self, prompt: &str) -> Result<Completion, AppError> {
        println!("=== MOCK MODE ===");
        println!("Would invoke the inference service with:");
        println!("  Prompt length: {} chars", prompt.len());

        Ok(Completion::new(format!(
            "[mock completion {}]",
            chrono::Utc::now().timestamp()
        )))
    }
}

/// Test double returning a fixed completion.
#[derive(Debug, Clone)]
pub struct CannedInferenceClient {
    text: String,
}

impl CannedInferenceClient {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl InferenceClient for CannedInferenceClient {
    fn complete(&self, _prompt: &str) -> Result<Completion, AppError> {
        Ok(Completion::new(self.text.clone()))
    }
}
