//! Model and API configuration.
//!
//! Configuration is resolved once at startup into immutable values that are
//! passed to every component. Precedence: CLI flag, then `promptline.toml`
//! in the working directory, then built-in defaults. The credential comes
//! from the process environment (a `.env` file is loaded first) and its
//! absence is a construction-time error, raised before any network call.

use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

/// Name of the optional per-directory configuration file.
pub const CONFIG_FILE_NAME: &str = "promptline.toml";

/// Environment variable overriding the service base URL (used by tests).
pub const BASE_URL_ENV: &str = "PROMPTLINE_BASE_URL";

/// Remote text-generation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn parse(name: &str) -> Result<Self, AppError> {
        match name.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            other => Err(AppError::config_error(format!(
                "Unknown provider '{other}': must be 'gemini' or 'openai'"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn credential_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-pro",
            Provider::OpenAi => "gpt-3.5-turbo",
        }
    }

    pub fn default_base_url(&self) -> Url {
        let url = match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::OpenAi => "https://api.openai.com",
        };
        Url::parse(url).expect("default base URL is valid")
    }
}

/// Transport-level settings for the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    pub fn for_provider(provider: Provider) -> Self {
        Self { base_url: provider.default_base_url(), timeout_secs: Self::DEFAULT_TIMEOUT_SECS }
    }
}

/// Immutable model selection plus credential for one run.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub provider: Provider,
    pub model: String,
    pub credential: String,
    pub api: ApiConfig,
}

impl ModelConfig {
    /// Resolve configuration from CLI overrides, the optional config file in
    /// `dir`, the environment, and defaults.
    pub fn resolve(
        dir: &Path,
        provider_flag: Option<Provider>,
        model_flag: Option<String>,
    ) -> Result<Self, AppError> {
        let file = load_file_config(dir)?;

        let provider = provider_flag
            .or_else(|| file.as_ref().and_then(|f| f.provider))
            .unwrap_or_default();

        let model = model_flag
            .or_else(|| file.as_ref().and_then(|f| f.model.clone()))
            .unwrap_or_else(|| provider.default_model().to_string());

        let credential = std::env::var(provider.credential_var())
            .map_err(|_| AppError::EnvironmentVariableMissing(provider.credential_var().into()))?;

        let mut api = ApiConfig::for_provider(provider);
        if let Some(timeout) = file.as_ref().and_then(|f| f.timeout_secs) {
            api.timeout_secs = timeout;
        }
        if let Some(base_url) = base_url_override()? {
            api.base_url = base_url;
        }

        Ok(Self { provider, model, credential, api })
    }
}

/// Values read from `promptline.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize)]
struct FileConfigDto {
    #[serde(default)]
    model: ModelSection,
    #[serde(default)]
    api: ApiSection,
}

#[derive(Deserialize, Default)]
struct ModelSection {
    provider: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct ApiSection {
    timeout_secs: Option<u64>,
}

/// Parse and validate a `promptline.toml` content string.
pub fn parse_file_config(content: &str) -> Result<FileConfig, AppError> {
    let dto: FileConfigDto = toml::from_str(content)?;

    let provider = dto.model.provider.as_deref().map(Provider::parse).transpose()?;

    if let Some(name) = &dto.model.name {
        if name.trim().is_empty() {
            return Err(AppError::config_error("model name cannot be empty"));
        }
    }
    if let Some(timeout) = dto.api.timeout_secs {
        if timeout == 0 {
            return Err(AppError::config_error("api.timeout_secs must be greater than zero"));
        }
    }

    Ok(FileConfig { provider, model: dto.model.name, timeout_secs: dto.api.timeout_secs })
}

fn load_file_config(dir: &Path) -> Result<Option<FileConfig>, AppError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    parse_file_config(&content).map(Some)
}

fn base_url_override() -> Result<Option<Url>, AppError> {
    match std::env::var(BASE_URL_ENV) {
        Ok(raw) => {
            let url = Url::parse(&raw).map_err(|e| {
                AppError::config_error(format!("Invalid {BASE_URL_ENV} '{raw}': {e}"))
            })?;
            Ok(Some(url))
        }
        Err(_) => Ok(None),
    }
}
