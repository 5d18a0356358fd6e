use std::io;

use thiserror::Error;

/// Library-wide error type for promptline operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable is not set.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// A template referenced a placeholder with no value in the context.
    #[error("Missing placeholder '{name}' in template '{template}'")]
    MissingPlaceholder { template: String, name: String },

    /// Template is malformed or uses disallowed syntax.
    #[error("Failed to render template '{template}': {reason}")]
    Template { template: String, reason: String },

    /// Credential is absent or was rejected by the service.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Transport failure or non-success response from the inference service.
    #[error("Inference service error: {message}")]
    Service { message: String, status: Option<u16> },

    /// The service answered successfully but returned no text.
    #[error("Inference service returned an empty completion")]
    EmptyResponse,

    /// Output document could not be laid out.
    #[error("Failed to render output document: {0}")]
    Render(String),

    /// Document could not be loaded or its text extracted.
    #[error("Failed to load document '{path}': {reason}")]
    DocumentLoad { path: String, reason: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::MissingPlaceholder { .. }
            | AppError::Template { .. }
            | AppError::TomlParse(_) => io::ErrorKind::InvalidInput,
            AppError::EnvironmentVariableMissing(_) | AppError::DocumentLoad { .. } => {
                io::ErrorKind::NotFound
            }
            AppError::Authentication(_) => io::ErrorKind::PermissionDenied,
            AppError::Service { .. } | AppError::EmptyResponse | AppError::Render(_) => {
                io::ErrorKind::Other
            }
        }
    }
}
