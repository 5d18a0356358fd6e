//! Pure domain types and logic: errors, configuration, prompt templates,
//! completions, and the document splitter.

pub mod config;
mod completion;
mod error;
pub mod prompt;
pub mod splitter;

pub use completion::Completion;
pub use config::{ApiConfig, FileConfig, ModelConfig, Provider};
pub use error::AppError;
pub use prompt::{PromptTemplate, RenderContext};
pub use splitter::{SplitConfig, split_text};
