//! promptline: render a prompt template, invoke a text-generation service
//! once, and deliver the completion to stdout, Markdown, or PDF.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::PathBuf;

use app::commands::{ask, generate, summarize};
use services::PdfDocumentLoader;

pub use app::commands::ask::AskOptions;
pub use app::commands::generate::GenerateOptions;
pub use app::commands::pipeline::{InvocationOptions, PipelineOutcome};
pub use app::commands::summarize::SummarizeOptions;
pub use domain::{AppError, Completion, Provider};
pub use ports::Destination;

/// Render the built-in joke template for a topic and print the completion.
pub fn generate(options: &GenerateOptions) -> Result<PipelineOutcome, AppError> {
    let dir = working_dir()?;
    generate::execute(&dir, options)
}

/// Send a free-form question; print and optionally persist the completion.
pub fn ask(options: &AskOptions) -> Result<PipelineOutcome, AppError> {
    let dir = working_dir()?;
    ask::execute(&dir, options)
}

/// Summarize a PDF document through the briefing template.
pub fn summarize(options: &SummarizeOptions) -> Result<PipelineOutcome, AppError> {
    let dir = working_dir()?;
    summarize::execute(&dir, &PdfDocumentLoader::new(), options)
}

fn working_dir() -> Result<PathBuf, AppError> {
    std::env::current_dir().map_err(AppError::from)
}
