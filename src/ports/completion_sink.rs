//! Completion sink port definition.

use std::path::PathBuf;

use crate::domain::{AppError, Completion};

/// Where a completion should be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Write the text plus one trailing newline to standard output.
    Stdout,
    /// Append the text to a Markdown file.
    MarkdownFile(PathBuf),
    /// Render the text as a paginated PDF document.
    PdfFile(PathBuf),
}

impl Destination {
    /// Short label for progress reporting.
    pub fn label(&self) -> String {
        match self {
            Destination::Stdout => "stdout".to_string(),
            Destination::MarkdownFile(path) => format!("markdown {}", path.display()),
            Destination::PdfFile(path) => format!("pdf {}", path.display()),
        }
    }
}

/// Port for delivering one completion to one destination.
pub trait CompletionSink {
    fn emit(&self, completion: &Completion) -> Result<(), AppError>;
}

/// Result of attempting one destination.
#[derive(Debug)]
pub struct SinkOutcome {
    pub destination: Destination,
    pub result: Result<(), AppError>,
}
