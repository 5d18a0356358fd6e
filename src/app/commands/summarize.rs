//! Summarize command: load a PDF, split it into chunks, render the
//! briefing template, and sink the completion.

use std::path::{Path, PathBuf};

use crate::app::commands::pipeline::{self, InvocationOptions, PipelineOutcome};
use crate::domain::{AppError, PromptTemplate, RenderContext, SplitConfig, split_text};
use crate::ports::DocumentLoader;

/// Options for the summarize command.
#[derive(Debug, Clone)]
pub struct SummarizeOptions {
    /// Path of the PDF document to summarize.
    pub document: PathBuf,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    /// Append the completion to this Markdown file.
    pub markdown: Option<PathBuf>,
    /// Render the completion into this PDF file.
    pub pdf: Option<PathBuf>,
    pub invocation: InvocationOptions,
}

/// Execute the summarize command with the given document loader.
pub fn execute<L: DocumentLoader>(
    working_dir: &Path,
    loader: &L,
    options: &SummarizeOptions,
) -> Result<PipelineOutcome, AppError> {
    let split_config = SplitConfig::new(options.chunk_size, options.chunk_overlap)?;

    let pages = loader.load(&options.document)?;
    let chunks = split_text(&pages.join("\n"), &split_config);
    println!("Loaded {} page(s), split into {} chunk(s)", pages.len(), chunks.len());

    let template = PromptTemplate::briefing();
    let context = RenderContext::new().with_chunks("docs", &chunks);
    let destinations = pipeline::destinations(options.markdown.clone(), options.pdf.clone());

    pipeline::execute(working_dir, &template, &context, &destinations, &options.invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StaticDocumentLoader;

    fn dry_options() -> SummarizeOptions {
        SummarizeOptions {
            document: PathBuf::from("report.pdf"),
            chunk_size: SplitConfig::DEFAULT_CHUNK_SIZE,
            chunk_overlap: SplitConfig::DEFAULT_CHUNK_OVERLAP,
            markdown: None,
            pdf: None,
            invocation: InvocationOptions { dry_run: true, ..Default::default() },
        }
    }

    #[test]
    fn pages_are_chunked_and_rendered_into_the_briefing() {
        let loader = StaticDocumentLoader::new(["page one text", "page two text"]);

        let outcome = execute(&std::env::temp_dir(), &loader, &dry_options()).unwrap();

        assert!(outcome.rendered_prompt.contains("page one text\npage two text"));
        assert!(outcome.rendered_prompt.contains("senior financial analyst"));
    }

    #[test]
    fn invalid_chunk_parameters_fail_before_loading() {
        let loader = StaticDocumentLoader::new(["text"]);
        let mut options = dry_options();
        options.chunk_size = 50;
        options.chunk_overlap = 50;

        assert!(matches!(
            execute(&std::env::temp_dir(), &loader, &options),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn loader_failure_propagates() {
        use crate::services::PdfDocumentLoader;

        let mut options = dry_options();
        options.document = PathBuf::from("/does/not/exist.pdf");

        assert!(matches!(
            execute(&std::env::temp_dir(), &PdfDocumentLoader::new(), &options),
            Err(AppError::DocumentLoad { .. })
        ));
    }
}
