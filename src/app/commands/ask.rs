//! Ask command: send a free-form question, print the completion, and
//! optionally persist it as Markdown and PDF.

use std::path::{Path, PathBuf};

use crate::app::commands::pipeline::{self, InvocationOptions, PipelineOutcome};
use crate::domain::{AppError, PromptTemplate, RenderContext};

/// Options for the ask command.
#[derive(Debug, Clone)]
pub struct AskOptions {
    /// The question sent to the model, verbatim.
    pub question: String,
    /// Append the completion to this Markdown file.
    pub markdown: Option<PathBuf>,
    /// Render the completion into this PDF file.
    pub pdf: Option<PathBuf>,
    pub invocation: InvocationOptions,
}

/// Execute the ask command.
pub fn execute(working_dir: &Path, options: &AskOptions) -> Result<PipelineOutcome, AppError> {
    let template = PromptTemplate::new("ask", "{{ question }}");
    let context = RenderContext::new().with_var("question", options.question.clone());
    let destinations = pipeline::destinations(options.markdown.clone(), options.pdf.clone());

    pipeline::execute(working_dir, &template, &context, &destinations, &options.invocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_passes_through_unchanged() {
        let options = AskOptions {
            question: "Write a one-sentence bedtime story about a unicorn.".to_string(),
            markdown: None,
            pdf: None,
            invocation: InvocationOptions { dry_run: true, ..Default::default() },
        };

        let outcome = execute(&std::env::temp_dir(), &options).unwrap();
        assert_eq!(
            outcome.rendered_prompt,
            "Write a one-sentence bedtime story about a unicorn."
        );
    }
}
