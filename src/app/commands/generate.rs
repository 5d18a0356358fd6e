//! Generate command: render the built-in joke template for a topic and
//! print the completion.

use std::path::Path;

use crate::app::commands::pipeline::{self, InvocationOptions, PipelineOutcome};
use crate::domain::{AppError, PromptTemplate, RenderContext};
use crate::ports::Destination;

/// Options for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Topic substituted into the template.
    pub topic: String,
    pub invocation: InvocationOptions,
}

/// Execute the generate command.
pub fn execute(working_dir: &Path, options: &GenerateOptions) -> Result<PipelineOutcome, AppError> {
    let template = PromptTemplate::joke();
    let context = RenderContext::new().with_var("topic", options.topic.clone());

    pipeline::execute(
        working_dir,
        &template,
        &context,
        &[Destination::Stdout],
        &options.invocation,
    )
}
