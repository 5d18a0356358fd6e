//! Shared render → invoke → sink execution.

use std::path::Path;

use crate::domain::{AppError, Completion, ModelConfig, PromptTemplate, Provider, RenderContext};
use crate::ports::{Destination, InferenceClient, MockInferenceClient, SinkOutcome};
use crate::services::{HttpGeminiClient, HttpOpenAiClient, emit_all};

/// Invocation options shared by every pipeline command.
#[derive(Debug, Clone, Default)]
pub struct InvocationOptions {
    /// Provider override (config file / default otherwise).
    pub provider: Option<Provider>,
    /// Model identifier override.
    pub model: Option<String>,
    /// Show the rendered prompt without invoking.
    pub dry_run: bool,
    /// Run in mock mode (no API calls).
    pub mock: bool,
}

/// Result of a pipeline execution.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The prompt after template rendering.
    pub rendered_prompt: String,
    /// The completion (None for dry runs).
    pub completion: Option<Completion>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

/// Execute the pipeline: render the template, invoke the configured
/// provider once, and deliver the completion to every destination.
///
/// Destinations are attempted independently. When one or more fail, the
/// remaining ones are still written and the first failure is returned
/// afterwards.
pub fn execute(
    working_dir: &Path,
    template: &PromptTemplate,
    context: &RenderContext,
    destinations: &[Destination],
    options: &InvocationOptions,
) -> Result<PipelineOutcome, AppError> {
    let rendered = template.render(context)?;

    if options.dry_run {
        println!("=== DRY RUN ===");
        println!("{rendered}");
        return Ok(PipelineOutcome { rendered_prompt: rendered, completion: None, dry_run: true });
    }

    let completion = invoke(working_dir, &rendered, options)?;

    let outcomes = emit_all(&completion, destinations);
    report_sink_outcomes(&outcomes);

    if let Some(failed) = outcomes.into_iter().find_map(|o| o.result.err()) {
        return Err(failed);
    }

    Ok(PipelineOutcome { rendered_prompt: rendered, completion: Some(completion), dry_run: false })
}

fn invoke(
    working_dir: &Path,
    prompt: &str,
    options: &InvocationOptions,
) -> Result<Completion, AppError> {
    if options.mock {
        return MockInferenceClient.complete(prompt);
    }

    let config = ModelConfig::resolve(working_dir, options.provider, options.model.clone())?;

    match config.provider {
        Provider::Gemini => HttpGeminiClient::from_config(&config)?.complete(prompt),
        Provider::OpenAi => HttpOpenAiClient::from_config(&config)?.complete(prompt),
    }
}

fn report_sink_outcomes(outcomes: &[SinkOutcome]) {
    for outcome in outcomes {
        // Stdout already carries the completion itself; no status line needed.
        if outcome.destination == Destination::Stdout {
            continue;
        }
        match &outcome.result {
            Ok(()) => println!("  ✅ Wrote {}", outcome.destination.label()),
            Err(e) => println!("  ❌ Failed {}: {}", outcome.destination.label(), e),
        }
    }
}

/// Build the destination list for a command: stdout first, then the
/// optional file outputs, in the order the files are written.
pub fn destinations(
    markdown: Option<std::path::PathBuf>,
    pdf: Option<std::path::PathBuf>,
) -> Vec<Destination> {
    let mut destinations = vec![Destination::Stdout];
    if let Some(path) = markdown {
        destinations.push(Destination::MarkdownFile(path));
    }
    if let Some(path) = pdf {
        destinations.push(Destination::PdfFile(path));
    }
    destinations
}
