use std::path::PathBuf;

use clap::{Parser, Subcommand};
use promptline::{
    AppError, AskOptions, GenerateOptions, InvocationOptions, Provider, SummarizeOptions,
};

#[derive(Parser)]
#[command(name = "promptline")]
#[command(version)]
#[command(
    about = "Render prompt templates, invoke Gemini/OpenAI, and sink completions",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Inference provider: gemini or openai
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Model identifier (defaults to the provider's standard model)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Show the rendered prompt without invoking the service
    #[arg(long, global = true)]
    dry_run: bool,

    /// Run in mock mode (no API calls)
    #[arg(long, global = true)]
    mock: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a completion from the built-in joke template
    #[clap(visible_alias = "g")]
    Generate {
        /// Topic substituted into the template
        #[arg(short, long)]
        topic: String,
    },
    /// Send a free-form question to the model
    #[clap(visible_alias = "a")]
    Ask {
        /// The question to send
        question: String,
        /// Append the completion to this Markdown file
        #[arg(long)]
        markdown: Option<PathBuf>,
        /// Render the completion into this PDF file
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Summarize a PDF document through the built-in briefing template
    #[clap(visible_alias = "s")]
    Summarize {
        /// Path of the PDF document
        document: PathBuf,
        /// Maximum chunk size in characters
        #[arg(long, default_value_t = 600)]
        chunk_size: usize,
        /// Characters of overlap between neighboring chunks
        #[arg(long, default_value_t = 100)]
        chunk_overlap: usize,
        /// Append the completion to this Markdown file
        #[arg(long)]
        markdown: Option<PathBuf>,
        /// Render the completion into this PDF file
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
}

fn main() {
    // Credentials may live in a local .env file.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let provider = cli.provider.as_deref().map(Provider::parse).transpose()?;
    let invocation = InvocationOptions {
        provider,
        model: cli.model.clone(),
        dry_run: cli.dry_run,
        mock: cli.mock,
    };

    match cli.command {
        Commands::Generate { topic } => {
            promptline::generate(&GenerateOptions { topic, invocation }).map(|_| ())
        }
        Commands::Ask { question, markdown, pdf } => {
            promptline::ask(&AskOptions { question, markdown, pdf, invocation }).map(|_| ())
        }
        Commands::Summarize { document, chunk_size, chunk_overlap, markdown, pdf } => {
            promptline::summarize(&SummarizeOptions {
                document,
                chunk_size,
                chunk_overlap,
                markdown,
                pdf,
                invocation,
            })
            .map(|_| ())
        }
    }
}
