//! Adapters for the ports: HTTP inference clients, the PDF loader, and the
//! completion sinks.

pub mod gemini_client_http;
pub mod openai_client_http;
mod pdf_document_loader;
pub mod sinks;

pub use gemini_client_http::HttpGeminiClient;
pub use openai_client_http::HttpOpenAiClient;
pub use pdf_document_loader::PdfDocumentLoader;
pub use sinks::{MarkdownFileSink, PdfFileSink, StdoutSink, emit_all};
