mod completion_sink;
mod document_loader;
mod inference_client;

pub use completion_sink::{CompletionSink, Destination, SinkOutcome};
pub use document_loader::{DocumentLoader, StaticDocumentLoader};
pub use inference_client::{CannedInferenceClient, InferenceClient, MockInferenceClient};
