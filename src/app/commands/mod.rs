pub mod ask;
pub mod generate;
pub mod pipeline;
pub mod summarize;
