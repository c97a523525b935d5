//! # lextract
//!
//! Structured extraction from documents with a large language model.
//!
//! The pipeline has three stages, run in sequence:
//!
//! 1. [`loader`] resolves a source file and returns its text, converting
//!    binary formats through a [`loader::DocumentConverter`] plugin.
//! 2. [`extract`] sends the text with a task description and worked examples
//!    to an [`providers::ai::AiProvider`] and aligns the returned spans.
//! 3. [`output`] writes the result as a JSONL record and an HTML report.

pub mod errors;
pub mod extract;
pub mod io;
pub mod loader;
pub mod output;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod visualize;

pub use errors::{ExtractError, LoadError, OutputError, PromptError};
pub use extract::Extractor;
pub use loader::{load_text_from_source, DocumentConverter, LoaderOptions};
pub use output::save_extraction_outputs;
pub use prompts::PromptPreset;
pub use types::{
    AlignmentStatus, AnnotatedDocument, CharInterval, ExampleData, Extraction,
    ExtractionRequest, OutputArtifacts, ProviderConfig,
};
