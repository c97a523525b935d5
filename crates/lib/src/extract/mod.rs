//! # Extraction
//!
//! Sends the loaded text, the task description and the worked examples to an
//! [`AiProvider`] in a single call, then turns the answer into an
//! [`AnnotatedDocument`] whose extractions are located in the source text.

pub mod align;
pub mod format;
pub mod parse;

pub use align::align_extractions;
pub use format::{render_system_prompt, render_user_prompt};
pub use parse::parse_model_output;

use crate::{
    errors::ExtractError,
    providers::ai::AiProvider,
    types::{AnnotatedDocument, ExtractionRequest},
};
use tracing::{debug, info, instrument, warn};

/// Runs one extraction request against an AI provider.
#[derive(Debug, Clone)]
pub struct Extractor {
    provider: Box<dyn AiProvider>,
    fence_output: bool,
}

impl Extractor {
    pub fn new(provider: Box<dyn AiProvider>) -> Self {
        Self {
            provider,
            fence_output: true,
        }
    }

    /// Whether example answers (and therefore the expected answer) are
    /// wrapped in a ```` ```json ```` block. Defaults to `true`.
    pub fn fence_output(mut self, fence_output: bool) -> Self {
        self.fence_output = fence_output;
        self
    }

    /// Extracts from `text` with exactly one provider call.
    ///
    /// Provider and parse failures are returned as-is; there is no retry.
    #[instrument(skip_all, fields(source = %request.source_path))]
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
        text: &str,
    ) -> Result<AnnotatedDocument, ExtractError> {
        if text.trim().is_empty() {
            warn!("Input text for '{}' is empty.", request.source_path);
        }

        let system_prompt = render_system_prompt(
            &request.prompt_description,
            &request.examples,
            self.fence_output,
        );
        let user_prompt = render_user_prompt(text);

        info!(
            "Requesting extractions for '{}' ({} characters, {} examples).",
            request.source_path,
            text.chars().count(),
            request.examples.len()
        );
        debug!(system_prompt = %system_prompt, "--> Sending prompts to AI Provider");

        let raw_response = self.provider.generate(&system_prompt, &user_prompt).await?;

        debug!("<-- Raw extraction output: {}", raw_response);

        let mut extractions = parse_model_output(&raw_response)?;
        align_extractions(text, &mut extractions);

        info!(
            "Model returned {} extractions for '{}'.",
            extractions.len(),
            request.source_path
        );

        Ok(AnnotatedDocument::new(
            &request.source_path,
            text.to_string(),
            extractions,
        ))
    }
}
