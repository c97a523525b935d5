//! # AI Provider Factory
//!
//! Turns a [`ProviderConfig`] into a boxed [`AiProvider`], so the CLI and the
//! tests build providers the same way.

use crate::{
    errors::PromptError,
    providers::ai::{
        gemini::{gemini_api_url, GeminiProvider},
        local::LocalAiProvider,
        AiProvider,
    },
    types::{ProviderConfig, DEFAULT_LOCAL_API_URL},
};
use tracing::info;

/// Creates an AI provider instance from its configuration.
///
/// - `gemini` requires an API key; the URL defaults to the model's
///   `generateContent` endpoint.
/// - `local` talks to an OpenAI-compatible endpoint, Ollama's by default.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "gemini" => {
            let api_key = config
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .ok_or(PromptError::MissingApiKey)?;
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| gemini_api_url(&config.model_name));
            info!("Configuring Gemini provider with URL: {}", api_url);
            Box::new(GeminiProvider::new(api_url, api_key)?)
        }
        "local" => {
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCAL_API_URL.to_string());
            info!(
                "Configuring local AI provider with URL: {} (model '{}')",
                api_url, config.model_name
            );
            let mut provider = LocalAiProvider::new(
                api_url,
                config.api_key.clone(),
                Some(config.model_name.clone()),
            )?;
            if let Some(temperature) = config.temperature {
                provider = provider.with_temperature(temperature);
            }
            if let Some(max_tokens) = config.max_tokens {
                provider = provider.with_max_tokens(max_tokens);
            }
            Box::new(provider)
        }
        other => {
            return Err(PromptError::MissingAiProvider(format!(
                "unknown provider type '{other}', expected 'local' or 'gemini'"
            )))
        }
    };

    Ok(provider)
}
