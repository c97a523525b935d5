//! # Prompt Presets
//!
//! Each preset pairs an extraction instruction with the worked examples that
//! show the model the expected classes and attributes.

pub mod literary;
pub mod treaty;

use crate::types::{ExampleData, ExtractionRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The built-in instruction and example sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPreset {
    /// Characters, emotions and relationships in prose or drama.
    #[default]
    Literary,
    /// Fields of a non-life reinsurance treaty slip.
    Treaty,
}

impl PromptPreset {
    pub fn prompt_description(&self) -> &'static str {
        match self {
            PromptPreset::Literary => literary::LITERARY_PROMPT,
            PromptPreset::Treaty => treaty::TREATY_PROMPT,
        }
    }

    pub fn examples(&self) -> Vec<ExampleData> {
        match self {
            PromptPreset::Literary => literary::examples(),
            PromptPreset::Treaty => treaty::examples(),
        }
    }

    /// Bundles this preset with a source into an [`ExtractionRequest`].
    pub fn request_for(&self, source_path: impl Into<String>) -> ExtractionRequest {
        ExtractionRequest {
            source_path: source_path.into(),
            prompt_description: self.prompt_description().to_string(),
            examples: self.examples(),
        }
    }
}

impl fmt::Display for PromptPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptPreset::Literary => write!(f, "literary"),
            PromptPreset::Treaty => write!(f, "treaty"),
        }
    }
}

impl FromStr for PromptPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "literary" => Ok(PromptPreset::Literary),
            "treaty" => Ok(PromptPreset::Treaty),
            other => Err(format!(
                "unknown preset '{other}', expected 'literary' or 'treaty'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_round_trips_through_its_name() {
        for preset in [PromptPreset::Literary, PromptPreset::Treaty] {
            assert_eq!(preset.to_string().parse::<PromptPreset>(), Ok(preset));
        }
        assert!("poetry".parse::<PromptPreset>().is_err());
    }

    #[test]
    fn example_extractions_are_verbatim_substrings() {
        for preset in [PromptPreset::Literary, PromptPreset::Treaty] {
            for example in preset.examples() {
                for extraction in &example.extractions {
                    assert!(
                        example.text.contains(&extraction.extraction_text),
                        "{preset}: '{}' not found in example text",
                        extraction.extraction_text
                    );
                }
            }
        }
    }
}
