//! # Core Data Model
//!
//! The types shared by every stage of the pipeline. Field names follow the
//! JSONL record layout, so a record written by [`crate::io`] can be read back
//! into the same structs without any mapping layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

/// A half-open `[start_pos, end_pos)` range in characters of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharInterval {
    pub start_pos: usize,
    pub end_pos: usize,
}

impl CharInterval {
    pub fn len(&self) -> usize {
        self.end_pos.saturating_sub(self.start_pos)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How an extraction was located in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentStatus {
    /// The extraction text occurs verbatim.
    MatchExact,
    /// The extraction text occurs modulo case and whitespace runs.
    MatchFuzzy,
}

/// A labelled, attributed span of verbatim source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub extraction_class: String,
    pub extraction_text: String,
    #[serde(default)]
    pub char_interval: Option<CharInterval>,
    #[serde(default)]
    pub alignment_status: Option<AlignmentStatus>,
    #[serde(default)]
    pub extraction_index: Option<usize>,
    #[serde(default)]
    pub group_index: Option<usize>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Extraction {
    /// Creates an unaligned extraction, as written in a worked example.
    pub fn new(extraction_class: impl Into<String>, extraction_text: impl Into<String>) -> Self {
        Self {
            extraction_class: extraction_class.into(),
            extraction_text: extraction_text.into(),
            char_interval: None,
            alignment_status: None,
            extraction_index: None,
            group_index: None,
            description: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a single attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn is_aligned(&self) -> bool {
        self.char_interval.is_some()
    }
}

/// A worked example: a source text and the extractions expected from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleData {
    pub text: String,
    pub extractions: Vec<Extraction>,
}

impl ExampleData {
    pub fn new(text: impl Into<String>, extractions: Vec<Extraction>) -> Self {
        Self {
            text: text.into(),
            extractions,
        }
    }
}

/// Everything the extractor needs for one invocation, minus the input text.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub source_path: String,
    pub prompt_description: String,
    pub examples: Vec<ExampleData>,
}

/// The result of extracting from one document. One JSONL line per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub extractions: Vec<Extraction>,
    pub text: String,
    pub document_id: String,
}

impl AnnotatedDocument {
    pub fn new(source_identifier: &str, text: String, extractions: Vec<Extraction>) -> Self {
        Self {
            extractions,
            text,
            document_id: document_id_for(source_identifier),
        }
    }

    /// The distinct extraction classes, in order of first appearance.
    pub fn classes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for extraction in &self.extractions {
            if !seen.contains(&extraction.extraction_class.as_str()) {
                seen.push(&extraction.extraction_class);
            }
        }
        seen
    }
}

/// Derives a stable `doc_xxxxxxxx` identifier from a source identifier.
pub fn document_id_for(source_identifier: &str) -> String {
    let uuid = Uuid::new_v5(&Uuid::NAMESPACE_URL, source_identifier.as_bytes());
    format!("doc_{}", &uuid.simple().to_string()[..8])
}

/// A reusable configuration for a specific AI provider instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider ("local" or "gemini").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API URL. Optional for Gemini, where it is derived from the model name.
    #[serde(default)]
    pub api_url: Option<String>,
    /// The API key, which can be null for local providers.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_model_name() -> String {
    DEFAULT_MODEL.to_string()
}

/// The Ollama chat completions endpoint on its default port, used when a
/// local provider has no `api_url`.
pub const DEFAULT_LOCAL_API_URL: &str = "http://localhost:11434/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-oss:20b-cloud";

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_model_name(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// The two files produced by the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifacts {
    pub jsonl_path: PathBuf,
    pub html_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_id_is_stable_per_source() {
        let a = document_id_for("in/romeo.txt");
        let b = document_id_for("in/romeo.txt");
        let c = document_id_for("in/juliet.txt");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("doc_"));
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn classes_keep_first_appearance_order() {
        let doc = AnnotatedDocument::new(
            "x",
            String::new(),
            vec![
                Extraction::new("emotion", "a"),
                Extraction::new("character", "b"),
                Extraction::new("emotion", "c"),
            ],
        );
        assert_eq!(doc.classes(), vec!["emotion", "character"]);
    }

    #[test]
    fn unaligned_extraction_deserializes_with_defaults() {
        let json = r#"{"extraction_class":"character","extraction_text":"ROMEO"}"#;
        let extraction: Extraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction, Extraction::new("character", "ROMEO"));
        assert!(!extraction.is_aligned());
    }
}
