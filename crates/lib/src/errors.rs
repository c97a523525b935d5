use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to an AI provider.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing")]
    MissingApiKey,
    #[error("AI provider is not configured: {0}")]
    MissingAiProvider(String),
}

/// Errors raised while resolving and reading a source document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read source file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The '{converter}' converter failed on '{}': {message}", path.display())]
    Conversion {
        converter: String,
        path: PathBuf,
        message: String,
    },
}

/// Errors raised by the extraction step.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] PromptError),
    #[error("Failed to parse model output: {0}")]
    Parse(String),
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Errors raised while writing the record and report files.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid record on line {line} of '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
