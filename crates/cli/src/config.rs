//! # Configuration
//!
//! Builds the [`AppConfig`] from layered sources, lowest priority first:
//!
//! 1. Programmatic defaults.
//! 2. A YAML file: the `--config` path, else `lextract.yml` in the working
//!    directory when present. `${VAR}` placeholders are replaced with the
//!    value of the environment variable (empty when unset).
//! 3. `LEXTRACT_` prefixed environment variables, with `__` separating
//!    nested keys (e.g. `LEXTRACT_PROVIDER__MODEL_NAME`).
//!
//! Command-line flags are applied on top by the caller.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use lextract::types::{ProviderConfig, DEFAULT_MODEL};
use lextract::PromptPreset;
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// The config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lextract.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    General(String),
    #[error("Config file not found at '{0}'")]
    NotFound(PathBuf),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The resolved settings for one run.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory the `--source` name is resolved in.
    pub in_dir: PathBuf,
    /// Directory the JSONL and HTML files are written to.
    pub out_dir: PathBuf,
    /// Where converted text is cached. Defaults to `out_dir`.
    #[serde(default)]
    pub md_out_dir: Option<PathBuf>,
    /// Set to `false` to never write converted text.
    pub md_cache: bool,
    pub preset: PromptPreset,
    /// Wrap example answers in a ```` ```json ```` block.
    pub fence_output: bool,
    pub provider: ProviderConfig,
}

impl AppConfig {
    /// The cache directory for converted text, or `None` when caching is off.
    pub fn md_cache_dir(&self) -> Option<PathBuf> {
        if !self.md_cache {
            return None;
        }
        Some(self.md_out_dir.clone().unwrap_or_else(|| self.out_dir.clone()))
    }
}

/// Reads a file and substitutes `${VAR}` placeholders from the environment.
/// Returns `Ok(None)` if the file does not exist.
fn read_and_substitute(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::General(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded.into_owned()))
}

/// Loads the configuration. An explicit `config_path` must exist.
pub fn get_config(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder()
        .set_default("in_dir", "in")?
        .set_default("out_dir", "out")?
        .set_default("md_cache", true)?
        .set_default("preset", PromptPreset::default().to_string())?
        .set_default("fence_output", true)?
        .set_default("provider.provider", "local")?
        .set_default("provider.model_name", DEFAULT_MODEL)?;

    let file_content = match config_path {
        Some(path) => Some(
            read_and_substitute(path)?
                .ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?,
        ),
        None => {
            let content = read_and_substitute(Path::new(DEFAULT_CONFIG_FILE))?;
            if content.is_some() {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
            }
            content
        }
    };
    if let Some(content) = file_content {
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix("LEXTRACT")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    if config
        .provider
        .api_key
        .as_deref()
        .unwrap_or_default()
        .is_empty()
    {
        config.provider.api_key = env::var("AI_API_KEY").ok().filter(|k| !k.is_empty());
    }

    Ok(config)
}
