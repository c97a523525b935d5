//! # `lextract-cli` Library Crate
//!
//! Argument parsing and the load, extract, write pipeline behind the
//! `lextract` binary.

pub mod config;

use anyhow::{Context, Result};
use clap::Parser;
use lextract::{
    load_text_from_source, providers::create_provider, save_extraction_outputs, Extractor,
    LoaderOptions, OutputArtifacts, PromptPreset,
};
use lextract_pdf::PdfConverter;
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::config::{get_config, AppConfig};

// --- CLI Argument Structs ---

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract structured annotations from a text or PDF document", long_about = None)]
pub struct Cli {
    /// Name of the source file inside the input directory.
    #[arg(long)]
    pub source: String,
    /// Directory containing the source file [default: in]
    #[arg(long)]
    pub in_dir: Option<PathBuf>,
    /// Directory for the JSONL and HTML outputs [default: out]
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Directory for converted text. Defaults to the output directory.
    #[arg(long, conflicts_with = "no_md_cache")]
    pub md_out_dir: Option<PathBuf>,
    /// Do not write converted text to disk.
    #[arg(long)]
    pub no_md_cache: bool,
    /// Basename for the output files. Defaults to the source file stem.
    #[arg(long)]
    pub output_name: Option<String>,
    /// Instruction and example set: `literary` or `treaty`.
    #[arg(long)]
    pub preset: Option<PromptPreset>,
    /// Model name passed to the provider.
    #[arg(long, env = "AI_MODEL")]
    pub model: Option<String>,
    /// Provider endpoint, e.g. an OpenAI-compatible chat completions URL.
    #[arg(long, env = "AI_API_URL")]
    pub api_url: Option<String>,
    /// Path to a YAML config file [default: ./lextract.yml if present]
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Applies the flags that were given on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(in_dir) = &self.in_dir {
            config.in_dir = in_dir.clone();
        }
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if let Some(md_out_dir) = &self.md_out_dir {
            // An explicit cache directory turns caching back on.
            config.md_out_dir = Some(md_out_dir.clone());
            config.md_cache = true;
        }
        if self.no_md_cache {
            config.md_cache = false;
        }
        if let Some(preset) = self.preset {
            config.preset = preset;
        }
        if let Some(model) = &self.model {
            config.provider.model_name = model.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.provider.api_url = Some(api_url.clone());
        }
    }
}

// --- Public Entrypoint ---

/// Runs the pipeline once and returns the paths of the written files.
#[instrument(skip_all, fields(source = %cli.source))]
pub async fn run(cli: Cli) -> Result<OutputArtifacts> {
    let mut config =
        get_config(cli.config.as_deref()).context("Failed to load configuration")?;
    cli.apply_to(&mut config);

    // 1. Load
    let options = LoaderOptions {
        in_dir: config.in_dir.clone(),
        md_out_dir: config.md_cache_dir(),
    };
    let text = load_text_from_source(&cli.source, &options, &PdfConverter::new())
        .with_context(|| format!("Failed to load source '{}'", cli.source))?;
    info!("Loaded {} characters from '{}'.", text.chars().count(), cli.source);

    // 2. Extract
    let provider =
        create_provider(&config.provider).context("Failed to create the AI provider")?;
    let extractor = Extractor::new(provider).fence_output(config.fence_output);
    let request = config
        .preset
        .request_for(options.in_dir.join(&cli.source).display().to_string());
    info!(
        "Extracting with the '{}' preset and model '{}'.",
        config.preset, config.provider.model_name
    );
    let document = extractor
        .extract(&request, &text)
        .await
        .context("Extraction failed")?;

    // 3. Write
    let artifacts = save_extraction_outputs(
        &document,
        Some(&cli.source),
        cli.output_name.as_deref(),
        &config.out_dir,
    )
    .context("Failed to write extraction outputs")?;

    Ok(artifacts)
}
