//! # Source Loading
//!
//! Resolves a named file inside an input directory and returns its text.
//! Binary document formats are handed to a [`DocumentConverter`] plugin; the
//! converted text can be cached next to the outputs as `<stem>.md`.

use crate::errors::LoadError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// A plugin that turns a binary document into plain text.
///
/// Converters live in their own crates (e.g. `lextract-pdf`) and map their
/// specific failures into [`LoadError::Conversion`].
pub trait DocumentConverter {
    /// A short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether this converter handles files with the given lowercase extension.
    fn supports(&self, extension: &str) -> bool;

    /// Converts the file at `path` to text.
    fn convert(&self, path: &Path) -> Result<String, LoadError>;
}

/// A converter that accepts nothing. Every file is read as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoConverter;

impl DocumentConverter for NoConverter {
    fn name(&self) -> &str {
        "none"
    }

    fn supports(&self, _extension: &str) -> bool {
        false
    }

    fn convert(&self, path: &Path) -> Result<String, LoadError> {
        Err(LoadError::Conversion {
            converter: self.name().to_string(),
            path: path.to_path_buf(),
            message: "no converter configured".to_string(),
        })
    }
}

/// Where to look for sources and where to cache converted text.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub in_dir: PathBuf,
    /// When `None`, converted text is not written anywhere.
    pub md_out_dir: Option<PathBuf>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            in_dir: PathBuf::from("in"),
            md_out_dir: Some(PathBuf::from("out")),
        }
    }
}

/// Returns the path a converted source is cached under, if caching is enabled.
pub fn cached_text_path(source_path: &Path, md_out_dir: Option<&Path>) -> Option<PathBuf> {
    let stem = source_path.file_stem()?;
    md_out_dir.map(|dir| dir.join(format!("{}.md", stem.to_string_lossy())))
}

/// Loads the text of `source_name` from `options.in_dir`.
///
/// - A missing file is [`LoadError::NotFound`].
/// - Extensions claimed by `converter` are converted once; the result is
///   written to `<md_out_dir>/<stem>.md` when `md_out_dir` is set.
/// - Everything else is read as UTF-8 without modification.
#[instrument(skip(options, converter), fields(in_dir = %options.in_dir.display()))]
pub fn load_text_from_source(
    source_name: &str,
    options: &LoaderOptions,
    converter: &dyn DocumentConverter,
) -> Result<String, LoadError> {
    let source_path = options.in_dir.join(source_name);

    if !source_path.is_file() {
        return Err(LoadError::NotFound(source_path));
    }

    let extension = source_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if !converter.supports(&extension) {
        info!("Reading '{}' as text.", source_path.display());
        return fs::read_to_string(&source_path).map_err(|source| LoadError::Io {
            path: source_path.clone(),
            source,
        });
    }

    info!(
        "Converting '{}' with the '{}' converter.",
        source_path.display(),
        converter.name()
    );
    let text = converter.convert(&source_path)?;

    if let Some(out_path) = cached_text_path(&source_path, options.md_out_dir.as_deref()) {
        if let Some(dir) = out_path.parent() {
            fs::create_dir_all(dir).map_err(|source| LoadError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&out_path, &text).map_err(|source| LoadError::Io {
            path: out_path.clone(),
            source,
        })?;
        info!("Cached converted text at '{}'.", out_path.display());
    }

    Ok(text)
}
