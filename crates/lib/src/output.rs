//! # Writer
//!
//! Persists an extraction result as a JSONL record file and an HTML report
//! rendered from that record file.

use crate::{
    errors::OutputError,
    io::{ensure_dir, save_annotated_documents},
    types::{AnnotatedDocument, OutputArtifacts},
    visualize::visualize,
};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// The basename used when neither an explicit name nor a source is given.
pub const DEFAULT_OUTPUT_BASENAME: &str = "extraction_results";

/// Picks the output basename: explicit name, else source stem, else the default.
pub fn resolve_basename(source_filename: Option<&str>, output_basename: Option<&str>) -> String {
    if let Some(name) = output_basename.filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    source_filename
        .and_then(|source| Path::new(source).file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_OUTPUT_BASENAME.to_string())
}

impl OutputArtifacts {
    /// The record and report paths for `basename` inside `out_dir`.
    pub fn new(out_dir: &Path, basename: &str) -> Self {
        Self {
            jsonl_path: out_dir.join(format!("{basename}.jsonl")),
            html_path: out_dir.join(format!("{basename}.html")),
        }
    }
}

/// Writes `<out_dir>/<basename>.jsonl` and `<out_dir>/<basename>.html`.
///
/// The HTML is rendered from the JSONL file just written, so the report
/// always reflects what is on disk. Writes are not atomic.
#[instrument(skip(result), fields(document_id = %result.document_id))]
pub fn save_extraction_outputs(
    result: &AnnotatedDocument,
    source_filename: Option<&str>,
    output_basename: Option<&str>,
    out_dir: &Path,
) -> Result<OutputArtifacts, OutputError> {
    ensure_dir(out_dir)?;

    let basename = resolve_basename(source_filename, output_basename);
    let artifacts = OutputArtifacts::new(out_dir, &basename);

    save_annotated_documents(std::slice::from_ref(result), &artifacts.jsonl_path)?;

    let html = visualize(&artifacts.jsonl_path)?;
    fs::write(&artifacts.html_path, html).map_err(|source| OutputError::Io {
        path: artifacts.html_path.clone(),
        source,
    })?;
    info!("Wrote report to '{}'.", artifacts.html_path.display());

    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn basename_prefers_explicit_then_stem_then_default() {
        assert_eq!(resolve_basename(Some("slip.pdf"), Some("custom")), "custom");
        assert_eq!(resolve_basename(Some("slip.pdf"), None), "slip");
        assert_eq!(resolve_basename(Some("nested/romeo.txt"), Some("")), "romeo");
        assert_eq!(resolve_basename(None, None), DEFAULT_OUTPUT_BASENAME);
    }

    #[test]
    fn artifact_paths_derive_from_dir_and_basename() {
        let artifacts = OutputArtifacts::new(Path::new("out"), "romeo");
        assert_eq!(artifacts.jsonl_path, PathBuf::from("out/romeo.jsonl"));
        assert_eq!(artifacts.html_path, PathBuf::from("out/romeo.html"));
    }
}
