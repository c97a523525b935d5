//! # JSONL Records
//!
//! One [`AnnotatedDocument`] per line, in the order given.

use crate::{errors::OutputError, types::AnnotatedDocument};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Writes `documents` to `path`, replacing any existing file.
pub fn save_annotated_documents(
    documents: &[AnnotatedDocument],
    path: &Path,
) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    for (index, document) in documents.iter().enumerate() {
        let line = serde_json::to_string(document).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        writeln!(writer, "{line}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;

    info!(
        "Saved {} document(s) to '{}'.",
        documents.len(),
        path.display()
    );
    Ok(())
}

/// Reads every document from a JSONL file. Blank lines are skipped.
pub fn load_annotated_documents(path: &Path) -> Result<Vec<AnnotatedDocument>, OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_err)?;
        if line.trim().is_empty() {
            continue;
        }
        let document = serde_json::from_str(&line).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        })?;
        documents.push(document);
    }
    Ok(documents)
}

/// Creates `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), OutputError> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })
}
