//! # lextract-pdf: PDF Conversion Plugin
//!
//! This crate turns PDF documents into plain text for the `lextract` loader.
//! It implements the `DocumentConverter` trait from the core library.

use lextract::{loader::DocumentConverter, LoadError};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument, warn};

// --- Error Definitions ---

#[derive(Error, Debug)]
pub enum PdfConvertError {
    #[error("Failed to read PDF file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
}

impl PdfConvertError {
    /// Maps this error into the loader's error type for the file at `path`.
    pub fn into_load_error(self, path: &Path) -> LoadError {
        match self {
            PdfConvertError::Io(source) => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            PdfConvertError::PdfParse(message) => LoadError::Conversion {
                converter: PdfConverter::NAME.to_string(),
                path: path.to_path_buf(),
                message,
            },
        }
    }
}

// --- Core Extraction Logic ---

/// Extracts text from all pages of a PDF.
///
/// Glyphs are decoded through each font's `/ToUnicode` map or `/Encoding`,
/// so embedded subset fonts and WinAnsi text come back as readable Unicode.
/// Each page is trimmed, pages without text are skipped, and the remaining
/// pages are separated by a blank line.
pub fn extract_text_from_pdf(pdf_data: &[u8]) -> Result<String, PdfConvertError> {
    // pdf-extract panics on some unsupported font programs.
    let pages =
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(pdf_data))
            .map_err(|_| PdfConvertError::PdfParse("text extraction panicked".to_string()))?
            .map_err(|e| PdfConvertError::PdfParse(e.to_string()))?;

    let mut texts = Vec::with_capacity(pages.len());
    for (page_num, page) in pages.iter().enumerate() {
        let text = normalize_page(page);
        if text.is_empty() {
            warn!("Page {} has no extractable text.", page_num + 1);
            continue;
        }
        texts.push(text);
    }

    Ok(texts.join("\n\n"))
}

/// Strips trailing spaces from every line and blank lines around the page.
fn normalize_page(page: &str) -> String {
    page.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

// --- Converter Implementation ---

/// The `DocumentConverter` implementation for PDF files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfConverter;

impl PdfConverter {
    pub const NAME: &'static str = "pdf";

    pub fn new() -> Self {
        Self
    }
}

impl DocumentConverter for PdfConverter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports(&self, extension: &str) -> bool {
        extension.eq_ignore_ascii_case("pdf")
    }

    #[instrument(skip(self))]
    fn convert(&self, path: &Path) -> Result<String, LoadError> {
        let text = std::fs::read(path)
            .map_err(PdfConvertError::from)
            .and_then(|pdf_data| extract_text_from_pdf(&pdf_data))
            .map_err(|e| e.into_load_error(path))?;

        if text.trim().is_empty() {
            warn!(
                "PDF '{}' produced no text. It may be a scanned document.",
                path.display()
            );
        }
        info!(
            "Extracted {} characters from '{}'.",
            text.chars().count(),
            path.display()
        );
        Ok(text)
    }
}
