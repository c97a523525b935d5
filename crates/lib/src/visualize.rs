//! # HTML Report
//!
//! Renders annotated documents as a single self-contained HTML page: a colour
//! legend, the source text with aligned spans highlighted, and a table of all
//! extractions with their attributes.

use crate::{
    errors::OutputError,
    io::load_annotated_documents,
    types::{AlignmentStatus, AnnotatedDocument, CharInterval, Extraction},
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

/// Background colours assigned to classes in order of first appearance.
const PALETTE: &[&str] = &[
    "#D2E3FC", "#C8E6C9", "#FEF0C3", "#F9DEDC", "#FFDDBE", "#EADDFF", "#C4E9E4", "#FCE4EC",
    "#E8EAED", "#DDE8E8",
];

const STYLE: &str = r#"body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2rem; color: #202124; }
.lx-document { margin-bottom: 3rem; }
.lx-legend { margin: 0.5rem 0 1rem; }
.lx-legend-item { display: inline-block; padding: 2px 8px; margin: 0 6px 6px 0; border-radius: 4px; font-size: 0.9em; }
.lx-text { white-space: pre-wrap; line-height: 1.6; border: 1px solid #dadce0; border-radius: 6px; padding: 1rem; }
.lx-highlight { border-radius: 3px; padding: 0 1px; }
table.lx-extractions { border-collapse: collapse; margin-top: 1rem; width: 100%; }
table.lx-extractions th, table.lx-extractions td { border: 1px solid #dadce0; padding: 4px 8px; text-align: left; vertical-align: top; }
.lx-unaligned { color: #80868b; font-style: italic; }"#;

/// Reads a JSONL record file and renders every document in it.
pub fn visualize(jsonl_path: &Path) -> Result<String, OutputError> {
    let documents = load_annotated_documents(jsonl_path)?;
    Ok(render_page(&documents))
}

/// Renders a full HTML page for the given documents.
pub fn render_page(documents: &[AnnotatedDocument]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Extraction results</title>\n<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n");

    if documents.is_empty() {
        html.push_str("<p>No documents.</p>\n");
    }
    for document in documents {
        html.push_str(&render_document(document));
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Colours keyed by extraction class.
struct Legend<'a> {
    colours: HashMap<&'a str, &'static str>,
}

impl<'a> Legend<'a> {
    fn new(document: &'a AnnotatedDocument) -> Self {
        let colours = document
            .classes()
            .into_iter()
            .enumerate()
            .map(|(i, class)| (class, PALETTE[i % PALETTE.len()]))
            .collect();
        Self { colours }
    }

    fn colour(&self, class: &str) -> &'static str {
        self.colours.get(class).copied().unwrap_or(PALETTE[0])
    }
}

/// Renders one document as a `<section>`.
pub fn render_document(document: &AnnotatedDocument) -> String {
    let legend = Legend::new(document);

    let mut html = String::new();
    let _ = writeln!(
        html,
        "<section class=\"lx-document\" id=\"{}\">",
        encode_double_quoted_attribute(&document.document_id)
    );
    let _ = writeln!(
        html,
        "<h2>{} <small>({} extractions)</small></h2>",
        encode_text(&document.document_id),
        document.extractions.len()
    );

    html.push_str("<div class=\"lx-legend\">");
    for class in document.classes() {
        let _ = write!(
            html,
            "<span class=\"lx-legend-item\" style=\"background-color:{}\">{}</span>",
            legend.colour(class),
            encode_text(class)
        );
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"lx-text\">");
    html.push_str(&highlight_text(&document.text, &document.extractions, &legend));
    html.push_str("</div>\n");

    html.push_str(&render_table(&document.extractions, &legend));
    html.push_str("</section>\n");
    html
}

/// Wraps each aligned extraction in a highlighted `<span>`.
///
/// Spans are taken in source order; a span that overlaps one already emitted,
/// or falls outside the text, is left unhighlighted.
fn highlight_text(text: &str, extractions: &[Extraction], legend: &Legend<'_>) -> String {
    let chars: Vec<char> = text.chars().collect();

    let mut spans: Vec<(usize, &Extraction, CharInterval)> = extractions
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.char_interval.map(|ci| (i, e, ci)))
        .filter(|(_, _, ci)| ci.start_pos < ci.end_pos && ci.end_pos <= chars.len())
        .collect();
    spans.sort_by_key(|(i, _, ci)| (ci.start_pos, std::cmp::Reverse(ci.len()), *i));

    let slice = |from: usize, to: usize| chars[from..to].iter().collect::<String>();
    let mut html = String::new();
    let mut pos = 0;
    for (index, extraction, interval) in spans {
        if interval.start_pos < pos {
            continue;
        }
        html.push_str(&encode_text(&slice(pos, interval.start_pos)));
        let _ = write!(
            html,
            "<span class=\"lx-highlight\" style=\"background-color:{}\" title=\"{}\" data-idx=\"{}\">{}</span>",
            legend.colour(&extraction.extraction_class),
            encode_double_quoted_attribute(&describe(extraction)),
            index,
            encode_text(&slice(interval.start_pos, interval.end_pos))
        );
        pos = interval.end_pos;
    }
    html.push_str(&encode_text(&slice(pos, chars.len())));
    html
}

fn describe(extraction: &Extraction) -> String {
    if extraction.attributes.is_empty() {
        return extraction.extraction_class.clone();
    }
    format!(
        "{} ({})",
        extraction.extraction_class,
        format_attributes(extraction)
    )
}

fn format_attributes(extraction: &Extraction) -> String {
    extraction
        .attributes
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_table(extractions: &[Extraction], legend: &Legend<'_>) -> String {
    let mut html = String::new();
    html.push_str("<table class=\"lx-extractions\">\n<thead><tr><th>#</th><th>Class</th><th>Text</th><th>Attributes</th><th>Position</th></tr></thead>\n<tbody>\n");
    for (i, extraction) in extractions.iter().enumerate() {
        let position = match (extraction.char_interval, extraction.alignment_status) {
            (Some(ci), Some(AlignmentStatus::MatchFuzzy)) => {
                format!("{}&ndash;{} (fuzzy)", ci.start_pos, ci.end_pos)
            }
            (Some(ci), _) => format!("{}&ndash;{}", ci.start_pos, ci.end_pos),
            (None, _) => "<span class=\"lx-unaligned\">unaligned</span>".to_string(),
        };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td><span class=\"lx-legend-item\" style=\"background-color:{}\">{}</span></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            extraction.extraction_index.unwrap_or(i + 1),
            legend.colour(&extraction.extraction_class),
            encode_text(&extraction.extraction_class),
            encode_text(&extraction.extraction_text),
            encode_text(&format_attributes(extraction)),
            position
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}
