//! Locates extractions in the source text.
//!
//! Positions are counted in characters, not bytes. The search for each
//! extraction starts where the previous aligned one ended, so repeated
//! phrases ("four", "1st Layer") bind to successive occurrences.

use crate::types::{AlignmentStatus, CharInterval, Extraction};
use tracing::{debug, warn};

/// Fills `char_interval` and `alignment_status` for every extraction that can
/// be found in `source`. Extractions that cannot be found are left untouched.
pub fn align_extractions(source: &str, extractions: &mut [Extraction]) {
    let haystack: Vec<char> = source.chars().collect();
    let mut cursor = 0;

    for extraction in extractions.iter_mut() {
        let needle: Vec<char> = extraction.extraction_text.chars().collect();
        match locate(&haystack, &needle, cursor) {
            Some((interval, status)) => {
                cursor = cursor.max(interval.end_pos);
                extraction.char_interval = Some(interval);
                extraction.alignment_status = Some(status);
            }
            None => {
                warn!(
                    "Could not align {} extraction '{}' with the source text",
                    extraction.extraction_class, extraction.extraction_text
                );
            }
        }
    }

    debug!(
        "Aligned {}/{} extractions",
        extractions.iter().filter(|e| e.is_aligned()).count(),
        extractions.len()
    );
}

/// Finds `needle` in `haystack`, preferring exact matches after `cursor`.
pub fn locate(
    haystack: &[char],
    needle: &[char],
    cursor: usize,
) -> Option<(CharInterval, AlignmentStatus)> {
    if needle.iter().all(|c| c.is_whitespace()) {
        return None;
    }

    let exact = |from| {
        find_exact(haystack, needle, from).map(|start| CharInterval {
            start_pos: start,
            end_pos: start + needle.len(),
        })
    };
    if let Some(interval) = exact(cursor).or_else(|| exact(0)) {
        return Some((interval, AlignmentStatus::MatchExact));
    }

    let tokens: Vec<&[char]> = needle
        .split(|c| c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    find_fuzzy(haystack, &tokens, cursor)
        .or_else(|| find_fuzzy(haystack, &tokens, 0))
        .map(|interval| (interval, AlignmentStatus::MatchFuzzy))
}

fn find_exact(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| haystack[i..i + needle.len()] == *needle)
}

fn find_fuzzy(haystack: &[char], tokens: &[&[char]], from: usize) -> Option<CharInterval> {
    (from..haystack.len()).find_map(|start| {
        fuzzy_match_at(haystack, tokens, start).map(|end_pos| CharInterval {
            start_pos: start,
            end_pos,
        })
    })
}

/// Matches the tokens at `start`, ignoring case and allowing any non-empty
/// whitespace run between tokens. Returns the end position on success.
fn fuzzy_match_at(haystack: &[char], tokens: &[&[char]], start: usize) -> Option<usize> {
    let mut pos = start;
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            let gap_start = pos;
            while pos < haystack.len() && haystack[pos].is_whitespace() {
                pos += 1;
            }
            if pos == gap_start {
                return None;
            }
        }
        for &expected in token.iter() {
            let actual = *haystack.get(pos)?;
            if !chars_eq_ignore_case(actual, expected) {
                return None;
            }
            pos += 1;
        }
    }
    Some(pos)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
