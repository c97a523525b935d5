//! Parses the model's answer back into [`Extraction`]s.

use super::format::ATTRIBUTE_SUFFIX;
use crate::{errors::ExtractError, types::Extraction};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

/// Returns the body of the first fenced code block, or the trimmed input.
pub fn strip_fences(raw: &str) -> Result<String, ExtractError> {
    let re = Regex::new(r"```(?:json|JSON)?[ \t]*\n?([\s\S]*?)```")?;
    Ok(re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| raw.trim().to_string()))
}

/// Parses a raw model response into unaligned extractions.
///
/// `extraction_index` is assigned in output order starting at 1, and
/// `group_index` is the position of the item the extraction came from.
pub fn parse_model_output(raw: &str) -> Result<Vec<Extraction>, ExtractError> {
    let body = strip_fences(raw)?;
    if body.is_empty() {
        return Err(ExtractError::Parse("model returned an empty response".to_string()));
    }

    let value: Value = serde_json::from_str(&body)
        .map_err(|e| ExtractError::Parse(format!("invalid JSON: {e}")))?;

    let items = match value {
        Value::Object(mut object) => match object.remove("extractions") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ExtractError::Parse(
                    "'extractions' must be an array".to_string(),
                ))
            }
            None => {
                return Err(ExtractError::Parse(
                    "missing 'extractions' key in model output".to_string(),
                ))
            }
        },
        Value::Array(items) => items,
        _ => {
            return Err(ExtractError::Parse(
                "expected a JSON object or array".to_string(),
            ))
        }
    };

    let mut extractions = Vec::new();
    for (group_index, item) in items.into_iter().enumerate() {
        let Value::Object(item) = item else {
            return Err(ExtractError::Parse(format!(
                "extraction item {group_index} is not an object"
            )));
        };

        for (key, value) in &item {
            if key.ends_with(ATTRIBUTE_SUFFIX) {
                continue;
            }
            let Some(text) = scalar_to_string(value) else {
                warn!("Skipping extraction '{}' with a non-text value", key);
                continue;
            };

            let mut extraction = Extraction::new(key.clone(), text);
            extraction.attributes = attributes_for(&item, key);
            extraction.group_index = Some(group_index);
            extraction.extraction_index = Some(extractions.len() + 1);
            extractions.push(extraction);
        }
    }

    Ok(extractions)
}

fn attributes_for(item: &Map<String, Value>, class: &str) -> BTreeMap<String, String> {
    match item.get(&format!("{class}{ATTRIBUTE_SUFFIX}")) {
        Some(Value::Object(attributes)) => attributes
            .iter()
            .filter_map(|(k, v)| attribute_to_string(v).map(|s| (k.clone(), s)))
            .collect(),
        Some(Value::Null) | None => BTreeMap::new(),
        Some(other) => {
            warn!("Ignoring non-object attributes for '{}': {}", class, other);
            BTreeMap::new()
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn attribute_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Array(values) => Some(
            values
                .iter()
                .map(|v| scalar_to_string(v).unwrap_or_else(|| v.to_string()))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(value.to_string()),
        scalar => scalar_to_string(scalar),
    }
}
