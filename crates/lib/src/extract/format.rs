//! Renders the few-shot prompt sent to the model.
//!
//! Examples are shown as `Q:`/`A:` pairs. Each answer is the JSON the model is
//! expected to produce: an `extractions` array whose items map a class name to
//! the verbatim text, plus a `<class>_attributes` object.

use crate::types::{ExampleData, Extraction};
use serde_json::{json, Map, Value};

/// The suffix marking the attribute object of an extraction in model output.
pub const ATTRIBUTE_SUFFIX: &str = "_attributes";

/// Builds the system prompt: the task description followed by the examples.
pub fn render_system_prompt(
    description: &str,
    examples: &[ExampleData],
    fence_output: bool,
) -> String {
    let mut prompt = String::new();
    prompt.push_str(description.trim_end());
    prompt.push_str("\n\n");

    if !examples.is_empty() {
        prompt.push_str("Examples\n");
        for example in examples {
            prompt.push_str(&format!("Q: {}\n", example.text));
            prompt.push_str(&format!(
                "A: {}\n\n",
                render_answer(&example.extractions, fence_output)
            ));
        }
    }

    prompt
}

/// Builds the user prompt for the document being processed.
pub fn render_user_prompt(text: &str) -> String {
    format!("Q: {text}\nA: ")
}

/// Serializes extractions in the shape the model is asked to reproduce.
pub fn render_answer(extractions: &[Extraction], fence_output: bool) -> String {
    let items: Vec<Value> = extractions.iter().map(extraction_to_item).collect();
    let body = format!("{:#}", json!({ "extractions": items }));
    if fence_output {
        format!("```json\n{body}\n```")
    } else {
        body
    }
}

fn extraction_to_item(extraction: &Extraction) -> Value {
    let attributes: Map<String, Value> = extraction
        .attributes
        .iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect();

    let mut item = Map::new();
    item.insert(
        extraction.extraction_class.clone(),
        Value::String(extraction.extraction_text.clone()),
    );
    item.insert(
        format!("{}{ATTRIBUTE_SUFFIX}", extraction.extraction_class),
        Value::Object(attributes),
    );
    Value::Object(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_lists_class_then_attributes() {
        let answer = render_answer(
            &[Extraction::new("character", "ROMEO").with_attribute("emotional_state", "wonder")],
            false,
        );
        let value: Value = serde_json::from_str(&answer).unwrap();
        let item = &value["extractions"][0];
        assert_eq!(item["character"], "ROMEO");
        assert_eq!(item["character_attributes"]["emotional_state"], "wonder");

        let keys: Vec<&String> = item.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["character", "character_attributes"]);
    }

    #[test]
    fn fenced_answer_is_wrapped_in_a_json_block() {
        let answer = render_answer(&[], true);
        assert!(answer.starts_with("```json\n"));
        assert!(answer.ends_with("\n```"));
    }

    #[test]
    fn system_prompt_contains_description_and_each_example() {
        let examples = vec![
            ExampleData::new("first text", vec![Extraction::new("a", "first")]),
            ExampleData::new("second text", vec![]),
        ];
        let prompt = render_system_prompt("Find things.\n", &examples, true);
        assert!(prompt.starts_with("Find things.\n\nExamples\n"));
        assert!(prompt.contains("Q: first text\nA: ```json"));
        assert!(prompt.contains("Q: second text\n"));
    }

    #[test]
    fn user_prompt_asks_the_open_question() {
        assert_eq!(render_user_prompt("Hello"), "Q: Hello\nA: ");
    }
}
