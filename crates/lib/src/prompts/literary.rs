use crate::types::{ExampleData, Extraction};

pub const LITERARY_PROMPT: &str = "Extract characters, emotions, and relationships in order of appearance.
Use exact text for extractions. Do not paraphrase or overlap entities.
Provide meaningful attributes for each entity to add context.";

pub fn examples() -> Vec<ExampleData> {
    vec![ExampleData::new(
        "ROMEO. But soft! What light through yonder window breaks? It is the east, and Juliet is the sun.",
        vec![
            Extraction::new("character", "ROMEO").with_attribute("emotional_state", "wonder"),
            Extraction::new("emotion", "But soft!").with_attribute("feeling", "gentle awe"),
            Extraction::new("relationship", "Juliet is the sun").with_attribute("type", "metaphor"),
        ],
    )]
}
