//! # Extractor Tests
//!
//! Runs the extractor against `MockAiProvider` so the prompt, the parsing of
//! the answer and the alignment can be checked without a model.

use anyhow::Result;
use lextract::{
    types::document_id_for, AlignmentStatus, CharInterval, ExtractError, Extractor,
    PromptPreset,
};
use lextract_test_utils::MockAiProvider;

const SOURCE_TEXT: &str =
    "JULIET. O Romeo, Romeo! wherefore art thou Romeo?\nDeny thy father and refuse thy name.";

const MODEL_ANSWER: &str = r#"```json
{
  "extractions": [
    {
      "character": "JULIET",
      "character_attributes": {"emotional_state": "longing"}
    },
    {
      "emotion": "O Romeo, Romeo!",
      "emotion_attributes": {"feeling": "yearning"}
    },
    {
      "relationship": "deny thy   father",
      "relationship_attributes": {"type": "family conflict"}
    },
    {
      "character": "Tybalt",
      "character_attributes": {}
    }
  ]
}
```"#;

fn extractor_with(mock: &MockAiProvider) -> Extractor {
    Extractor::new(Box::new(mock.clone()))
}

#[tokio::test]
async fn test_extract_makes_one_call_with_rendered_prompts() -> Result<()> {
    let mock = MockAiProvider::new();
    mock.add_response("Extract characters, emotions", MODEL_ANSWER);
    let request = PromptPreset::Literary.request_for("romeo.txt");

    extractor_with(&mock).extract(&request, SOURCE_TEXT).await?;

    let calls = mock.get_calls();
    assert_eq!(calls.len(), 1);
    let (system_prompt, user_prompt) = &calls[0];
    assert!(system_prompt.starts_with("Extract characters, emotions, and relationships"));
    assert!(system_prompt.contains("Examples\nQ: ROMEO. But soft!"));
    assert!(system_prompt.contains("A: ```json\n{"));
    assert!(system_prompt.contains("\"character_attributes\""));
    assert_eq!(user_prompt, &format!("Q: {SOURCE_TEXT}\nA: "));
    Ok(())
}

#[tokio::test]
async fn test_extract_aligns_and_indexes_extractions() -> Result<()> {
    let mock = MockAiProvider::new();
    mock.add_response("Extract characters", MODEL_ANSWER);
    let request = PromptPreset::Literary.request_for("romeo.txt");

    let document = extractor_with(&mock).extract(&request, SOURCE_TEXT).await?;

    assert_eq!(document.text, SOURCE_TEXT);
    assert_eq!(document.document_id, document_id_for("romeo.txt"));
    assert_eq!(document.extractions.len(), 4);

    let juliet = &document.extractions[0];
    assert_eq!(juliet.extraction_class, "character");
    assert_eq!(juliet.extraction_index, Some(1));
    assert_eq!(juliet.group_index, Some(0));
    assert_eq!(
        juliet.char_interval,
        Some(CharInterval {
            start_pos: 0,
            end_pos: 6
        })
    );
    assert_eq!(juliet.alignment_status, Some(AlignmentStatus::MatchExact));
    assert_eq!(juliet.attributes["emotional_state"], "longing");

    let emotion = &document.extractions[1];
    assert_eq!(
        emotion.char_interval,
        Some(CharInterval {
            start_pos: 8,
            end_pos: 23
        })
    );

    let relationship = &document.extractions[2];
    assert_eq!(relationship.alignment_status, Some(AlignmentStatus::MatchFuzzy));
    let start = SOURCE_TEXT.find("Deny").map(|b| SOURCE_TEXT[..b].chars().count());
    assert_eq!(
        relationship.char_interval.map(|ci| ci.start_pos),
        start
    );

    let tybalt = &document.extractions[3];
    assert!(!tybalt.is_aligned());
    assert_eq!(tybalt.alignment_status, None);
    assert!(tybalt.attributes.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_document_id_is_deterministic_per_source() -> Result<()> {
    let mock = MockAiProvider::new();
    mock.add_response("Extract", r#"{"extractions": []}"#);
    let extractor = extractor_with(&mock);

    let first = extractor
        .extract(&PromptPreset::Literary.request_for("a.txt"), "text")
        .await?;
    let second = extractor
        .extract(&PromptPreset::Literary.request_for("a.txt"), "other text")
        .await?;
    let third = extractor
        .extract(&PromptPreset::Literary.request_for("b.txt"), "text")
        .await?;

    assert_eq!(first.document_id, second.document_id);
    assert_ne!(first.document_id, third.document_id);
    assert!(first.document_id.starts_with("doc_"));
    assert_eq!(first.document_id.len(), 12);
    assert!(first.extractions.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_provider_failure_is_an_llm_error() {
    let mock = MockAiProvider::new();
    let request = PromptPreset::Treaty.request_for("slip.pdf");

    let err = extractor_with(&mock)
        .extract(&request, "UMR: B0000ABC")
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Llm(_)), "{err:?}");
    assert_eq!(mock.get_calls().len(), 1);
}

#[tokio::test]
async fn test_unparseable_answer_is_a_parse_error() {
    let mock = MockAiProvider::new();
    mock.add_response("reinsurance", "I could not find any fields, sorry.");
    let request = PromptPreset::Treaty.request_for("slip.pdf");

    let err = extractor_with(&mock)
        .extract(&request, "UMR: B0000ABC")
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractError::Parse(_)), "{err:?}");
}

#[tokio::test]
async fn test_unfenced_prompt_has_no_code_fences() -> Result<()> {
    let mock = MockAiProvider::new();
    mock.add_response("Extract", r#"[{"character": "JULIET"}]"#);
    let request = PromptPreset::Literary.request_for("romeo.txt");

    let document = extractor_with(&mock)
        .fence_output(false)
        .extract(&request, SOURCE_TEXT)
        .await?;

    let (system_prompt, _) = &mock.get_calls()[0];
    assert!(!system_prompt.contains("```"));
    assert!(system_prompt.contains("A: {\n"));
    assert_eq!(document.extractions.len(), 1);
    assert!(document.extractions[0].is_aligned());
    Ok(())
}
