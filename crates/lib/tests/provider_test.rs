//! # AI Provider Tests
//!
//! Exercises the HTTP providers against a mock server.

use lextract::{
    providers::{
        ai::{gemini::GeminiProvider, local::LocalAiProvider, AiProvider},
        create_provider,
    },
    PromptError, ProviderConfig,
};
use serde_json::json;
use std::sync::Once;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        tracing_subscriber::fmt::init();
    });
}

#[tokio::test]
async fn test_local_provider_sends_system_and_user_messages() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "model": "gpt-oss:20b-cloud",
            "stream": false,
            "messages": [
                {"role": "system", "content": "Extract things."},
                {"role": "user", "content": "Q: text\nA: "}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"extractions\": []}"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = LocalAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        Some("secret".to_string()),
        Some("gpt-oss:20b-cloud".to_string()),
    )
    .unwrap();

    // --- 2. Act ---
    let response = provider.generate("Extract things.", "Q: text\nA: ").await;

    // --- 3. Assert ---
    assert_eq!(response.unwrap(), "{\"extractions\": []}");
}

#[tokio::test]
async fn test_local_provider_surfaces_api_errors() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
        .mount(&server)
        .await;

    let provider = LocalAiProvider::new(server.uri(), None, None).unwrap();
    let err = provider.generate("sys", "user").await.unwrap_err();

    match err {
        PromptError::AiApi(message) => {
            assert!(message.contains("500"), "{message}");
            assert!(message.contains("model not loaded"), "{message}");
        }
        other => panic!("Expected AiApi error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_local_provider_rejects_malformed_body() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = LocalAiProvider::new(server.uri(), None, None).unwrap();
    let err = provider.generate("sys", "user").await.unwrap_err();

    assert!(matches!(err, PromptError::AiDeserialization(_)), "{err:?}");
}

#[tokio::test]
async fn test_gemini_provider_uses_system_instruction_and_key() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "gem-key"))
        .and(body_partial_json(json!({
            "systemInstruction": {"parts": [{"text": "Extract things."}]},
            "contents": [{"role": "user", "parts": [{"text": "Q: text\nA: "}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "```json\n"}, {"text": "{}\n```"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new(
        format!(
            "{}/v1beta/models/gemini-2.5-flash:generateContent",
            server.uri()
        ),
        "gem-key".to_string(),
    )
    .unwrap();

    let response = provider
        .generate("Extract things.", "Q: text\nA: ")
        .await
        .unwrap();

    assert_eq!(response, "```json\n{}\n```");
}

#[tokio::test]
async fn test_factory_builds_local_provider_from_config() {
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"model": "llama3", "max_tokens": 128})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ProviderConfig {
        api_url: Some(server.uri()),
        model_name: "llama3".to_string(),
        max_tokens: Some(128),
        ..Default::default()
    };

    let provider = create_provider(&config).unwrap();
    assert_eq!(provider.generate("sys", "user").await.unwrap(), "ok");
}

#[test]
fn test_factory_requires_key_for_gemini() {
    let config = ProviderConfig {
        provider: "gemini".to_string(),
        model_name: "gemini-2.5-flash".to_string(),
        ..Default::default()
    };

    let err = create_provider(&config).unwrap_err();
    assert!(matches!(err, PromptError::MissingApiKey), "{err:?}");
}

#[test]
fn test_factory_rejects_unknown_provider() {
    let config = ProviderConfig {
        provider: "carrier-pigeon".to_string(),
        ..Default::default()
    };

    let err = create_provider(&config).unwrap_err();
    assert!(err.to_string().contains("carrier-pigeon"));
}
