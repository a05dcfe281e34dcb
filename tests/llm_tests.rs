//! OpenAI-compatible client against a mock chat completions endpoint.

#![cfg(feature = "openai")]

use rival::llm::LLMClient;
use rival::llm::openai::OpenAIClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: Option<&str>) -> serde_json::Value {
    let choices = match content {
        Some(text) => json!([{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]),
        None => json!([]),
    };

    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000u32,
        "model": "test-model",
        "choices": choices,
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

fn client(server: &MockServer) -> OpenAIClient {
    OpenAIClient::new(
        "test-key".to_string(),
        server.uri(),
        "test-model".to_string(),
    )
}

#[tokio::test]
async fn test_complete_sends_trimmed_messages_and_temperature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "temperature": 0.5,
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Snippet A"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(Some("SUMMARY"))))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .complete("  Be brief.\n", "\n  Snippet A  ", 0.5)
        .await
        .unwrap();

    assert_eq!(text, "SUMMARY");
}

#[tokio::test]
async fn test_empty_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(None)))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete("system", "user", 0.0)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "LLM error: No response from OpenAI");
}

#[tokio::test]
async fn test_api_error_is_surfaced_as_llm_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API key",
                "type": "invalid_request_error",
                "param": null,
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .complete("system", "user", 0.0)
        .await
        .unwrap_err();

    assert!(matches!(err, rival::AppError::LLM(_)));
    assert!(err.to_string().starts_with("LLM error: OpenAI API error"));
}
