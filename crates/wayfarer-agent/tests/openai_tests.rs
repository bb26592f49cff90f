//! OpenAI client tests against a mock HTTP server.

#![allow(clippy::unwrap_used)]

mod common;

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wayfarer_agent::{
    Agent, ChatMessage, ChatRequest, LlmProvider, OpenAiProvider, RetryWrapper, ToolSpec,
};
use wayfarer_core::{Error, ScriptedPrompt};
use wayfarer_geo::MockGeoBackend;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new("sk-test", "gpt-test")
        .unwrap()
        .with_base_url(format!("{}/v1", server.uri()))
}

fn completion(message: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": message, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    }))
}

#[tokio::test]
async fn test_text_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-test",
            "messages": [{"role": "user", "content": "hi"}]
        })))
        .respond_with(completion(json!({"role": "assistant", "content": "Hello!"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap();
    assert_eq!(response.message, ChatMessage::assistant("Hello!"));
    assert_eq!(response.usage.total(), 15);
}

#[tokio::test]
async fn test_tool_call_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "tool_choice": "auto",
            "tools": [{"type": "function", "function": {"name": "health"}}]
        })))
        .respond_with(completion(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {"name": "health", "arguments": "{}"}
            }]
        })))
        .mount(&server)
        .await;

    let request = ChatRequest::new(vec![ChatMessage::user("status?")]).with_tools(vec![
        ToolSpec::function("health", "Server health", json!({"type": "object"})),
    ]);
    let response = provider(&server).chat(request).await.unwrap();
    assert_eq!(response.message.content, None);
    assert_eq!(response.message.tool_calls.len(), 1);
    assert_eq!(response.message.tool_calls[0].name(), "health");
}

#[tokio::test]
async fn test_rejected_request_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Upstream { status: 401, .. }));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_no_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no choices"));
}

#[tokio::test]
async fn test_retry_wrapper_recovers_from_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(completion(json!({"role": "assistant", "content": "Back up."})))
        .mount(&server)
        .await;

    let llm = RetryWrapper::new(Arc::new(provider(&server)))
        .with_delays(Duration::from_millis(1), Duration::from_millis(5));
    let response = llm
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap();
    assert_eq!(response.message.text_content(), "Back up.");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_agent_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion(json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_1",
                "type": "function",
                "function": {
                    "name": "nearby_search_with_walk",
                    "arguments": "{\"query\":\"cafe\",\"origin_lat\":36.7529,\"origin_lng\":3.042}"
                }
            }]
        })))
        .mount(&server)
        .await;

    let backend = MockGeoBackend::new().with_places(common::cafes());
    let agent = Agent::new(
        Arc::new(provider(&server)),
        Arc::new(backend),
        Arc::new(ScriptedPrompt::default()),
    );
    let reply = agent.run("Find 3 cafes near 36.7529, 3.0420").await.unwrap();
    assert!(reply.contains("**Milk Bar**"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["tools"].as_array().unwrap().len(), 6);
}
