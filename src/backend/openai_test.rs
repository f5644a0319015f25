use mockito::Matcher;
use serde_json::json;

use crate::models::NewTurn;

use super::*;

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "gpt-5.1",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20 }
    })
    .to_string()
}

fn setup_backend(url: String) -> OpenAI {
    OpenAI::default()
        .with_endpoint(&url)
        .with_api_key("test_token")
        .with_model("gpt-5.1")
}

#[tokio::test]
async fn test_get_completion() {
    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock("POST", "/v1/chat/completions")
        .match_header("Authorization", "Bearer test_token")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-5.1",
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": "be factual" },
                { "role": "user", "content": "What is the capital of France?" }
            ]
        })))
        .with_status(200)
        .with_body(completion_body(r#"{"answer":"Paris.","sources":["a.com"]}"#))
        .create_async()
        .await;

    let backend = setup_backend(server.url());
    let prompt = BackendPrompt::new("What is the capital of France?").with_system("be factual");

    let res = backend
        .get_completion(prompt)
        .await
        .expect("Failed to get completion");
    completion_handler.assert_async().await;

    assert_eq!(res.id, "chatcmpl-123");
    assert_eq!(res.model, "gpt-5.1");
    assert_eq!(
        res.content.as_deref(),
        Some(r#"{"answer":"Paris.","sources":["a.com"]}"#)
    );
    let usage = res.usage.expect("usage should be set");
    assert_eq!(usage.total_tokens, 20);
}

#[tokio::test]
async fn test_get_completion_with_history() {
    let created_at = chrono::Utc::now();
    let history = vec![
        NewTurn::user("s1", "Who wrote Hamlet?").into_turn(1, created_at),
        NewTurn::assistant("s1", "Shakespeare.", vec!["a.com".to_string()])
            .into_turn(2, created_at),
    ];

    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "Who wrote Hamlet?" },
                { "role": "assistant", "content": "Shakespeare." },
                { "role": "user", "content": "When?" }
            ]
        })))
        .with_status(200)
        .with_body(completion_body("{}"))
        .create_async()
        .await;

    let backend = setup_backend(server.url());
    let prompt = BackendPrompt::new("When?")
        .with_system("sys")
        .with_history(history);

    backend.get_completion(prompt).await.unwrap();
    completion_handler.assert_async().await;
}

#[tokio::test]
async fn test_get_completion_without_json_mode() {
    let mut server = mockito::Server::new_async().await;
    let completion_handler = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::Json(json!({
            "model": "gpt-5.1",
            "messages": [{ "role": "user", "content": "hi" }]
        })))
        .with_status(200)
        .with_body(completion_body("plain text"))
        .create_async()
        .await;

    let backend = setup_backend(server.url()).with_json_mode(false);
    let res = backend
        .get_completion(BackendPrompt::new("hi"))
        .await
        .unwrap();
    completion_handler.assert_async().await;
    assert_eq!(res.content.as_deref(), Some("plain text"));
}

#[tokio::test]
async fn test_get_completion_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(
            json!({
                "error": {
                    "message": "Incorrect API key provided",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "invalid_api_key"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let backend = setup_backend(server.url());
    let err = backend
        .get_completion(BackendPrompt::new("hi"))
        .await
        .expect_err("completion should fail");

    let err = err
        .downcast_ref::<OpenAIError>()
        .expect("error should be an OpenAIError");
    assert_eq!(err.http_code, 401);
    assert_eq!(err.message, "Incorrect API key provided");
    assert_eq!(err.code.as_deref(), Some("invalid_api_key"));
}

#[tokio::test]
async fn test_get_completion_unstructured_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/chat/completions")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let backend = setup_backend(server.url());
    let err = backend
        .get_completion(BackendPrompt::new("hi"))
        .await
        .expect_err("completion should fail");
    assert_eq!(err.to_string(), "OpenAI error (502): bad gateway");
}

#[tokio::test]
async fn test_get_completion_requires_model() {
    let backend = OpenAI::default();
    let err = backend
        .get_completion(BackendPrompt::new("hi"))
        .await
        .expect_err("completion should fail");
    assert_eq!(err.to_string(), "no model is set");
}

#[test]
fn test_from_config() {
    let config = BackendConfig {
        endpoint: "http://localhost:8080/".to_string(),
        api_key: Some("key".to_string()),
        model: "gpt-4o".to_string(),
        timeout_secs: Some(30),
        json_mode: false,
    };
    let openai: OpenAI = (&config).into();
    assert_eq!(openai.endpoint(), "http://localhost:8080");
    assert_eq!(openai.api_key(), Some("key"));
    assert_eq!(openai.model(), "gpt-4o");
    assert_eq!(openai.timeout(), Some(time::Duration::from_secs(30)));
    assert!(!openai.json_mode);
}
