//! OpenAI-compatible provider adapters against a wiremock server.

use ragdoc::llm::{GenerationParams, LLMClient, OpenAIClient};
use ragdoc::rag::{EmbeddingProvider, OpenAIEmbeddings};
use ragdoc::types::AppError;
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn chat_client(server: &MockServer, timeout: Duration) -> OpenAIClient {
    OpenAIClient::new(
        "test-key".to_string(),
        server.uri(),
        "openai/gpt-4.1".to_string(),
        GenerationParams::default(),
        timeout,
    )
    .unwrap()
}

fn embeddings_client(server: &MockServer, batch_size: usize) -> OpenAIEmbeddings {
    OpenAIEmbeddings::new(
        "test-key".to_string(),
        format!("{}/", server.uri()),
        "openai/text-embedding-3-large".to_string(),
        batch_size,
        Duration::from_secs(5),
    )
    .unwrap()
}

fn completion_with(choices: Value) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "openai/gpt-4.1",
        "choices": choices
    })
}

fn completion(content: Value) -> Value {
    completion_with(json!([{
        "index": 0,
        "message": { "role": "assistant", "content": content },
        "finish_reason": "stop"
    }]))
}

fn embedding_list(data: Value) -> Value {
    json!({
        "object": "list",
        "model": "openai/text-embedding-3-large",
        "data": data,
        "usage": { "prompt_tokens": 1, "total_tokens": 1 }
    })
}

fn api_error(message: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    })
}

// ============= Chat completions =============

#[tokio::test]
async fn test_chat_sends_system_and_user_messages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "openai/gpt-4.1",
            "messages": [
                { "role": "system", "content": "You are a helpful assistant." },
                { "role": "user", "content": "What is Rust?" }
            ],
            "top_p": 1.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!(
            "A systems programming language."
        ))))
        .expect(1)
        .mount(&server)
        .await;

    let client = chat_client(&server, Duration::from_secs(5));
    let text = client
        .generate_with_system("You are a helpful assistant.", "What is Rust?")
        .await
        .unwrap();

    assert_eq!(text, "A systems programming language.");
    assert_eq!(client.model_name(), "openai/gpt-4.1");
}

#[tokio::test]
async fn test_chat_api_error_includes_provider_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(api_error("Unknown model: gpt-0")),
        )
        .mount(&server)
        .await;

    let result = chat_client(&server, Duration::from_secs(5))
        .generate_with_system("sys", "hi")
        .await;

    match result {
        Err(AppError::ChatProvider(msg)) => assert!(msg.contains("Unknown model: gpt-0")),
        other => panic!("expected ChatProvider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_without_choices_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_with(json!([]))))
        .mount(&server)
        .await;

    let result = chat_client(&server, Duration::from_secs(5))
        .generate_with_system("sys", "hi")
        .await;
    assert!(matches!(result, Err(AppError::ChatProvider(_))));
}

#[tokio::test]
async fn test_chat_null_content_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(Value::Null)))
        .mount(&server)
        .await;

    let result = chat_client(&server, Duration::from_secs(5))
        .generate_with_system("sys", "hi")
        .await;
    assert!(matches!(result, Err(AppError::ChatProvider(_))));
}

#[tokio::test]
async fn test_chat_timeout_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(json!("late")))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let result = chat_client(&server, Duration::from_millis(200))
        .generate_with_system("sys", "hi")
        .await;

    match result {
        Err(AppError::ChatProvider(msg)) => assert!(msg.contains("timed out")),
        other => panic!("expected timeout, got {:?}", other),
    }
}

// ============= Embeddings =============

/// Answers each embedding request with `[input_len, position]` per input.
struct EchoEmbeddings;

impl Respond for EchoEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let data: Vec<Value> = body["input"]
            .as_array()
            .unwrap()
            .iter()
            .enumerate()
            .map(|(i, text)| {
                json!({
                    "object": "embedding",
                    "index": i,
                    "embedding": [text.as_str().unwrap().len() as f32, i as f32]
                })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(embedding_list(Value::Array(data)))
    }
}

#[tokio::test]
async fn test_embeddings_are_batched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(EchoEmbeddings)
        .expect(3)
        .mount(&server)
        .await;

    let texts: Vec<String> = ["a", "bb", "ccc", "dddd", "eeeee"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let vectors = embeddings_client(&server, 2)
        .embed_documents(&texts)
        .await
        .unwrap();

    let lengths: Vec<f32> = vectors.iter().map(|v| v[0]).collect();
    assert_eq!(lengths, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[tokio::test]
async fn test_embeddings_follow_response_index() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_list(json!([
            { "object": "embedding", "index": 1, "embedding": [0.0, 1.0] },
            { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] }
        ]))))
        .mount(&server)
        .await;

    let texts = vec!["first".to_string(), "second".to_string()];
    let vectors = embeddings_client(&server, 16)
        .embed_documents(&texts)
        .await
        .unwrap();

    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn test_embeddings_count_mismatch_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_list(json!([
            { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] }
        ]))))
        .mount(&server)
        .await;

    let texts = vec!["first".to_string(), "second".to_string()];
    let result = embeddings_client(&server, 16).embed_documents(&texts).await;
    assert!(matches!(result, Err(AppError::EmbeddingProvider(_))));
}

#[tokio::test]
async fn test_embeddings_duplicate_index_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_list(json!([
            { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] },
            { "object": "embedding", "index": 0, "embedding": [0.0, 1.0] }
        ]))))
        .mount(&server)
        .await;

    let texts = vec!["first".to_string(), "second".to_string()];
    let result = embeddings_client(&server, 16).embed_documents(&texts).await;
    match result {
        Err(AppError::EmbeddingProvider(msg)) => assert!(msg.contains("Duplicate")),
        other => panic!("expected EmbeddingProvider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_embeddings_out_of_range_index_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_list(json!([
            { "object": "embedding", "index": 0, "embedding": [1.0, 0.0] },
            { "object": "embedding", "index": 5, "embedding": [0.0, 1.0] }
        ]))))
        .mount(&server)
        .await;

    let texts = vec!["first".to_string(), "second".to_string()];
    let result = embeddings_client(&server, 16).embed_documents(&texts).await;
    match result {
        Err(AppError::EmbeddingProvider(msg)) => assert!(msg.contains("out of range")),
        other => panic!("expected EmbeddingProvider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_embeddings_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(api_error("Incorrect API key provided")),
        )
        .mount(&server)
        .await;

    let result = embeddings_client(&server, 16).embed_query("hello").await;
    match result {
        Err(AppError::EmbeddingProvider(msg)) => {
            assert!(msg.contains("Incorrect API key provided"))
        }
        other => panic!("expected EmbeddingProvider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_embed_query_returns_single_vector() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({
            "model": "openai/text-embedding-3-large",
            "input": ["what is inside?"]
        })))
        .respond_with(EchoEmbeddings)
        .expect(1)
        .mount(&server)
        .await;

    let vector = embeddings_client(&server, 16)
        .embed_query("what is inside?")
        .await
        .unwrap();
    assert_eq!(vector, vec![15.0, 0.0]);
}
