//! Mock API tests for the Azure AI embedding model

use serde_json::json;
use siumai_provider_azure_ai::prelude::*;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_NAME: &str = "text-embedding-3-small";

fn model(server: &MockServer, settings: AzureEmbeddingSettings) -> AzureEmbeddingModel {
    AzureAiProvider::new(
        AzureAiProviderSettings::new()
            .with_endpoint(format!("{}/models", server.uri()))
            .with_api_key("test-api-key"),
    )
    .text_embedding_model(MODEL_NAME, settings)
    .unwrap()
}

fn values() -> Vec<String> {
    vec![
        "sunny day at the beach".to_string(),
        "rainy day in the city".to_string(),
    ]
}

#[tokio::test]
async fn test_azure_embeddings_in_input_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/deployments/{MODEL_NAME}/embeddings")))
        .and(header("api-key", "test-api-key"))
        .and(header("api-version", "2024-02-15-preview"))
        .and(body_json(json!({"input": values()})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "object": "list",
                    "data": [
                        {"object": "embedding", "index": 1, "embedding": [0.4, 0.5, 0.6]},
                        {"object": "embedding", "index": 0, "embedding": [0.1, 0.2, 0.3]}
                    ],
                    "model": MODEL_NAME,
                    "usage": {"prompt_tokens": 12, "total_tokens": 12}
                }))
                .insert_header("x-request-id", "emb-1"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = model(&mock_server, AzureEmbeddingSettings::default())
        .do_embed(EmbeddingRequest::new(values()))
        .await
        .unwrap();

    assert_eq!(response.embeddings.len(), 2);
    assert_eq!(response.embeddings[0], vec![0.1, 0.2, 0.3]);
    assert_eq!(response.embeddings[1], vec![0.4, 0.5, 0.6]);
    assert_eq!(response.usage.tokens, Some(12));
    assert_eq!(
        response.response_headers.get("x-request-id").map(String::as_str),
        Some("emb-1")
    );
}

#[tokio::test]
async fn test_azure_embeddings_batch_limit_does_not_split() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/models/deployments/{MODEL_NAME}/embeddings")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [1.0]}, {"embedding": [2.0]}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = model(
        &mock_server,
        AzureEmbeddingSettings::default().with_max_embeddings_per_call(1),
    );
    assert_eq!(model.max_embeddings_per_call(), Some(1));

    let response = model.do_embed(EmbeddingRequest::new(values())).await.unwrap();
    assert_eq!(response.embeddings, vec![vec![1.0], vec![2.0]]);
    assert_eq!(response.usage.tokens, None);
}

#[tokio::test]
async fn test_azure_embeddings_error_carries_status_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": "401", "message": "Access denied"}
        })))
        .mount(&mock_server)
        .await;

    let err = model(&mock_server, AzureEmbeddingSettings::default())
        .do_embed(EmbeddingRequest::new(values()))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.to_string(), "Failed to get embeddings: Unauthorized");
}

#[tokio::test]
async fn test_azure_embeddings_abort() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let handle = CancelHandle::new();
    let request = EmbeddingRequest::new(values()).with_abort(handle.clone());
    let model = model(&mock_server, AzureEmbeddingSettings::default());

    let embed = tokio::spawn(async move { model.do_embed(request).await });
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.cancel();

    let err = embed.await.unwrap().unwrap_err();
    assert!(err.to_string().contains("operation was aborted"));
}
