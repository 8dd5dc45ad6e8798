use prepdesk_core::{ChatMessage, ChatRole, FormSubmission, ProductInterest, ResourceCatalog};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::ai_types::{ChatRequest, Message};
use crate::client::LlmClient;
use crate::error::LlmError;
use crate::SalesAssistant;

async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

fn client_for(server: &MockServer) -> LlmClient {
    LlmClient::new("test-key".to_owned(), &server.uri(), "test-model".to_owned()).unwrap()
}

fn create_test_request() -> ChatRequest {
    ChatRequest {
        model: "test-model".to_owned(),
        messages: vec![Message::user("hello")],
        response_format: None,
    }
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "choices": [{
            "message": {
                "content": content,
                "role": "assistant"
            }
        }]
    }))
}

fn submission() -> FormSubmission {
    FormSubmission {
        email: "lead@retail.example".to_owned(),
        country: "United States".to_owned(),
        product_interest: ProductInterest::Vercel,
        message: None,
    }
}

#[tokio::test]
async fn test_success_on_first_attempt() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(completion("test response"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.chat_completion(&create_test_request()).await.unwrap();
    assert_eq!(result, "test response");
}

#[tokio::test]
async fn test_retry_on_429_then_success() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("success after retry"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let result = client.chat_completion(&create_test_request()).await.unwrap();
    assert_eq!(result, "success after retry");
}

#[tokio::test]
async fn test_no_retry_on_401() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.chat_completion(&create_test_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::HttpStatus { code: 401, .. }));
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn test_all_retries_exhausted() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(4)
        .mount(&server)
        .await;

    let err = client.chat_completion(&create_test_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::RetriesExhausted(_)));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_blank_content_is_empty_response() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("   "))
        .mount(&server)
        .await;

    let err = client.chat_completion(&create_test_request()).await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn test_game_plan_sends_transcript() {
    let server = setup_mock_server().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Can we self-host?"))
        .and(body_string_contains("test-model"))
        .respond_with(completion("\n## Key points\n- Asked about self-hosting\n"))
        .expect(1)
        .mount(&server)
        .await;

    let transcript = [ChatMessage::new(ChatRole::User, "Can we self-host?")];
    let plan = client.game_plan(&submission(), &transcript).await.unwrap();
    assert_eq!(plan, "## Key points\n- Asked about self-hosting");
}

#[tokio::test]
async fn test_recommendation_requests_json_and_parses_ids() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let catalog = ResourceCatalog::bundled().unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("json_object"))
        .and(body_string_contains("Allbirds"))
        .respond_with(completion(
            r#"{"resources": ["docs-deployments", "blog-ecommerce-performance", "docs-security"]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let enrichment = serde_json::json!({"company": {"name": "Allbirds"}});
    let ids = client.recommend_resources(&submission(), &enrichment, &catalog).await.unwrap();
    assert_eq!(ids, ["docs-deployments", "blog-ecommerce-performance", "docs-security"]);
}
