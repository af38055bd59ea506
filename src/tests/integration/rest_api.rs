use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::server::{router, AppState};
use crate::tests::common::fixtures::pdf_with_pages;
use crate::tests::mocks::RecordingClient;

fn test_state(response: &str) -> Arc<AppState> {
    let client = Arc::new(RecordingClient::new(response));
    Arc::new(AppState::new(client, &AppConfig::default()))
}

async fn send_json(state: Arc<AppState>, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn health_check_reports_ok() {
    let response = router(test_state("unused"))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn simplify_returns_html_and_a_session_id() {
    let state = test_state("**Key Point**");

    let (status, body) = send_json(
        state,
        "/simplify",
        json!({ "text": "some legal text", "level": "Standard View" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["summary"]
        .as_str()
        .unwrap()
        .contains("<strong>Key Point</strong>"));
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert_eq!(body["truncated"], false);
}

#[tokio::test]
async fn chatbot_answers_from_the_stored_session_summary() {
    let state = test_state("The answer.");

    let (status, body) = send_json(
        state.clone(),
        "/simplify",
        json!({ "text": "some legal text", "level": "eli5" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        state,
        "/chatbot",
        json!({
            "session_id": session_id,
            "history": [
                { "role": "user", "content": "Q1" },
                { "role": "ai", "content": "A1" }
            ],
            "question": "What is the main point?"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "The answer.");
}

#[tokio::test]
async fn chatbot_explicit_summary_wins_over_session_lookup() {
    let state = test_state("Grounded answer.");

    let (status, body) = send_json(
        state,
        "/chatbot",
        json!({
            "summary": "An explicit summary.",
            "session_id": "not-even-a-real-session",
            "history": [],
            "question": "Who is involved?"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "Grounded answer.");
}

#[tokio::test]
async fn chatbot_unknown_session_is_404() {
    let state = test_state("unused");

    let (status, body) = send_json(
        state,
        "/chatbot",
        json!({ "session_id": "missing", "history": [], "question": "Q" }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found_error");
}

#[tokio::test]
async fn chatbot_without_context_is_409() {
    let state = test_state("unused");

    let (status, body) = send_json(
        state,
        "/chatbot",
        json!({ "history": [], "question": "Q" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("simplify a document first"));
}

#[tokio::test]
async fn simplify_empty_text_is_400() {
    let state = test_state("unused");

    let (status, body) = send_json(
        state,
        "/simplify",
        json!({ "text": "   ", "level": "Standard View" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn failed_simplify_leaves_no_session_behind() {
    let state = test_state("unused");

    let (status, _) = send_json(
        state.clone(),
        "/simplify",
        json!({ "text": "   ", "level": "Standard View" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.sessions.is_empty().await);
}

#[tokio::test]
async fn successful_simplify_stores_exactly_one_session() {
    let state = test_state("summary");

    let (status, body) = send_json(
        state.clone(),
        "/simplify",
        json!({ "text": "some legal text", "level": "detailed" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.sessions.len().await, 1);

    let session_id = body["session_id"].as_str().unwrap();
    let session = state.sessions.get(session_id).await.unwrap();
    assert_eq!(session.summary, "summary");
    assert_eq!(session.document_text, "some legal text");
}

#[tokio::test]
async fn simplify_unknown_level_is_400() {
    let state = test_state("unused");

    let (status, body) = send_json(
        state,
        "/simplify",
        json!({ "text": "some text", "level": "Verbose Mode" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Verbose Mode"));
}

fn multipart_request(field_name: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "plainbrief-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"doc.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post("/extract_pdf")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn extract_pdf_returns_page_joined_text() {
    let pdf = pdf_with_pages(&["Hello.", "World."]);

    let response = router(test_state("unused"))
        .oneshot(multipart_request("file", &pdf))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["text"], "Hello.\nWorld.");
}

#[tokio::test]
async fn extract_pdf_rejects_unparseable_upload() {
    let response = router(test_state("unused"))
        .oneshot(multipart_request("file", b"not a pdf"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn extract_pdf_without_file_field_is_400() {
    let response = router(test_state("unused"))
        .oneshot(multipart_request("attachment", b"whatever"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
