//! Integration tests for the Jira client's response handling
//!
//! A throwaway axum listener stands in for Jira, so these drive the real
//! request path end to end: status classification, the 204 empty-success
//! contract, Retry-After parsing, and the response bodies the mutation
//! tools pass back to the caller.

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use jira_mcp::auth::TenantCredentials;
use jira_mcp::client::JiraClient;
use jira_mcp::config::Settings;
use jira_mcp::http::create_shared_client;
use jira_mcp::mcp::{JiraMcpServer, requests, tools};
use jira_mcp::JiraError;
use serde_json::{Value, json};
use std::sync::Arc;

async fn issue_ok() -> Json<Value> {
    Json(json!({
        "key": "OK-1",
        "fields": { "summary": "a real issue" }
    }))
}

async fn issue_deleted() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn rate_limited() -> impl IntoResponse {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [("Retry-After", "120")],
        Json(json!({ "errorMessages": ["Rate limit exceeded"] })),
    )
}

async fn rate_limited_no_hint() -> StatusCode {
    StatusCode::TOO_MANY_REQUESTS
}

async fn vendor_error() -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errorMessages": ["Issue does not exist"] })),
    )
}

async fn non_json_error() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "upstream exploded")
}

async fn search() -> Json<Value> {
    Json(json!({
        "startAt": 0,
        "maxResults": 50,
        "total": 120,
        "issues": (0..50).map(|i| json!({ "key": format!("PROJ-{i}") })).collect::<Vec<_>>(),
    }))
}

async fn comment_created() -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({
            "id": "10001",
            "author": { "displayName": "Dana Dev" },
            "body": { "type": "doc", "version": 1, "content": [] }
        })),
    )
}

async fn sprint_updated() -> Json<Value> {
    Json(json!({
        "id": 42,
        "name": "Sprint 9",
        "state": "active"
    }))
}

/// Bind a fake Jira on an ephemeral port and return credentials pointing at it
async fn fake_jira() -> TenantCredentials {
    let app = Router::new()
        .route("/rest/api/3/issue/OK-1", get(issue_ok))
        .route("/rest/api/3/issue/DEL-1", delete(issue_deleted))
        .route("/rest/api/3/issue/RATE-1", get(rate_limited))
        .route("/rest/api/3/issue/NOHINT-1", get(rate_limited_no_hint))
        .route("/rest/api/3/issue/ERR-1", get(vendor_error))
        .route("/rest/api/3/issue/BAD-1", get(non_json_error))
        .route("/rest/api/3/search", get(search))
        .route("/rest/api/3/issue/CMT-1/comment", post(comment_created))
        .route("/rest/agile/1.0/sprint/42", post(sprint_updated));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TenantCredentials {
        domain: format!("http://{addr}"),
        email: Some("dev@example.com".into()),
        api_token: Some("token".into()),
        oauth_token: None,
    }
}

async fn fake_client() -> JiraClient {
    JiraClient::new(create_shared_client(), &fake_jira().await).unwrap()
}

#[tokio::test]
async fn test_success_body_round_trips() {
    let client = fake_client().await;
    let issue = client.get_issue("OK-1", None, None).await.unwrap();
    assert_eq!(issue["fields"]["summary"], "a real issue");
}

#[tokio::test]
async fn test_204_maps_to_empty_success() {
    let client = fake_client().await;
    let body = client.delete_issue("DEL-1", false).await.unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_429_parses_retry_after_header() {
    let client = fake_client().await;
    match client.get_issue("RATE-1", None, None).await {
        Err(JiraError::RateLimited { retry_after_secs }) => assert_eq!(retry_after_secs, 120),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_429_without_header_uses_default_hint() {
    let client = fake_client().await;
    match client.get_issue("NOHINT-1", None, None).await {
        Err(JiraError::RateLimited { retry_after_secs }) => assert_eq!(retry_after_secs, 30),
        other => panic!("expected RateLimited, got {other:?}"),
    }
}

#[tokio::test]
async fn test_vendor_error_message_extracted() {
    let client = fake_client().await;
    match client.get_issue("ERR-1", None, None).await {
        Err(JiraError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Issue does not exist");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_still_classified() {
    let client = fake_client().await;
    match client.get_issue("BAD-1", None, None).await {
        Err(JiraError::Api { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_search_envelope_reshaped() {
    let client = fake_client().await;
    let page = client
        .search_issues("project = PROJ", None, 50, None)
        .await
        .unwrap();
    assert_eq!(page.count, 50);
    assert_eq!(page.total, 120);
    assert!(page.has_more);
}

/// Build a tool server whose tenant slot points at the fake Jira
async fn fake_server() -> JiraMcpServer {
    let server = JiraMcpServer::new(Arc::new(Settings::default()), create_shared_client());
    *server.tenant.write().await = Some(fake_jira().await);
    server
}

#[tokio::test]
async fn test_add_comment_returns_vendor_body() {
    let server = fake_server().await;
    let out = tools::comments::add_comment(
        &server,
        requests::AddCommentRequest {
            issue_key: "CMT-1".into(),
            body: json!("looks good"),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("Added comment 10001 to CMT-1"), "{out}");
    assert!(out.contains("\"displayName\": \"Dana Dev\""), "{out}");
}

#[tokio::test]
async fn test_update_sprint_returns_vendor_body() {
    let server = fake_server().await;
    let out = tools::agile::update_sprint(
        &server,
        requests::UpdateSprintRequest {
            sprint_id: 42,
            name: None,
            state: Some("active".into()),
            start_date: None,
            end_date: None,
            goal: None,
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("Updated sprint 42"), "{out}");
    assert!(out.contains("\"state\": \"active\""), "{out}");
}
