use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use domicilia_core::{is_rfc3339, ListMessagesResponse, MessageAck};
use domicilia_server::{open_database, routes, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

async fn app_with_db() -> Result<Router> {
    let pool = open_database("sqlite::memory:").await?;
    Ok(routes::router(Arc::new(AppState::new(Some(pool)))))
}

fn app_without_db() -> Router {
    routes::router(Arc::new(AppState::new(None)))
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn valid_payload() -> Value {
    json!({
        "text": "Bonjour",
        "name": "Ada",
        "email": "ada@example.com",
        "phone": "",
        "companyId": "acme",
        "timestamp": "2025-11-02T10:20:30Z"
    })
}

#[tokio::test]
async fn root_greets() {
    let resp = app_without_db().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "message": "Welcome to Domicilia API" }));
}

// liveness risponde OK anche senza database
#[tokio::test]
async fn api_health_is_ok_without_database() {
    let resp = app_without_db().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "status": "OK", "message": "Server is running" }));
}

#[tokio::test]
async fn readiness_follows_database() -> Result<()> {
    let resp = app_without_db().oneshot(get("/health")).await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let resp = app_with_db().await?.oneshot(get("/health")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn posted_message_is_acknowledged_and_listed() -> Result<()> {
    let app = app_with_db().await?;

    let resp = app.clone().oneshot(post_json("/api/messages", &valid_payload())).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ack: MessageAck = serde_json::from_value(body_json(resp).await)?;
    assert!(ack.success);
    assert!(!ack.message_id.is_empty());
    assert!(is_rfc3339(&ack.received_at));

    let resp = app.clone().oneshot(get("/api/messages?companyId=acme")).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: ListMessagesResponse = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.messages.len(), 1);
    assert_eq!(list.messages[0].message_id, ack.message_id);
    assert_eq!(list.messages[0].message.text, "Bonjour");

    // un'altra azienda non vede il messaggio
    let resp = app.oneshot(get("/api/messages?companyId=other")).await?;
    let list: ListMessagesResponse = serde_json::from_value(body_json(resp).await)?;
    assert!(list.messages.is_empty());
    Ok(())
}

#[tokio::test]
async fn blank_text_is_rejected_server_side() -> Result<()> {
    let mut payload = valid_payload();
    payload["text"] = json!("   ");
    let resp = app_with_db().await?.oneshot(post_json("/api/messages", &payload)).await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(resp).await;
    assert_eq!(body["code"], "invalid_message");
    Ok(())
}

#[tokio::test]
async fn missing_email_is_rejected_server_side() -> Result<()> {
    let mut payload = valid_payload();
    payload["email"] = json!("");
    let resp = app_with_db().await?.oneshot(post_json("/api/messages", &payload)).await?;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_client_error() -> Result<()> {
    let req = Request::builder()
        .method("POST")
        .uri("/api/messages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let resp = app_with_db().await?.oneshot(req).await?;
    assert!(resp.status().is_client_error());
    Ok(())
}

#[tokio::test]
async fn valid_message_without_database_is_unavailable() {
    let resp = app_without_db().oneshot(post_json("/api/messages", &valid_payload())).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(resp).await["code"], "storage_unavailable");
}

#[tokio::test]
async fn listing_requires_company_id() -> Result<()> {
    let resp = app_with_db().await?.oneshot(get("/api/messages")).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["code"], "missing_company_id");
    Ok(())
}

#[tokio::test]
async fn listing_clamps_limit() -> Result<()> {
    let app = app_with_db().await?;
    for _ in 0..3 {
        let resp = app.clone().oneshot(post_json("/api/messages", &valid_payload())).await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
    let resp = app.clone().oneshot(get("/api/messages?companyId=acme&limit=0")).await?;
    let list: ListMessagesResponse = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.messages.len(), 1);

    let resp = app.oneshot(get("/api/messages?companyId=acme&limit=100")).await?;
    let list: ListMessagesResponse = serde_json::from_value(body_json(resp).await)?;
    assert_eq!(list.messages.len(), 3);
    Ok(())
}
