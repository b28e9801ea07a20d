use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use domicilia_client::{
    ChatConfig, ChatShell, MessageDraft, SubmissionPhase, SubmitError, HttpTransport, MessageTransport,
    TransportError, SUBMIT_FAILED_MESSAGE,
};
use domicilia_core::is_rfc3339;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Una richiesta ricevuta dall'ingresso finto: content-type e body.
type Received = Arc<Mutex<Vec<(String, Value)>>>;

/// Avvia un ingresso finto su una porta libera e ne restituisce l'URL base dell'API.
async fn fake_ingress(status: StatusCode, reply: Value) -> (String, Received) {
    let received: Received = Arc::default();
    let rec = received.clone();
    let app = Router::new().route(
        "/api/messages",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let rec = rec.clone();
            let reply = reply.clone();
            async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                rec.lock().unwrap().push((content_type, body));
                (status, Json(reply))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (format!("http://{}/api", addr), received)
}

fn draft() -> MessageDraft {
    MessageDraft::new("  Bonjour, un devis svp  ", "Ada", "ada@example.com")
}

#[tokio::test]
async fn valid_draft_posts_exactly_once() {
    let (api_url, received) = fake_ingress(StatusCode::OK, json!({ "ok": true })).await;
    let shell = ChatShell::with_http(&ChatConfig::default().with_api_url(api_url)).expect("shell");
    let session = shell.session();

    let ack = session.submit(&draft()).await.expect("submit");
    assert_eq!(ack, json!({ "ok": true }));

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let (content_type, body) = &received[0];
    assert!(content_type.starts_with("application/json"));
    assert_eq!(body["text"], "Bonjour, un devis svp");
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["phone"], "");
    assert_eq!(body["companyId"], "domicilia");
    assert!(is_rfc3339(body["timestamp"].as_str().expect("timestamp string")));

    let snap = session.snapshot().unwrap();
    assert_eq!(snap.submission.phase, SubmissionPhase::Succeeded);
    assert!(snap.submission.last_result.unwrap().success);
}

#[tokio::test]
async fn whitespace_text_sends_nothing() {
    let (api_url, received) = fake_ingress(StatusCode::OK, json!({ "ok": true })).await;
    let shell = ChatShell::with_http(&ChatConfig::default().with_api_url(api_url)).expect("shell");
    let session = shell.session();
    let before = session.snapshot().unwrap();

    let err = session.submit(&MessageDraft::new(" \t ", "Ada", "ada@example.com")).await.unwrap_err();
    assert!(matches!(err, SubmitError::Invalid(_)));
    assert!(received.lock().unwrap().is_empty());
    assert_eq!(session.snapshot().unwrap(), before);
}

#[tokio::test]
async fn non_2xx_becomes_generic_failure() {
    let (api_url, received) =
        fake_ingress(StatusCode::INTERNAL_SERVER_ERROR, json!({ "code": "boom", "message": "secret detail" })).await;
    let shell = ChatShell::with_http(&ChatConfig::default().with_api_url(api_url)).expect("shell");
    let session = shell.session();

    let err = session.submit(&draft()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Failed));
    assert_eq!(received.lock().unwrap().len(), 1, "no retry");

    let snap = session.snapshot().unwrap();
    assert_eq!(snap.submission.phase, SubmissionPhase::Failed);
    assert!(!snap.submission.is_loading);
    assert_eq!(snap.submission.error.as_deref(), Some(SUBMIT_FAILED_MESSAGE));
    assert!(snap.submission.last_result.is_none());
}

#[tokio::test]
async fn transport_reports_status_code() {
    let (api_url, _) = fake_ingress(StatusCode::NOT_FOUND, Value::Null).await;
    let transport = HttpTransport::new(&ChatConfig::default().with_api_url(api_url.clone())).expect("transport");
    assert_eq!(transport.endpoint().as_str(), format!("{}/messages", api_url));
    let message = draft().validate().unwrap().into_message("acme", "2025-11-02T10:20:30Z");

    match transport.send(&message).await {
        Err(TransportError::Status(404)) => {}
        other => panic!("expected 404, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_ingress_is_a_network_error() {
    // porta liberata subito dopo il bind: nessuno ascolta
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ChatConfig::default().with_api_url(format!("http://{}/api", addr));
    let transport = HttpTransport::new(&config).expect("transport");
    let message = draft().validate().unwrap().into_message("acme", "2025-11-02T10:20:30Z");
    assert!(matches!(transport.send(&message).await, Err(TransportError::Network(_))));

    let shell = ChatShell::with_http(&config).expect("shell");
    assert!(matches!(shell.session().submit(&draft()).await, Err(SubmitError::Failed)));
}

#[test]
fn invalid_api_url_is_rejected_up_front() {
    let config = ChatConfig::default().with_api_url("::not a url::");
    assert!(matches!(HttpTransport::new(&config), Err(TransportError::InvalidUrl(_))));
}

// giro completo: sessione client -> server reale con database in memoria
#[tokio::test]
async fn message_reaches_the_real_ingress() {
    use domicilia_server::{open_database, routes, store, AppState};

    let pool = open_database("sqlite::memory:").await.expect("db");
    let app = routes::router(Arc::new(AppState::new(Some(pool.clone()))));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    let shell = ChatShell::with_http(&ChatConfig::default().with_api_url(format!("http://{}/api", addr))).expect("shell");
    let session = shell.session();
    session.set_company_id("acme").unwrap();

    let ack = session.submit(&draft().with_phone("+33 6 12 34 56 78")).await.expect("submit");
    assert_eq!(ack["success"], true);

    let stored = store::list_messages(&pool, "acme", 10).await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].message_id, ack["messageId"].as_str().unwrap());
    assert_eq!(stored[0].message.text, "Bonjour, un devis svp");
    assert_eq!(stored[0].message.phone, "+33 6 12 34 56 78");
}
