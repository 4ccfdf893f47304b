//! Integration tests for the HTTP agent backend client
//!
//! Validates request/response decoding and error normalization against mock
//! servers. No real backend is required.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wayfarer_client::api::http::HttpBackend;
use wayfarer_client::api::{AgentBackend, ApiError};

#[tokio::test]
async fn test_plan_success_decodes_plan_and_numeric_thread_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/plan"))
        .and(body_json(json!({ "task": "Plan a trip to Rome" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plan": "Day 1: Colosseum",
            "thread_id": 7
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let response = backend.submit_plan("Plan a trip to Rome").await.unwrap();

    assert_eq!(response.plan, "Day 1: Colosseum");
    assert_eq!(response.thread_id.unwrap().into_string(), "7");
}

#[tokio::test]
async fn test_plan_accepts_string_thread_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "plan": "Day 1",
            "thread_id": "abc-123"
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let response = backend.submit_plan("Plan a trip").await.unwrap();

    assert_eq!(response.thread_id.unwrap().into_string(), "abc-123");
}

#[tokio::test]
async fn test_missing_response_fields_decode_to_empty_values() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/research"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());

    let plan = backend.submit_plan("Plan a trip").await.unwrap();
    assert_eq!(plan.plan, "");
    assert!(plan.thread_id.is_none());

    let research = backend.submit_research("", None).await.unwrap();
    assert!(research.queries.is_empty());
    assert!(research.answers.is_empty());
}

#[tokio::test]
async fn test_research_sends_plan_and_thread_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/research"))
        .and(body_json(json!({ "plan": "Day 1", "thread_id": "7" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "queries": ["rome weather"],
            "answers": ["sunny"]
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let response = backend.submit_research("Day 1", Some("7")).await.unwrap();

    assert_eq!(response.queries, vec!["rome weather"]);
    assert_eq!(response.answers, vec!["sunny"]);
}

#[tokio::test]
async fn test_error_status_uses_body_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/plan"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "db down" })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.submit_plan("Plan a trip").await.unwrap_err();

    match err {
        ApiError::Remote(msg) => assert_eq!(msg, "db down"),
        other => panic!("expected Remote error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_falls_back_to_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/critique"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "message": "maintenance window" })),
        )
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.submit_critique("draft", Some("1")).await.unwrap_err();

    match err {
        ApiError::Remote(msg) => assert_eq!(msg, "maintenance window"),
        other => panic!("expected Remote error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_without_json_body_is_generic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend
        .submit_draft("task", "plan", Some("1"))
        .await
        .unwrap_err();

    match err {
        ApiError::Remote(msg) => assert_eq!(msg, "Server error (500 Internal Server Error)"),
        other => panic!("expected Remote error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_failure_names_the_base_url() {
    // Grab a free port and release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let dead_uri = format!("http://127.0.0.1:{}", port);

    let backend = HttpBackend::new(dead_uri.clone());
    let err = backend.submit_plan("Plan a trip").await.unwrap_err();

    match err {
        ApiError::NetworkUnreachable(base_url) => assert_eq!(base_url, dead_uri),
        other => panic!("expected NetworkUnreachable, got: {:?}", other),
    }
    // The rendered message must point the user at the configured endpoint.
    let backend = HttpBackend::new(dead_uri.clone());
    let rendered = backend
        .submit_plan("Plan a trip")
        .await
        .unwrap_err()
        .to_string();
    assert!(rendered.contains(&dead_uri));
    assert!(rendered.contains("backend is running"));
}

#[tokio::test]
async fn test_malformed_success_body_is_unknown_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/plan"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let err = backend.submit_plan("Plan a trip").await.unwrap_err();

    assert!(matches!(err, ApiError::Unknown(_)));
}

#[tokio::test]
async fn test_health_probe() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let health = backend.health().await.unwrap();

    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_thread_state_sends_thread_id_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get-state"))
        .and(query_param("thread_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": { "plan": "Day 1", "revision_number": 2 },
            "next": ["research_plan"]
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let state = backend.thread_state("3").await.unwrap();

    assert_eq!(state.values["plan"], "Day 1");
    assert_eq!(state.next[0], "research_plan");
}

#[tokio::test]
async fn test_thread_history_decodes_steps() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get-state-history"))
        .and(query_param("thread_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [
                { "step": 1, "lnode": "planner", "next": ["research_plan"], "revision_number": 0, "count": 1, "thread_ts": "171" },
                { "step": 2, "lnode": null }
            ]
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let history = backend.thread_history("3").await.unwrap();

    assert_eq!(history.history.len(), 2);
    assert_eq!(history.history[0].lnode.as_deref(), Some("planner"));
    assert_eq!(history.history[0].step, Some(1));
    assert!(history.history[1].lnode.is_none());
}
