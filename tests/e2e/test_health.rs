use crate::helpers;

use helpers::spawn_app;
use hyper::StatusCode;

#[tokio::test]
async fn it_should_return_liveness_banner_on_root() {
    let app = spawn_app().await;

    let response = app.client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert!(body.contains("running"));
}

#[tokio::test]
async fn it_should_not_contact_external_services_by_default() {
    let app = spawn_app().await;

    let response = app.client.get("/api/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("healthy"));
    assert_eq!(
        body.get("script_service").and_then(|v| v.as_str()),
        Some("unchecked")
    );
    assert_eq!(
        body.get("tts_service").and_then(|v| v.as_str()),
        Some("unchecked")
    );

    // The shallow check must be free: no provider call recorded
    assert!(app.calls.snapshot().is_empty());
}

#[tokio::test]
async fn it_should_report_connectivity_in_deep_mode() {
    let app = spawn_app().await;

    let response = app.client.get("/api/health?deep=true").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("healthy"));
    assert_eq!(
        body.get("script_service").and_then(|v| v.as_str()),
        Some("connected")
    );
    assert_eq!(
        body.get("tts_service").and_then(|v| v.as_str()),
        Some("connected")
    );

    // Both flags come from live probes, not a local catalogue
    assert_eq!(app.calls.snapshot(), vec!["script_ping", "speech_ping"]);
}

#[tokio::test]
async fn it_should_include_request_id_in_responses() {
    let app = spawn_app().await;

    let response = app.client.get("/").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = app.client.get("/api/health").await.unwrap();
    response.assert_header_exists("x-request-id");
}

#[tokio::test]
async fn it_should_keep_a_caller_supplied_request_id() {
    let app = spawn_app().await;

    let response = app
        .client
        .get_with_header("/", "x-request-id", "req-1234")
        .await
        .unwrap();

    assert_eq!(
        response.header("x-request-id").map(|s| s.as_str()),
        Some("req-1234")
    );
}

#[tokio::test]
async fn it_should_handle_concurrent_health_checks() {
    let app = spawn_app().await;

    let mut futures = Vec::new();
    for _ in 0..10 {
        let client = app.client.clone();
        futures.push(async move { client.get("/api/health").await });
    }

    let results = futures::future::join_all(futures).await;

    for result in results {
        let response = result.unwrap();
        response.assert_status(StatusCode::OK);
    }
}
