//! Health and readiness endpoint tests.

mod common;

use common::{mock_state, spawn_app};
use health_relay::services::init_metrics;
use reqwest::Client;
use std::time::Duration;

#[tokio::test]
async fn health_check_returns_ok() {
    let address = spawn_app(mock_state(true)).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "health-relay");
}

#[tokio::test]
async fn health_check_stays_ok_when_upstreams_are_down() {
    let address = spawn_app(mock_state(false)).await;

    let response = Client::new()
        .get(format!("{}/health", address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readiness_check_returns_ok() {
    let address = spawn_app(mock_state(true)).await;

    let response = Client::new()
        .get(format!("{}/ready", address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readiness_check_fails_without_provider() {
    let address = spawn_app(mock_state(false)).await;

    let response = Client::new()
        .get(format!("{}/ready", address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "Service unavailable");
}

#[tokio::test]
async fn metrics_endpoint_renders_text() {
    let address = spawn_app(mock_state(true)).await;

    let response = Client::new()
        .get(format!("{}/metrics", address))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("text/plain")));
}

#[tokio::test]
async fn metrics_endpoint_reports_domain_counters() {
    init_metrics();
    let healthy = spawn_app(mock_state(true)).await;
    let failing = spawn_app(mock_state(false)).await;
    let client = Client::new();

    let response = client
        .post(format!("{}/symptoms-analysis", healthy))
        .json(&serde_json::json!({ "symptoms": "I have a headache and fever" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/medical/conditions?query=asthma", failing))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 500);

    let metrics = client
        .get(format!("{}/metrics", healthy))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");

    assert!(metrics
        .lines()
        .any(|line| line.starts_with("symptom_assessments_total{")
            && line.contains(r#"severity="mild""#)));
    assert!(metrics
        .lines()
        .any(|line| line.starts_with("upstream_requests_total{")
            && line.contains(r#"upstream="conditions""#)
            && line.contains(r#"outcome="failure""#)));
}
