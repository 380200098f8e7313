use super::helpers::{
    FixedSimulator, expect_status, get, read_json, read_text, send, spawn_app, spawn_app_with,
};
use axum::http::{StatusCode, header};
use sample_app::domain::simulation::entity::ErrorKind;
use serde_json::{Value, json};
use std::time::{Duration, Instant};

#[tokio::test]
async fn index_lists_app_and_endpoints() {
    let app = spawn_app();

    let res = expect_status(send(&app.app, get("/")).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(
        body,
        json!({
            "app": "monitoring-sample-app",
            "endpoints": ["/health", "/metrics", "/api/data", "/api/slow", "/api/error"]
        })
    );
}

#[tokio::test]
async fn health_reports_healthy_with_timestamp() {
    let app = spawn_app();

    let res = expect_status(send(&app.app, get("/health")).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["status"], "healthy");
    let timestamp = body["timestamp"].as_f64().expect("timestamp is not a number");
    let now = chrono::Utc::now().timestamp() as f64;
    assert!((now - timestamp).abs() < 60.0, "timestamp {timestamp} far from {now}");
}

#[tokio::test]
async fn data_success_returns_items() {
    let app = spawn_app_with(FixedSimulator {
        items: 100,
        ..FixedSimulator::default()
    });

    let res = expect_status(send(&app.app, get("/api/data")).await, StatusCode::OK).await;
    let body: Value = read_json(res).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["items"], 100);
    assert!(body["timestamp"].is_f64());
    assert_eq!(app.metrics.error_count(ErrorKind::Internal), 0);
}

#[tokio::test]
async fn data_failure_returns_internal_error() {
    let app = spawn_app_with(FixedSimulator {
        data_fails: true,
        ..FixedSimulator::default()
    });

    let res = expect_status(
        send(&app.app, get("/api/data")).await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    let body: Value = read_json(res).await;

    assert_eq!(body, json!({ "error": "Internal server error" }));
    assert_eq!(app.metrics.error_count(ErrorKind::Internal), 1);
    assert_eq!(app.metrics.error_count(ErrorKind::Forced), 0);
}

#[tokio::test]
async fn slow_responds_after_delay_with_rounded_value() {
    let app = spawn_app_with(FixedSimulator {
        slow_latency: Duration::from_millis(123),
        ..FixedSimulator::default()
    });

    let started = Instant::now();
    let res = expect_status(send(&app.app, get("/api/slow")).await, StatusCode::OK).await;
    assert!(started.elapsed() >= Duration::from_millis(123));

    let body: Value = read_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["delay"].as_f64(), Some(0.12));
}

#[tokio::test]
async fn error_endpoint_always_fails_and_counts_forced() {
    let app = spawn_app();

    for expected in 1..=3 {
        let res = expect_status(
            send(&app.app, get("/api/error")).await,
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .await;
        let body: Value = read_json(res).await;
        assert_eq!(body, json!({ "error": "Forced error for testing" }));
        assert_eq!(app.metrics.error_count(ErrorKind::Forced), expected);
    }
    assert_eq!(app.metrics.error_count(ErrorKind::Internal), 0);
}

#[tokio::test]
async fn metrics_uses_prometheus_content_type() {
    let app = spawn_app();

    let res = expect_status(send(&app.app, get("/metrics")).await, StatusCode::OK).await;
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    assert!(content_type.starts_with("text/plain"), "got {content_type}");
    let text = read_text(res).await;
    assert!(text.contains("# TYPE active_requests gauge"));
}

#[tokio::test]
async fn scrape_shows_previous_requests() {
    let app = spawn_app();

    send(&app.app, get("/health")).await;
    send(&app.app, get("/health")).await;
    send(&app.app, get("/api/error")).await;

    let text = read_text(send(&app.app, get("/metrics")).await).await;

    assert!(text.contains(
        "http_requests_total{endpoint=\"/health\",method=\"GET\",status=\"200\"} 2"
    ));
    assert!(text.contains(
        "http_requests_total{endpoint=\"/api/error\",method=\"GET\",status=\"500\"} 1"
    ));
    assert!(text.contains("application_errors_total{type=\"forced\"} 1"));
    assert!(text.contains(
        "http_request_duration_seconds_count{endpoint=\"/health\",method=\"GET\"} 2"
    ));
    // The scrape in progress is itself in flight while the exposition is rendered.
    assert!(text.contains("active_requests 1"));
}

#[tokio::test]
async fn responses_carry_request_id_and_nosniff() {
    let app = spawn_app();

    let generated = send(&app.app, get("/health")).await;
    assert!(generated.headers().contains_key("x-request-id"));
    assert_eq!(
        generated.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
        "nosniff"
    );

    let req = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let echoed = send(&app.app, req).await;
    assert_eq!(echoed.headers().get("x-request-id").unwrap(), "abc-123");
}
