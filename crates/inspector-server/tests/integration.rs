//! Integration tests for inspector-server.
//!
//! These tests run the full stack on an ephemeral port and talk to it over
//! real HTTP:
//! - Dashboard rendering and header escaping
//! - JSON document shape and formatting
//! - Single-field endpoints
//! - Status echo and delay behavior, including the request timeout

use std::time::{Duration, Instant};

use inspector_core::{AttributeBag, StaticProvider};
use inspector_server::{AppState, InspectorServer, TestHandle};

async fn start() -> TestHandle {
    InspectorServer::start_test(AppState::default(), Duration::from_secs(30))
        .await
        .unwrap()
}

// ============================================================================
// Test: Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_escapes_malicious_header() {
    let server = start().await;

    let response = reqwest::Client::new()
        .get(format!("{}/", server.url()))
        .header("X-Malicious", "<script>alert('XSS')</script>")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let body = response.text().await.unwrap();
    assert!(!body.contains("<script>alert('XSS')</script>"));
    assert!(body.contains("&lt;script&gt;alert(&#039;XSS&#039;)&lt;/script&gt;"));
    assert!(body.contains(r#"id="fp-canvas""#));

    server.shutdown().await;
}

// ============================================================================
// Test: JSON endpoints
// ============================================================================

#[tokio::test]
async fn test_json_round_trip_with_edge_metadata() {
    let edge: AttributeBag = serde_json::from_str(
        r#"{"colo": "FRA", "asn": 3320, "botManagement": {"score": 99, "verifiedBot": false}}"#,
    )
    .unwrap();
    let server = InspectorServer::start_test(
        AppState::with_provider(StaticProvider::new(edge)),
        Duration::from_secs(30),
    )
    .await
    .unwrap();

    let response = reqwest::Client::new()
        .post(format!("{}/json", server.url()))
        .send()
        .await
        .unwrap();
    // Only GET is routed for /json.
    assert_eq!(response.status(), 405);

    let response = reqwest::get(format!("{}/json", server.url()))
        .await
        .unwrap();
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=UTF-8"
    );
    let body = response.text().await.unwrap();
    assert!(body.contains("\n  \"colo\": \"FRA\","));

    let doc: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(doc["colo"], "FRA");
    assert_eq!(doc["asn"], 3320);
    assert_eq!(doc["botManagement"]["score"], 99);
    assert_eq!(doc["botManagement"]["verifiedBot"], false);
    assert_eq!(doc["method"], "GET");
    assert_eq!(doc["url"], format!("{}/json", server.url()));
    assert_eq!(doc["requestHeaders"]["host"], server.addr().to_string());

    server.shutdown().await;
}

#[tokio::test]
async fn test_headers_endpoint_lower_cases_names() {
    let server = start().await;

    let doc: serde_json::Value = reqwest::Client::new()
        .get(format!("{}/headers", server.url()))
        .header("X-Trace-Token", "abc123")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(doc["x-trace-token"], "abc123");

    server.shutdown().await;
}

// ============================================================================
// Test: Single-field endpoints
// ============================================================================

#[tokio::test]
async fn test_ip_and_user_agent() {
    let server = start().await;
    let client = reqwest::Client::new();

    let ip = client
        .get(format!("{}/ip", server.url()))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(ip, "unknown");

    let ip = client
        .get(format!("{}/ip", server.url()))
        .header("CF-Connecting-IP", "203.0.113.50")
        .header("X-Forwarded-For", "10.1.1.1")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(ip, "203.0.113.50");

    let ua = client
        .get(format!("{}/user-agent", server.url()))
        .header("User-Agent", "integration-test/1.0")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(ua, "integration-test/1.0");

    server.shutdown().await;
}

// ============================================================================
// Test: Status and delay
// ============================================================================

#[tokio::test]
async fn test_status_echo() {
    let server = start().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/status/404", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.unwrap(), "Returned status: 404");

    let response = client
        .get(format!("{}/status/599", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 599);

    // Final 1xx responses are rewritten by hyper.
    let response = client
        .get(format!("{}/status/100", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    for raw in ["99", "600", "abc"] {
        let response = client
            .get(format!("{}/status/{raw}", server.url()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400, "{raw}");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_delay_does_not_block_other_requests() {
    let server = start().await;
    let client = reqwest::Client::new();

    let slow = tokio::spawn({
        let client = client.clone();
        let url = format!("{}/delay/400", server.url());
        async move {
            let start = Instant::now();
            let body = client.get(url).send().await.unwrap().text().await.unwrap();
            (body, start.elapsed())
        }
    });

    let start = Instant::now();
    let health = client
        .get(format!("{}/health", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    assert!(start.elapsed() < Duration::from_millis(400));

    let (body, elapsed) = slow.await.unwrap();
    assert_eq!(body, "Delayed by 400ms");
    assert!(elapsed >= Duration::from_millis(400));

    let body = client
        .get(format!("{}/delay/-5", server.url()))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "Delayed by -5ms");

    server.shutdown().await;
}

#[tokio::test]
async fn test_delay_cut_off_by_request_timeout() {
    let server = InspectorServer::start_test(AppState::default(), Duration::from_millis(100))
        .await
        .unwrap();

    let start = Instant::now();
    let response = reqwest::get(format!("{}/delay/30000", server.url()))
        .await
        .unwrap();

    assert_eq!(response.status(), 408);
    assert!(start.elapsed() < Duration::from_secs(5));

    server.shutdown().await;
}
