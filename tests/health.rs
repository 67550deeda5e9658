//! Integration tests for the HTTP health endpoint.
//! Spins up the REST server on a random port and sends a raw GET /api/health request.

use async_trait::async_trait;
use echovibe::config::{AppConfig, EngineSettings, SmtpSettings, DEFAULT_FROM};
use echovibe::engine::EchoEngine;
use echovibe::types::{Mood, MoodProfile, TravelPlan};
use echovibe::AppContext;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Find a free local port by binding to port 0.
fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

struct StubEngine;

#[async_trait]
impl EchoEngine for StubEngine {
    async fn analyze_mood(&self, _text: &str) -> anyhow::Result<MoodProfile> {
        Ok(MoodProfile {
            primary_mood: Mood::Calm,
            intensity: 0.4,
            description: "Even and unhurried".to_string(),
            suggested_colors: vec!["#88AACC".to_string()],
        })
    }

    async fn generate_itineraries(
        &self,
        profile: &MoodProfile,
        _budget: &str,
    ) -> anyhow::Result<TravelPlan> {
        Ok(TravelPlan {
            mood_profile: profile.clone(),
            options: vec![],
        })
    }
}

/// Build a minimal AppContext on a random port for testing.
fn make_test_ctx(port: u16) -> Arc<AppContext> {
    let config = AppConfig {
        port,
        bind_address: "127.0.0.1".to_string(),
        log: "error".to_string(),
        log_format: "pretty".to_string(),
        static_dir: None,
        engine: EngineSettings {
            api_key: None,
            model: "gemini-test".to_string(),
            request_timeout_secs: 5,
        },
        smtp: SmtpSettings {
            host: None,
            port: 587,
            user: None,
            pass: None,
            from: DEFAULT_FROM.to_string(),
        },
    };
    Arc::new(AppContext {
        config: Arc::new(config),
        engine: Arc::new(StubEngine),
        mailer: None,
        started_at: std::time::Instant::now(),
    })
}

#[tokio::test]
async fn test_health_endpoint_response_fields() {
    let port = find_free_port();
    let ctx = make_test_ctx(port);

    // Start the REST server in the background
    tokio::spawn(async move {
        let _ = echovibe::rest::start_rest_server(ctx).await;
    });

    // Give the server a moment to start
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    // Send HTTP GET /api/health request
    let mut stream = TcpStream::connect(format!("127.0.0.1:{port}"))
        .await
        .unwrap();
    let request = "GET /api/health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n";
    stream.write_all(request.as_bytes()).await.unwrap();

    // Read response
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let response = String::from_utf8_lossy(&buf);

    // Split headers from body
    let body_start = response
        .find("\r\n\r\n")
        .map(|i| i + 4)
        .or_else(|| response.find("\n\n").map(|i| i + 2))
        .expect("no body in response");
    let body = &response[body_start..];

    // Parse as JSON
    let json: serde_json::Value = serde_json::from_str(body).expect("body is not valid JSON");

    // Assert all required fields
    assert_eq!(json["status"], "ok", "status should be 'ok'");
    assert!(json["version"].is_string(), "version should be a string");
    assert!(json["uptime"].is_number(), "uptime should be a number");
    assert_eq!(
        json["mailMode"], "mock",
        "no mailer configured should report mock mode"
    );

    // Assert version matches CARGO_PKG_VERSION
    assert_eq!(
        json["version"].as_str().unwrap(),
        env!("CARGO_PKG_VERSION"),
        "version should match CARGO_PKG_VERSION"
    );

    // Assert no sensitive fields
    assert!(
        json.get("smtp").is_none(),
        "response must not expose SMTP settings"
    );
    assert!(
        json.get("apiKey").is_none(),
        "response must not expose the API key"
    );
}

#[tokio::test]
async fn test_health_endpoint_returns_200() {
    let port = find_free_port();
    let ctx = make_test_ctx(port);

    tokio::spawn(async move {
        let _ = echovibe::rest::start_rest_server(ctx).await;
    });

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let mut stream = TcpStream::connect(format!("127.0.0.1:{port}"))
        .await
        .unwrap();
    stream
        .write_all(b"GET /api/health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let response = String::from_utf8_lossy(&buf);

    // First line should be HTTP 200
    let first_line = response.lines().next().unwrap_or("");
    assert!(
        first_line.contains("200"),
        "expected HTTP 200, got: {first_line}"
    );
    assert!(
        response.to_ascii_lowercase().contains("content-type: application/json"),
        "expected JSON content type"
    );
}
