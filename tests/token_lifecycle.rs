//! Integration tests for the access token lifecycle using wiremock.
//!
//! The token endpoint and the API are served by the same mock server. A
//! manual clock drives expiry so no test sleeps.
//!
//! - lazy acquisition on first use, reuse while valid
//! - refresh once the grace period is reached
//! - serialized refresh under concurrent callers
//! - token endpoint failures surface as `MqError::Auth`

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::future::join_all;
use machineq::{ApiErrorKind, ClientBuilder, Clock, Credentials, MqClient, MqError};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Clock that only moves when told to.
#[derive(Debug)]
struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    fn new() -> Arc<Self> {
        Arc::new(ManualClock {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

fn builder(server: &MockServer) -> ClientBuilder {
    ClientBuilder::new(Credentials::new("test-client", "test-secret"))
        .api_root(server.uri())
        .token_url(format!("{}/oauth/token", server.uri()))
}

fn mock_client(server: &MockServer) -> MqClient {
    builder(server).build().unwrap()
}

async fn mount_token(server: &MockServer, expires_in: u64, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": expires_in
        })))
        .expect(expected)
        .mount(server)
        .await;
}

async fn mount_version(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Semantic": "3.14.0",
            "Major": "3",
            "Minor": "14",
            "Patch": "0",
            "BuildTime": "2024-03-01T00:00:00Z"
        })))
        .expect(expected)
        .mount(server)
        .await;
}

// ── acquisition and reuse ──────────────────────────────────────────────

#[tokio::test]
async fn token_request_is_a_client_credentials_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "grant_type=client_credentials&client_id=test-client&client_secret=test-secret",
        ))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "test-token", "expires_in": 3600})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    assert_eq!(client.access_token().await.unwrap(), "test-token");
}

#[tokio::test]
async fn valid_token_is_reused_across_calls() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;
    mount_version(&server, 3).await;

    let client = mock_client(&server);
    for _ in 0..3 {
        let version = client.version().get().await.unwrap();
        assert_eq!(version.semantic, "3.14.0");
    }
}

#[tokio::test]
async fn token_is_reused_until_grace_period() {
    let server = MockServer::start().await;
    mount_token(&server, 60, 1).await;

    let clock = ManualClock::new();
    let client = builder(&server).clock(clock.clone()).build().unwrap();

    client.access_token().await.unwrap();
    // 54 + 5 < 60: still valid.
    clock.advance(Duration::from_secs(54));
    client.access_token().await.unwrap();
}

#[tokio::test]
async fn token_is_refreshed_inside_grace_period() {
    let server = MockServer::start().await;
    mount_token(&server, 60, 2).await;

    let clock = ManualClock::new();
    let client = builder(&server).clock(clock.clone()).build().unwrap();

    client.access_token().await.unwrap();
    // 56 + 5 >= 60: treated as expired.
    clock.advance(Duration::from_secs(56));
    client.access_token().await.unwrap();
    // The fresh token is good for another 60 seconds.
    clock.advance(Duration::from_secs(30));
    client.access_token().await.unwrap();
}

#[tokio::test]
async fn concurrent_callers_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "test-token", "expires_in": 3600}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_version(&server, 8).await;

    let client = mock_client(&server);
    let results = join_all((0..8).map(|_| client.version().get())).await;
    assert!(results.iter().all(Result::is_ok));
}

// ── token endpoint failures ────────────────────────────────────────────

#[tokio::test]
async fn rate_limited_token_request_is_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;
    mount_version(&server, 0).await;

    let client = mock_client(&server);
    let err = client.version().get().await.unwrap_err();

    match err {
        MqError::Auth {
            message, status, ..
        } => {
            assert!(message.contains("rate limit"), "got: {message}");
            assert_eq!(status.map(|s| s.as_u16()), Some(429));
        }
        other => panic!("expected Auth, got: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_token_request_reports_code_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.access_token().await.unwrap_err();

    assert!(matches!(err, MqError::Auth { .. }), "got: {err:?}");
    let text = err.to_string();
    assert!(text.contains("401"), "got: {text}");
    assert!(text.contains("invalid_client"), "got: {text}");
    // Token failures are never reported as API errors.
    assert!(err.api_kind().is_none());
}

#[tokio::test]
async fn non_200_success_status_is_still_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"access_token": "test-token", "expires_in": 3600})),
        )
        .mount(&server)
        .await;

    let err = mock_client(&server).access_token().await.unwrap_err();
    assert!(err.to_string().contains("201"), "got: {err}");
}

#[tokio::test]
async fn malformed_token_body_keeps_the_cause() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = mock_client(&server).access_token().await.unwrap_err();
    match &err {
        MqError::Auth { source, .. } => assert!(source.is_some()),
        other => panic!("expected Auth, got: {other:?}"),
    }
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn empty_access_token_is_rejected_and_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "", "expires_in": 3600})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    assert!(matches!(client.access_token().await, Err(MqError::Auth { .. })));
    // Nothing was cached, so the next call asks again.
    assert!(matches!(client.access_token().await, Err(MqError::Auth { .. })));
}

#[tokio::test]
async fn unreachable_token_endpoint_is_an_auth_error() {
    let server = MockServer::start().await;
    // Nothing listens on port 1.
    let client = builder(&server)
        .token_url("http://127.0.0.1:1/oauth/token")
        .build()
        .unwrap();

    let err = client.access_token().await.unwrap_err();
    assert!(matches!(err, MqError::Auth { source: Some(_), .. }), "got: {err:?}");
}

#[tokio::test]
async fn api_401_is_not_retried() {
    let server = MockServer::start().await;
    mount_token(&server, 3600, 1).await;

    Mock::given(method("GET"))
        .and(path("/v1/version"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .expect(1)
        .mount(&server)
        .await;

    let err = mock_client(&server).version().get().await.unwrap_err();
    assert_eq!(err.api_kind(), Some(ApiErrorKind::Unauthorized));
}
