//! Integration tests for the blocking client using mockito.
//!
//! The blocking client drives reqwest's own runtime, so these are plain
//! `#[test]` functions against a synchronous mock server.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use machineq::blocking::MqClient;
use machineq::resources::gateway::{Coordinates, GatewayPatch};
use machineq::{ApiErrorKind, ClientBuilder, Clock, Credentials, MqError};
use mockito::{Matcher, Server, ServerGuard};

const TOKEN_FORM: &str =
    "grant_type=client_credentials&client_id=test-client&client_secret=test-secret";

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

fn builder(server: &ServerGuard) -> ClientBuilder {
    ClientBuilder::new(Credentials::new("test-client", "test-secret"))
        .api_root(server.url())
        .token_url(format!("{}/oauth/token", server.url()))
}

fn mock_client(server: &ServerGuard) -> MqClient {
    builder(server).build_blocking().unwrap()
}

fn token_mock(server: &mut ServerGuard, hits: usize) -> mockito::Mock {
    server
        .mock("POST", "/oauth/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(TOKEN_FORM)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "blocking-token", "expires_in": 3600}"#)
        .expect(hits)
        .create()
}

#[test]
fn facade_calls_return_plain_results() {
    let mut server = Server::new();
    let token = token_mock(&mut server, 1);
    let profiles = server
        .mock("GET", "/v1/serviceprofiles")
        .match_header("authorization", "Bearer blocking-token")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"ServiceProfiles": [{"Id": "sp-1", "Name": "Class A", "Description": "default"}]}"#)
        .expect(2)
        .create();

    let client = mock_client(&server);
    let first = client.service_profiles().get_all().unwrap();
    let second = client.service_profiles().get_all().unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].name, "Class A");
    token.assert();
    profiles.assert();
}

#[test]
fn patch_sends_only_set_fields() {
    let mut server = Server::new();
    let _token = token_mock(&mut server, 1);
    let patch = server
        .mock("PATCH", "/v1/gateways/gw-1")
        .match_body(Matcher::Json(serde_json::json!({
            "Id": "gw-1",
            "Name": "rooftop",
            "Coordinates": {"X": "39.95", "Y": "-75.16", "Z": "1"}
        })))
        .with_status(200)
        .with_body(r#"{"Id": "gw-1", "Name": "rooftop", "LocationType": "OUTDOOR"}"#)
        .expect(1)
        .create();

    let client = mock_client(&server);
    let gateway = client
        .gateways()
        .patch(
            "gw-1",
            &GatewayPatch {
                id: "gw-1".into(),
                name: Some("rooftop".into()),
                coordinates: Some(Coordinates::new("39.95", "-75.16")),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(gateway.name, "rooftop");
    patch.assert();
}

#[test]
fn gateway_devices_days_query() {
    let mut server = Server::new();
    let _token = token_mock(&mut server, 1);
    let devices = server
        .mock("GET", "/v1/gateways/gw-1/devices")
        .match_query(Matcher::UrlEncoded("Days".into(), "7".into()))
        .with_status(200)
        .with_body(r#"{"Devices": [{"Name": "pump-7", "DevEUI": "0011"}]}"#)
        .expect(1)
        .create();

    let client = mock_client(&server);
    let resp = client.gateways().get_devices("gw-1", Some(7)).unwrap();

    assert_eq!(resp.devices[0].deveui, "0011");
    devices.assert();
}

#[test]
fn remote_not_found_code_is_classified() {
    let mut server = Server::new();
    let _token = token_mock(&mut server, 1);
    server
        .mock("GET", "/v1/groups/gateways/g-9")
        .with_status(500)
        .with_body(r#"{"code": 5, "message": "group not found"}"#)
        .create();

    let err = mock_client(&server).gateway_groups().get("g-9").unwrap_err();

    let api = err.api().expect("should be an API error");
    assert_eq!(api.kind(), ApiErrorKind::NotFound);
    assert_eq!(api.status().map(|s| s.as_u16()), Some(500));
}

#[test]
fn delete_with_empty_body_succeeds() {
    let mut server = Server::new();
    let _token = token_mock(&mut server, 1);
    let delete = server
        .mock("DELETE", "/v1/users/u-1")
        .with_status(204)
        .expect(1)
        .create();

    mock_client(&server).users().delete("u-1").unwrap();
    delete.assert();
}

#[test]
fn rate_limited_token_stops_before_the_api() {
    let mut server = Server::new();
    server
        .mock("POST", "/oauth/token")
        .with_status(429)
        .with_body("Too Many Requests")
        .create();
    let api = server.mock("GET", "/v1/version").expect(0).create();

    let err = mock_client(&server).version().get().unwrap_err();

    match err {
        MqError::Auth { message, .. } => assert!(message.contains("rate limit"), "got: {message}"),
        other => panic!("expected Auth, got: {other:?}"),
    }
    api.assert();
}

#[test]
fn access_token_is_exposed() {
    let mut server = Server::new();
    let token = token_mock(&mut server, 1);

    let client = mock_client(&server);
    assert_eq!(client.access_token().unwrap(), "blocking-token");
    assert_eq!(client.access_token().unwrap(), "blocking-token");
    token.assert();
}

#[test]
fn cached_token_is_refreshed_inside_grace_period() {
    let mut server = Server::new();
    let token = server
        .mock("POST", "/oauth/token")
        .match_body(TOKEN_FORM)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "short-lived", "expires_in": 60}"#)
        .expect(2)
        .create();
    let version = server
        .mock("GET", "/v1/version")
        .match_header("authorization", "Bearer short-lived")
        .with_status(200)
        .with_body(r#"{"Semantic": "3.14.0"}"#)
        .expect(3)
        .create();

    let clock = ManualClock::new();
    let client = builder(&server)
        .clock(clock.clone())
        .build_blocking()
        .unwrap();

    client.version().get().unwrap();
    // 54 + 5 < 60: the cached token is reused.
    clock.advance(Duration::from_secs(54));
    client.version().get().unwrap();
    // 56 + 5 >= 60: a new token is fetched before the call.
    clock.advance(Duration::from_secs(2));
    let resp = client.version().get().unwrap();

    assert_eq!(resp.semantic, "3.14.0");
    token.assert();
    version.assert();
}
