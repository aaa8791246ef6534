//! Integration tests for `RoutesClient::compute_transit_route`.
//!
//! Uses `wiremock` to stand up a local Routes API for each test.

use chrono::{DateTime, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use closeish_server::directions::{RoutesClient, RoutesConfig, RoutesError, summarize_route};
use closeish_server::domain::Coordinates;

const ROUTES_PATH: &str = "/directions/v2:computeRoutes";

fn test_client(server: &MockServer) -> RoutesClient {
    RoutesClient::new(RoutesConfig::new("test-key").with_base_url(server.uri()))
        .expect("failed to build test RoutesClient")
}

fn origin() -> Coordinates {
    Coordinates::new(37.7749, -122.4194).unwrap()
}

fn destination() -> Coordinates {
    Coordinates::new(37.785, -122.418).unwrap()
}

fn departure() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-03T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[tokio::test]
async fn sends_transit_request_and_returns_first_route() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "travelMode": "TRANSIT",
            "computeAlternativeRoutes": false,
            "departureTime": "2026-01-03T10:00:00Z",
            "origin": {"location": {"latLng": {"latitude": 37.7749, "longitude": -122.4194}}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routes": [
                {
                    "duration": "1700s",
                    "legs": [{"steps": [
                        {"travelMode": "WALK", "staticDuration": "300s"},
                        {"travelMode": "TRANSIT", "staticDuration": "600s"},
                        {"travelMode": "WALK", "staticDuration": "120s"},
                        {"travelMode": "TRANSIT", "staticDuration": "400s"},
                        {"travelMode": "WALK", "staticDuration": "180s"}
                    ]}]
                },
                {"duration": "9999s"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let route = test_client(&server)
        .compute_transit_route(origin(), destination(), departure())
        .await
        .expect("request should succeed")
        .expect("route should be present");

    assert_eq!(route.duration.as_deref(), Some("1700s"));

    let summary = summarize_route(&route).expect("route has transit");
    assert_eq!(summary.access_walk_minutes, 5);
    assert_eq!(summary.transfer_walk_minutes, 2);
    assert_eq!(summary.egress_walk_minutes, 3);
    assert_eq!(summary.in_vehicle_minutes, 17);
    assert_eq!(summary.transfer_count, 1);
    assert_eq!(summary.transit_leg_count, 2);
    assert_eq!(summary.wait_minutes, 2);
}

#[tokio::test]
async fn empty_response_is_no_route() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .compute_transit_route(origin(), destination(), departure())
        .await;

    assert!(matches!(result, Ok(None)), "expected Ok(None), got: {result:?}");
}

#[tokio::test]
async fn forbidden_maps_to_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .compute_transit_route(origin(), destination(), departure())
        .await;

    assert!(
        matches!(result, Err(RoutesError::Unauthorized)),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .compute_transit_route(origin(), destination(), departure())
        .await;

    assert!(matches!(result, Err(RoutesError::RateLimited)));
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .compute_transit_route(origin(), destination(), departure())
        .await;

    match result {
        Err(RoutesError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend down");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ROUTES_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .compute_transit_route(origin(), destination(), departure())
        .await;

    match result {
        Err(RoutesError::Json { body, .. }) => assert_eq!(body.as_deref(), Some("not json")),
        other => panic!("expected Json error, got: {other:?}"),
    }
}
