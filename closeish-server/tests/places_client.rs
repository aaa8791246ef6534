//! Integration tests for `PlacesClient::search_nearby`.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use closeish_server::domain::{Coordinates, PlaceCategory, PlaceSource};
use closeish_server::places::{PlacesClient, PlacesConfig, PlacesError};

const NEARBY_PATH: &str = "/v1/places:searchNearby";

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::new(
        PlacesConfig::new("places-key")
            .with_base_url(server.uri())
            .with_radius(800.0)
            .with_max_results(5),
    )
    .expect("failed to build test PlacesClient")
}

fn origin() -> Coordinates {
    Coordinates::new(37.7749, -122.4194).unwrap()
}

#[tokio::test]
async fn maps_results_into_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(NEARBY_PATH))
        .and(header("x-goog-api-key", "places-key"))
        .and(headers(
            "x-goog-fieldmask",
            "places.id,places.displayName,places.types,places.location,places.rating"
                .split(',')
                .collect(),
        ))
        .and(body_partial_json(json!({
            "includedTypes": ["cafe"],
            "maxResultCount": 5,
            "rankPreference": "POPULARITY",
            "locationRestriction": {"circle": {"radius": 800.0}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [
                {
                    "id": "ChIJcafe",
                    "displayName": {"text": "Sightglass"},
                    "types": ["cafe", "food"],
                    "location": {"latitude": 37.7849, "longitude": -122.4194},
                    "rating": 4.6
                },
                {
                    "displayName": {"text": "No location"},
                    "types": ["cafe"]
                },
                {
                    "types": ["food"],
                    "location": {"latitude": 37.7749, "longitude": -122.4194}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let places = test_client(&server)
        .search_nearby(origin(), PlaceCategory::Cafe)
        .await
        .expect("request should succeed");

    assert_eq!(places.len(), 2);

    assert_eq!(places[0].id.as_str(), "ChIJcafe");
    assert_eq!(places[0].name, "Sightglass");
    assert_eq!(places[0].category, PlaceCategory::Cafe);
    assert_eq!(places[0].rating, Some(4.6));
    assert_eq!(places[0].travel.walk_minutes, 14);
    assert_eq!(places[0].source, PlaceSource::Live);

    assert_eq!(places[1].id.as_str(), "37.7749,-122.4194");
    assert_eq!(places[1].name, "Unknown place");
    assert_eq!(places[1].category, PlaceCategory::Restaurant);
    assert_eq!(places[1].travel.walk_minutes, 0);
}

#[tokio::test]
async fn no_matches_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let places = test_client(&server)
        .search_nearby(origin(), PlaceCategory::Park)
        .await
        .unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn unauthorized_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_nearby(origin(), PlaceCategory::Bar)
        .await;
    assert!(
        matches!(result, Err(PlacesError::Unauthorized)),
        "expected Unauthorized, got: {result:?}"
    );
}

#[tokio::test]
async fn bad_request_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid radius"))
        .mount(&server)
        .await;

    let result = test_client(&server)
        .search_nearby(origin(), PlaceCategory::Bar)
        .await;
    assert!(matches!(
        result,
        Err(PlacesError::Api { status: 400, ref message }) if message == "invalid radius"
    ));
}
