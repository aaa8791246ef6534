//! Places API HTTP client.

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, trace};

use crate::domain::{CandidatePlace, Coordinates, PlaceCategory};
use crate::pipeline::CandidateSource;

use super::convert::to_candidate;
use super::error::PlacesError;
use super::types::{Circle, LocationRestriction, SearchNearbyRequest, SearchNearbyResponse};

/// Default base URL for the Places API.
const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

const FIELD_MASK: &str =
    "places.id,places.displayName,places.types,places.location,places.rating";

/// The API refuses more than this many results per request.
const MAX_RESULT_COUNT: u32 = 20;

/// Configuration for the Places client.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Search circle radius in meters
    pub radius_meters: f64,
    /// Maximum number of results requested
    pub max_results: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PlacesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            radius_meters: 1500.0,
            max_results: MAX_RESULT_COUNT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_radius(mut self, meters: f64) -> Self {
        self.radius_meters = meters;
        self
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n;
        self
    }
}

/// Client for the Places nearby search.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    radius_meters: f64,
    max_results: u32,
}

impl PlacesClient {
    /// Create a new Places client.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| PlacesError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert("x-goog-api-key", api_key);
        headers.insert("x-goog-fieldmask", HeaderValue::from_static(FIELD_MASK));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            radius_meters: config.radius_meters,
            max_results: config.max_results.clamp(1, MAX_RESULT_COUNT),
        })
    }

    /// Search for places of `category` around `origin`, most popular first.
    pub async fn search_nearby(
        &self,
        origin: Coordinates,
        category: PlaceCategory,
    ) -> Result<Vec<CandidatePlace>, PlacesError> {
        let url = format!("{}/v1/places:searchNearby", self.base_url);
        let body = SearchNearbyRequest {
            included_types: vec![category.as_str()],
            max_result_count: self.max_results,
            rank_preference: "POPULARITY",
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: origin.into(),
                    radius: self.radius_meters,
                },
            },
        };

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(PlacesError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PlacesError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: SearchNearbyResponse =
            serde_json::from_str(&body).map_err(|e| PlacesError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let dtos = parsed.places.unwrap_or_default();
        let places: Vec<_> = dtos
            .iter()
            .filter_map(|dto| to_candidate(dto, origin))
            .collect();

        if places.len() < dtos.len() {
            debug!(
                skipped = dtos.len() - places.len(),
                "Dropped nearby results without a location"
            );
        }
        trace!(count = places.len(), category = category.as_str(), "Places API response");

        Ok(places)
    }
}

impl CandidateSource for PlacesClient {
    async fn nearby(
        &self,
        origin: Coordinates,
        category: PlaceCategory,
    ) -> Result<Vec<CandidatePlace>, PlacesError> {
        self.search_nearby(origin, category).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PlacesConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.radius_meters, 1500.0);
        assert_eq!(config.max_results, 20);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_builder() {
        let config = PlacesConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_radius(800.0)
            .with_max_results(5);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.radius_meters, 800.0);
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn max_results_capped() {
        let client = PlacesClient::new(PlacesConfig::new("k").with_max_results(50)).unwrap();
        assert_eq!(client.max_results, 20);

        let client = PlacesClient::new(PlacesConfig::new("k").with_max_results(0)).unwrap();
        assert_eq!(client.max_results, 1);
    }
}
