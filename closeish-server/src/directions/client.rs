//! Routes API HTTP client.
//!
//! Provides async transit directions between two points. Handles
//! authentication, a concurrency cap, and status code mapping.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::Coordinates;
use crate::enrich::DirectionsSource;

use super::error::RoutesError;
use super::types::{ComputeRoutesRequest, ComputeRoutesResponse, Route};

/// Default base URL for the Routes API.
const DEFAULT_BASE_URL: &str = "https://routes.googleapis.com";

/// Only the fields the summarizer reads.
const FIELD_MASK: &str = "routes.duration,routes.legs.steps.travelMode,routes.legs.steps.staticDuration,routes.legs.steps.duration";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the Routes client.
#[derive(Debug, Clone)]
pub struct RoutesConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutesConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Routes API client.
#[derive(Debug, Clone)]
pub struct RoutesClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl RoutesClient {
    /// Create a new Routes client with the given configuration.
    pub fn new(config: RoutesConfig) -> Result<Self, RoutesError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| RoutesError::Api {
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
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Get the first-choice transit route between two points.
    ///
    /// Returns `Ok(None)` when the API finds no route; that is not an error.
    pub async fn compute_transit_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        departure: DateTime<Utc>,
    ) -> Result<Option<Route>, RoutesError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RoutesError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/directions/v2:computeRoutes", self.base_url);
        let body = ComputeRoutesRequest {
            origin: origin.into(),
            destination: destination.into(),
            travel_mode: "TRANSIT",
            compute_alternative_routes: false,
            departure_time: departure.to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(RoutesError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutesError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutesError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: ComputeRoutesResponse =
            serde_json::from_str(&body).map_err(|e| RoutesError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        let route = parsed.routes.and_then(|routes| routes.into_iter().next());
        trace!(found = route.is_some(), "Routes API response");
        Ok(route)
    }
}

impl DirectionsSource for RoutesClient {
    async fn transit_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        departure: DateTime<Utc>,
    ) -> Result<Option<Route>, RoutesError> {
        self.compute_transit_route(origin, destination, departure)
            .await
    }
}
