//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{
    CandidatePlace, Coordinates, DomainError, FilterPreferences, PlaceType, TimeWindow,
    WalkVsTransit, WhenOption,
};
use crate::pipeline::SearchRequest;

/// Query string for `GET /api/places`.
///
/// Omitted preferences take their defaults.
#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub place_type: PlaceType,
    pub live_mode: Option<bool>,
    pub when: Option<WhenOption>,
    pub time_window: Option<TimeWindow>,
    pub walk_vs_transit: Option<WalkVsTransit>,
    pub max_walk_minutes: Option<u32>,
    /// Client session id; a newer request from the same session supersedes this one
    pub session: Option<String>,
}

impl PlacesQuery {
    /// Validate into a pipeline request.
    pub fn to_request(&self) -> Result<SearchRequest, DomainError> {
        let defaults = FilterPreferences::default();
        let preferences = FilterPreferences::new(
            self.max_walk_minutes
                .unwrap_or(defaults.max_walk_minutes()),
            self.walk_vs_transit.unwrap_or(defaults.walk_vs_transit()),
            self.live_mode.unwrap_or(defaults.live_mode()),
            self.when.unwrap_or(defaults.when()),
            self.time_window.unwrap_or(defaults.time_window()),
        )?;

        Ok(SearchRequest {
            origin: Coordinates::new(self.lat, self.lng)?,
            place_type: self.place_type,
            preferences,
        })
    }
}

/// Body of `POST /api/rank`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    pub origin: Coordinates,
    pub candidates: Vec<CandidatePlace>,
    pub preferences: FilterPreferences,
    /// Lowers the configured enrichment budget; larger values are capped
    #[serde(default, alias = "enrichment_budget")]
    pub enrichment_budget: Option<usize>,
    #[serde(default)]
    pub session: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
