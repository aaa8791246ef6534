//! Routes API request and response DTOs.
//!
//! These types map directly to the `computeRoutes` JSON shapes. Responses
//! use `Option` liberally because the API omits fields rather than sending
//! null values, and the field mask trims everything we don't ask for.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// Response from `computeRoutes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesResponse {
    /// Candidate routes, best first. Absent when no path exists.
    pub routes: Option<Vec<Route>>,
}

/// One route from origin to destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Total duration as a seconds string, e.g. `"1700s"`.
    pub duration: Option<String>,

    /// Legs between waypoints (one leg for a plain origin/destination query).
    pub legs: Option<Vec<RouteLeg>>,
}

/// A leg of a route.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub steps: Option<Vec<RouteStep>>,
}

/// A single step: a walk segment or one transit ride.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStep {
    /// `"WALK"`, `"TRANSIT"`, ...
    pub travel_mode: Option<String>,

    /// Duration ignoring live traffic.
    pub static_duration: Option<String>,

    /// Duration including live conditions.
    pub duration: Option<String>,
}

impl Route {
    /// All steps across all legs, in travel order.
    pub fn steps(&self) -> impl Iterator<Item = &RouteStep> {
        self.legs
            .iter()
            .flatten()
            .flat_map(|leg| leg.steps.iter().flatten())
    }
}

/// Body of a `computeRoutes` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeRoutesRequest {
    pub origin: Waypoint,
    pub destination: Waypoint,
    pub travel_mode: &'static str,
    pub compute_alternative_routes: bool,
    /// RFC 3339 timestamp.
    pub departure_time: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub location: WaypointLocation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaypointLocation {
    pub lat_lng: LatLng,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinates> for LatLng {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.lat(),
            longitude: c.lng(),
        }
    }
}

impl From<Coordinates> for Waypoint {
    fn from(c: Coordinates) -> Self {
        Self {
            location: WaypointLocation { lat_lng: c.into() },
        }
    }
}
