//! Places API `searchNearby` request and response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::Coordinates;

/// Response from `places:searchNearby`. `places` is absent when nothing matched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNearbyResponse {
    pub places: Option<Vec<PlaceDto>>,
}

/// A place as returned under the field mask.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    pub id: Option<String>,
    pub display_name: Option<LocalizedText>,
    pub types: Option<Vec<String>>,
    pub location: Option<LatLng>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub text: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

/// Body of a `searchNearby` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNearbyRequest {
    pub included_types: Vec<&'static str>,
    pub max_result_count: u32,
    pub rank_preference: &'static str,
    pub location_restriction: LocationRestriction,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationRestriction {
    pub circle: Circle,
}

#[derive(Debug, Clone, Serialize)]
pub struct Circle {
    pub center: LatLng,
    pub radius: f64,
}
