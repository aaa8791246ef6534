//! Conversion from Places DTOs to candidate places.

use tracing::debug;

use crate::domain::{
    CandidatePlace, Coordinates, PlaceCategory, PlaceId, PlaceSource, TravelProxies,
};

use super::types::PlaceDto;

/// Convert one nearby-search result into a candidate.
///
/// Returns `None` when the result has no usable location. A missing id
/// falls back to the `"lat,lng"` pair, a missing name to `"Unknown place"`,
/// and an unrecognised type list to restaurant.
pub fn to_candidate(dto: &PlaceDto, origin: Coordinates) -> Option<CandidatePlace> {
    let loc = dto.location?;
    let location = match Coordinates::new(loc.latitude, loc.longitude) {
        Ok(location) => location,
        Err(e) => {
            debug!(id = ?dto.id, error = %e, "Skipping place with invalid location");
            return None;
        }
    };

    let id = dto
        .id
        .clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| format!("{},{}", location.lat(), location.lng()));

    let name = dto
        .display_name
        .as_ref()
        .and_then(|n| n.text.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown place".to_string());

    let category = dto
        .types
        .as_deref()
        .and_then(PlaceCategory::from_types)
        .unwrap_or(PlaceCategory::Restaurant);

    Some(CandidatePlace {
        id: PlaceId::new(id),
        name,
        category,
        location,
        rating: dto.rating,
        travel: TravelProxies::estimate(origin.distance_meters(&location)),
        transit_path: None,
        source: PlaceSource::Live,
    })
}
