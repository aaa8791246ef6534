//! Static catalog served when live place data is unavailable.

use crate::domain::{
    CandidatePlace, Coordinates, DomainError, PlaceCategory, PlaceId, PlaceSource, TravelProxies,
};
use crate::pipeline::CandidateSource;

use super::error::PlacesError;

struct Entry {
    id: &'static str,
    name: &'static str,
    category: PlaceCategory,
    lat: f64,
    lng: f64,
    rating: f64,
    walk: u32,
    transit: u32,
    drive: u32,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "p1",
        name: "Orange Line Cafe",
        category: PlaceCategory::Cafe,
        lat: 37.776,
        lng: -122.417,
        rating: 4.5,
        walk: 10,
        transit: 8,
        drive: 6,
    },
    Entry {
        id: "p2",
        name: "Strong Towns Park",
        category: PlaceCategory::Park,
        lat: 37.78,
        lng: -122.412,
        rating: 4.2,
        walk: 14,
        transit: 9,
        drive: 8,
    },
    Entry {
        id: "p3",
        name: "Not Just Bikes Bar",
        category: PlaceCategory::Bar,
        lat: 37.772,
        lng: -122.423,
        rating: 4.7,
        walk: 18,
        transit: 12,
        drive: 10,
    },
    Entry {
        id: "p4",
        name: "Market Street Eats",
        category: PlaceCategory::Restaurant,
        lat: 37.785,
        lng: -122.418,
        rating: 4.3,
        walk: 12,
        transit: 10,
        drive: 7,
    },
];

impl Entry {
    fn to_place(&self) -> Result<CandidatePlace, DomainError> {
        Ok(CandidatePlace {
            id: PlaceId::new(self.id),
            name: self.name.to_string(),
            category: self.category,
            location: Coordinates::new(self.lat, self.lng)?,
            rating: Some(self.rating),
            travel: TravelProxies::new(self.walk, self.transit, self.drive),
            transit_path: None,
            source: PlaceSource::Mock,
        })
    }
}

/// Fixed set of sample places with precomputed travel proxies.
///
/// The proxies are not relative to any origin; they are the same wherever
/// the search is made from.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl MockCatalog {
    pub fn new() -> Self {
        Self
    }

    /// All catalog places of the given category.
    pub fn places(&self, category: PlaceCategory) -> Result<Vec<CandidatePlace>, DomainError> {
        ENTRIES
            .iter()
            .filter(|e| e.category == category)
            .map(Entry::to_place)
            .collect()
    }
}

impl CandidateSource for MockCatalog {
    async fn nearby(
        &self,
        _origin: Coordinates,
        category: PlaceCategory,
    ) -> Result<Vec<CandidatePlace>, PlacesError> {
        self.places(category).map_err(|e| PlacesError::Api {
            status: 0,
            message: format!("static catalog: {e}"),
        })
    }
}
