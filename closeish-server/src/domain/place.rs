//! Candidate places and their baseline travel estimates.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::geo::Coordinates;
use super::transit::TransitPathMetrics;

/// Identifier of a candidate, unique within one result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Cafe,
    Bar,
    Park,
}

impl PlaceCategory {
    /// The place type string used by the nearby search API.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::Bar => "bar",
            PlaceCategory::Park => "park",
        }
    }

    /// Pick the first recognised category out of a list of API place types.
    pub fn from_types<S: AsRef<str>>(types: &[S]) -> Option<Self> {
        types.iter().find_map(|t| match t.as_ref() {
            "restaurant" => Some(PlaceCategory::Restaurant),
            "cafe" => Some(PlaceCategory::Cafe),
            "bar" => Some(PlaceCategory::Bar),
            "park" => Some(PlaceCategory::Park),
            _ => None,
        })
    }
}

/// Which candidate source produced a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceSource {
    Mock,
    Live,
}

/// Coarse travel estimates available for every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelProxies {
    pub walk_minutes: u32,
    pub transit_minutes: u32,
    pub drive_minutes: u32,
}

impl TravelProxies {
    pub fn new(walk_minutes: u32, transit_minutes: u32, drive_minutes: u32) -> Self {
        Self {
            walk_minutes,
            transit_minutes,
            drive_minutes,
        }
    }

    /// Estimate proxies from straight-line distance.
    ///
    /// Walking at ~80 m/min (~5 km/h); transit and driving are fixed
    /// fractions of the walk with small floors.
    pub fn estimate(distance_meters: f64) -> Self {
        let walk = (distance_meters.max(0.0) / 80.0).round();
        let transit = (walk * 0.7).round().max(4.0);
        let drive = (walk * 0.4).round().max(3.0);
        Self::new(walk as u32, transit as u32, drive as u32)
    }
}

/// A point of interest under consideration for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePlace {
    pub id: PlaceId,
    pub name: String,
    pub category: PlaceCategory,
    pub location: Coordinates,
    #[serde(default)]
    pub rating: Option<f64>,
    pub travel: TravelProxies,
    #[serde(default)]
    pub transit_path: Option<TransitPathMetrics>,
    pub source: PlaceSource,
}

impl CandidatePlace {
    /// Attach detailed transit metrics, consuming the baseline value.
    ///
    /// The baseline transit proxy is replaced by the path total when known.
    pub fn with_transit_path(mut self, path: TransitPathMetrics) -> Self {
        if let Some(total) = path.total_minutes {
            self.travel.transit_minutes = total;
        }
        self.transit_path = Some(path);
        self
    }

    /// Whether detailed metrics are attached.
    pub fn is_enriched(&self) -> bool {
        self.transit_path.is_some()
    }
}

/// Check a caller-supplied candidate list: unique ids, ratings in 0-5.
pub fn validate_candidates(places: &[CandidatePlace]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(places.len());
    for place in places {
        if let Some(rating) = place.rating
            && !(0.0..=5.0).contains(&rating)
        {
            return Err(DomainError::InvalidRating {
                id: place.id.clone(),
                rating,
            });
        }
        if !seen.insert(&place.id) {
            return Err(DomainError::DuplicatePlaceId(place.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PathSource;

    fn place(id: &str, rating: Option<f64>) -> CandidatePlace {
        CandidatePlace {
            id: PlaceId::new(id),
            name: format!("Place {id}"),
            category: PlaceCategory::Cafe,
            location: Coordinates::new(37.776, -122.417).unwrap(),
            rating,
            travel: TravelProxies::new(10, 8, 6),
            transit_path: None,
            source: PlaceSource::Mock,
        }
    }

    #[test]
    fn category_from_types_picks_first_known() {
        let types = ["point_of_interest", "bar", "restaurant"];
        assert_eq!(PlaceCategory::from_types(&types), Some(PlaceCategory::Bar));

        let unknown = ["food", "establishment"];
        assert_eq!(PlaceCategory::from_types(&unknown), None);
    }

    #[test]
    fn estimate_travel_from_distance() {
        // 1600 m -> 20 min walk, 14 transit, 8 drive
        assert_eq!(TravelProxies::estimate(1600.0), TravelProxies::new(20, 14, 8));

        // Short hops hit the floors
        assert_eq!(TravelProxies::estimate(100.0), TravelProxies::new(1, 4, 3));
        assert_eq!(TravelProxies::estimate(0.0), TravelProxies::new(0, 4, 3));
    }

    #[test]
    fn with_transit_path_replaces_transit_proxy() {
        let mut path = TransitPathMetrics::empty(PathSource::RoutesDerived);
        path.total_minutes = Some(17);

        let enriched = place("p1", Some(4.5)).with_transit_path(path.clone());
        assert!(enriched.is_enriched());
        assert_eq!(enriched.travel.transit_minutes, 17);
        assert_eq!(enriched.travel.walk_minutes, 10);
        assert_eq!(enriched.transit_path, Some(path));
    }

    #[test]
    fn with_transit_path_keeps_proxy_without_total() {
        let path = TransitPathMetrics::empty(PathSource::GraphDerived);
        let enriched = place("p1", None).with_transit_path(path);
        assert_eq!(enriched.travel.transit_minutes, 8);
    }

    #[test]
    fn validate_rejects_duplicates() {
        let places = vec![place("a", None), place("b", None), place("a", None)];
        assert_eq!(
            validate_candidates(&places),
            Err(DomainError::DuplicatePlaceId(PlaceId::new("a")))
        );
    }

    #[test]
    fn validate_rejects_bad_rating() {
        let places = vec![place("a", Some(5.5))];
        assert!(matches!(
            validate_candidates(&places),
            Err(DomainError::InvalidRating { .. })
        ));
        assert!(validate_candidates(&[place("a", Some(0.0)), place("b", Some(5.0))]).is_ok());
    }

    #[test]
    fn deserializes_without_transit_path() {
        let json = r#"{
            "id": "p9",
            "name": "Corner Bar",
            "category": "bar",
            "location": {"lat": 37.77, "lng": -122.42},
            "travel": {"walkMinutes": 5, "transitMinutes": 4, "driveMinutes": 3},
            "source": "live"
        }"#;
        let parsed: CandidatePlace = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id.as_str(), "p9");
        assert_eq!(parsed.rating, None);
        assert!(!parsed.is_enriched());
    }
}
