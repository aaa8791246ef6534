//! Geographic coordinate type.

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface in decimal degrees.
///
/// Values built through [`Coordinates::new`] are always finite and within
/// range. Deserialization goes through the same check.
///
/// # Examples
///
/// ```
/// use closeish_server::domain::Coordinates;
///
/// let mission = Coordinates::new(37.7599, -122.4148).unwrap();
/// assert_eq!(mission.lat(), 37.7599);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = DomainError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.lat, raw.lng)
    }
}

impl Coordinates {
    /// Create coordinates, validating the ranges.
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(DomainError::InvalidCoordinates("must be finite"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinates(
                "latitude must be within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::InvalidCoordinates(
                "longitude must be within [-180, 180]",
            ));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle distance to `other` in meters (haversine formula).
    pub fn distance_meters(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let sin_lat = (d_lat / 2.0).sin();
        let sin_lng = (d_lng / 2.0).sin();
        let h = sin_lat * sin_lat + lat1.cos() * lat2.cos() * sin_lng * sin_lng;

        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }
}
