//! Candidate place sources: the live nearby-search client and a static catalog.
//!
//! The live client finds points of interest around an origin and derives
//! baseline travel proxies from straight-line distance. The static catalog
//! stands in when the live source is unavailable or not configured.

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{PlacesClient, PlacesConfig};
pub use convert::to_candidate;
pub use error::PlacesError;
pub use mock::MockCatalog;
pub use types::{LatLng, LocalizedText, PlaceDto, SearchNearbyResponse};
