//! Domain types for the closeness ranker.
//!
//! This module contains the value types that flow between the pipeline
//! stages. Types with invariants enforce them at construction time, so
//! code that receives these types can trust their validity.

mod error;
mod geo;
mod place;
mod preferences;
mod transit;

pub use error::DomainError;
pub use geo::Coordinates;
pub use place::{
    CandidatePlace, PlaceCategory, PlaceId, PlaceSource, TravelProxies, validate_candidates,
};
pub use preferences::{FilterPreferences, PlaceType, TimeWindow, WalkVsTransit, WhenOption};
pub use transit::{PathSource, TransitPathMetrics};
