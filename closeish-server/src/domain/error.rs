//! Domain error types.
//!
//! These errors represent validation failures in caller-supplied data.
//! They are distinct from API/IO errors, which never reach the caller.

use super::PlaceId;

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinates are non-finite or out of range
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(&'static str),

    /// Maximum walk must be a positive number of minutes
    #[error("max walk minutes must be positive")]
    InvalidMaxWalk,

    /// Rating outside the 0-5 scale
    #[error("rating {rating} for place {id} is outside 0-5")]
    InvalidRating { id: PlaceId, rating: f64 },

    /// Two candidates share an identifier
    #[error("duplicate place id: {0}")]
    DuplicatePlaceId(PlaceId),
}
