//! Detailed transit path metrics attached to enriched candidates.

use serde::{Deserialize, Serialize};

/// Where a set of transit metrics came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSource {
    /// Summarized from a directions API response.
    RoutesDerived,
    /// Computed by a local transit graph router.
    GraphDerived,
}

/// Normalized trip metrics for one origin-to-place transit route.
///
/// Every field is optional: a partially populated summary is still valid.
/// All durations are whole minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitPathMetrics {
    pub source: PathSource,
    pub total_minutes: Option<u32>,
    pub in_vehicle_minutes: Option<u32>,
    pub wait_minutes: Option<u32>,
    pub access_walk_minutes: Option<u32>,
    pub transfer_walk_minutes: Option<u32>,
    pub egress_walk_minutes: Option<u32>,
    #[serde(rename = "transferCount")]
    pub explicit_transfer_count: Option<u32>,
    pub transit_leg_count: Option<u32>,
}

impl TransitPathMetrics {
    /// Empty metrics from the given source.
    pub fn empty(source: PathSource) -> Self {
        Self {
            source,
            total_minutes: None,
            in_vehicle_minutes: None,
            wait_minutes: None,
            access_walk_minutes: None,
            transfer_walk_minutes: None,
            egress_walk_minutes: None,
            explicit_transfer_count: None,
            transit_leg_count: None,
        }
    }

    /// Number of transfers.
    ///
    /// Uses the explicit value when supplied, otherwise derives
    /// `max(legs - 1, 0)` from the leg count.
    pub fn transfer_count(&self) -> Option<u32> {
        self.explicit_transfer_count
            .or_else(|| self.transit_leg_count.map(|legs| legs.saturating_sub(1)))
    }

    /// Sum of access, transfer and egress walking (missing parts count as zero).
    pub fn total_walk_minutes(&self) -> u32 {
        self.access_walk_minutes.unwrap_or(0)
            + self.transfer_walk_minutes.unwrap_or(0)
            + self.egress_walk_minutes.unwrap_or(0)
    }
}
