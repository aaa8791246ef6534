//! Selective transit enrichment of the top candidates.
//!
//! Picks up to `budget` candidates in priority order, fetches a transit
//! route for each concurrently, summarizes them, and merges the resulting
//! metrics back into the full candidate list. Each fetch stands alone: a
//! failure or timeout for one candidate leaves that candidate on its
//! baseline proxies and has no effect on the others.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::directions::{Route, RoutesError, summarize_route};
use crate::domain::{CandidatePlace, Coordinates, PlaceId, TransitPathMetrics};

use super::epoch::{EpochToken, Superseded};

/// Notice shown when no directions source is configured.
pub const SKIPPED_NOTICE: &str = "Routes API key missing; showing baseline trip estimates.";

/// Trait for providing transit directions.
///
/// This abstraction allows the enricher to be tested with mock data.
pub trait DirectionsSource: Send + Sync {
    /// Fetch the first-choice transit route from `origin` to `destination`.
    ///
    /// Returns `Ok(None)` when no route exists.
    fn transit_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
        departure: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Route>, RoutesError>> + Send;
}

/// Configuration for transit enrichment.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Deadline for each detail fetch (seconds).
    pub detail_timeout_secs: u64,
}

impl EnrichConfig {
    pub fn new(detail_timeout_secs: u64) -> Self {
        Self {
            detail_timeout_secs,
        }
    }

    /// Returns the per-fetch deadline as a Duration.
    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            detail_timeout_secs: 8,
        }
    }
}

/// How much of the enrichment budget was realised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Budget or candidate list was empty.
    NotAttempted,
    /// No directions source configured.
    Skipped,
    /// Every targeted candidate was enriched.
    Complete { enriched: usize, attempted: usize },
    /// Some targeted candidates kept their baseline metrics.
    Partial { enriched: usize, attempted: usize },
}

impl Coverage {
    fn from_counts(enriched: usize, attempted: usize) -> Self {
        if enriched < attempted {
            Coverage::Partial {
                enriched,
                attempted,
            }
        } else {
            Coverage::Complete {
                enriched,
                attempted,
            }
        }
    }

    /// User-facing notice, present when enrichment was skipped or incomplete.
    pub fn notice(&self) -> Option<String> {
        match self {
            Coverage::NotAttempted | Coverage::Complete { .. } => None,
            Coverage::Skipped => Some(SKIPPED_NOTICE.to_string()),
            Coverage::Partial {
                enriched,
                attempted,
            } => Some(format!(
                "Transit detail enrichment available for {enriched}/{attempted} top candidates."
            )),
        }
    }
}

/// Candidates after enrichment, plus what coverage was achieved.
#[derive(Debug, Clone)]
pub struct EnrichmentResult {
    pub candidates: Vec<CandidatePlace>,
    pub coverage: Coverage,
}

/// Outcome of one candidate's detail fetch.
enum FetchOutcome {
    Enriched(TransitPathMetrics),
    NoRoute,
    NoTransit,
    Failed(RoutesError),
    TimedOut,
}

/// Indices of `candidates` in enrichment priority order.
///
/// Highest rating first (unrated counts as 0), then lowest baseline
/// transit time. Remaining ties keep input order.
pub fn priority_order(candidates: &[CandidatePlace]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&candidates[a], &candidates[b]);
        let rating_cmp = b
            .rating
            .unwrap_or(0.0)
            .total_cmp(&a.rating.unwrap_or(0.0));
        if rating_cmp != Ordering::Equal {
            return rating_cmp;
        }
        a.travel.transit_minutes.cmp(&b.travel.transit_minutes)
    });
    order
}

/// Enriches candidates with detailed transit metrics.
pub struct TransitEnricher<'a, D: DirectionsSource> {
    source: Option<&'a D>,
    config: &'a EnrichConfig,
}

impl<'a, D: DirectionsSource> TransitEnricher<'a, D> {
    /// Create a new enricher. `source` is `None` when directions are not configured.
    pub fn new(source: Option<&'a D>, config: &'a EnrichConfig) -> Self {
        Self { source, config }
    }

    /// Enrich up to `budget` top-priority candidates.
    ///
    /// All fetches run concurrently and are awaited together. If `token`
    /// is no longer current once they settle, the batch is discarded.
    pub async fn enrich(
        &self,
        origin: Coordinates,
        candidates: Vec<CandidatePlace>,
        budget: usize,
        departure: DateTime<Utc>,
        token: &EpochToken,
    ) -> Result<EnrichmentResult, Superseded> {
        let attempted = budget.min(candidates.len());
        if attempted == 0 {
            return Ok(EnrichmentResult {
                candidates,
                coverage: Coverage::NotAttempted,
            });
        }

        let Some(source) = self.source else {
            debug!("No directions source configured, skipping enrichment");
            return Ok(EnrichmentResult {
                candidates,
                coverage: Coverage::Skipped,
            });
        };

        let deadline = self.config.detail_timeout();
        let targets: Vec<&CandidatePlace> = priority_order(&candidates)
            .into_iter()
            .take(attempted)
            .map(|idx| &candidates[idx])
            .collect();

        let fetches = targets.into_iter().map(|place| async move {
            let fetch = source.transit_route(origin, place.location, departure);
            let outcome = match timeout(deadline, fetch).await {
                Ok(Ok(Some(route))) => match summarize_route(&route) {
                    Some(summary) => FetchOutcome::Enriched(summary.into()),
                    None => FetchOutcome::NoTransit,
                },
                Ok(Ok(None)) => FetchOutcome::NoRoute,
                Ok(Err(e)) => FetchOutcome::Failed(e),
                Err(_) => FetchOutcome::TimedOut,
            };
            (place.id.clone(), outcome)
        });

        let results = join_all(fetches).await;

        let mut summaries: HashMap<PlaceId, TransitPathMetrics> = HashMap::new();
        for (id, outcome) in results {
            match outcome {
                FetchOutcome::Enriched(metrics) => {
                    summaries.insert(id, metrics);
                }
                FetchOutcome::NoRoute => {
                    debug!(place = %id, "No transit route found, keeping baseline");
                }
                FetchOutcome::NoTransit => {
                    debug!(place = %id, "Route has no transit step, keeping baseline");
                }
                FetchOutcome::Failed(e) => {
                    warn!(place = %id, error = %e, "Transit enrichment failed");
                }
                FetchOutcome::TimedOut => {
                    warn!(
                        place = %id,
                        timeout_secs = deadline.as_secs(),
                        "Transit enrichment timed out"
                    );
                }
            }
        }

        if !token.is_current() {
            debug!(epoch = token.value(), "Discarding superseded enrichment batch");
            return Err(Superseded {
                epoch: token.value(),
            });
        }

        let enriched = summaries.len();
        let candidates = candidates
            .into_iter()
            .map(|place| match summaries.remove(&place.id) {
                Some(metrics) => place.with_transit_path(metrics),
                None => place,
            })
            .collect();

        debug!(enriched, attempted, "Transit enrichment complete");

        Ok(EnrichmentResult {
            candidates,
            coverage: Coverage::from_counts(enriched, attempted),
        })
    }
}
