//! End-to-end ranking pipeline.
//!
//! Fetches candidates (live or static), enriches the top few with transit
//! details, then scores and ranks them. The pipeline is generic over its
//! candidate and directions sources so it can be exercised with mocks.

use std::future::Future;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    CandidatePlace, Coordinates, FilterPreferences, PlaceCategory, PlaceSource, PlaceType,
};
use crate::enrich::{DirectionsSource, EnrichConfig, EpochToken, Generation, Superseded, TransitEnricher};
use crate::places::{MockCatalog, PlacesError};
use crate::scoring::{RankConfig, RankedPlace, rank_places};

/// Catalog notice when the live source failed.
pub const LIVE_UNAVAILABLE_NOTICE: &str = "Live data unavailable, showing mock results.";

/// Catalog notice when live mode was requested without a configured source.
pub const LIVE_UNCONFIGURED_NOTICE: &str = "Places API key missing; showing mock results.";

/// Trait for providing candidate places near an origin.
///
/// This abstraction allows the pipeline to be tested with mock data.
pub trait CandidateSource: Send + Sync {
    fn nearby(
        &self,
        origin: Coordinates,
        category: PlaceCategory,
    ) -> impl Future<Output = Result<Vec<CandidatePlace>, PlacesError>> + Send;
}

/// Configuration for the pipeline stages.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub enrich: EnrichConfig,
    pub rank: RankConfig,
    /// Number of live candidates to enrich per search.
    pub enrichment_budget: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            enrich: EnrichConfig::default(),
            rank: RankConfig::default(),
            enrichment_budget: 5,
        }
    }
}

/// Ranked output of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlaces {
    pub ranked: Vec<RankedPlace>,
    pub enrichment_notice: Option<String>,
}

/// A full search: where from, what kind of place, and how to weigh it.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub origin: Coordinates,
    pub place_type: PlaceType,
    pub preferences: FilterPreferences,
}

/// Result of a full search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Which source the candidates came from.
    pub source: PlaceSource,
    pub ranked: Vec<RankedPlace>,
    pub enrichment_notice: Option<String>,
    /// Set when the static catalog stood in for live data.
    pub catalog_notice: Option<String>,
}

/// Candidate fetching, enrichment and ranking.
pub struct Pipeline<C, D> {
    live: Option<C>,
    catalog: MockCatalog,
    directions: Option<D>,
    config: PipelineConfig,
    generation: Generation,
}

impl<C: CandidateSource, D: DirectionsSource> Pipeline<C, D> {
    /// Create a pipeline. Either source may be absent when not configured.
    pub fn new(live: Option<C>, directions: Option<D>, config: PipelineConfig) -> Self {
        Self {
            live,
            catalog: MockCatalog::new(),
            directions,
            config,
            generation: Generation::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Rank caller-supplied candidates, superseding any earlier call.
    pub async fn rank(
        &self,
        origin: Coordinates,
        candidates: Vec<CandidatePlace>,
        prefs: &FilterPreferences,
        enrichment_budget: usize,
    ) -> Result<RankedPlaces, Superseded> {
        let token = self.generation.advance();
        self.rank_with_token(origin, candidates, prefs, enrichment_budget, &token)
            .await
    }

    /// Rank candidates under an epoch token owned by the caller.
    pub async fn rank_with_token(
        &self,
        origin: Coordinates,
        candidates: Vec<CandidatePlace>,
        prefs: &FilterPreferences,
        enrichment_budget: usize,
        token: &EpochToken,
    ) -> Result<RankedPlaces, Superseded> {
        let enricher = TransitEnricher::new(self.directions.as_ref(), &self.config.enrich);
        let enriched = enricher
            .enrich(origin, candidates, enrichment_budget, Utc::now(), token)
            .await?;

        let ranked = rank_places(enriched.candidates, prefs, &self.config.rank);
        Ok(RankedPlaces {
            ranked,
            enrichment_notice: enriched.coverage.notice(),
        })
    }

    /// Run a full search: fetch candidates, enrich live results, rank.
    ///
    /// Live failures never surface as errors; the static catalog is used
    /// instead and the response carries a notice saying so.
    pub async fn run(
        &self,
        request: &SearchRequest,
        token: &EpochToken,
    ) -> Result<SearchResponse, Superseded> {
        let category = request.place_type.category();

        if !request.preferences.live_mode() {
            return Ok(self.from_catalog(request, None).await);
        }

        let Some(live) = &self.live else {
            debug!("Live mode requested without a places source");
            return Ok(self
                .from_catalog(request, Some(LIVE_UNCONFIGURED_NOTICE))
                .await);
        };

        match live.nearby(request.origin, category).await {
            Ok(candidates) => {
                info!(
                    count = candidates.len(),
                    category = category.as_str(),
                    "Fetched live candidates"
                );
                let ranked = self
                    .rank_with_token(
                        request.origin,
                        candidates,
                        &request.preferences,
                        self.config.enrichment_budget,
                        token,
                    )
                    .await?;
                Ok(SearchResponse {
                    source: PlaceSource::Live,
                    ranked: ranked.ranked,
                    enrichment_notice: ranked.enrichment_notice,
                    catalog_notice: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Live places fetch failed, falling back to static catalog");
                Ok(self
                    .from_catalog(request, Some(LIVE_UNAVAILABLE_NOTICE))
                    .await)
            }
        }
    }

    /// Rank static catalog places. These are never enriched.
    async fn from_catalog(&self, request: &SearchRequest, notice: Option<&str>) -> SearchResponse {
        let candidates = match self
            .catalog
            .nearby(request.origin, request.place_type.category())
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Static catalog unavailable");
                Vec::new()
            }
        };

        SearchResponse {
            source: PlaceSource::Mock,
            ranked: rank_places(candidates, &request.preferences, &self.config.rank),
            enrichment_notice: None,
            catalog_notice: notice.map(str::to_string),
        }
    }
}
