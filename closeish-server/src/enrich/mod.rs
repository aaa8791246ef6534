//! Transit enrichment of top-ranked candidates.
//!
//! After baseline estimates exist for every candidate, a bounded number of
//! them get a real transit route fetched and summarized. The fetches are
//! independent; a batch that finishes after a newer request has started is
//! discarded via the generation counter.

mod epoch;
mod orchestrator;

pub use epoch::{EpochToken, Generation, Superseded};
pub use orchestrator::{
    Coverage, DirectionsSource, EnrichConfig, EnrichmentResult, SKIPPED_NOTICE, TransitEnricher,
    priority_order,
};
