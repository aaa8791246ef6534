//! Per-session epoch counters.
//!
//! Each client session owns a generation counter. Starting a request from a
//! session advances its counter, so an older request still in flight for
//! the same session is discarded when it tries to merge.
//!
//! Supersession only holds while the session's counter stays cached. Once
//! it is evicted (idle past the TTL, or pushed out at capacity) the next
//! request starts a fresh counter, and a request still in flight from
//! before the eviction is no longer superseded by it.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::enrich::{EpochToken, Generation};

/// Default retention for an idle session's counter.
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Default maximum number of tracked sessions.
const DEFAULT_CAPACITY: u64 = 10_000;

/// Session id to generation counter, expiring idle sessions.
pub struct SessionEpochs {
    generations: MokaCache<String, Generation>,
}

impl SessionEpochs {
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let generations = MokaCache::builder()
            .time_to_idle(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { generations }
    }

    /// Start a request, superseding earlier requests from the same session.
    ///
    /// Requests without a session id get a token nothing else can supersede.
    /// Tokens issued before the session was evicted stay current.
    pub async fn begin(&self, session: Option<&str>) -> EpochToken {
        match session.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => self
                .generations
                .get_with(id.to_string(), async { Generation::new() })
                .await
                .advance(),
            None => EpochToken::detached(),
        }
    }
}

impl Default for SessionEpochs {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_CAPACITY)
    }
}
