//! Ranking configuration.

/// Configuration parameters for ranking.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Maximum number of places to return.
    pub top_k: usize,
}

impl RankConfig {
    pub fn new(top_k: usize) -> Self {
        Self { top_k }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}
