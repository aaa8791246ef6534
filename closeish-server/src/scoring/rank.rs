//! Place ranking for search results.

use serde::Serialize;

use crate::domain::{CandidatePlace, FilterPreferences};

use super::config::RankConfig;
use super::score::{ScoreBreakdown, score_place};

/// How far past the walking limit a place may be and still be considered.
pub const ADMISSION_SLACK_MINUTES: u32 = 10;

/// A candidate paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlace {
    pub place: CandidatePlace,
    pub score: ScoreBreakdown,
}

/// Rank candidates by closeness.
///
/// 1. Drop places whose baseline walk exceeds the limit by more than
///    [`ADMISSION_SLACK_MINUTES`]
/// 2. Score each remaining place
/// 3. Sort by score, highest first; equal scores keep input order
/// 4. Keep the first `top_k`
pub fn rank_places(
    candidates: Vec<CandidatePlace>,
    prefs: &FilterPreferences,
    config: &RankConfig,
) -> Vec<RankedPlace> {
    let walk_cap = prefs
        .max_walk_minutes()
        .saturating_add(ADMISSION_SLACK_MINUTES);

    let mut ranked: Vec<RankedPlace> = candidates
        .into_iter()
        .filter(|place| place.travel.walk_minutes <= walk_cap)
        .map(|place| {
            let score = score_place(&place, prefs);
            RankedPlace { place, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.closish_score.total_cmp(&a.score.closish_score));
    ranked.truncate(config.top_k);
    ranked
}
