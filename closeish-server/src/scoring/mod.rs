//! Closeness scoring and ranking.
//!
//! Each candidate gets a `closish` score in [0, 100] that favours places
//! easy to reach by transit relative to driving, within the user's walking
//! limit. The ranker admits, scores, orders and truncates the list.

mod config;
mod rank;
mod score;

pub use config::RankConfig;
pub use rank::{ADMISSION_SLACK_MINUTES, RankedPlace, rank_places};
pub use score::{ScoreBreakdown, ScoreComponents, score_place};
