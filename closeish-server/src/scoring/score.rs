//! Closeness scoring.
//!
//! A candidate is scored either from its baseline travel proxies or, when
//! detailed transit metrics are attached, from the transit path. The two
//! formulas never mix for a single candidate.

use serde::Serialize;

use crate::domain::{CandidatePlace, FilterPreferences, TransitPathMetrics, TravelProxies};

/// Rating assumed for unrated places.
const DEFAULT_RATING: f64 = 4.0;

/// Base score of the detailed formula before transit ease is applied.
const DETAILED_BASE: f64 = 35.0;

/// Transit time beyond which the detailed formula starts penalising.
const TRANSIT_TIME_FREE_MINUTES: f64 = 40.0;

/// Score of one candidate plus the intermediate terms that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Final score in [0, 100]; higher is closer.
    pub closish_score: f64,
    pub components: ScoreComponents,
}

/// Terms of the formula that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ScoreComponents {
    Baseline {
        transit_bias: f64,
        walk_penalty: f64,
        desirability: f64,
    },
    Detailed {
        transit_bias: f64,
        walk_penalty: f64,
        desirability: f64,
        transfer_penalty: f64,
        wait_penalty: f64,
        transit_time_penalty: f64,
        one_seat_bonus: f64,
        transit_ease: f64,
    },
}

/// Score a candidate for the given preferences.
pub fn score_place(place: &CandidatePlace, prefs: &FilterPreferences) -> ScoreBreakdown {
    let desirability = desirability(place.rating);
    match &place.transit_path {
        None => score_baseline(&place.travel, prefs, desirability),
        Some(path) => score_detailed(path, &place.travel, prefs, desirability),
    }
}

/// Rating bonus: 10 points per star above 3.5, capped at 20.
fn desirability(rating: Option<f64>) -> f64 {
    ((rating.unwrap_or(DEFAULT_RATING) - 3.5) * 10.0).clamp(0.0, 20.0)
}

fn score_baseline(
    travel: &TravelProxies,
    prefs: &FilterPreferences,
    desirability: f64,
) -> ScoreBreakdown {
    let drive = f64::from(travel.drive_minutes);
    let transit = f64::from(travel.transit_minutes);
    let walk = f64::from(travel.walk_minutes);
    let max_walk = f64::from(prefs.max_walk_minutes());

    let transit_bias = ((drive - transit) * 4.0).clamp(0.0, 40.0);
    let walk_penalty = ((walk - max_walk) * 2.0).clamp(-20.0, 0.0);
    let closish =
        (transit_bias * prefs.combined_tilt() + walk_penalty + desirability).clamp(0.0, 100.0);

    ScoreBreakdown {
        closish_score: closish,
        components: ScoreComponents::Baseline {
            transit_bias,
            walk_penalty,
            desirability,
        },
    }
}

fn score_detailed(
    path: &TransitPathMetrics,
    travel: &TravelProxies,
    prefs: &FilterPreferences,
    desirability: f64,
) -> ScoreBreakdown {
    let drive = f64::from(travel.drive_minutes);
    let total_transit = f64::from(path.total_minutes.unwrap_or(travel.transit_minutes));
    let total_walk = f64::from(path.total_walk_minutes());
    let transfers = path.transfer_count().unwrap_or(0);
    let wait = f64::from(path.wait_minutes.unwrap_or(0));
    let max_walk = f64::from(prefs.max_walk_minutes());

    let walk_penalty = ((total_walk - max_walk) * 2.2).clamp(-20.0, 0.0);
    let transfer_penalty = (f64::from(transfers) * 8.0).clamp(0.0, 30.0);
    let wait_penalty = (wait * 0.7).clamp(0.0, 20.0);
    let transit_time_penalty =
        ((total_transit - TRANSIT_TIME_FREE_MINUTES) * 0.25).clamp(0.0, 10.0);
    let one_seat_bonus = match transfers {
        0 => 8.0,
        1 => 2.0,
        _ => 0.0,
    };
    let transit_bias = ((drive - total_transit) * 2.5).clamp(-10.0, 25.0);

    let transit_ease = (transit_bias + one_seat_bonus
        - transfer_penalty
        - wait_penalty
        - transit_time_penalty)
        * prefs.combined_tilt();

    let closish = (DETAILED_BASE + transit_ease + walk_penalty + desirability).clamp(0.0, 100.0);

    ScoreBreakdown {
        closish_score: closish,
        components: ScoreComponents::Detailed {
            transit_bias,
            walk_penalty,
            desirability,
            transfer_penalty,
            wait_penalty,
            transit_time_penalty,
            one_seat_bonus,
            transit_ease,
        },
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{
        Coordinates, PathSource, PlaceCategory, PlaceId, PlaceSource, TimeWindow, WalkVsTransit,
        WhenOption,
    };
    use proptest::prelude::*;

    fn arb_prefs() -> impl Strategy<Value = FilterPreferences> {
        (
            1u32..120,
            prop_oneof![
                Just(WalkVsTransit::FavorTransit),
                Just(WalkVsTransit::Balanced),
                Just(WalkVsTransit::PreferWalk)
            ],
            any::<bool>(),
            prop_oneof![Just(WhenOption::Now), Just(WhenOption::Later)],
            prop_oneof![
                Just(TimeWindow::Next30),
                Just(TimeWindow::Next60),
                Just(TimeWindow::Next120)
            ],
        )
            .prop_map(|(max_walk, wvt, live, when, window)| {
                FilterPreferences::new(max_walk, wvt, live, when, window).unwrap()
            })
    }

    fn arb_path() -> impl Strategy<Value = TransitPathMetrics> {
        let field = || proptest::option::of(0u32..600);
        (
            field(),
            field(),
            field(),
            field(),
            field(),
            field(),
            proptest::option::of(0u32..10),
            proptest::option::of(0u32..10),
        )
            .prop_map(
                |(total, ride, wait, access, transfer, egress, transfers, legs)| {
                    TransitPathMetrics {
                        source: PathSource::RoutesDerived,
                        total_minutes: total,
                        in_vehicle_minutes: ride,
                        wait_minutes: wait,
                        access_walk_minutes: access,
                        transfer_walk_minutes: transfer,
                        egress_walk_minutes: egress,
                        explicit_transfer_count: transfers,
                        transit_leg_count: legs,
                    }
                },
            )
    }

    fn arb_place() -> impl Strategy<Value = CandidatePlace> {
        (
            0u32..600,
            0u32..600,
            0u32..600,
            proptest::option::of(0.0f64..=5.0),
            proptest::option::of(arb_path()),
        )
            .prop_map(|(walk, transit, drive, rating, path)| CandidatePlace {
                id: PlaceId::new("p"),
                name: "Arb".to_string(),
                category: PlaceCategory::Restaurant,
                location: Coordinates::new(0.0, 0.0).unwrap(),
                rating,
                travel: TravelProxies::new(walk, transit, drive),
                transit_path: path,
                source: PlaceSource::Live,
            })
    }

    proptest! {
        #[test]
        fn score_within_bounds(place in arb_place(), prefs in arb_prefs()) {
            let score = score_place(&place, &prefs).closish_score;
            prop_assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }

        #[test]
        fn branch_follows_transit_path(place in arb_place(), prefs in arb_prefs()) {
            let detailed = matches!(
                score_place(&place, &prefs).components,
                ScoreComponents::Detailed { .. }
            );
            prop_assert_eq!(detailed, place.transit_path.is_some());
        }
    }
}
