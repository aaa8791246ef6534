//! Summarize a multi-step transit route into trip metrics.
//!
//! A route is a flat list of steps once legs are concatenated. Walking is
//! split around the transit rides: before the first ride is access walk,
//! after the last is egress walk, anything in between is transfer walk.
//! Whatever part of the route total is not riding or walking is waiting.

use crate::domain::{PathSource, TransitPathMetrics};

use super::types::{Route, RouteStep};

/// Travel mode of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Walk,
    Transit,
    Other,
}

impl StepMode {
    /// Parse an API travel mode tag, case-insensitively.
    pub fn parse(tag: Option<&str>) -> Self {
        match tag {
            Some(t) if t.eq_ignore_ascii_case("WALK") => StepMode::Walk,
            Some(t) if t.eq_ignore_ascii_case("TRANSIT") => StepMode::Transit,
            _ => StepMode::Other,
        }
    }
}

/// A step reduced to its mode and duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedStep {
    pub mode: StepMode,
    pub seconds: f64,
}

impl NormalizedStep {
    pub fn new(mode: StepMode, seconds: f64) -> Self {
        Self { mode, seconds }
    }

    fn from_dto(step: &RouteStep) -> Self {
        let duration = step.static_duration.as_deref().or(step.duration.as_deref());
        Self {
            mode: StepMode::parse(step.travel_mode.as_deref()),
            seconds: parse_duration_seconds(duration).unwrap_or(0.0),
        }
    }
}

/// Fully populated trip metrics for one route, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitRouteSummary {
    pub total_minutes: u32,
    pub in_vehicle_minutes: u32,
    pub wait_minutes: u32,
    pub access_walk_minutes: u32,
    pub transfer_walk_minutes: u32,
    pub egress_walk_minutes: u32,
    pub transfer_count: u32,
    pub transit_leg_count: u32,
}

impl From<TransitRouteSummary> for TransitPathMetrics {
    fn from(s: TransitRouteSummary) -> Self {
        Self {
            source: PathSource::RoutesDerived,
            total_minutes: Some(s.total_minutes),
            in_vehicle_minutes: Some(s.in_vehicle_minutes),
            wait_minutes: Some(s.wait_minutes),
            access_walk_minutes: Some(s.access_walk_minutes),
            transfer_walk_minutes: Some(s.transfer_walk_minutes),
            egress_walk_minutes: Some(s.egress_walk_minutes),
            explicit_transfer_count: Some(s.transfer_count),
            transit_leg_count: Some(s.transit_leg_count),
        }
    }
}

/// Parse a duration string like `"1700s"` or `"12.5"` into seconds.
///
/// Returns `None` for missing, empty, or non-numeric input.
pub fn parse_duration_seconds(value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    let number = value.strip_suffix('s').unwrap_or(value);
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|s| s.is_finite())
}

/// Convert seconds to whole minutes.
///
/// Zero stays zero; any positive duration is at least one minute, so a
/// short walk never disappears from the summary.
pub fn to_minutes(seconds: f64) -> u32 {
    if seconds <= 0.0 {
        return 0;
    }
    (seconds / 60.0).round().max(1.0) as u32
}

/// Summarize the first-choice route from a directions response.
///
/// Returns `None` when the route has no transit ride or no positive duration.
pub fn summarize_route(route: &Route) -> Option<TransitRouteSummary> {
    let steps: Vec<NormalizedStep> = route.steps().map(NormalizedStep::from_dto).collect();
    let total = parse_duration_seconds(route.duration.as_deref());
    summarize_steps(&steps, total)
}

/// Summarize normalized steps.
///
/// `total_seconds` is the route's own duration; when absent the step
/// durations are summed instead.
pub fn summarize_steps(
    steps: &[NormalizedStep],
    total_seconds: Option<f64>,
) -> Option<TransitRouteSummary> {
    let transit_indices: Vec<usize> = steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.mode == StepMode::Transit)
        .map(|(idx, _)| idx)
        .collect();

    let first = *transit_indices.first()?;
    let last = *transit_indices.last()?;

    let mut access_walk = 0.0;
    let mut transfer_walk = 0.0;
    let mut egress_walk = 0.0;
    let mut in_vehicle = 0.0;

    for (idx, step) in steps.iter().enumerate() {
        match step.mode {
            StepMode::Transit => in_vehicle += step.seconds,
            StepMode::Walk if idx < first => access_walk += step.seconds,
            StepMode::Walk if idx > last => egress_walk += step.seconds,
            StepMode::Walk => transfer_walk += step.seconds,
            StepMode::Other => {}
        }
    }

    let route_total = total_seconds.unwrap_or_else(|| steps.iter().map(|s| s.seconds).sum());
    if route_total <= 0.0 {
        return None;
    }

    let walk = access_walk + transfer_walk + egress_walk;
    let wait = (route_total - in_vehicle - walk).max(0.0);
    let legs = transit_indices.len() as u32;

    Some(TransitRouteSummary {
        total_minutes: to_minutes(route_total),
        in_vehicle_minutes: to_minutes(in_vehicle),
        wait_minutes: to_minutes(wait),
        access_walk_minutes: to_minutes(access_walk),
        transfer_walk_minutes: to_minutes(transfer_walk),
        egress_walk_minutes: to_minutes(egress_walk),
        transfer_count: legs.saturating_sub(1),
        transit_leg_count: legs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directions::types::RouteLeg;

    fn walk(seconds: f64) -> NormalizedStep {
        NormalizedStep::new(StepMode::Walk, seconds)
    }

    fn ride(seconds: f64) -> NormalizedStep {
        NormalizedStep::new(StepMode::Transit, seconds)
    }

    fn dto_step(mode: &str, duration: &str) -> RouteStep {
        RouteStep {
            travel_mode: Some(mode.to_string()),
            static_duration: Some(duration.to_string()),
            duration: None,
        }
    }

    #[test]
    fn two_ride_route_with_transfer() {
        let steps = [walk(300.0), ride(600.0), walk(120.0), ride(400.0), walk(180.0)];
        let summary = summarize_steps(&steps, Some(1700.0)).unwrap();

        assert_eq!(summary.access_walk_minutes, 5);
        assert_eq!(summary.transfer_walk_minutes, 2);
        assert_eq!(summary.egress_walk_minutes, 3);
        assert_eq!(summary.in_vehicle_minutes, 17);
        assert_eq!(summary.transfer_count, 1);
        assert_eq!(summary.transit_leg_count, 2);
        // 1700 - 1000 - 600 = 100s of waiting
        assert_eq!(summary.wait_minutes, 2);
        assert_eq!(summary.total_minutes, 28);
    }

    #[test]
    fn walk_only_route_has_no_summary() {
        let steps = [walk(300.0), walk(600.0)];
        assert_eq!(summarize_steps(&steps, Some(900.0)), None);
    }

    #[test]
    fn empty_route_has_no_summary() {
        assert_eq!(summarize_steps(&[], Some(900.0)), None);
        assert_eq!(summarize_route(&Route::default()), None);
    }

    #[test]
    fn zero_total_has_no_summary() {
        assert_eq!(summarize_steps(&[ride(0.0)], None), None);
        assert_eq!(summarize_steps(&[ride(300.0)], Some(0.0)), None);
    }

    #[test]
    fn one_seat_ride() {
        let summary = summarize_steps(&[walk(240.0), ride(900.0)], Some(1200.0)).unwrap();
        assert_eq!(summary.transfer_count, 0);
        assert_eq!(summary.transit_leg_count, 1);
        assert_eq!(summary.egress_walk_minutes, 0);
        assert_eq!(summary.wait_minutes, 1);
    }

    #[test]
    fn missing_total_falls_back_to_step_sum() {
        let summary = summarize_steps(&[walk(300.0), ride(600.0)], None).unwrap();
        assert_eq!(summary.total_minutes, 15);
        assert_eq!(summary.wait_minutes, 0);
    }

    #[test]
    fn short_segments_never_round_to_zero() {
        let summary = summarize_steps(&[walk(10.0), ride(600.0), walk(29.0)], Some(639.0)).unwrap();
        assert_eq!(summary.access_walk_minutes, 1);
        assert_eq!(summary.egress_walk_minutes, 1);
        assert_eq!(summary.wait_minutes, 0);
    }

    #[test]
    fn other_modes_fall_into_no_bucket() {
        let steps = [
            walk(60.0),
            ride(600.0),
            NormalizedStep::new(StepMode::Other, 300.0),
            ride(300.0),
        ];
        let summary = summarize_steps(&steps, Some(1260.0)).unwrap();
        assert_eq!(summary.transfer_walk_minutes, 0);
        assert_eq!(summary.in_vehicle_minutes, 15);
        // The unclassified step's time shows up as waiting.
        assert_eq!(summary.wait_minutes, 5);
    }

    #[test]
    fn parse_durations() {
        assert_eq!(parse_duration_seconds(Some("1700s")), Some(1700.0));
        assert_eq!(parse_duration_seconds(Some("12.5s")), Some(12.5));
        assert_eq!(parse_duration_seconds(Some("90")), Some(90.0));
        assert_eq!(parse_duration_seconds(Some("")), None);
        assert_eq!(parse_duration_seconds(Some("s")), None);
        assert_eq!(parse_duration_seconds(Some("abc")), None);
        assert_eq!(parse_duration_seconds(None), None);
    }

    #[test]
    fn minute_rounding() {
        assert_eq!(to_minutes(0.0), 0);
        assert_eq!(to_minutes(-5.0), 0);
        assert_eq!(to_minutes(1.0), 1);
        assert_eq!(to_minutes(89.0), 1);
        assert_eq!(to_minutes(90.0), 2);
        assert_eq!(to_minutes(1000.0), 17);
    }

    #[test]
    fn summarize_dto_route() {
        let route = Route {
            duration: Some("1700s".to_string()),
            legs: Some(vec![RouteLeg {
                steps: Some(vec![
                    dto_step("WALK", "300s"),
                    dto_step("transit", "600s"),
                    dto_step("WALK", "120s"),
                    dto_step("TRANSIT", "400s"),
                    dto_step("walk", "180s"),
                ]),
            }]),
        };

        let summary = summarize_route(&route).unwrap();
        assert_eq!(summary.access_walk_minutes, 5);
        assert_eq!(summary.transit_leg_count, 2);
        assert_eq!(summary.egress_walk_minutes, 3);
    }

    #[test]
    fn unparseable_step_duration_counts_as_zero() {
        let route = Route {
            duration: Some("900s".to_string()),
            legs: Some(vec![RouteLeg {
                steps: Some(vec![
                    dto_step("WALK", "soon"),
                    RouteStep {
                        travel_mode: Some("TRANSIT".to_string()),
                        static_duration: None,
                        duration: Some("600s".to_string()),
                    },
                ]),
            }]),
        };

        let summary = summarize_route(&route).unwrap();
        assert_eq!(summary.access_walk_minutes, 0);
        assert_eq!(summary.in_vehicle_minutes, 10);
        assert_eq!(summary.wait_minutes, 5);
    }

    #[test]
    fn summary_converts_to_metrics() {
        let summary = summarize_steps(&[ride(600.0)], Some(600.0)).unwrap();
        let metrics = TransitPathMetrics::from(summary);
        assert_eq!(metrics.source, PathSource::RoutesDerived);
        assert_eq!(metrics.total_minutes, Some(10));
        assert_eq!(metrics.transfer_count(), Some(0));
    }
}
