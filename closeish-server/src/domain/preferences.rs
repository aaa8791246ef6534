//! User ranking preferences.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::place::PlaceCategory;

/// How strongly to favour transit over walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkVsTransit {
    #[default]
    FavorTransit,
    Balanced,
    PreferWalk,
}

/// When the user intends to travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhenOption {
    #[default]
    Now,
    Later,
}

/// Departure window, relevant only for [`WhenOption::Later`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "next_30")]
    Next30,
    #[default]
    #[serde(rename = "next_60")]
    Next60,
    #[serde(rename = "next_120")]
    Next120,
}

/// Requested kind of place, as offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    #[default]
    Restaurants,
    Cafes,
    Bars,
    Parks,
}

impl PlaceType {
    /// The candidate category this type filters on.
    pub fn category(&self) -> PlaceCategory {
        match self {
            PlaceType::Restaurants => PlaceCategory::Restaurant,
            PlaceType::Cafes => PlaceCategory::Cafe,
            PlaceType::Bars => PlaceCategory::Bar,
            PlaceType::Parks => PlaceCategory::Park,
        }
    }
}

/// Filter and weighting preferences for one ranking run.
///
/// `max_walk_minutes` is always positive for values built through
/// [`FilterPreferences::new`] or deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPreferences")]
pub struct FilterPreferences {
    max_walk_minutes: u32,
    walk_vs_transit: WalkVsTransit,
    live_mode: bool,
    when: WhenOption,
    time_window: TimeWindow,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPreferences {
    max_walk_minutes: u32,
    #[serde(default)]
    walk_vs_transit: WalkVsTransit,
    #[serde(default = "default_live_mode")]
    live_mode: bool,
    #[serde(default)]
    when: WhenOption,
    #[serde(default)]
    time_window: TimeWindow,
}

fn default_live_mode() -> bool {
    true
}

impl TryFrom<RawPreferences> for FilterPreferences {
    type Error = DomainError;

    fn try_from(raw: RawPreferences) -> Result<Self, Self::Error> {
        FilterPreferences::new(
            raw.max_walk_minutes,
            raw.walk_vs_transit,
            raw.live_mode,
            raw.when,
            raw.time_window,
        )
    }
}

impl FilterPreferences {
    /// Create preferences, rejecting a zero walk limit.
    pub fn new(
        max_walk_minutes: u32,
        walk_vs_transit: WalkVsTransit,
        live_mode: bool,
        when: WhenOption,
        time_window: TimeWindow,
    ) -> Result<Self, DomainError> {
        if max_walk_minutes == 0 {
            return Err(DomainError::InvalidMaxWalk);
        }
        Ok(Self {
            max_walk_minutes,
            walk_vs_transit,
            live_mode,
            when,
            time_window,
        })
    }

    pub fn max_walk_minutes(&self) -> u32 {
        self.max_walk_minutes
    }

    pub fn walk_vs_transit(&self) -> WalkVsTransit {
        self.walk_vs_transit
    }

    pub fn live_mode(&self) -> bool {
        self.live_mode
    }

    pub fn when(&self) -> WhenOption {
        self.when
    }

    pub fn time_window(&self) -> TimeWindow {
        self.time_window
    }

    /// Weight applied to transit advantage for the walk/transit preference.
    pub fn preference_tilt(&self) -> f64 {
        match self.walk_vs_transit {
            WalkVsTransit::FavorTransit => 1.0,
            WalkVsTransit::Balanced => 0.8,
            WalkVsTransit::PreferWalk => 0.6,
        }
    }

    /// Weight for live vs planning mode.
    pub fn mode_tilt(&self) -> f64 {
        if self.live_mode { 1.0 } else { 0.95 }
    }

    /// Weight for how far ahead the trip is.
    pub fn when_tilt(&self) -> f64 {
        match (self.when, self.time_window) {
            (WhenOption::Now, _) => 1.0,
            (WhenOption::Later, TimeWindow::Next30) => 0.98,
            (WhenOption::Later, TimeWindow::Next60) => 0.96,
            (WhenOption::Later, TimeWindow::Next120) => 0.94,
        }
    }

    /// Product of all three tilts.
    pub fn combined_tilt(&self) -> f64 {
        self.preference_tilt() * self.mode_tilt() * self.when_tilt()
    }
}

impl Default for FilterPreferences {
    fn default() -> Self {
        Self {
            max_walk_minutes: 10,
            walk_vs_transit: WalkVsTransit::FavorTransit,
            live_mode: true,
            when: WhenOption::Now,
            time_window: TimeWindow::Next60,
        }
    }
}
