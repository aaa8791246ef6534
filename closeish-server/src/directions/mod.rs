//! Transit directions: Routes API client and route summarizer.
//!
//! The client fetches a single transit route per origin/destination pair;
//! the summarizer reduces its steps to walk/ride/wait minutes.
//!
//! Key characteristics of the Routes API:
//! - Durations are strings of seconds with an `s` suffix (e.g. `"1700s"`)
//! - A request with no transit path returns zero routes, not an error
//! - A field mask header is mandatory and limits the response shape

mod client;
mod error;
mod summarize;
mod types;

pub use client::{RoutesClient, RoutesConfig};
pub use error::RoutesError;
pub use summarize::{
    NormalizedStep, StepMode, TransitRouteSummary, parse_duration_seconds, summarize_route,
    summarize_steps, to_minutes,
};
pub use types::{ComputeRoutesResponse, Route, RouteLeg, RouteStep};
