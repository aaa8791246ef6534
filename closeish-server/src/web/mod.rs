//! Web layer for the closeness ranking service.
//!
//! Provides HTTP endpoints for nearby search and for ranking caller-supplied
//! candidates.

mod dto;
mod routes;
mod session;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use session::SessionEpochs;
pub use state::{AppState, LivePipeline};
