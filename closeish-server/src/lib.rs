//! Closeness ranking server.
//!
//! A web service that answers: "what nearby places are easy to reach
//! by transit from here?"

pub mod config;
pub mod directions;
pub mod domain;
pub mod enrich;
pub mod pipeline;
pub mod places;
pub mod scoring;
pub mod web;
