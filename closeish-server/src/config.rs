//! Application configuration from environment variables.

use std::env::VarError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::enrich::EnrichConfig;
use crate::pipeline::PipelineConfig;
use crate::scoring::RankConfig;

/// Floor for concurrent Routes requests.
const DEFAULT_ROUTES_CONCURRENCY: usize = 8;

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime configuration for the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Key for the live places source; `None` serves the static catalog only.
    pub places_api_key: Option<String>,
    /// Key for transit directions; `None` skips enrichment.
    pub routes_api_key: Option<String>,
    pub enrich_top_n: usize,
    pub top_k: usize,
    pub detail_timeout_secs: u64,
    pub places_radius_meters: f64,
    pub places_max_results: u32,
    pub session_ttl_secs: u64,
}

impl AppConfig {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            enrich: EnrichConfig::new(self.detail_timeout_secs),
            rank: RankConfig::new(self.top_k),
            enrichment_budget: self.enrich_top_n,
        }
    }

    /// Concurrent Routes requests allowed.
    ///
    /// At least the enrichment budget, so one batch never waits on a permit
    /// inside its per-fetch deadline.
    pub fn routes_max_concurrent(&self) -> usize {
        self.enrich_top_n.max(DEFAULT_ROUTES_CONCURRENCY)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Load configuration from the environment, reading a `.env` file first if present.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Empty values are treated as unset.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let shared_key = optional("GOOGLE_MAPS_API_KEY");
    let places_api_key = optional("GOOGLE_PLACES_API_KEY").or_else(|| shared_key.clone());
    let routes_api_key = optional("GOOGLE_ROUTES_API_KEY").or(shared_key);

    Ok(AppConfig {
        bind_addr: parse_or(&optional, "CLOSEISH_BIND_ADDR", "127.0.0.1:3000")?,
        places_api_key,
        routes_api_key,
        enrich_top_n: parse_or(&optional, "CLOSEISH_ENRICH_TOP_N", "5")?,
        top_k: parse_or(&optional, "CLOSEISH_TOP_K", "10")?,
        detail_timeout_secs: parse_or(&optional, "CLOSEISH_DETAIL_TIMEOUT_SECS", "8")?,
        places_radius_meters: parse_or(&optional, "CLOSEISH_PLACES_RADIUS_METERS", "1500")?,
        places_max_results: parse_or(&optional, "CLOSEISH_PLACES_MAX_RESULTS", "20")?,
        session_ttl_secs: parse_or(&optional, "CLOSEISH_SESSION_TTL_SECS", "600")?,
    })
}

fn parse_or<T, G>(optional: &G, var: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    let raw = optional(var).unwrap_or_else(|| default.to_string());
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}
