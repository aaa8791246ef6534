use closeish_server::config::load_app_config;
use closeish_server::directions::{RoutesClient, RoutesConfig};
use closeish_server::pipeline::Pipeline;
use closeish_server::places::{PlacesClient, PlacesConfig};
use closeish_server::web::{AppState, SessionEpochs, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Maximum number of tracked client sessions.
const SESSION_CAPACITY: u64 = 10_000;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("closeish_server=info,tower_http=info")),
        )
        .init();

    let config = load_app_config().expect("Failed to load configuration");

    // Create live places client
    let places = match &config.places_api_key {
        Some(key) => {
            let places_config = PlacesConfig::new(key)
                .with_radius(config.places_radius_meters)
                .with_max_results(config.places_max_results);
            Some(PlacesClient::new(places_config).expect("Failed to create Places client"))
        }
        None => {
            warn!("GOOGLE_PLACES_API_KEY not set; serving the static catalog only");
            None
        }
    };

    // Create directions client
    let routes = match &config.routes_api_key {
        Some(key) => {
            let routes_config =
                RoutesConfig::new(key).with_max_concurrent(config.routes_max_concurrent());
            Some(RoutesClient::new(routes_config).expect("Failed to create Routes client"))
        }
        None => {
            warn!("GOOGLE_ROUTES_API_KEY not set; transit enrichment disabled");
            None
        }
    };

    let pipeline = Pipeline::new(places, routes, config.pipeline_config());
    let sessions = SessionEpochs::new(config.session_ttl(), SESSION_CAPACITY);
    let app = create_router(AppState::new(pipeline, sessions));

    let addr = config.bind_addr;
    info!(%addr, "Closeish listening");
    info!("  GET  /health       - Health check");
    info!("  GET  /api/places   - Search and rank nearby places");
    info!("  POST /api/rank     - Rank supplied candidates");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
