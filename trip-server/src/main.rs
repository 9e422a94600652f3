use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trip_server::cache::CachedRouteProvider;
use trip_server::config::ServerConfig;
use trip_server::hos::HosConfig;
use trip_server::routing::{
    AnyRouteProvider, FixedRouteProvider, OpenRouteClient, OpenRouteConfig,
};
use trip_server::store::{TripSnapshot, TripStore};
use trip_server::trips::TripService;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Pick a routing provider
    let provider = match &config.openroute_api_key {
        Some(key) => {
            let client = OpenRouteClient::new(OpenRouteConfig::new(key))
                .expect("Failed to create OpenRouteService client");
            AnyRouteProvider::OpenRoute(client)
        }
        None => {
            warn!("OPENROUTE_API_KEY not set, using straight-line distances between built-in places");
            AnyRouteProvider::Fixed(FixedRouteProvider::with_us_hubs())
        }
    };
    let provider = CachedRouteProvider::new(provider, &config.cache);

    let store = match &config.trip_store_path {
        Some(path) => TripStore::with_snapshot(TripSnapshot::new(path))
            .expect("Failed to load trip store snapshot"),
        None => TripStore::in_memory(),
    };

    let service = TripService::new(Arc::new(provider), store, HosConfig::default());
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "HOS trip planner listening");
    info!("  GET  /health                    - Health check");
    info!("  POST /api/trips                 - Plan a trip");
    info!("  GET  /api/trips/list            - List trips");
    info!("  GET  /api/trips/:id             - Trip details and log sheets");
    info!("  GET  /api/geocode/autocomplete  - Place suggestions");

    axum::serve(listener, app).await.expect("Server error");
}
