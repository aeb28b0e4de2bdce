mod config;
mod handler;
mod service;

use axum::{routing::get, Router};
use config::ApiConfig;
use connectors::{nomics::NomicsConnector, NomicsConfig};
use handler::SharedService;
use service::CurrencyService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Build the router with all API routes
pub fn app(service: SharedService) -> Router {
    // Create CORS middleware
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/currencies", get(handler::list_currencies))
        .route("/api/currencies/fiat", get(handler::get_fiat_price))
        .route("/api/currencies/calculate", get(handler::calculate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting ticker proxy API");

    // Load configuration from environment
    let api_config = ApiConfig::from_env();
    let nomics_config = NomicsConfig::from_env();
    if !nomics_config.has_api_key() {
        warn!("API_KEY is not set, upstream requests will fail authentication");
    }

    let connector = NomicsConnector::new(nomics_config)
        .map_err(|e| format!("Failed to create Nomics connector: {}", e))?;
    let service = Arc::new(CurrencyService::new(Arc::new(connector)));

    let addr = api_config.socket_addr()?;
    info!("Listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app(service).into_make_service())
        .await?;

    Ok(())
}
