//! quest-gateway server entry point.
//!
//! Starts the Axum HTTP server with the REST endpoints.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use quest_gateway::api;
use quest_gateway::app_state::AppState;
use quest_gateway::config::{ProviderMode, QuestConfig};
use quest_gateway::persistence::QuestStore;
use quest_gateway::persistence::postgres::PostgresStore;
use quest_gateway::provider::{LiveProvider, SimulatedProvider, SocialProvider};
use quest_gateway::service::{IdentityService, VerificationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = QuestConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting quest-gateway");

    // Connect to PostgreSQL and apply migrations
    let store: Arc<dyn QuestStore> = Arc::new(PostgresStore::connect(&config).await?);
    tracing::info!("database ready");

    // Select the social provider
    let provider: Arc<dyn SocialProvider> = match config.provider_mode {
        ProviderMode::Live => {
            tracing::info!("using live social provider");
            Arc::new(LiveProvider::new(&config))
        }
        ProviderMode::Simulated => {
            tracing::info!(
                pass_rate = config.simulated_pass_rate,
                "using simulated social provider"
            );
            Arc::new(SimulatedProvider::new(config.simulated_pass_rate))
        }
    };

    // Build service layer
    let identity = Arc::new(IdentityService::new(
        Arc::clone(&store),
        config.jwt_secret.clone(),
        config.session_ttl_secs,
    ));
    let verification = Arc::new(VerificationService::new(
        Arc::clone(&store),
        provider,
        config.cache_ttl_secs,
        config.telegram_bot_token.clone(),
    ));

    // Build application state
    let app_state = AppState::new(identity, verification, store);

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
