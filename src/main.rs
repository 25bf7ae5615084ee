//! Decidr server binary.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::ExposeSecret;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use decidr::adapters::ai::{OpenRouterClient, OpenRouterConfig};
use decidr::adapters::http::{app_router, InviteGate};
use decidr::adapters::memory::InMemorySessionStore;
use decidr::config::AppConfig;
use decidr::ports::{DecisionAnalyst, QuestionGenerator, SessionStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let ai_config = OpenRouterConfig::new(config.ai.openrouter_api_key.expose_secret().clone())
        .with_model(config.ai.model.clone())
        .with_base_url(config.ai.base_url.clone())
        .with_timeout(config.ai.timeout())
        .with_max_retries(config.ai.max_retries);
    let client = Arc::new(OpenRouterClient::new(ai_config)?);

    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let gate = Arc::new(InviteGate::from_config(&config.invite, config.is_production()));

    if gate.is_enabled() {
        tracing::info!("invite gate enforced");
    } else {
        tracing::warn!("no invite code configured, gate is open");
    }

    let app = app_router(
        Arc::clone(&client) as Arc<dyn QuestionGenerator>,
        client as Arc<dyn DecisionAnalyst>,
        store,
        gate,
    )
    .layer(TraceLayer::new_for_http())
    .layer(cors_layer(&config)?)
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, model = %config.ai.model, "starting decidr server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, Box<dyn std::error::Error>> {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        // Development default; production deployments set explicit origins.
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let parsed: Result<Vec<HeaderValue>, _> =
        origins.iter().map(|o| o.parse::<HeaderValue>()).collect();
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed?))
        .allow_methods(Any)
        .allow_headers(Any))
}
