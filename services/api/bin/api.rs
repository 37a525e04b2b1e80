//! Main Entrypoint for the Magic Shop API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the shopkeeper prompt template.
//! 3. Initializing the shopkeeper client.
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use magic_shop_api::{
    config::Config, prompts::load_system_template, router::create_router, state::AppState,
};
use magic_shop_core::llm_client::{OpenAICompatibleClient, ShopkeeperClient};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("Received shutdown signal. Shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load the prompt template ---
    let system_template = load_system_template(&config.prompts_path)?;

    // --- 4. Initialize the shopkeeper client ---
    let shopkeeper: Arc<dyn ShopkeeperClient> = Arc::new(OpenAICompatibleClient::gemini(
        &config.gemini_api_key,
        &config.api_base,
        config.chat_model.clone(),
        config.temperature,
    ));

    let app_state = Arc::new(AppState {
        shopkeeper,
        system_template: Arc::new(system_template),
        config: Arc::new(config.clone()),
    });

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // --- 6. Start Server ---
    info!(
        model = %config.chat_model,
        api_base = %config.api_base,
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
