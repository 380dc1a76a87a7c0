mod analytics;
mod config;
mod contracts;
mod documents;
mod errors;
mod export;
mod generation;
mod layout;
mod llm_client;
mod market;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::PageGeometry;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BI Suite API v{}", env!("CARGO_PKG_VERSION"));

    if config.completion_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; every completion request will fail");
    }
    let completer = Arc::new(LlmClient::new(
        config.completion_api_key.clone(),
        config.completion_api_url.clone(),
    ));
    info!(
        "Completion client initialized (model: {}, endpoint: {})",
        llm_client::MODEL,
        config.completion_api_url
    );

    let page_geometry = PageGeometry::default();
    info!(
        "PDF export geometry: {}x{}pt, {}pt margin",
        page_geometry.page_width, page_geometry.page_height, page_geometry.margin
    );

    let state = AppState {
        completer,
        config: config.clone(),
        page_geometry,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
