mod analysis;
mod config;
mod errors;
mod layout;
mod llm_client;
mod optimize;
mod render;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::default_page_config;
use crate::llm_client::{GenerativeModel, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ArtifactStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on a missing GEMINI_API_KEY
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV optimizer v{}", env!("CARGO_PKG_VERSION"));

    let store = ArtifactStore::new(config.upload_dir.clone(), config.generated_dir.clone());
    store
        .ensure_dirs()
        .await
        .context("failed to create upload/generated directories")?;
    info!(
        "Artifact store ready (uploads: {}, generated: {})",
        store.upload_dir().display(),
        store.generated_dir().display()
    );

    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
        config.analysis_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm.model_name());

    let page_config = default_page_config();
    info!(
        "Page layout: {}x{}pt, {} lines per page ({}pt usable), wrap at {} chars",
        page_config.width_pt,
        page_config.height_pt,
        page_config.lines_per_page(),
        page_config.usable_height(),
        page_config.wrap_width_chars
    );

    let state = AppState {
        store,
        model: Arc::new(llm),
        config: config.clone(),
        page_config,
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
