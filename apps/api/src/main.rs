mod config;
mod errors;
mod extraction;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::engine::SkillEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skillex API v{}", env!("CARGO_PKG_VERSION"));

    // Ontology and tuned constants; a bad table or override file aborts startup
    let ontology = config.load_ontology()?;
    info!(
        "Ontology loaded: {} terms, {} aliases",
        ontology.entries().len(),
        ontology.alias_pairs().count()
    );
    let extraction = config.load_extraction_config()?;
    info!("Document cap: {} chars", extraction.max_document_chars);

    let engine = SkillEngine::new(Arc::new(ontology), config.tagger_backend.build(), extraction)
        .context("Failed to build skill engine")?;
    info!("Tagger backend: {}", engine.tagger_name());

    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
