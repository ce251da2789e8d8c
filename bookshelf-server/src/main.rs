//! Bookshelf Server - book catalog web application

use anyhow::{Context, Result};
use bookshelf_server::{config::Settings, logging, routes, state};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();

    let settings = Settings::from_env().context("failed to load settings")?;
    tracing::info!(
        database = ?settings.database,
        db_host = %settings.db_host,
        db_port = settings.db_port,
        uploads = settings.upload_dir.is_some(),
        "bookshelf starting"
    );

    // Create application state
    let state = state::AppState::from_settings(&settings).await?;
    let db = state.db.clone();

    // Build router
    let app = routes::create_router(state);

    // Start server
    let addr = settings.listen_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    db.close().await.context("failed to close the book database")?;
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
