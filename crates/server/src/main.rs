//! # kwitansi-server
//!
//! HTTP server for receipt exports and student spreadsheet imports.

mod config;
mod error;
mod handlers;
mod query;
mod state;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use config::ServerConfig;
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handlers::health;

/// Create the application router.
///
/// This is separated from `main()` to allow testing.
pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health))
        .route("/api/kwitansi", get(handlers::list_receipts))
        .route("/api/kwitansi/export", get(handlers::export_receipts))
        .route("/api/kwitansi/cetak", post(handlers::create_receipt))
        .route("/api/mahasiswa", get(handlers::list_students))
        .route("/api/mahasiswa/add", post(handlers::add_student))
        .route(
            "/api/mahasiswa/upload-excel",
            post(handlers::upload_excel).layer(upload_limit),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kwitansi_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("creating upload dir {}", config.upload_dir.display()))?;

    let state = Arc::new(AppState::new(&config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!(addr = %config.addr, "kwitansi-server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
