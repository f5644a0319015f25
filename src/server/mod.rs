#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

pub mod error;
pub mod handlers;

pub use error::ServerError;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use eyre::{Context, Result};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::ServerConfig;
use crate::service::ChatService;

/// Shared by every request; holds no mutable state.
pub struct AppState {
    pub chat: ChatService,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }
}

/// Builds the `/api` routes.
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/chat", post(handlers::send_chat))
        .route("/api/chat/history", get(handlers::chat_history))
        .route("/api/health", get(handlers::health))
}

pub fn router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let mut app = api_router();

    if let Some(dir) = config.static_dir.as_deref() {
        // Unknown paths fall back to index.html so client-side routes resolve
        let index = Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
        log::info!("Serving frontend from {}", dir);
    }

    if config.cors {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}

/// Serves the application until `token` is cancelled.
pub async fn serve(config: &ServerConfig, state: Arc<AppState>, token: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .wrap_err(format!("binding {}", config.bind))?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state, config))
        .with_graceful_shutdown(async move { token.cancelled().await })
        .await
        .wrap_err("serving http")?;
    Ok(())
}
