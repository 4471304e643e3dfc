pub mod error;
pub mod frontend;
pub mod handlers;

pub use error::{ApiError, Result, ServerError};

use axum::Router;
use axum::routing::post;
use graphlens_core::translate::DEFAULT_LABEL_ATTRIBUTE;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_BIND: &str = "127.0.0.1:2024";
pub const DEFAULT_FRONTEND_DIR: &str = "frontend/dist";

/// Immutable server settings shared by every request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub frontend_dir: PathBuf,
    /// Node attribute used for display labels
    pub label_attribute: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 2024)),
            frontend_dir: PathBuf::from(DEFAULT_FRONTEND_DIR),
            label_attribute: DEFAULT_LABEL_ATTRIBUTE.to_string(),
        }
    }
}

/// `POST /graph_vis` plus the static frontend mounted under `/app`.
pub fn router(config: ServerConfig) -> Router {
    let frontend = frontend::frontend_router(&config.frontend_dir);

    Router::new()
        .route("/graph_vis", post(handlers::graph_vis))
        .nest_service("/app", frontend)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(config))
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.bind;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::BindError { addr, source })?;

    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(config)).await?;
    Ok(())
}
