use crate::ServerConfig;
use crate::error::ApiError;
use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use graphlens_core::translate::{elements_to_json, translate};
use graphlens_gexf::read_gexf;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct GraphVisRequest {
    /// Path to the GEXF file on the server's filesystem
    pub query: String,
}

/// `POST /graph_vis`: read the GEXF file named by `query` and answer with its
/// Cytoscape.js element array.
pub async fn graph_vis(
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<GraphVisRequest>,
) -> Result<Response, ApiError> {
    info!("Received query: {}", request.query);

    let path = PathBuf::from(request.query);
    let label_attribute = config.label_attribute.clone();

    // File read and translation are blocking work
    let body = tokio::task::spawn_blocking(move || -> Result<String, ApiError> {
        let graph = read_gexf(&path)?;
        let elements = translate(&graph, &label_attribute);
        Ok(elements_to_json(&elements, true)?)
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
