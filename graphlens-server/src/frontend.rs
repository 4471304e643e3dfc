use axum::Router;
use axum::http::StatusCode;
use std::path::Path;
use tower_http::services::ServeDir;
use tracing::{info, warn};

pub const FRONTEND_NOT_BUILT: &str =
    "Frontend not built. Run 'npm run build' in the frontend directory.";

/// Static frontend service. When the build is missing, every request gets a
/// 503 explaining how to build it.
pub fn frontend_router(build_dir: &Path) -> Router {
    if !build_dir.is_dir() || !build_dir.join("index.html").is_file() {
        warn!(
            "Frontend build directory not found or incomplete at {}. Serving frontend will likely fail.",
            build_dir.display()
        );
        return Router::new().fallback(frontend_not_built);
    }

    info!("Serving frontend from {}", build_dir.display());
    Router::new().fallback_service(ServeDir::new(build_dir).append_index_html_on_directories(true))
}

async fn frontend_not_built() -> (StatusCode, &'static str) {
    (StatusCode::SERVICE_UNAVAILABLE, FRONTEND_NOT_BUILT)
}
