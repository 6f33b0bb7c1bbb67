//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. When a static directory is configured
//! it is served for every other path.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
pub fn api_router(core: Arc<CoreState>) -> Router {
    let static_dir = core.config.static_dir.clone();
    let ctx = ApiContext::new(core);

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/predict", post(endpoints::predict::predict))
        .route("/predictions", get(endpoints::history::list))
        .route("/predictions/:id/report", get(endpoints::history::report))
        .with_state(ctx);

    let mut router = Router::new().nest("/api", api);
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router.layer(axum::middleware::from_fn(middleware::audit::log_access))
}
