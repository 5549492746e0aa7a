//! Intake router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! The webhook lives at `/process`; read-back routes are nested under
//! `/api/`.

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the intake router.
pub fn intake_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/patients/:id", get(endpoints::records::patient))
        .route("/intakes/:id", get(endpoints::records::intake))
        .route("/lookups/:table", get(endpoints::lookups::list));

    Router::new()
        .route("/process", post(endpoints::process::submit))
        .nest("/api", api)
        .with_state(ctx)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
}
