//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the gallery REST endpoints and the health check under a
//! single Axum router, with CORS and request tracing applied to everything.

pub mod gallery;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{delete, get};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Snapshots inline their images as data URLs, so they can be large.
const MAX_SNAPSHOT_BYTES: usize = 64 * 1024 * 1024;

/// Build the application router.
pub fn app(state: AppState, cors_allow_origin: &str) -> Router {
    Router::new()
        .route("/api/gallery", get(gallery::get_gallery).put(gallery::put_gallery))
        .route("/api/gallery/tiles/{id}", delete(gallery::delete_gallery_tile))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_SNAPSHOT_BYTES))
        .layer(cors_layer(cors_allow_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "invalid CORS_ALLOW_ORIGIN, allowing any origin");
                AllowOrigin::from(Any)
            }
        }
    };
    CorsLayer::new().allow_origin(allow_origin).allow_methods(Any).allow_headers(Any)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
