//! Gallery REST routes.
//!
//! Every route is scoped by a `memberId` query parameter and answers with
//! `Cache-Control: no-store`, since a gallery changes on every gesture.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use ::gallery::doc::Tile;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::services::gallery::{self, GalleryError};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberQuery {
    pub member_id: Option<String>,
}

/// A `GalleryError` rendered as a JSON error body.
#[derive(Debug)]
pub struct ApiError(pub GalleryError);

impl From<GalleryError> for ApiError {
    fn from(err: GalleryError) -> Self {
        Self(err)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        gallery_error_to_status(&self.0)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            GalleryError::Database(e) => {
                tracing::error!(error = %e, "gallery database error");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };
        no_store(status, Json(serde_json::json!({ "error": message })))
    }
}

/// `GET /api/gallery?memberId=`: the member's tiles in paint order.
pub async fn get_gallery(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
) -> Result<Response, ApiError> {
    let member = gallery::member_id(query.member_id.as_deref())?;
    let tiles = gallery::load_gallery(&state.pool, member).await?;
    Ok(no_store(StatusCode::OK, Json(tiles)))
}

/// `PUT /api/gallery?memberId=`: replace the member's tiles.
pub async fn put_gallery(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
    Json(tiles): Json<Vec<Tile>>,
) -> Result<Response, ApiError> {
    let member = gallery::member_id(query.member_id.as_deref())?;
    let stored = gallery::replace_gallery(&state.pool, member, tiles).await?;
    Ok(no_store(StatusCode::OK, Json(stored)))
}

/// `DELETE /api/gallery/tiles/:id?memberId=`: remove one tile.
pub async fn delete_gallery_tile(
    State(state): State<AppState>,
    Query(query): Query<MemberQuery>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let member = gallery::member_id(query.member_id.as_deref())?;
    gallery::delete_tile(&state.pool, member, id).await?;
    Ok(no_store(StatusCode::OK, Json(serde_json::json!({ "success": true }))))
}

pub(crate) fn gallery_error_to_status(err: &GalleryError) -> StatusCode {
    match err {
        GalleryError::MissingMember => StatusCode::BAD_REQUEST,
        GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
        GalleryError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GalleryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn no_store(status: StatusCode, body: impl IntoResponse) -> Response {
    (status, [(CACHE_CONTROL, "no-store")], body).into_response()
}
