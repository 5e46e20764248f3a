//! Gallery service: load, replace and delete a member's tiles.
//!
//! DESIGN
//! ======
//! Each tile is stored as one JSONB record keyed by `(member_id, id)` with an
//! explicit ordinal, so paint order survives a round trip. The client always
//! sends its whole collection; `replace_gallery` applies it in a single
//! transaction, deleting rows that are no longer present.
//!
//! Records are read back through `gallery::doc::Tile`'s deserializer, which
//! clamps sizes and re-derives caption shadows.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use std::collections::HashSet;

use ::gallery::doc::Tile;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::info;
use uuid::Uuid;

/// Largest collection accepted in one snapshot.
pub const MAX_TILES: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("Member ID required")]
    MissingMember,
    #[error("tile not found: {0}")]
    NotFound(Uuid),
    #[error("invalid gallery: {0}")]
    Invalid(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Extract a usable member id from the raw query value.
///
/// # Errors
///
/// Returns `GalleryError::MissingMember` when the value is absent or blank.
pub fn member_id(raw: Option<&str>) -> Result<&str, GalleryError> {
    raw.map(str::trim).filter(|m| !m.is_empty()).ok_or(GalleryError::MissingMember)
}

/// Check a snapshot before it is stored.
///
/// # Errors
///
/// Returns `GalleryError::Invalid` for duplicate ids, tiles without an image,
/// or a collection larger than `MAX_TILES`.
pub fn validate_snapshot(tiles: &[Tile]) -> Result<(), GalleryError> {
    if tiles.len() > MAX_TILES {
        return Err(GalleryError::Invalid(format!("{} tiles exceeds the limit of {MAX_TILES}", tiles.len())));
    }
    let mut seen = HashSet::with_capacity(tiles.len());
    for tile in tiles {
        if !seen.insert(tile.id) {
            return Err(GalleryError::Invalid(format!("duplicate tile id {}", tile.id)));
        }
        if tile.image_ref.trim().is_empty() {
            return Err(GalleryError::Invalid(format!("tile {} has no image", tile.id)));
        }
    }
    Ok(())
}

/// Load a member's tiles in paint order. An unknown member has no tiles.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn load_gallery(pool: &PgPool, member: &str) -> Result<Vec<Tile>, GalleryError> {
    let rows = sqlx::query_as::<_, (Json<Tile>,)>(
        "SELECT record FROM gallery_tiles WHERE member_id = $1 ORDER BY ordinal ASC, created_at ASC",
    )
    .bind(member)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(Json(tile),)| tile).collect())
}

/// Replace a member's tiles with `tiles` and return the stored collection.
///
/// # Errors
///
/// Returns `GalleryError::Invalid` if the snapshot fails validation, or a
/// database error if any statement fails (nothing is committed then).
pub async fn replace_gallery(pool: &PgPool, member: &str, tiles: Vec<Tile>) -> Result<Vec<Tile>, GalleryError> {
    validate_snapshot(&tiles)?;

    let ids: Vec<Uuid> = tiles.iter().map(|t| t.id).collect();
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM gallery_tiles WHERE member_id = $1 AND NOT (id = ANY($2))")
        .bind(member)
        .bind(&ids)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for (ordinal, tile) in (0_i32..).zip(tiles.iter()) {
        sqlx::query(
            "INSERT INTO gallery_tiles (member_id, id, ordinal, record)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (member_id, id)
             DO UPDATE SET ordinal = EXCLUDED.ordinal, record = EXCLUDED.record, updated_at = now()",
        )
        .bind(member)
        .bind(tile.id)
        .bind(ordinal)
        .bind(Json(tile))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    info!(%member, tiles = tiles.len(), removed, "gallery replaced");
    Ok(tiles)
}

/// Delete one tile.
///
/// # Errors
///
/// Returns `GalleryError::NotFound` if the member has no such tile.
pub async fn delete_tile(pool: &PgPool, member: &str, id: Uuid) -> Result<(), GalleryError> {
    let result = sqlx::query("DELETE FROM gallery_tiles WHERE member_id = $1 AND id = $2")
        .bind(member)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(GalleryError::NotFound(id));
    }
    info!(%member, tile = %id, "gallery tile deleted");
    Ok(())
}
