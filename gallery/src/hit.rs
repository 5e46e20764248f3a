#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{EDIT_BUTTON_INSET_PX, EDIT_BUTTON_PX, RESIZE_HANDLE_PX};
use crate::doc::{Tile, TileId};
use crate::geom::{Point, Rect};
use crate::input::TilePart;

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub tile_id: TileId,
    pub part: TilePart,
}

/// Bounds of the resize handle in the bottom-right corner.
#[must_use]
pub fn resize_handle_rect(tile: &Tile) -> Rect {
    let size = tile.size();
    Rect::new(
        tile.position.x + size.width - RESIZE_HANDLE_PX,
        tile.position.y + size.height - RESIZE_HANDLE_PX,
        RESIZE_HANDLE_PX,
        RESIZE_HANDLE_PX,
    )
}

/// Bounds of the style-edit button near the top-right corner.
#[must_use]
pub fn edit_button_rect(tile: &Tile) -> Rect {
    let size = tile.size();
    Rect::new(
        tile.position.x + size.width - EDIT_BUTTON_INSET_PX - EDIT_BUTTON_PX,
        tile.position.y + EDIT_BUTTON_INSET_PX,
        EDIT_BUTTON_PX,
        EDIT_BUTTON_PX,
    )
}

/// Classify a point against one tile. The resize handle wins over the edit
/// button, which wins over the body.
#[must_use]
pub fn tile_part_at(tile: &Tile, pt: Point) -> Option<TilePart> {
    if resize_handle_rect(tile).contains(pt) {
        return Some(TilePart::ResizeHandle);
    }
    if edit_button_rect(tile).contains(pt) {
        return Some(TilePart::EditButton);
    }
    let body = Rect { origin: tile.position, size: tile.size() };
    body.contains(pt).then_some(TilePart::Body)
}

/// Find the top-most tile part under `pt`.
///
/// `raised` is painted above everything else, so it is checked first; the
/// rest are checked in reverse paint order.
#[must_use]
pub fn hit_test(pt: Point, tiles: &[Tile], raised: Option<TileId>) -> Option<Hit> {
    let raised_tile = raised.and_then(|id| tiles.iter().find(|t| t.id == id));
    raised_tile
        .into_iter()
        .chain(tiles.iter().rev().filter(|t| Some(t.id) != raised))
        .find_map(|tile| tile_part_at(tile, pt).map(|part| Hit { tile_id: tile.id, part }))
}
