//! Document model: tile records, sparse patches, and the ordered store.
//!
//! This module defines what is on the canvas (`Tile`), what the upload
//! intake hands over (`TileDescriptor`), a sparse-update type for incremental
//! edits (`TilePatch`), and the runtime store that owns all live tiles
//! (`TileStore`).
//!
//! Data flows into this layer from the persistence service (JSON snapshot)
//! and from the interaction layer (mutations). Insertion order is paint
//! order; the store never reorders tiles on update.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH};
use crate::geom::{Point, Size};
use crate::style::{BroadcastStyle, TextStyle};

/// Unique identifier for a tile.
pub type TileId = Uuid;

/// An image tile as stored in the canvas and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Unique identifier, stable for the tile's lifetime.
    pub id: TileId,
    /// Displayable image reference (URL or `data:` URL). Never inspected.
    #[serde(alias = "url")]
    pub image_ref: String,
    /// Caption shown under the image; may be empty.
    #[serde(default)]
    pub caption: String,
    /// Accessibility text for the image.
    #[serde(default)]
    pub alt_text: String,
    /// Top-left corner in canvas-local pixels. May be negative.
    #[serde(default)]
    pub position: Point,
    /// Dimensions, never below the minimum tile size.
    #[serde(default = "default_size", deserialize_with = "deserialize_clamped_size")]
    size: Size,
    /// Caption styling.
    #[serde(default)]
    pub text_style: TextStyle,
}

fn default_size() -> Size {
    Size::new(DEFAULT_TILE_WIDTH, DEFAULT_TILE_HEIGHT)
}

fn deserialize_clamped_size<'de, D>(deserializer: D) -> Result<Size, D::Error>
where
    D: Deserializer<'de>,
{
    Size::deserialize(deserializer).map(Size::clamped)
}

impl Tile {
    /// Build a tile from an intake descriptor with default size and style.
    #[must_use]
    pub fn from_descriptor(descriptor: TileDescriptor, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_ref: descriptor.image_ref,
            caption: descriptor.caption,
            alt_text: descriptor.alt_text,
            position,
            size: default_size(),
            text_style: TextStyle::default(),
        }
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the size, clamping to the minimum tile size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size.clamped();
    }
}

/// What the upload intake hands to the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDescriptor {
    pub image_ref: String,
    pub caption: String,
    pub alt_text: String,
}

/// Sparse update for a tile. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Clamped to the minimum tile size when merged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

impl TilePatch {
    /// Merge this patch into `tile`.
    pub fn apply_to(&self, tile: &mut Tile) {
        if let Some(ref caption) = self.caption {
            tile.caption.clone_from(caption);
        }
        if let Some(ref alt) = self.alt_text {
            tile.alt_text.clone_from(alt);
        }
        if let Some(position) = self.position {
            tile.position = position;
        }
        if let Some(size) = self.size {
            tile.set_size(size);
        }
        if let Some(ref style) = self.text_style {
            tile.text_style = style.clone();
        }
    }
}

/// Ordered in-memory store of tiles.
#[derive(Debug, Clone, Default)]
pub struct TileStore {
    tiles: Vec<Tile>,
}

impl TileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    /// Insert a tile. An existing tile with the same `id` is replaced in place,
    /// otherwise the tile is appended.
    pub fn insert(&mut self, tile: Tile) {
        match self.position_of(&tile.id) {
            Some(idx) => self.tiles[idx] = tile,
            None => self.tiles.push(tile),
        }
    }

    /// Remove a tile by id, returning it if it was present.
    pub fn remove(&mut self, id: &TileId) -> Option<Tile> {
        let idx = self.position_of(id)?;
        Some(self.tiles.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == *id)
    }

    pub fn get_mut(&mut self, id: &TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == *id)
    }

    /// Apply a partial update to an existing tile. Returns false if the tile doesn't exist.
    pub fn apply_patch(&mut self, id: &TileId, patch: &TilePatch) -> bool {
        let Some(tile) = self.get_mut(id) else {
            return false;
        };
        patch.apply_to(tile);
        true
    }

    /// Overwrite the caption style of every tile. Geometry, caption and image are untouched.
    pub fn apply_style_to_all(&mut self, style: &BroadcastStyle) {
        for tile in &mut self.tiles {
            tile.text_style.apply(style);
        }
    }

    /// Replace all tiles with a snapshot. Later duplicates of an id overwrite
    /// the earlier record but keep its slot.
    pub fn load_snapshot(&mut self, tiles: Vec<Tile>) {
        self.tiles.clear();
        for tile in tiles {
            self.insert(tile);
        }
    }

    /// All tiles in paint order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The most recently appended tile.
    #[must_use]
    pub fn last(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    /// Tile ids in paint order.
    #[must_use]
    pub fn ids(&self) -> Vec<TileId> {
        self.tiles.iter().map(|t| t.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn position_of(&self, id: &TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == *id)
    }
}
