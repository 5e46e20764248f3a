//! Tile interaction engine: drag, resize and style-edit dispatch.
//!
//! A pointer-down on a tile is classified into exactly one outcome. Drag and
//! resize become a `TileGesture`, which owns the tile's `Interaction` state
//! and the listener registration for the gesture's lifetime. The gesture
//! writes every pointer tick straight into the tile record, so the canvas
//! always holds the latest geometry.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use crate::doc::{Tile, TileId};
use crate::geom::Point;
use crate::input::{Button, GestureScope, Interaction, PointerCapture, TilePart};

/// What a pointer-down on a tile asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    StartDrag,
    StartResize,
    ToggleEditor,
    Ignored,
}

/// Classify a pointer-down. Only the primary button does anything; the
/// resize handle is checked before the edit button and the body.
#[must_use]
pub fn classify(button: Button, part: TilePart) -> PointerDown {
    if button != Button::Primary {
        return PointerDown::Ignored;
    }
    match part {
        TilePart::ResizeHandle => PointerDown::StartResize,
        TilePart::EditButton => PointerDown::ToggleEditor,
        TilePart::Body => PointerDown::StartDrag,
    }
}

/// An in-progress drag or resize on one tile.
#[derive(Debug)]
pub struct TileGesture {
    tile_id: TileId,
    interaction: Interaction,
    scope: GestureScope,
}

impl TileGesture {
    /// Start a drag: remember where the pointer grabbed the tile.
    pub fn drag(tile: &Tile, pointer: Point, capture: &mut dyn PointerCapture) -> Self {
        let interaction = Interaction::Dragging { offset: pointer.sub(tile.position), origin: tile.position };
        Self { tile_id: tile.id, interaction, scope: GestureScope::begin(capture) }
    }

    /// Start a resize from the bottom-right handle.
    pub fn resize(tile: &Tile, pointer: Point, capture: &mut dyn PointerCapture) -> Self {
        let interaction = Interaction::Resizing { last_pointer: pointer, orig_size: tile.size() };
        Self { tile_id: tile.id, interaction, scope: GestureScope::begin(capture) }
    }

    #[must_use]
    pub fn tile_id(&self) -> TileId {
        self.tile_id
    }

    #[must_use]
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging { .. })
    }

    /// Apply one pointer-move tick. Returns true if the tile changed.
    ///
    /// Dragging places the tile at `pointer - offset` without any bounds.
    /// Resizing adds the delta since the previous tick, clamps, and advances
    /// the recorded pointer.
    pub fn track(&mut self, tile: &mut Tile, pointer: Point) -> bool {
        match &mut self.interaction {
            Interaction::Idle => false,
            Interaction::Dragging { offset, .. } => {
                let next = pointer.sub(*offset);
                let changed = next != tile.position;
                tile.position = next;
                changed
            }
            Interaction::Resizing { last_pointer, .. } => {
                let before = tile.size();
                tile.set_size(before.resized_by(pointer.sub(*last_pointer)));
                *last_pointer = pointer;
                tile.size() != before
            }
        }
    }

    /// End the gesture on pointer-up and release its listeners.
    pub fn finish(self, capture: &mut dyn PointerCapture) {
        self.scope.end(capture);
    }

    /// Abort the gesture, restoring the pre-gesture geometry, and release
    /// its listeners. Returns true if the tile changed.
    pub fn cancel(self, tile: &mut Tile, capture: &mut dyn PointerCapture) -> bool {
        let changed = match self.interaction {
            Interaction::Idle => false,
            Interaction::Dragging { origin, .. } => {
                let changed = tile.position != origin;
                tile.position = origin;
                changed
            }
            Interaction::Resizing { orig_size, .. } => {
                let changed = tile.size() != orig_size;
                tile.set_size(orig_size);
                changed
            }
        };
        self.scope.end(capture);
        changed
    }
}
