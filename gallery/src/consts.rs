//! Shared numeric constants for the gallery crate.

// ── Tile geometry ───────────────────────────────────────────────

/// Smallest width a tile may be resized to, in CSS pixels.
pub const MIN_TILE_WIDTH: f64 = 150.0;

/// Smallest height a tile may be resized to, in CSS pixels.
pub const MIN_TILE_HEIGHT: f64 = 100.0;

/// Width of a freshly uploaded tile.
pub const DEFAULT_TILE_WIDTH: f64 = 300.0;

/// Height of a freshly uploaded tile.
pub const DEFAULT_TILE_HEIGHT: f64 = 180.0;

// ── Layout ──────────────────────────────────────────────────────

/// Position of the first tile on an empty canvas (both axes).
pub const FIRST_SLOT_OFFSET: f64 = 20.0;

/// Horizontal step from the last tile to a newly added one.
pub const SLOT_STRIDE_X: f64 = 310.0;

/// Fixed height of the clipping viewport.
pub const VIEWPORT_HEIGHT_PX: f64 = 400.0;

/// Paint order for a tile that is idle.
pub const Z_RESTING: i32 = 1;

/// Paint order for a tile with an active gesture or open editor.
pub const Z_RAISED: i32 = 10;

// ── Hit-testing ─────────────────────────────────────────────────

/// Side of the square resize handle in the bottom-right corner.
pub const RESIZE_HANDLE_PX: f64 = 16.0;

/// Side of the square style-edit button.
pub const EDIT_BUTTON_PX: f64 = 20.0;

/// Inset of the style-edit button from the tile's top-right corner.
pub const EDIT_BUTTON_INSET_PX: f64 = 8.0;

// ── Color ramps ─────────────────────────────────────────────────

/// Width of each pinned zone at either end of a ramp, as a ratio.
pub const RAMP_PIN_ZONE: f64 = 0.05;

// ── Upload intake ───────────────────────────────────────────────

/// Largest file accepted by the data-URL intake (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
