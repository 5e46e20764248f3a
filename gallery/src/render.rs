//! View model: a read-only projection of the surface into CSS-ready records.
//!
//! The host binds these records to the DOM. Nothing here mutates state, and
//! every value a template needs (pixel offsets, cursor, stacking, caption
//! styling) is computed here so the host stays a dumb binding layer.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{Z_RAISED, Z_RESTING};
use crate::doc::{Tile, TileId};
use crate::input::{Interaction, PointerCapture};
use crate::ramp::Ramp;
use crate::style::TextAlign;
use crate::surface::{CanvasSurface, SurfaceOptions, TileSink};

/// Caption shown when a tile has none.
pub const EMPTY_CAPTION: &str = "No caption available";

/// What the canvas shows.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceView {
    Empty(EmptyState),
    Tiles(Vec<TileView>),
}

/// Call to action shown on an empty canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
    pub action_label: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No images uploaded yet",
            hint: "Add images to visualize your team's goals and vision",
            action_label: "Upload an image",
        }
    }
}

/// One absolutely positioned tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub id: TileId,
    pub image_ref: String,
    pub alt_text: String,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub cursor: &'static str,
    pub z_index: i32,
    pub box_shadow: String,
    pub caption: String,
    pub font_weight: u16,
    pub color: String,
    pub text_align: TextAlign,
    pub caption_background: String,
    /// Present only on the tile whose editor is open.
    pub popover: Option<PopoverView>,
}

impl TileView {
    /// Inline style for the tile container.
    #[must_use]
    pub fn container_style(&self) -> String {
        format!(
            "left: {}px; top: {}px; width: {}px; height: {}px; cursor: {}; z-index: {};",
            self.left, self.top, self.width, self.height, self.cursor, self.z_index
        )
    }

    /// Inline style for the caption paragraph.
    #[must_use]
    pub fn caption_style(&self) -> String {
        format!(
            "font-weight: {}; color: {}; text-align: {}; background-color: {};",
            self.font_weight,
            self.color,
            self.text_align.as_css(),
            self.caption_background
        )
    }
}

/// Contents of an open style editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopoverView {
    pub caption_draft: String,
    pub bold_active: bool,
    pub align_active: TextAlign,
    pub foreground_gradient: String,
    pub background_gradient: String,
    pub active_slider: Option<Ramp>,
    pub show_broadcast: bool,
}

/// Project the surface into its view.
#[must_use]
pub fn view<C: PointerCapture, S: TileSink>(surface: &CanvasSurface<C, S>) -> SurfaceView {
    let tiles = surface.tiles();
    if tiles.is_empty() {
        return SurfaceView::Empty(EmptyState::default());
    }
    let editor = surface.editor_tile();
    let views = tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let editing = editor == Some(tile.id);
            let popover = editing.then(|| popover_view(tile, surface.active_slider(), surface.can_broadcast()));
            tile_view(tile, index, surface.interaction(tile.id), popover)
        })
        .collect();
    SurfaceView::Tiles(views)
}

/// Inline style for the clipping viewport.
#[must_use]
pub fn viewport_style(options: &SurfaceOptions) -> String {
    format!("position: relative; height: {}px; overflow: hidden;", options.viewport_height)
}

fn tile_view(tile: &Tile, index: usize, interaction: Interaction, popover: Option<PopoverView>) -> TileView {
    let size = tile.size();
    let style = &tile.text_style;
    let raised = interaction.is_active() || popover.is_some();
    TileView {
        id: tile.id,
        image_ref: tile.image_ref.clone(),
        alt_text: if tile.alt_text.is_empty() { format!("Image {}", index + 1) } else { tile.alt_text.clone() },
        left: tile.position.x,
        top: tile.position.y,
        width: size.width,
        height: size.height,
        cursor: if matches!(interaction, Interaction::Dragging { .. }) { "grabbing" } else { "grab" },
        z_index: if raised { Z_RAISED } else { Z_RESTING },
        box_shadow: style.shadow().to_owned(),
        caption: if tile.caption.is_empty() { EMPTY_CAPTION.to_owned() } else { tile.caption.clone() },
        font_weight: if style.is_bold { 700 } else { 500 },
        color: style.color.clone(),
        text_align: style.text_align,
        caption_background: style.background_color().to_owned(),
        popover,
    }
}

fn popover_view(tile: &Tile, active_slider: Option<Ramp>, can_broadcast: bool) -> PopoverView {
    PopoverView {
        caption_draft: tile.caption.clone(),
        bold_active: tile.text_style.is_bold,
        align_active: tile.text_style.text_align,
        foreground_gradient: Ramp::Foreground.gradient_css(),
        background_gradient: Ramp::Background.gradient_css(),
        active_slider,
        show_broadcast: can_broadcast,
    }
}
