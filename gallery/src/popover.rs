//! Style popover: the caption/style editor overlay owned by one tile.
//!
//! Every edit writes straight through to the tile record; the popover keeps
//! no draft copy. Color sliders are continuous: a slider drag acquires the
//! same surface-wide pointer capture a tile gesture does, and each tick maps
//! the pointer's x-offset through a `Ramp`.

#[cfg(test)]
#[path = "popover_test.rs"]
mod popover_test;

use crate::doc::{Tile, TileId};
use crate::input::{GestureScope, PointerCapture};
use crate::ramp::{Color, Ramp};
use crate::style::{BroadcastStyle, StyleError, TextAlign};

/// Permission to fan a style out to the whole canvas.
///
/// Only the canvas surface can mint one, and it decides once, at
/// construction, whether it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Broadcaster {
    _private: (),
}

impl Broadcaster {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Horizontal extent of a slider track, in the same frame as the pointer
/// points the surface receives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderTrack {
    pub left: f64,
    pub width: f64,
}

impl SliderTrack {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Color under a pointer at horizontal position `client_x`.
    #[must_use]
    pub fn color_at(&self, ramp: Ramp, client_x: f64) -> Color {
        ramp.map_offset(client_x - self.left, self.width)
    }
}

/// A slider drag in progress.
#[derive(Debug)]
struct ActiveSlider {
    ramp: Ramp,
    track: SliderTrack,
    scope: GestureScope,
}

/// Editor overlay for one tile.
#[derive(Debug)]
pub struct StylePopover {
    tile_id: TileId,
    slider: Option<ActiveSlider>,
}

impl StylePopover {
    #[must_use]
    pub fn open(tile_id: TileId) -> Self {
        Self { tile_id, slider: None }
    }

    #[must_use]
    pub fn tile_id(&self) -> TileId {
        self.tile_id
    }

    /// The ramp being dragged, if a slider gesture is active.
    #[must_use]
    pub fn active_ramp(&self) -> Option<Ramp> {
        self.slider.as_ref().map(|s| s.ramp)
    }

    /// Replace the caption. Returns true if it changed.
    pub fn set_caption(&self, tile: &mut Tile, caption: &str) -> bool {
        if tile.caption == caption {
            return false;
        }
        caption.clone_into(&mut tile.caption);
        true
    }

    pub fn toggle_bold(&self, tile: &mut Tile) {
        tile.text_style.toggle_bold();
    }

    /// Select an alignment. Returns true if it changed.
    pub fn set_align(&self, tile: &mut Tile, align: TextAlign) -> bool {
        let changed = tile.text_style.text_align != align;
        tile.text_style.text_align = align;
        changed
    }

    /// Pick a color with a single click on a slider, without a drag.
    pub fn pick(&self, tile: &mut Tile, ramp: Ramp, track: SliderTrack, client_x: f64) -> bool {
        apply_color(tile, ramp, &track.color_at(ramp, client_x))
    }

    /// Pointer-down on a slider: apply the color under the pointer and start
    /// tracking. A slider drag already in progress is ended first.
    pub fn slider_down(
        &mut self,
        tile: &mut Tile,
        ramp: Ramp,
        track: SliderTrack,
        client_x: f64,
        capture: &mut dyn PointerCapture,
    ) -> bool {
        self.slider_up(capture);
        let changed = self.pick(tile, ramp, track, client_x);
        self.slider = Some(ActiveSlider { ramp, track, scope: GestureScope::begin(capture) });
        changed
    }

    /// Pointer-move during a slider drag. No-op when no slider is active.
    pub fn slider_move(&self, tile: &mut Tile, client_x: f64) -> bool {
        let Some(ref slider) = self.slider else {
            return false;
        };
        apply_color(tile, slider.ramp, &slider.track.color_at(slider.ramp, client_x))
    }

    /// Pointer-up ends the slider drag. Returns true if one was active.
    pub fn slider_up(&mut self, capture: &mut dyn PointerCapture) -> bool {
        match self.slider.take() {
            Some(slider) => {
                slider.scope.end(capture);
                true
            }
            None => false,
        }
    }

    /// Package the tile's current style for broadcast.
    ///
    /// # Errors
    ///
    /// Returns `StyleError::BroadcastUnavailable` when the canvas has no
    /// broadcast capability, or a validation error from the packaged record.
    pub fn broadcast(&self, tile: &Tile, broadcaster: Option<&Broadcaster>) -> Result<BroadcastStyle, StyleError> {
        if broadcaster.is_none() {
            return Err(StyleError::BroadcastUnavailable);
        }
        let style = tile.text_style.broadcast();
        style.validate()?;
        Ok(style)
    }

    /// Tear the popover down, releasing any slider capture.
    pub fn close(mut self, capture: &mut dyn PointerCapture) {
        self.slider_up(capture);
    }
}

fn apply_color(tile: &mut Tile, ramp: Ramp, color: &Color) -> bool {
    let css = color.to_string();
    let style = &mut tile.text_style;
    match ramp {
        Ramp::Foreground => {
            if style.color == css {
                return false;
            }
            style.set_color(css);
        }
        Ramp::Background => {
            if style.background_color() == css {
                return false;
            }
            style.set_background_color(css);
        }
    }
    true
}
