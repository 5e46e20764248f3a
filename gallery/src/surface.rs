//! Canvas surface: the ordered tile collection and everything that mutates it.
//!
//! DESIGN
//! ======
//! `CanvasSurface` is the single owner of the tile store, the active gesture,
//! the open style editor and the upload dialog flag. Every input handler
//! returns a list of `Action`s for the host to process; the surface never
//! touches the DOM itself.
//!
//! Invariants:
//! - at most one gesture (tile drag/resize or slider drag) is live at a time;
//! - at most one style editor is open, and while it is open a canvas
//!   pointer-down only closes it;
//! - committed changes are handed to the `TileSink`. Pointer ticks inside a
//!   gesture are not committed; the terminating pointer-up is.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::consts::{FIRST_SLOT_OFFSET, SLOT_STRIDE_X, VIEWPORT_HEIGHT_PX};
use crate::doc::{Tile, TileDescriptor, TileId, TilePatch, TileStore};
use crate::geom::Point;
use crate::hit::{self, Hit};
use crate::input::{Button, CaptureLedger, Interaction, Key, PointerCapture, TilePart};
use crate::popover::{Broadcaster, SliderTrack, StylePopover};
use crate::ramp::Ramp;
use crate::style::{BroadcastStyle, StyleError, TextAlign};
use crate::tile::{PointerDown, TileGesture, classify};

/// Actions returned from surface operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TileCreated(Tile),
    TileUpdated { id: TileId, fields: TilePatch },
    TileDeleted { id: TileId },
    StyleBroadcast(BroadcastStyle),
    SetCursor(String),
    Notice(Notice),
    RenderNeeded,
}

/// User-visible messages raised by the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    StyleAppliedToAll,
    BroadcastUnavailable,
    InvalidStyle(String),
}

impl Notice {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::StyleAppliedToAll => "Style has been applied to all images!",
            Self::BroadcastUnavailable => "Applying a style to all images is not available here.",
            Self::InvalidStyle(reason) => reason.as_str(),
        }
    }
}

/// Persistence collaborator. Receives the whole collection after every
/// committed change; delivery is fire-and-forget.
pub trait TileSink {
    fn persist(&mut self, tiles: &[Tile]);
}

/// Sink that drops every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl TileSink for NullSink {
    fn persist(&mut self, _tiles: &[Tile]) {}
}

/// Construction-time settings for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    /// Whether tiles may fan their style out to the whole canvas.
    pub broadcast_enabled: bool,
    /// Height of the clipping viewport in CSS pixels.
    pub viewport_height: f64,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { broadcast_enabled: true, viewport_height: VIEWPORT_HEIGHT_PX }
    }
}

/// The tile canvas.
#[derive(Debug)]
pub struct CanvasSurface<C = CaptureLedger, S = NullSink> {
    store: TileStore,
    options: SurfaceOptions,
    broadcaster: Option<Broadcaster>,
    gesture: Option<TileGesture>,
    editor: Option<StylePopover>,
    upload_open: bool,
    capture: C,
    sink: S,
}

impl CanvasSurface {
    /// A surface with in-memory capture bookkeeping and no persistence.
    #[must_use]
    pub fn headless(options: SurfaceOptions) -> Self {
        Self::new(options, CaptureLedger::new(), NullSink)
    }
}

impl<C: PointerCapture, S: TileSink> CanvasSurface<C, S> {
    #[must_use]
    pub fn new(options: SurfaceOptions, capture: C, sink: S) -> Self {
        Self {
            store: TileStore::new(),
            broadcaster: options.broadcast_enabled.then(Broadcaster::new),
            options,
            gesture: None,
            editor: None,
            upload_open: false,
            capture,
            sink,
        }
    }

    // =============================================================
    // Data inputs
    // =============================================================

    /// Hydrate from a stored snapshot. Any live gesture or editor is torn
    /// down first. Nothing is persisted.
    pub fn load_snapshot(&mut self, tiles: Vec<Tile>) {
        self.abandon_gesture();
        self.close_editor_quietly();
        self.store.load_snapshot(tiles);
    }

    /// Append a tile built from `descriptor`, one slot to the right of the
    /// last tile.
    pub fn add(&mut self, descriptor: TileDescriptor) -> Vec<Action> {
        let position = self.next_slot();
        let tile = Tile::from_descriptor(descriptor, position);
        tracing::debug!(tile = %tile.id, x = position.x, y = position.y, "tile added");
        self.store.insert(tile.clone());
        self.commit();
        vec![Action::TileCreated(tile), Action::RenderNeeded]
    }

    /// Merge `patch` into a tile. Unknown ids are ignored.
    pub fn update(&mut self, id: TileId, patch: TilePatch) -> Vec<Action> {
        if !self.store.apply_patch(&id, &patch) {
            return Vec::new();
        }
        self.commit();
        vec![Action::TileUpdated { id, fields: patch }, Action::RenderNeeded]
    }

    /// Remove a tile. Unknown ids are ignored.
    pub fn remove(&mut self, id: TileId) -> Vec<Action> {
        if self.gesture.as_ref().is_some_and(|g| g.tile_id() == id) {
            self.abandon_gesture();
        }
        if self.editor_tile() == Some(id) {
            self.close_editor_quietly();
        }
        if self.store.remove(&id).is_none() {
            return Vec::new();
        }
        tracing::debug!(tile = %id, remaining = self.store.len(), "tile removed");
        self.commit();
        vec![Action::TileDeleted { id }, Action::RenderNeeded]
    }

    /// Copy `style` onto every tile in one pass.
    ///
    /// # Errors
    ///
    /// Returns the validation error when `style` is malformed; no tile is
    /// touched in that case.
    pub fn broadcast_style(&mut self, style: &BroadcastStyle) -> Result<Vec<Action>, StyleError> {
        style.validate()?;
        self.store.apply_style_to_all(style);
        tracing::debug!(tiles = self.store.len(), "style broadcast");
        self.commit();
        Ok(vec![Action::StyleBroadcast(style.clone()), Action::RenderNeeded])
    }

    // =============================================================
    // Pointer and keyboard input
    // =============================================================

    /// Which tile part is under `pointer`, honoring the raised tile.
    #[must_use]
    pub fn target_at(&self, pointer: Point) -> Option<Hit> {
        hit::hit_test(pointer, self.store.tiles(), self.raised_tile())
    }

    /// Pointer-down on the canvas. `target` is the tile part that was hit,
    /// or `None` for empty canvas.
    ///
    /// All pointer points are in surface coordinates: origin at the top-left
    /// of the viewport, the frame tile positions are stored in.
    pub fn on_pointer_down(&mut self, pointer: Point, button: Button, target: Option<(TileId, TilePart)>) -> Vec<Action> {
        if self.gesture.is_some() {
            return Vec::new();
        }
        if self.editor.is_some() {
            if button != Button::Primary {
                return Vec::new();
            }
            return self.close_editor();
        }
        let Some((id, part)) = target else {
            return Vec::new();
        };
        let Some(tile) = self.store.get(&id) else {
            return Vec::new();
        };

        match classify(button, part) {
            PointerDown::StartDrag => {
                self.gesture = Some(TileGesture::drag(tile, pointer, &mut self.capture));
                vec![Action::SetCursor("grabbing".into()), Action::RenderNeeded]
            }
            PointerDown::StartResize => {
                self.gesture = Some(TileGesture::resize(tile, pointer, &mut self.capture));
                vec![Action::SetCursor("se-resize".into()), Action::RenderNeeded]
            }
            PointerDown::ToggleEditor => self.open_editor(id),
            PointerDown::Ignored => Vec::new(),
        }
    }

    /// Pointer-move anywhere on the surface, in surface coordinates.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        if let Some(gesture) = self.gesture.as_mut() {
            let id = gesture.tile_id();
            let Some(tile) = self.store.get_mut(&id) else {
                return Vec::new();
            };
            if !gesture.track(tile, pointer) {
                return Vec::new();
            }
            let fields = if gesture.is_dragging() {
                TilePatch { position: Some(tile.position), ..TilePatch::default() }
            } else {
                TilePatch { size: Some(tile.size()), ..TilePatch::default() }
            };
            return vec![Action::TileUpdated { id, fields }, Action::RenderNeeded];
        }
        match self.editor_tile() {
            Some(id) => self.slider_move(id, pointer.x),
            None => Vec::new(),
        }
    }

    /// Pointer-up anywhere on the surface. Ends whichever gesture is live.
    pub fn on_pointer_up(&mut self, _pointer: Point) -> Vec<Action> {
        if let Some(gesture) = self.gesture.take() {
            let id = gesture.tile_id();
            gesture.finish(&mut self.capture);
            tracing::debug!(tile = %id, "gesture finished");
            self.commit();
            return vec![Action::SetCursor("grab".into()), Action::RenderNeeded];
        }
        match self.editor_tile() {
            Some(id) => self.slider_up(id),
            None => Vec::new(),
        }
    }

    /// Escape cancels a live gesture, restoring the pre-gesture geometry,
    /// or closes the open editor.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if !key.is_escape() {
            return Vec::new();
        }
        let Some(gesture) = self.gesture.take() else {
            return if self.editor.is_some() { self.close_editor() } else { Vec::new() };
        };

        let id = gesture.tile_id();
        let mut actions = Vec::new();
        match self.store.get_mut(&id) {
            Some(tile) => {
                if gesture.cancel(tile, &mut self.capture) {
                    let fields = TilePatch {
                        position: Some(tile.position),
                        size: Some(tile.size()),
                        ..TilePatch::default()
                    };
                    actions.push(Action::TileUpdated { id, fields });
                }
            }
            None => gesture.finish(&mut self.capture),
        }
        tracing::debug!(tile = %id, "gesture cancelled");
        actions.push(Action::SetCursor("grab".into()));
        actions.push(Action::RenderNeeded);
        actions
    }

    // =============================================================
    // Style editor
    // =============================================================

    /// Open the editor on `id`, closing any other editor. Toggles it shut
    /// if it is already open on `id`.
    pub fn open_editor(&mut self, id: TileId) -> Vec<Action> {
        if self.editor_tile() == Some(id) {
            return self.close_editor();
        }
        if self.store.get(&id).is_none() {
            return Vec::new();
        }
        self.close_editor_quietly();
        self.editor = Some(StylePopover::open(id));
        vec![Action::RenderNeeded]
    }

    /// Close the open editor, committing a slider drag it was tracking.
    pub fn close_editor(&mut self) -> Vec<Action> {
        let Some(editor) = self.editor.take() else {
            return Vec::new();
        };
        let was_sliding = editor.active_ramp().is_some();
        editor.close(&mut self.capture);
        if was_sliding {
            self.commit();
        }
        vec![Action::RenderNeeded]
    }

    pub fn set_caption(&mut self, id: TileId, caption: &str) -> Vec<Action> {
        let Some((editor, tile)) = self.editor_target(id) else {
            return Vec::new();
        };
        if !editor.set_caption(tile, caption) {
            return Vec::new();
        }
        let fields = TilePatch { caption: Some(caption.to_owned()), ..TilePatch::default() };
        self.commit();
        vec![Action::TileUpdated { id, fields }, Action::RenderNeeded]
    }

    pub fn toggle_bold(&mut self, id: TileId) -> Vec<Action> {
        let Some((editor, tile)) = self.editor_target(id) else {
            return Vec::new();
        };
        editor.toggle_bold(tile);
        self.commit_style(id)
    }

    pub fn set_align(&mut self, id: TileId, align: TextAlign) -> Vec<Action> {
        let Some((editor, tile)) = self.editor_target(id) else {
            return Vec::new();
        };
        if !editor.set_align(tile, align) {
            return Vec::new();
        }
        self.commit_style(id)
    }

    /// Pointer-down on one of the editor's color sliders.
    pub fn slider_down(&mut self, id: TileId, ramp: Ramp, track: SliderTrack, client_x: f64) -> Vec<Action> {
        if self.gesture.is_some() || self.editor_tile() != Some(id) {
            return Vec::new();
        }
        let (Some(editor), Some(tile)) = (self.editor.as_mut(), self.store.get_mut(&id)) else {
            return Vec::new();
        };
        if !editor.slider_down(tile, ramp, track, client_x, &mut self.capture) {
            return vec![Action::RenderNeeded];
        }
        vec![Action::TileUpdated { id, fields: style_patch(tile) }, Action::RenderNeeded]
    }

    pub fn slider_move(&mut self, id: TileId, client_x: f64) -> Vec<Action> {
        let Some((editor, tile)) = self.editor_target(id) else {
            return Vec::new();
        };
        if !editor.slider_move(tile, client_x) {
            return Vec::new();
        }
        vec![Action::TileUpdated { id, fields: style_patch(tile) }, Action::RenderNeeded]
    }

    pub fn slider_up(&mut self, id: TileId) -> Vec<Action> {
        if self.editor_tile() != Some(id) {
            return Vec::new();
        }
        let Some(editor) = self.editor.as_mut() else {
            return Vec::new();
        };
        if !editor.slider_up(&mut self.capture) {
            return Vec::new();
        }
        self.commit();
        vec![Action::RenderNeeded]
    }

    /// Apply the editor tile's style to every tile.
    ///
    /// On success the editor closes and a confirmation notice is raised.
    /// Without broadcast capability, or with a malformed style, only a
    /// notice is returned.
    pub fn request_broadcast(&mut self, id: TileId) -> Vec<Action> {
        let style = {
            let Some(editor) = self.editor.as_ref().filter(|e| e.tile_id() == id) else {
                return Vec::new();
            };
            let Some(tile) = self.store.get(&id) else {
                return Vec::new();
            };
            editor.broadcast(tile, self.broadcaster.as_ref())
        };

        let result = style.and_then(|style| self.broadcast_style(&style));
        match result {
            Ok(mut actions) => {
                actions.extend(self.close_editor());
                actions.push(Action::Notice(Notice::StyleAppliedToAll));
                actions
            }
            Err(StyleError::BroadcastUnavailable) => {
                tracing::warn!(tile = %id, "style broadcast requested but unavailable");
                vec![Action::Notice(Notice::BroadcastUnavailable)]
            }
            Err(e) => {
                tracing::warn!(tile = %id, error = %e, "style broadcast rejected");
                vec![Action::Notice(Notice::InvalidStyle(e.to_string()))]
            }
        }
    }

    // =============================================================
    // Upload dialog
    // =============================================================

    pub fn open_upload(&mut self) -> Vec<Action> {
        if self.upload_open {
            return Vec::new();
        }
        self.upload_open = true;
        vec![Action::RenderNeeded]
    }

    pub fn close_upload(&mut self) -> Vec<Action> {
        if !self.upload_open {
            return Vec::new();
        }
        self.upload_open = false;
        vec![Action::RenderNeeded]
    }

    /// Add a decoded upload and close the dialog.
    pub fn commit_upload(&mut self, descriptor: TileDescriptor) -> Vec<Action> {
        self.upload_open = false;
        self.add(descriptor)
    }

    // =============================================================
    // Queries
    // =============================================================

    /// All tiles in paint order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        self.store.tiles()
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.store.get(&id)
    }

    #[must_use]
    pub fn options(&self) -> SurfaceOptions {
        self.options
    }

    #[must_use]
    pub fn can_broadcast(&self) -> bool {
        self.broadcaster.is_some()
    }

    #[must_use]
    pub fn is_upload_open(&self) -> bool {
        self.upload_open
    }

    /// The tile whose editor is open.
    #[must_use]
    pub fn editor_tile(&self) -> Option<TileId> {
        self.editor.as_ref().map(StylePopover::tile_id)
    }

    /// The ramp whose slider is being dragged in the open editor.
    #[must_use]
    pub fn active_slider(&self) -> Option<Ramp> {
        self.editor.as_ref().and_then(StylePopover::active_ramp)
    }

    /// Gesture state of one tile; `Idle` for every tile but the one in a gesture.
    #[must_use]
    pub fn interaction(&self, id: TileId) -> Interaction {
        self.gesture
            .as_ref()
            .filter(|g| g.tile_id() == id)
            .map_or(Interaction::Idle, TileGesture::interaction)
    }

    /// The tile painted above the rest: the one being edited, else the one
    /// in a gesture.
    #[must_use]
    pub fn raised_tile(&self) -> Option<TileId> {
        self.editor_tile().or_else(|| self.gesture.as_ref().map(TileGesture::tile_id))
    }

    #[must_use]
    pub fn capture(&self) -> &C {
        &self.capture
    }

    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    // =============================================================
    // Internals
    // =============================================================

    fn next_slot(&self) -> Point {
        match self.store.last() {
            Some(last) => Point::new(last.position.x + SLOT_STRIDE_X, FIRST_SLOT_OFFSET),
            None => Point::new(FIRST_SLOT_OFFSET, FIRST_SLOT_OFFSET),
        }
    }

    fn editor_target(&mut self, id: TileId) -> Option<(&mut StylePopover, &mut Tile)> {
        let editor = self.editor.as_mut().filter(|e| e.tile_id() == id)?;
        let tile = self.store.get_mut(&id)?;
        Some((editor, tile))
    }

    fn commit_style(&mut self, id: TileId) -> Vec<Action> {
        let Some(tile) = self.store.get(&id) else {
            return Vec::new();
        };
        let fields = style_patch(tile);
        self.commit();
        vec![Action::TileUpdated { id, fields }, Action::RenderNeeded]
    }

    fn abandon_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            gesture.finish(&mut self.capture);
        }
    }

    fn close_editor_quietly(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.close(&mut self.capture);
        }
    }

    fn commit(&mut self) {
        self.sink.persist(self.store.tiles());
    }
}

fn style_patch(tile: &Tile) -> TilePatch {
    TilePatch { text_style: Some(tile.text_style.clone()), ..TilePatch::default() }
}
