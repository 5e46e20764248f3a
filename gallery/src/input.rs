//! Input model: buttons, tile parts, the per-tile gesture state, and pointer capture.
//!
//! `Interaction` is the gesture a tile is tracking between pointer-down and
//! pointer-up. It carries everything needed to compute the next position or
//! size from a pointer tick, plus the pre-gesture geometry so a gesture can
//! be cancelled.
//!
//! Move and up events must keep arriving after the pointer leaves the tile,
//! so every gesture acquires a surface-wide listener registration through
//! `PointerCapture` and holds it in a `GestureScope`. The scope is consumed
//! by `GestureScope::end`, so a registration can only be released once.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geom::{Point, Size};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
    /// Back, forward, or any other code the browser reports.
    Other(i16),
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape" || self.0 == "Esc"
    }
}

/// Which part of a tile a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TilePart {
    Body,
    ResizeHandle,
    EditButton,
}

/// Gesture state for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The tile follows the pointer.
    Dragging {
        /// Pointer position minus tile origin at pointer-down.
        offset: Point,
        /// Tile origin at pointer-down, restored on cancel.
        origin: Point,
    },
    /// The tile grows or shrinks with the pointer.
    Resizing {
        /// Pointer position at the previous tick.
        last_pointer: Point,
        /// Tile size at pointer-down, restored on cancel.
        orig_size: Size,
    },
}

impl Interaction {
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Handle for one surface-wide move/up listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureId(pub u64);

/// Registers and deregisters pointer listeners on the whole surface.
pub trait PointerCapture {
    /// Start delivering move/up events for a new gesture.
    fn acquire(&mut self) -> CaptureId;

    /// Stop delivering events for `id`.
    fn release(&mut self, id: CaptureId);
}

/// Disposer for a gesture's listener registration.
///
/// Created on gesture start and consumed by `end` on the terminating
/// pointer-up (or cancel).
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a gesture scope must be ended to release its listeners"]
pub struct GestureScope {
    id: CaptureId,
}

impl GestureScope {
    /// Acquire listeners for a new gesture.
    pub fn begin(capture: &mut dyn PointerCapture) -> Self {
        Self { id: capture.acquire() }
    }

    #[must_use]
    pub fn id(&self) -> CaptureId {
        self.id
    }

    /// Release the listeners. Consumes the scope.
    pub fn end(self, capture: &mut dyn PointerCapture) {
        capture.release(self.id);
    }
}

/// In-memory `PointerCapture` that tracks live registrations.
///
/// Headless hosts use it directly; the browser host wraps DOM listeners
/// around the same bookkeeping.
#[derive(Debug, Default)]
pub struct CaptureLedger {
    next: u64,
    live: Vec<CaptureId>,
    acquired_total: u64,
    released_total: u64,
}

impl CaptureLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations not yet released.
    #[must_use]
    pub fn live(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn acquired_total(&self) -> u64 {
        self.acquired_total
    }

    #[must_use]
    pub fn released_total(&self) -> u64 {
        self.released_total
    }

    #[must_use]
    pub fn is_live(&self, id: CaptureId) -> bool {
        self.live.contains(&id)
    }
}

impl PointerCapture for CaptureLedger {
    fn acquire(&mut self) -> CaptureId {
        self.next += 1;
        let id = CaptureId(self.next);
        self.live.push(id);
        self.acquired_total += 1;
        id
    }

    fn release(&mut self, id: CaptureId) {
        let before = self.live.len();
        self.live.retain(|live| *live != id);
        if self.live.len() < before {
            self.released_total += 1;
        } else {
            tracing::warn!(capture = id.0, "release of unknown pointer capture");
        }
    }
}
