//! Browser binding for the canvas surface.
//!
//! `DocumentCapture` puts gesture listeners on `document`, so move and up
//! events keep arriving after the pointer leaves the tile. `RestSink` ships
//! committed snapshots to the gallery service.
//!
//! The surface works in surface coordinates: origin at the top-left of the
//! viewport element. Every point handed to it goes through `surface_point`,
//! and slider tracks are measured with `slider_track`, so tile hits and
//! slider offsets agree however the page is scrolled or laid out.
//!
//! Closures handed to the DOM are never dropped while they may be running:
//! a released registration is parked and only freed on the next acquire.

use std::collections::HashMap;
use std::rc::Rc;

use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, MouseEvent, PointerEvent};

use crate::doc::Tile;
use crate::geom::Point;
use crate::input::{CaptureId, PointerCapture};
use crate::popover::SliderTrack;
use crate::surface::TileSink;

/// A pointer event delivered through a gesture capture, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapturedPointer {
    Move(Point),
    Up(Point),
}

type PointerClosure = Closure<dyn FnMut(PointerEvent)>;

struct Listeners {
    on_move: PointerClosure,
    on_up: PointerClosure,
}

/// `PointerCapture` backed by `pointermove`/`pointerup` listeners on `document`.
pub struct DocumentCapture {
    document: Document,
    surface: Element,
    handler: Rc<dyn Fn(CapturedPointer)>,
    next: u64,
    live: HashMap<CaptureId, Listeners>,
    retired: Vec<Listeners>,
}

impl DocumentCapture {
    /// Route captured events to `handler`, relative to `surface`.
    pub fn new(document: Document, surface: Element, handler: Rc<dyn Fn(CapturedPointer)>) -> Self {
        Self { document, surface, handler, next: 0, live: HashMap::new(), retired: Vec::new() }
    }

    fn listen(&self, event: &str, callback: &PointerClosure) {
        if let Err(e) = self
            .document
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event, error = ?e, "failed to add gesture listener");
        }
    }

    fn unlisten(&self, event: &str, callback: &PointerClosure) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event, error = ?e, "failed to remove gesture listener");
        }
    }
}

impl PointerCapture for DocumentCapture {
    fn acquire(&mut self) -> CaptureId {
        self.retired.clear();
        self.next += 1;
        let id = CaptureId(self.next);

        let handler = Rc::clone(&self.handler);
        let surface = self.surface.clone();
        let on_move: PointerClosure = Closure::wrap(Box::new(move |e: PointerEvent| {
            handler(CapturedPointer::Move(surface_point(&surface, &e)));
        }) as Box<dyn FnMut(PointerEvent)>);
        let handler = Rc::clone(&self.handler);
        let surface = self.surface.clone();
        let on_up: PointerClosure = Closure::wrap(Box::new(move |e: PointerEvent| {
            handler(CapturedPointer::Up(surface_point(&surface, &e)));
        }) as Box<dyn FnMut(PointerEvent)>);

        self.listen("pointermove", &on_move);
        self.listen("pointerup", &on_up);
        self.live.insert(id, Listeners { on_move, on_up });
        id
    }

    fn release(&mut self, id: CaptureId) {
        let Some(listeners) = self.live.remove(&id) else {
            tracing::warn!(capture = id.0, "release of unknown pointer capture");
            return;
        };
        self.unlisten("pointermove", &listeners.on_move);
        self.unlisten("pointerup", &listeners.on_up);
        self.retired.push(listeners);
    }
}

/// Translate a mouse or pointer event into `surface` coordinates.
#[must_use]
pub fn surface_point(surface: &Element, e: &MouseEvent) -> Point {
    let rect = surface.get_bounding_client_rect();
    Point::new(f64::from(e.client_x()), f64::from(e.client_y())).sub(Point::new(rect.left(), rect.top()))
}

/// Measure a slider track element in `surface` coordinates.
#[must_use]
pub fn slider_track(track: &Element, surface: &Element) -> SliderTrack {
    let rect = track.get_bounding_client_rect();
    SliderTrack::new(rect.left() - surface.get_bounding_client_rect().left(), rect.width())
}

/// `TileSink` that `PUT`s every committed snapshot to the gallery service.
#[derive(Debug, Clone)]
pub struct RestSink {
    url: String,
}

impl RestSink {
    /// Persist to `{base}/api/gallery?memberId={member_id}`.
    #[must_use]
    pub fn new(base: &str, member_id: &str) -> Self {
        let member: String = js_sys::encode_uri_component(member_id).into();
        Self { url: format!("{}/api/gallery?memberId={member}", base.trim_end_matches('/')) }
    }
}

impl TileSink for RestSink {
    fn persist(&mut self, tiles: &[Tile]) {
        let url = self.url.clone();
        let tiles = tiles.to_vec();
        wasm_bindgen_futures::spawn_local(async move {
            let request = match Request::put(&url).json(&tiles) {
                Ok(request) => request,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode gallery snapshot");
                    return;
                }
            };
            match request.send().await {
                Ok(resp) if (200..300).contains(&resp.status()) => tracing::debug!(tiles = tiles.len(), "gallery persisted"),
                Ok(resp) => tracing::error!(status = resp.status(), "gallery persist rejected"),
                Err(e) => tracing::error!(error = %e, "gallery persist failed"),
            }
        });
    }
}

/// Route `tracing` output to the browser console.
///
/// # Errors
///
/// Returns an error if a logger is already installed.
pub fn init_logging(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_log::init_with_level(level)
}
