//! Interactive image-tile canvas for the vision board.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! tile collection and every interaction on it: dragging and resizing tiles,
//! the per-tile caption style editor, broadcasting one tile's style to all
//! tiles, and turning uploaded files into new tiles. The host layer only wires
//! DOM events to the surface, binds the view model, and forwards the resulting
//! [`surface::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`surface`] | The canvas: tile store, gesture and editor dispatch |
//! | [`tile`] | Pointer-down classification and drag/resize gestures |
//! | [`popover`] | Caption/style editor and color sliders |
//! | [`ramp`] | Slider position to color mapping |
//! | [`style`] | Caption style record and broadcast validation |
//! | [`doc`] | Tile records, patches, and the ordered store |
//! | [`input`] | Buttons, keys, interaction state, pointer capture |
//! | [`hit`] | Hit-testing tile parts |
//! | [`render`] | View model projected from the surface |
//! | [`intake`] | Upload decoding into tile descriptors |
//! | [`geom`] | Points, sizes, rectangles |
//! | [`consts`] | Shared numeric constants (minimum sizes, layout, limits) |

pub mod consts;
pub mod doc;
pub mod geom;
pub mod hit;
#[cfg(target_arch = "wasm32")]
pub mod host;
pub mod input;
pub mod intake;
pub mod popover;
pub mod ramp;
pub mod render;
pub mod style;
pub mod surface;
pub mod tile;
