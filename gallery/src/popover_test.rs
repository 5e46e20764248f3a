use super::*;
use crate::doc::TileDescriptor;
use crate::geom::Point;
use crate::input::CaptureLedger;
use crate::style::TextStyle;

fn tile() -> Tile {
    Tile::from_descriptor(
        TileDescriptor { image_ref: "img".into(), caption: "before".into(), alt_text: "before".into() },
        Point::new(20.0, 20.0),
    )
}

const TRACK: SliderTrack = SliderTrack { left: 100.0, width: 200.0 };

// =============================================================
// Caption, bold, alignment
// =============================================================

#[test]
fn set_caption_writes_through() {
    let mut t = tile();
    let p = StylePopover::open(t.id);
    assert!(p.set_caption(&mut t, "after"));
    assert_eq!(t.caption, "after");
    assert_eq!(t.alt_text, "before");
    assert!(!p.set_caption(&mut t, "after"));
}

#[test]
fn toggle_bold_flips_tile_style() {
    let mut t = tile();
    let p = StylePopover::open(t.id);
    p.toggle_bold(&mut t);
    assert!(t.text_style.is_bold);
    p.toggle_bold(&mut t);
    assert!(!t.text_style.is_bold);
}

#[test]
fn set_align_is_exclusive() {
    let mut t = tile();
    let p = StylePopover::open(t.id);
    assert!(p.set_align(&mut t, TextAlign::Center));
    assert_eq!(t.text_style.text_align, TextAlign::Center);
    assert!(p.set_align(&mut t, TextAlign::Right));
    assert_eq!(t.text_style.text_align, TextAlign::Right);
    assert!(!p.set_align(&mut t, TextAlign::Right));
}

// =============================================================
// Sliders
// =============================================================

#[test]
fn slider_track_maps_client_x_relative_to_left() {
    assert_eq!(TRACK.color_at(Ramp::Foreground, 105.0), Color::Named("black"));
    assert_eq!(TRACK.color_at(Ramp::Foreground, 200.0).to_string(), "hsl(180, 100%, 50%)");
    assert_eq!(TRACK.color_at(Ramp::Foreground, 50.0), Color::Named("black"));
    assert_eq!(TRACK.color_at(Ramp::Foreground, 900.0), Color::Named("white"));
}

#[test]
fn pick_foreground_sets_text_color_only() {
    let mut t = tile();
    let p = StylePopover::open(t.id);
    assert!(p.pick(&mut t, Ramp::Foreground, TRACK, 200.0));
    assert_eq!(t.text_style.color, "hsl(180, 100%, 50%)");
    assert_eq!(t.text_style.background_color(), TextStyle::default().background_color());
}

#[test]
fn pick_background_recomputes_shadow() {
    let mut t = tile();
    let p = StylePopover::open(t.id);
    assert!(p.pick(&mut t, Ramp::Background, TRACK, 200.0));
    assert_eq!(t.text_style.background_color(), "hsl(180, 70%, 90%)");
    assert_eq!(t.text_style.shadow(), "0 4px 8px hsl(180, 70%, 90%)");
}

#[test]
fn slider_drag_tracks_and_releases() {
    let mut ledger = CaptureLedger::new();
    let mut t = tile();
    let mut p = StylePopover::open(t.id);

    p.slider_down(&mut t, Ramp::Background, TRACK, 101.0, &mut ledger);
    assert_eq!(t.text_style.background_color(), "black");
    assert_eq!(p.active_ramp(), Some(Ramp::Background));
    assert_eq!(ledger.live(), 1);

    assert!(p.slider_move(&mut t, 299.0));
    assert_eq!(t.text_style.background_color(), "white");
    assert_eq!(t.text_style.shadow(), "0 4px 8px white");

    assert!(p.slider_up(&mut ledger));
    assert_eq!(ledger.live(), 0);
    assert!(p.active_ramp().is_none());
    assert!(!p.slider_move(&mut t, 200.0));
    assert_eq!(t.text_style.background_color(), "white");
}

#[test]
fn second_slider_down_releases_first() {
    let mut ledger = CaptureLedger::new();
    let mut t = tile();
    let mut p = StylePopover::open(t.id);
    p.slider_down(&mut t, Ramp::Background, TRACK, 150.0, &mut ledger);
    p.slider_down(&mut t, Ramp::Foreground, TRACK, 150.0, &mut ledger);
    assert_eq!(ledger.live(), 1);
    assert_eq!(p.active_ramp(), Some(Ramp::Foreground));
    p.close(&mut ledger);
    assert_eq!(ledger.live(), 0);
}

#[test]
fn slider_up_without_drag_is_noop() {
    let mut ledger = CaptureLedger::new();
    let mut p = StylePopover::open(uuid::Uuid::new_v4());
    assert!(!p.slider_up(&mut ledger));
    assert_eq!(ledger.released_total(), 0);
}

// =============================================================
// Broadcast
// =============================================================

#[test]
fn broadcast_without_capability_is_reported() {
    let t = tile();
    let p = StylePopover::open(t.id);
    assert_eq!(p.broadcast(&t, None), Err(StyleError::BroadcastUnavailable));
}

#[test]
fn broadcast_packages_current_style() {
    let mut t = tile();
    let p = StylePopover::open(t.id);
    p.toggle_bold(&mut t);
    p.pick(&mut t, Ramp::Background, TRACK, 280.0);
    let b = Broadcaster::new();
    let style = p.broadcast(&t, Some(&b)).unwrap();
    assert!(style.is_bold);
    assert_eq!(style.background_color, t.text_style.background_color());
    assert_eq!(style.shadow, t.text_style.shadow());
    assert_eq!(style.text_align, TextAlign::Left);
}
