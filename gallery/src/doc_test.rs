#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::style::{TextAlign, TextStyle};

fn descriptor(name: &str) -> TileDescriptor {
    TileDescriptor {
        image_ref: format!("https://img.example/{name}.png"),
        caption: name.to_owned(),
        alt_text: name.to_owned(),
    }
}

fn make_tile(name: &str, x: f64) -> Tile {
    Tile::from_descriptor(descriptor(name), Point::new(x, 20.0))
}

// =============================================================
// Tile construction and serde
// =============================================================

#[test]
fn from_descriptor_uses_default_size_and_style() {
    let t = make_tile("a", 20.0);
    assert_eq!(t.size(), Size::new(300.0, 180.0));
    assert_eq!(t.text_style, TextStyle::default());
    assert_eq!(t.position, Point::new(20.0, 20.0));
    assert_eq!(t.caption, "a");
}

#[test]
fn from_descriptor_assigns_fresh_ids() {
    assert_ne!(make_tile("a", 0.0).id, make_tile("a", 0.0).id);
}

#[test]
fn set_size_clamps() {
    let mut t = make_tile("a", 0.0);
    t.set_size(Size::new(20.0, 500.0));
    assert_eq!(t.size(), Size::new(150.0, 500.0));
}

#[test]
fn tile_serializes_camel_case() {
    let t = make_tile("a", 20.0);
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v["imageRef"], "https://img.example/a.png");
    assert_eq!(v["altText"], "a");
    assert_eq!(v["position"], json!({ "x": 20.0, "y": 20.0 }));
    assert_eq!(v["size"], json!({ "width": 300.0, "height": 180.0 }));
    assert_eq!(v["textStyle"]["textAlign"], "left");
}

#[test]
fn tile_deserialize_clamps_undersized_records() {
    let raw = json!({
        "id": Uuid::nil(),
        "imageRef": "x",
        "size": { "width": 40.0, "height": 10.0 },
    });
    let t: Tile = serde_json::from_value(raw).unwrap();
    assert_eq!(t.size(), Size::new(150.0, 100.0));
}

#[test]
fn tile_deserialize_accepts_legacy_url_and_missing_geometry() {
    let raw = json!({ "id": Uuid::nil(), "url": "data:image/png;base64,AA==", "caption": "c" });
    let t: Tile = serde_json::from_value(raw).unwrap();
    assert_eq!(t.image_ref, "data:image/png;base64,AA==");
    assert_eq!(t.position, Point::default());
    assert_eq!(t.size(), Size::new(300.0, 180.0));
    assert_eq!(t.alt_text, "");
}

#[test]
fn tile_deserialize_requires_image_ref() {
    let raw = json!({ "id": Uuid::nil() });
    assert!(serde_json::from_value::<Tile>(raw).is_err());
}

// =============================================================
// TilePatch
// =============================================================

#[test]
fn patch_applies_only_present_fields() {
    let mut t = make_tile("a", 20.0);
    let before = t.clone();
    TilePatch { caption: Some("new".into()), ..Default::default() }.apply_to(&mut t);
    assert_eq!(t.caption, "new");
    assert_eq!(t.alt_text, before.alt_text);
    assert_eq!(t.position, before.position);
    assert_eq!(t.size(), before.size());
}

#[test]
fn patch_size_is_clamped() {
    let mut t = make_tile("a", 20.0);
    TilePatch { size: Some(Size::new(1.0, 1.0)), ..Default::default() }.apply_to(&mut t);
    assert_eq!(t.size(), Size::new(150.0, 100.0));
}

#[test]
fn empty_patch_serializes_to_empty_object() {
    assert_eq!(serde_json::to_value(TilePatch::default()).unwrap(), json!({}));
}

// =============================================================
// TileStore
// =============================================================

#[test]
fn store_new_is_empty() {
    let s = TileStore::new();
    assert!(s.is_empty());
    assert_eq!(s.len(), 0);
    assert!(s.last().is_none());
}

#[test]
fn store_insert_appends_in_order() {
    let mut s = TileStore::new();
    let a = make_tile("a", 20.0);
    let b = make_tile("b", 330.0);
    s.insert(a.clone());
    s.insert(b.clone());
    assert_eq!(s.ids(), vec![a.id, b.id]);
    assert_eq!(s.last().map(|t| t.id), Some(b.id));
}

#[test]
fn store_insert_same_id_replaces_in_place() {
    let mut s = TileStore::new();
    let a = make_tile("a", 20.0);
    let b = make_tile("b", 330.0);
    s.insert(a.clone());
    s.insert(b.clone());
    let mut a2 = a.clone();
    a2.caption = "changed".into();
    s.insert(a2);
    assert_eq!(s.ids(), vec![a.id, b.id]);
    assert_eq!(s.get(&a.id).map(|t| t.caption.as_str()), Some("changed"));
}

#[test]
fn store_remove_returns_tile_and_is_idempotent() {
    let mut s = TileStore::new();
    let a = make_tile("a", 20.0);
    s.insert(a.clone());
    assert_eq!(s.remove(&a.id).map(|t| t.id), Some(a.id));
    assert!(s.remove(&a.id).is_none());
    assert!(s.is_empty());
}

#[test]
fn store_apply_patch_missing_returns_false() {
    let mut s = TileStore::new();
    assert!(!s.apply_patch(&Uuid::new_v4(), &TilePatch::default()));
}

#[test]
fn store_apply_patch_existing() {
    let mut s = TileStore::new();
    let a = make_tile("a", 20.0);
    s.insert(a.clone());
    let patch = TilePatch { position: Some(Point::new(-40.0, 7.0)), ..Default::default() };
    assert!(s.apply_patch(&a.id, &patch));
    assert_eq!(s.get(&a.id).map(|t| t.position), Some(Point::new(-40.0, 7.0)));
}

#[test]
fn store_apply_style_to_all_leaves_geometry() {
    let mut s = TileStore::new();
    s.insert(make_tile("a", 20.0));
    s.insert(make_tile("b", 330.0));
    let before: Vec<Tile> = s.tiles().to_vec();

    let mut style = TextStyle::default();
    style.toggle_bold();
    style.set_color("#ff0000");
    style.text_align = TextAlign::Center;
    s.apply_style_to_all(&style.broadcast());

    for (old, new) in before.iter().zip(s.tiles()) {
        assert_eq!(new.text_style, style);
        assert_eq!(new.position, old.position);
        assert_eq!(new.size(), old.size());
        assert_eq!(new.caption, old.caption);
        assert_eq!(new.image_ref, old.image_ref);
    }
}

#[test]
fn store_load_snapshot_replaces_contents() {
    let mut s = TileStore::new();
    s.insert(make_tile("old", 20.0));
    let a = make_tile("a", 20.0);
    let b = make_tile("b", 330.0);
    s.load_snapshot(vec![a.clone(), b.clone()]);
    assert_eq!(s.ids(), vec![a.id, b.id]);
}

#[test]
fn store_load_snapshot_collapses_duplicate_ids() {
    let mut s = TileStore::new();
    let a = make_tile("a", 20.0);
    let b = make_tile("b", 330.0);
    let mut a_late = a.clone();
    a_late.caption = "late".into();
    s.load_snapshot(vec![a.clone(), b.clone(), a_late]);
    assert_eq!(s.ids(), vec![a.id, b.id]);
    assert_eq!(s.get(&a.id).map(|t| t.caption.as_str()), Some("late"));
}
