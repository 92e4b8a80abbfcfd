#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{ShapeElement, ShapeKind, TextElement};
use crate::template::Template;

fn doc_with(shapes: &[&str], texts: &[&str]) -> CardDoc {
    let mut doc = CardDoc::blank(Template::default());
    doc.image.src = Some("data:image/png;base64,AA".into());
    for id in shapes {
        doc.shapes.push(ShapeElement { id: ElementId::new(*id), ..ShapeElement::of_kind(ShapeKind::Rectangle) });
    }
    for id in texts {
        doc.texts.push(TextElement { id: ElementId::new(*id), ..TextElement::with_content(*id) });
    }
    doc
}

fn shape_ids(doc: &CardDoc) -> Vec<&str> {
    doc.shapes.iter().map(|s| s.id.as_str()).collect()
}

fn id(s: &str) -> ElementId {
    ElementId::new(s)
}

// =============================================================
// Delete
// =============================================================

#[test]
fn delete_removes_from_owning_list() {
    let mut doc = doc_with(&["a", "b"], &["t"]);
    assert!(doc.delete(&id("a")));
    assert_eq!(shape_ids(&doc), vec!["b"]);
    assert!(doc.delete(&id("t")));
    assert!(doc.texts.is_empty());
}

#[test]
fn delete_image_clears_source() {
    let mut doc = doc_with(&[], &[]);
    assert!(doc.delete(&ElementId::image()));
    assert!(doc.image.src.is_none());
    assert!(!doc.delete(&ElementId::image()));
}

#[test]
fn delete_locked_is_noop() {
    let mut doc = doc_with(&["a"], &[]);
    doc.shapes[0].is_locked = true;
    let before = doc.clone();
    assert!(!doc.delete(&id("a")));
    assert_eq!(doc, before);
}

#[test]
fn delete_absent_is_noop() {
    let mut doc = doc_with(&["a"], &[]);
    assert!(!doc.delete(&id("zzz")));
    assert_eq!(doc.shapes.len(), 1);
}

// =============================================================
// Duplicate
// =============================================================

#[test]
fn duplicate_shape_offsets_and_appends() {
    let mut doc = doc_with(&["a", "b"], &[]);
    let new_id = doc.duplicate(&id("a")).unwrap();
    assert_ne!(new_id, id("a"));
    assert!(new_id.as_str().starts_with("rectangle-"));
    assert_eq!(doc.shapes.len(), 3);

    let original = &doc.shapes[0];
    let copy = &doc.shapes[2];
    assert_eq!(copy.id, new_id);
    assert_eq!(copy.y, original.y + 5.0);
    let realigned = ShapeElement { id: original.id.clone(), y: original.y, ..copy.clone() };
    assert_eq!(&realigned, original);
}

#[test]
fn duplicate_text() {
    let mut doc = doc_with(&[], &["t"]);
    let new_id = doc.duplicate(&id("t")).unwrap();
    assert!(new_id.as_str().starts_with("text-"));
    assert_eq!(doc.texts[1].content, "t");
}

#[test]
fn duplicate_image_or_locked_is_noop() {
    let mut doc = doc_with(&["a"], &[]);
    assert_eq!(doc.duplicate(&ElementId::image()), None);
    doc.shapes[0].is_locked = true;
    assert_eq!(doc.duplicate(&id("a")), None);
    assert_eq!(doc.shapes.len(), 1);
}

// =============================================================
// Layers
// =============================================================

#[test]
fn move_layer_swaps_neighbors() {
    let mut doc = doc_with(&["a", "b", "c"], &[]);
    assert!(doc.move_layer(&id("a"), LayerDirection::Forward));
    assert_eq!(shape_ids(&doc), vec!["b", "a", "c"]);
    assert!(doc.move_layer(&id("c"), LayerDirection::Backward));
    assert_eq!(shape_ids(&doc), vec!["b", "c", "a"]);
}

#[test]
fn move_layer_at_bounds_is_noop() {
    let mut doc = doc_with(&["a", "b"], &[]);
    assert!(!doc.move_layer(&id("b"), LayerDirection::Forward));
    assert!(!doc.move_layer(&id("a"), LayerDirection::Backward));
    assert_eq!(shape_ids(&doc), vec!["a", "b"]);
}

#[test]
fn move_layer_image_is_noop() {
    let mut doc = doc_with(&["a"], &[]);
    assert!(!doc.move_layer(&ElementId::image(), LayerDirection::Forward));
}

#[test]
fn layer_direction_from_name() {
    assert_eq!(LayerDirection::from_name("Forward"), Some(LayerDirection::Forward));
    assert_eq!(LayerDirection::from_name("back"), Some(LayerDirection::Backward));
    assert_eq!(LayerDirection::from_name("sideways"), None);
}

// =============================================================
// Lock and patch
// =============================================================

#[test]
fn toggle_lock_flips_and_reports() {
    let mut doc = doc_with(&["a"], &[]);
    assert_eq!(doc.toggle_lock(&id("a")), Some(true));
    assert_eq!(doc.toggle_lock(&id("a")), Some(false));
    assert_eq!(doc.toggle_lock(&ElementId::image()), Some(true));
    assert_eq!(doc.toggle_lock(&id("none")), None);
}

#[test]
fn patch_applies_to_unlocked_only() {
    let mut doc = doc_with(&["a"], &[]);
    let patch = ElementPatch { fill_color: Some("#00ff00".into()), ..ElementPatch::default() };
    assert!(doc.patch(&id("a"), &patch));
    assert_eq!(doc.shapes[0].fill_color, "#00ff00");

    doc.shapes[0].is_locked = true;
    let patch = ElementPatch { fill_color: Some("#ffffff".into()), ..ElementPatch::default() };
    assert!(!doc.patch(&id("a"), &patch));
    assert_eq!(doc.shapes[0].fill_color, "#00ff00");
}
