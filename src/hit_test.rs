#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::{ShapeElement, ShapeKind, TextElement};
use crate::template::Template;

fn card() -> (CardDoc, CardRect) {
    (CardDoc::blank(Template::default()), CardRect::sized(338.0, 213.0))
}

fn square(id: &str, x: f64, y: f64, size: f64) -> ShapeElement {
    ShapeElement {
        id: ElementId::new(id),
        x,
        y,
        width: size,
        height: size,
        ..ShapeElement::of_kind(ShapeKind::Rectangle)
    }
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Parts and cursors
// =============================================================

#[test]
fn cursor_per_part() {
    assert_eq!(HitPart::Body.cursor(), "grab");
    assert_eq!(HitPart::ResizeHandle(Corner::Tl).cursor(), "nwse-resize");
    assert_eq!(HitPart::ResizeHandle(Corner::Br).cursor(), "nwse-resize");
    assert_eq!(HitPart::ResizeHandle(Corner::Tr).cursor(), "nesw-resize");
    assert_eq!(HitPart::ResizeHandle(Corner::Bl).cursor(), "nesw-resize");
    assert_eq!(HitPart::RotateHandle.cursor(), "alias");
}

#[test]
fn corner_signs() {
    assert_eq!(Corner::Tl.signs(), (-1.0, -1.0));
    assert_eq!(Corner::Br.signs(), (1.0, 1.0));
}

// =============================================================
// Element boxes
// =============================================================

#[test]
fn shape_box_in_pixels() {
    let (mut doc, rect) = card();
    doc.shapes.push(square("s", 50.0, 50.0, 20.0));
    let bx = element_box(ElementRef::Shape(&doc.shapes[0]), &doc, &rect);
    assert_eq!(bx.center, pt(169.0, 106.5));
    assert!((bx.half_w - 33.8).abs() < 1e-9);
    assert!((bx.half_h - 21.3).abs() < 1e-9);
}

#[test]
fn left_aligned_text_box_extends_right_of_anchor() {
    let (doc, rect) = card();
    let mut t = TextElement::with_content("abcd");
    t.align = TextAlign::Left;
    let bx = element_box(ElementRef::Text(&t), &doc, &rect);
    assert!(bx.center.x > 169.0);
    assert!((bx.center.x - bx.half_w - 169.0).abs() < 1e-9);
}

#[test]
fn text_box_scales_with_preview() {
    let (doc, _) = card();
    let t = TextElement::with_content("abcd");
    let full = element_box(ElementRef::Text(&t), &doc, &CardRect::sized(338.0, 213.0));
    let half = element_box(ElementRef::Text(&t), &doc, &CardRect::sized(169.0, 106.5));
    assert!((full.half_w - 2.0 * half.half_w).abs() < 1e-9);
}

// =============================================================
// Body hits
// =============================================================

#[test]
fn hit_body_and_miss() {
    let (mut doc, rect) = card();
    doc.shapes.push(square("s", 50.0, 50.0, 20.0));
    let hit = hit_test(pt(169.0, 106.5), &doc, &rect, None);
    assert_eq!(hit, Some(Hit { element_id: ElementId::new("s"), part: HitPart::Body }));
    assert_eq!(hit_test(pt(2.0, 2.0), &doc, &rect, None), None);
}

#[test]
fn topmost_element_wins() {
    let (mut doc, rect) = card();
    doc.shapes.push(square("below", 50.0, 50.0, 20.0));
    doc.shapes.push(square("above", 50.0, 50.0, 10.0));
    let hit = hit_test(pt(169.0, 106.5), &doc, &rect, None);
    assert_eq!(hit.map(|h| h.element_id), Some(ElementId::new("above")));

    doc.texts.push(TextElement { id: ElementId::new("t"), ..TextElement::with_content("Title") });
    let hit = hit_test(pt(169.0, 106.5), &doc, &rect, None);
    assert_eq!(hit.map(|h| h.element_id), Some(ElementId::new("t")));
}

#[test]
fn rotated_box_hit_follows_rotation() {
    let (mut doc, rect) = card();
    let mut s = square("s", 50.0, 50.0, 20.0);
    s.rotation = 90.0;
    doc.shapes.push(s);
    // Unrotated the box is 33.8 px wide each side; rotated it is 21.3.
    assert_eq!(hit_test(pt(199.0, 106.5), &doc, &rect, None), None);
    assert!(hit_test(pt(169.0, 136.5), &doc, &rect, None).is_some());
}

#[test]
fn empty_image_slot_is_not_hit() {
    let (doc, rect) = card();
    assert_eq!(hit_test(pt(169.0, 106.5), &doc, &rect, None), None);
}

#[test]
fn image_with_source_is_hit() {
    let (mut doc, rect) = card();
    doc.image.src = Some("data:image/png;base64,AA".into());
    let hit = hit_test(pt(169.0, 106.5), &doc, &rect, None);
    assert_eq!(hit.map(|h| h.element_id), Some(ElementId::image()));
}

#[test]
fn degenerate_rect_hits_nothing() {
    let (mut doc, _) = card();
    doc.shapes.push(square("s", 50.0, 50.0, 20.0));
    assert_eq!(hit_test(pt(0.0, 0.0), &doc, &CardRect::sized(0.0, 0.0), None), None);
}

// =============================================================
// Handles
// =============================================================

#[test]
fn selected_corner_handle_is_hit() {
    let (mut doc, rect) = card();
    doc.shapes.push(square("s", 50.0, 50.0, 20.0));
    let id = ElementId::new("s");
    let hit = hit_test(pt(202.8, 127.8), &doc, &rect, Some(&id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::ResizeHandle(Corner::Br)));
    let hit = hit_test(pt(135.2, 85.2), &doc, &rect, Some(&id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::ResizeHandle(Corner::Tl)));
}

#[test]
fn selected_rotate_handle_is_hit() {
    let (mut doc, rect) = card();
    doc.shapes.push(square("s", 50.0, 50.0, 20.0));
    let id = ElementId::new("s");
    let above = 106.5 - 21.3 - ROTATE_HANDLE_OFFSET_PX;
    let hit = hit_test(pt(169.0, above), &doc, &rect, Some(&id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::RotateHandle));
}

#[test]
fn handles_ignored_without_selection() {
    let (mut doc, rect) = card();
    doc.shapes.push(square("s", 50.0, 50.0, 20.0));
    let above = 106.5 - 21.3 - ROTATE_HANDLE_OFFSET_PX;
    assert_eq!(hit_test(pt(169.0, above), &doc, &rect, None), None);
}

#[test]
fn locked_selection_has_no_handles() {
    let (mut doc, rect) = card();
    let mut s = square("s", 50.0, 50.0, 20.0);
    s.is_locked = true;
    doc.shapes.push(s);
    let id = ElementId::new("s");
    let hit = hit_test(pt(202.8, 127.8), &doc, &rect, Some(&id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::Body));
}

#[test]
fn text_has_rotate_handle_but_no_corners() {
    let (mut doc, rect) = card();
    doc.texts.push(TextElement { id: ElementId::new("t"), ..TextElement::with_content("ab") });
    let id = ElementId::new("t");
    let bx = element_box(ElementRef::Text(&doc.texts[0]), &doc, &rect);
    let corner = bx.corner(Corner::Br);
    let hit = hit_test(corner, &doc, &rect, Some(&id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::Body));
    let hit = hit_test(bx.rotate_handle(), &doc, &rect, Some(&id));
    assert_eq!(hit.map(|h| h.part), Some(HitPart::RotateHandle));
}
