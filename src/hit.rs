//! Hit-testing: which element, and which part of it, lies under a point.
//!
//! All geometry here is in card-local pixels. Element boxes are rotated
//! rectangles; a point is tested by projecting it into the box's own frame.
//! Text has no stored box, so one is estimated from the font size and
//! character count.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{
    GLYPH_WIDTH_RATIO, HANDLE_RADIUS_PX, LINE_HEIGHT_RATIO, ROTATE_HANDLE_OFFSET_PX, ROTATE_HANDLE_RADIUS_PX,
};
use crate::doc::{CardDoc, ElementId, ElementRef, TextAlign, TextElement};
use crate::geom::{CardRect, Point, to_local_frame, to_screen_frame};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(Corner),
    RotateHandle,
}

impl HitPart {
    /// CSS cursor shown while hovering this part.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Body => "grab",
            Self::ResizeHandle(Corner::Tl | Corner::Br) => "nwse-resize",
            Self::ResizeHandle(Corner::Tr | Corner::Bl) => "nesw-resize",
            Self::RotateHandle => "alias",
        }
    }
}

/// Corner of an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Tl,
    Tr,
    Bl,
    Br,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Tl, Corner::Tr, Corner::Bl, Corner::Br];

    /// Unit signs of this corner in the box frame (`-1` = left / top).
    #[must_use]
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::Tl => (-1.0, -1.0),
            Self::Tr => (1.0, -1.0),
            Self::Bl => (-1.0, 1.0),
            Self::Br => (1.0, 1.0),
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// A rotated box in card-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub center: Point,
    pub half_w: f64,
    pub half_h: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
}

impl ElementBox {
    /// Whether `pt` lies inside the box, with `slop` pixels of tolerance.
    #[must_use]
    pub fn contains(&self, pt: Point, slop: f64) -> bool {
        let d = pt - self.center;
        let (lx, ly) = to_local_frame(d.x, d.y, self.rotation);
        lx.abs() <= self.half_w + slop && ly.abs() <= self.half_h + slop
    }

    /// Screen position of a point given in the box's own frame.
    #[must_use]
    pub fn to_screen(&self, lx: f64, ly: f64) -> Point {
        let (sx, sy) = to_screen_frame(lx, ly, self.rotation);
        Point::new(self.center.x + sx, self.center.y + sy)
    }

    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        let (sx, sy) = corner.signs();
        self.to_screen(sx * self.half_w, sy * self.half_h)
    }

    /// Center of the rotate handle, above the top edge.
    #[must_use]
    pub fn rotate_handle(&self) -> Point {
        self.to_screen(0.0, -self.half_h - ROTATE_HANDLE_OFFSET_PX)
    }
}

/// The box `el` occupies on a card rendered at `rect`.
#[must_use]
pub fn element_box(el: ElementRef<'_>, doc: &CardDoc, rect: &CardRect) -> ElementBox {
    let p = el.placement();
    let center = rect.percent_to_local(Point::new(p.x, p.y));
    match el {
        ElementRef::Text(t) => text_box(t, center, rect.width / doc.template.width),
        _ => ElementBox {
            center,
            half_w: p.width / 100.0 * rect.width / 2.0,
            half_h: p.height / 100.0 * rect.height / 2.0,
            rotation: p.rotation,
        },
    }
}

/// Estimated box of a single-line text run anchored at `anchor`.
fn text_box(t: &TextElement, anchor: Point, scale: f64) -> ElementBox {
    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    #[allow(clippy::cast_precision_loss)]
    let chars = t.content.chars().count().max(1) as f64;
    let half_w = chars * t.font_size * GLYPH_WIDTH_RATIO * scale / 2.0;
    let half_h = t.font_size * LINE_HEIGHT_RATIO * scale / 2.0;
    let shift = match t.align {
        TextAlign::Left => half_w,
        TextAlign::Center => 0.0,
        TextAlign::Right => -half_w,
    };
    let (sx, sy) = to_screen_frame(shift, 0.0, t.rotation);
    ElementBox { center: Point::new(anchor.x + sx, anchor.y + sy), half_w, half_h, rotation: t.rotation }
}

/// Test what lies under `pt` (card-local pixels).
///
/// Handles of the selected element are checked first, and only when it is
/// unlocked; then element bodies from the topmost down. Locked elements are
/// still hit by body so they can be selected.
#[must_use]
pub fn hit_test(pt: Point, doc: &CardDoc, rect: &CardRect, selected: Option<&ElementId>) -> Option<Hit> {
    if rect.is_degenerate() {
        return None;
    }

    if let Some(el) = selected.and_then(|id| doc.get(id)) {
        if !el.is_locked() {
            if let Some(part) = hit_handles(pt, el, &element_box(el, doc, rect)) {
                return Some(Hit { element_id: el.id().clone(), part });
            }
        }
    }

    doc.render_order()
        .into_iter()
        .rev()
        .find(|el| element_box(*el, doc, rect).contains(pt, HANDLE_RADIUS_PX / 2.0))
        .map(|el| Hit { element_id: el.id().clone(), part: HitPart::Body })
}

fn hit_handles(pt: Point, el: ElementRef<'_>, bx: &ElementBox) -> Option<HitPart> {
    if distance(pt, bx.rotate_handle()) <= ROTATE_HANDLE_RADIUS_PX {
        return Some(HitPart::RotateHandle);
    }
    if !el.has_box() {
        return None;
    }
    Corner::ALL
        .into_iter()
        .find(|c| distance(pt, bx.corner(*c)) <= HANDLE_RADIUS_PX)
        .map(HitPart::ResizeHandle)
}

fn distance(a: Point, b: Point) -> f64 {
    let d = a - b;
    d.x.hypot(d.y)
}
