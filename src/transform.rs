//! Gesture math: new placement from the original placement and pointer travel.
//!
//! Every function takes the snapshot captured on pointer-down, so repeated
//! pointer-moves are idempotent for the same pointer position. Pointer
//! positions are card-local pixels; placements are percent of the card.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::consts::MIN_SIZE_PCT;
use crate::doc::Placement;
use crate::geom::{CardRect, Point, to_local_frame, to_screen_frame};
use crate::hit::Corner;
use crate::input::InteractionMode;

/// Compute the placement for `mode` with the pointer at `cur`.
///
/// Returns `None` when the move must be ignored: a degenerate card rect, or
/// a resize on an element without a box.
#[must_use]
pub fn apply(
    mode: InteractionMode,
    original: Placement,
    has_box: bool,
    rect: &CardRect,
    start: Point,
    cur: Point,
) -> Option<Placement> {
    if rect.is_degenerate() {
        return None;
    }
    match mode {
        InteractionMode::Dragging => Some(drag(original, rect, start, cur)),
        InteractionMode::Rotating => Some(rotate(original, rect, start, cur)),
        InteractionMode::Resizing(corner) if has_box => Some(resize(original, corner, rect, start, cur)),
        InteractionMode::Resizing(_) => None,
    }
}

/// `start` is the pointer's offset from the element center at pointer-down.
#[must_use]
pub fn drag(original: Placement, rect: &CardRect, start: Point, cur: Point) -> Placement {
    let center = rect.local_to_percent(cur - start);
    Placement { x: center.x, y: center.y, ..original }
}

/// Rotate by the angle swept around the element center.
#[must_use]
pub fn rotate(original: Placement, rect: &CardRect, start: Point, cur: Point) -> Placement {
    let center = rect.percent_to_local(Point::new(original.x, original.y));
    let swept = (cur - center).angle_deg() - (start - center).angle_deg();
    Placement { rotation: original.rotation + swept, ..original }
}

/// Resize from `corner`. The size delta is measured in the element's rotated
/// frame and sizes are clamped to `MIN_SIZE_PCT`. For every corner except
/// bottom-right the center moves by half the applied size change, so the
/// opposite edge stays put even once the clamp stops the box shrinking.
#[must_use]
pub fn resize(original: Placement, corner: Corner, rect: &CardRect, start: Point, cur: Point) -> Placement {
    let d = cur - start;
    let (rot_dx, rot_dy) = to_local_frame(d.x, d.y, original.rotation);
    let (sx, sy) = corner.signs();

    let mut next = Placement {
        width: (original.width + sx * rect.dx_to_percent(rot_dx)).max(MIN_SIZE_PCT),
        height: (original.height + sy * rect.dy_to_percent(rot_dy)).max(MIN_SIZE_PCT),
        ..original
    };
    if corner != Corner::Br {
        // Applied change back in local pixels, then onto the screen axes.
        let applied_dx = sx * (next.width - original.width) / 100.0 * rect.width;
        let applied_dy = sy * (next.height - original.height) / 100.0 * rect.height;
        let (ex, ey) = to_screen_frame(applied_dx, applied_dy, original.rotation);
        next.x = original.x + rect.dx_to_percent(ex) / 2.0;
        next.y = original.y + rect.dy_to_percent(ey) / 2.0;
    }
    next
}
