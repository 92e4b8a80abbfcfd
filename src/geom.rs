//! Geometry primitives: points, the card's on-screen rectangle, and the
//! rotation used to project screen deltas into an element's local frame.
//!
//! Three coordinate spaces meet here:
//!
//! - **client**: pointer coordinates as reported by the browser;
//! - **local**: pixels relative to the card's top-left corner;
//! - **percent**: element placement, 0..100 of the card's width/height.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// A point in client, local, or percent space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Angle of this vector from the positive x axis, in degrees.
    #[must_use]
    pub fn angle_deg(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Rotate the vector `(dx, dy)` by `-rotation_deg`.
///
/// A delta dragged in screen axes comes out expressed in the element's own,
/// unrotated axes, which is the frame its resize handles live in.
#[must_use]
pub fn to_local_frame(dx: f64, dy: f64, rotation_deg: f64) -> (f64, f64) {
    let rad = -rotation_deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    (dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Rotate the vector `(dx, dy)` by `+rotation_deg` (local frame back to screen).
#[must_use]
pub fn to_screen_frame(dx: f64, dy: f64, rotation_deg: f64) -> (f64, f64) {
    to_local_frame(dx, dy, -rotation_deg)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// The card's bounding rectangle on screen.
///
/// `left` / `top` are client coordinates of the card's top-left corner;
/// `width` / `height` are its rendered size in CSS pixels, which may differ
/// from the template's nominal size when the page scales the preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CardRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// A rect at the client origin with the given size.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether percentages can be computed against this rect.
    ///
    /// A collapsed or non-finite rect would divide by zero.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    /// Convert a client-space point to card-local pixels.
    #[must_use]
    pub fn client_to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Convert a card-local pixel point to percent of the card.
    #[must_use]
    pub fn local_to_percent(&self, local: Point) -> Point {
        Point::new(local.x / self.width * 100.0, local.y / self.height * 100.0)
    }

    /// Convert a percent-of-card point to card-local pixels.
    #[must_use]
    pub fn percent_to_local(&self, pct: Point) -> Point {
        Point::new(pct.x / 100.0 * self.width, pct.y / 100.0 * self.height)
    }

    /// Convert a horizontal pixel length to percent of card width.
    #[must_use]
    pub fn dx_to_percent(&self, dx: f64) -> f64 {
        dx / self.width * 100.0
    }

    /// Convert a vertical pixel length to percent of card height.
    #[must_use]
    pub fn dy_to_percent(&self, dy: f64) -> f64 {
        dy / self.height * 100.0
    }
}
