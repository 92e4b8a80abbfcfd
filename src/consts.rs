//! Shared numeric constants for the card engine.

// ── Card presets ────────────────────────────────────────────────

/// Long side of a CR80 card preview, in CSS pixels.
pub const CARD_LONG_PX: f64 = 338.0;

/// Short side of a CR80 card preview, in CSS pixels.
pub const CARD_SHORT_PX: f64 = 213.0;

// ── Element geometry ────────────────────────────────────────────

/// Smallest width or height an element may be resized to, in percent of the card.
pub const MIN_SIZE_PCT: f64 = 1.0;

/// Vertical offset applied to a duplicated element, in percent of card height.
pub const DUPLICATE_OFFSET_PCT: f64 = 5.0;

/// Largest image border, in pixels.
pub const MAX_BORDER_PX: f64 = 50.0;

/// Approximate advance width of one glyph as a fraction of the font size.
///
/// Text has no stored box, so hit-testing estimates one from the content.
pub const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;

// ── Hit-testing ─────────────────────────────────────────────────

/// Hit slop around a corner handle, in card pixels.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Distance from the top edge of the box to the rotate handle center, in card pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 28.0;

/// Hit slop around the rotate handle, in card pixels.
pub const ROTATE_HANDLE_RADIUS_PX: f64 = 8.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of undo entries kept before the oldest is dropped.
pub const HISTORY_LIMIT: usize = 100;

// ── Host integration ────────────────────────────────────────────

/// DOM event dispatched on the canvas once an uploaded photo has decoded.
pub const PHOTO_LOADED_EVENT: &str = "photoload";

/// File name the host uses when saving an exported card.
pub const EXPORT_FILE_NAME: &str = "id-card.svg";
