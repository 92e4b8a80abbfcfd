//! Document model: card elements, their properties, and the aggregate card.
//!
//! This module defines the element records that describe what is printed on
//! the card (`ImageElement`, `TextElement`, `ShapeElement`), the tagged union
//! that dispatches over them (`Element`, borrowed as `ElementRef`), a sparse
//! update type for property edits (`ElementPatch`), and the aggregate state
//! that owns everything (`CardDoc`).
//!
//! All placement values are percentages of the card template, with `x` / `y`
//! naming the element's **center**. The JSON form uses the same camelCase
//! field names as designs persisted by the web app, so saved snapshots load
//! unchanged.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{MAX_BORDER_PX, MIN_SIZE_PCT};
use crate::geom::wrap_degrees;
use crate::template::Template;

/// Id of the image singleton. Never generated for any other element.
pub const IMAGE_ID: &str = "image";

/// Image source shown until the user uploads a photo.
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://placehold.co/150x150.png";

/// Errors raised while loading or editing a document.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported image source: {0}")]
    InvalidImageSource(String),
}

// =============================================================
// Ids and enums
// =============================================================

/// Opaque element identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh id of the form `<prefix>-<uuid>`.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4().simple()))
    }

    /// The image singleton's id.
    #[must_use]
    pub fn image() -> Self {
        Self(IMAGE_ID.to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Horizontal alignment of a text element around its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// The drawable variant of a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Filled rectangle covering the box.
    Rectangle,
    /// Ellipse inscribed in the box.
    Circle,
    /// Isosceles triangle: apex at top-center, base along the bottom edge.
    Triangle,
    /// Horizontal segment through the vertical center of the box.
    Line,
}

impl ShapeKind {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangle" | "rect" | "square" => Some(Self::Rectangle),
            "circle" | "ellipse" => Some(Self::Circle),
            "triangle" => Some(Self::Triangle),
            "line" => Some(Self::Line),
            _ => None,
        }
    }

    /// Lowercase name; also the prefix of generated ids.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Line => "line",
        }
    }
}

// =============================================================
// Placement
// =============================================================

/// The geometric fields shared by every element.
///
/// For text, `width` / `height` are always zero and ignored on write.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, clockwise, about the center.
    pub rotation: f64,
}

impl Placement {
    /// Clamp sizes to the minimum and wrap rotation into `[0, 360)`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            x: self.x,
            y: self.y,
            width: clamp_size(self.width),
            height: clamp_size(self.height),
            rotation: wrap_degrees(self.rotation),
        }
    }
}

fn clamp_size(v: f64) -> f64 {
    if v.is_finite() { v.max(MIN_SIZE_PCT) } else { MIN_SIZE_PCT }
}

fn clamp_transparency(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 100.0) } else { 0.0 }
}

/// Opacity for a 0..100 transparency percentage.
#[must_use]
pub fn opacity(transparency: f64) -> f64 {
    1.0 - clamp_transparency(transparency) / 100.0
}

// =============================================================
// Element records
// =============================================================

fn default_image_id() -> ElementId {
    ElementId::image()
}

fn default_black() -> String {
    "#000000".to_owned()
}

fn default_font_weight() -> u16 {
    400
}

/// The photo slot. Exactly one exists per card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    #[serde(default = "default_image_id")]
    pub id: ElementId,
    /// Data URI or URL; `None` when the slot is empty.
    pub src: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub transparency: f64,
    /// Border thickness in pixels; zero draws no border.
    #[serde(default)]
    pub border_size: f64,
    #[serde(default = "default_black")]
    pub border_color: String,
    #[serde(default)]
    pub is_locked: bool,
}

impl Default for ImageElement {
    fn default() -> Self {
        Self {
            id: ElementId::image(),
            src: None,
            x: 50.0,
            y: 50.0,
            width: 30.0,
            height: 40.0,
            rotation: 0.0,
            transparency: 0.0,
            border_size: 0.0,
            border_color: default_black(),
            is_locked: false,
        }
    }
}

/// A line of text anchored at its center point.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: ElementId,
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_family: String,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default = "default_black")]
    pub color: String,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub transparency: f64,
    #[serde(default)]
    pub is_bold: bool,
    #[serde(default)]
    pub is_italic: bool,
    #[serde(default)]
    pub is_underline: bool,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub is_locked: bool,
}

impl TextElement {
    /// A new text element with the editor's defaults, centered on the card.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            id: ElementId::generate("text"),
            content: content.into(),
            x: 50.0,
            y: 50.0,
            font_size: 16.0,
            font_family: "Open Sans".to_owned(),
            font_weight: default_font_weight(),
            color: default_black(),
            rotation: 0.0,
            transparency: 0.0,
            is_bold: false,
            is_italic: false,
            is_underline: false,
            align: TextAlign::Center,
            is_locked: false,
        }
    }

    /// CSS/SVG font-weight after applying the bold override.
    #[must_use]
    pub fn effective_weight(&self) -> String {
        if self.is_bold { "bold".to_owned() } else { self.font_weight.to_string() }
    }
}

/// A vector shape filling its box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: String,
    pub stroke_color: String,
    #[serde(default)]
    pub stroke_width: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub transparency: f64,
    #[serde(default)]
    pub is_locked: bool,
}

impl ShapeElement {
    /// A new shape with the editor's defaults, centered on the card.
    #[must_use]
    pub fn of_kind(kind: ShapeKind) -> Self {
        let is_line = kind == ShapeKind::Line;
        Self {
            id: ElementId::generate(kind.name()),
            kind,
            x: 50.0,
            y: 50.0,
            width: if is_line { 50.0 } else { 25.0 },
            height: if is_line { 1.0 } else { 25.0 },
            fill_color: "#3B82F6".to_owned(),
            stroke_color: default_black(),
            stroke_width: if is_line { 2.0 } else { 0.0 },
            rotation: 0.0,
            transparency: 0.0,
            is_locked: false,
        }
    }
}

// =============================================================
// Element union
// =============================================================

/// An owned element of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Image(ImageElement),
    Text(TextElement),
    Shape(ShapeElement),
}

/// A borrowed element of any variant, used for render-order traversal.
#[derive(Debug, Clone, Copy)]
pub enum ElementRef<'a> {
    Image(&'a ImageElement),
    Text(&'a TextElement),
    Shape(&'a ShapeElement),
}

impl Element {
    #[must_use]
    pub fn borrowed(&self) -> ElementRef<'_> {
        match self {
            Self::Image(e) => ElementRef::Image(e),
            Self::Text(e) => ElementRef::Text(e),
            Self::Shape(e) => ElementRef::Shape(e),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ElementId {
        self.borrowed().id()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.borrowed().is_locked()
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.borrowed().placement()
    }

    #[must_use]
    pub fn has_box(&self) -> bool {
        self.borrowed().has_box()
    }

    /// Write placement fields back, normalizing sizes and rotation.
    pub fn set_placement(&mut self, p: Placement) {
        let p = p.normalized();
        match self {
            Self::Image(e) => {
                e.x = p.x;
                e.y = p.y;
                e.width = p.width;
                e.height = p.height;
                e.rotation = p.rotation;
            }
            Self::Text(e) => {
                e.x = p.x;
                e.y = p.y;
                e.rotation = p.rotation;
            }
            Self::Shape(e) => {
                e.x = p.x;
                e.y = p.y;
                e.width = p.width;
                e.height = p.height;
                e.rotation = p.rotation;
            }
        }
    }
}

impl<'a> ElementRef<'a> {
    #[must_use]
    pub fn id(self) -> &'a ElementId {
        match self {
            Self::Image(e) => &e.id,
            Self::Text(e) => &e.id,
            Self::Shape(e) => &e.id,
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        match self {
            Self::Image(e) => e.is_locked,
            Self::Text(e) => e.is_locked,
            Self::Shape(e) => e.is_locked,
        }
    }

    #[must_use]
    pub fn transparency(self) -> f64 {
        match self {
            Self::Image(e) => e.transparency,
            Self::Text(e) => e.transparency,
            Self::Shape(e) => e.transparency,
        }
    }

    /// Whether the element carries its own width/height.
    #[must_use]
    pub fn has_box(self) -> bool {
        !matches!(self, Self::Text(_))
    }

    #[must_use]
    pub fn placement(self) -> Placement {
        match self {
            Self::Image(e) => Placement { x: e.x, y: e.y, width: e.width, height: e.height, rotation: e.rotation },
            Self::Text(e) => Placement { x: e.x, y: e.y, width: 0.0, height: 0.0, rotation: e.rotation },
            Self::Shape(e) => Placement { x: e.x, y: e.y, width: e.width, height: e.height, rotation: e.rotation },
        }
    }

    #[must_use]
    pub fn cloned(self) -> Element {
        match self {
            Self::Image(e) => Element::Image(e.clone()),
            Self::Text(e) => Element::Text(e.clone()),
            Self::Shape(e) => Element::Shape(e.clone()),
        }
    }
}

// =============================================================
// Sparse property edits
// =============================================================

/// Sparse update for an element. Only present fields are applied, and only
/// the ones meaningful for the target's variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparency: Option<f64>,
    // Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    // Shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    // Image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

impl ElementPatch {
    /// Apply to `el`. Returns `true` if any field changed.
    pub fn apply(&self, el: &mut Element) -> bool {
        let before = el.clone();

        let mut p = el.placement();
        if let Some(v) = self.x {
            p.x = v;
        }
        if let Some(v) = self.y {
            p.y = v;
        }
        if let Some(v) = self.width {
            p.width = v;
        }
        if let Some(v) = self.height {
            p.height = v;
        }
        if let Some(v) = self.rotation {
            p.rotation = v;
        }
        if p != el.placement() {
            el.set_placement(p);
        }

        match el {
            Element::Image(e) => {
                if let Some(v) = self.transparency {
                    e.transparency = clamp_transparency(v);
                }
                if let Some(v) = self.border_size {
                    e.border_size = if v.is_finite() { v.clamp(0.0, MAX_BORDER_PX) } else { 0.0 };
                }
                if let Some(ref v) = self.border_color {
                    e.border_color.clone_from(v);
                }
            }
            Element::Text(e) => {
                if let Some(v) = self.transparency {
                    e.transparency = clamp_transparency(v);
                }
                if let Some(ref v) = self.content {
                    e.content.clone_from(v);
                }
                if let Some(ref v) = self.font_family {
                    e.font_family.clone_from(v);
                }
                if let Some(v) = self.font_size {
                    if v.is_finite() && v > 0.0 {
                        e.font_size = v;
                    }
                }
                if let Some(v) = self.font_weight {
                    e.font_weight = v;
                }
                if let Some(ref v) = self.color {
                    e.color.clone_from(v);
                }
                if let Some(v) = self.is_bold {
                    e.is_bold = v;
                }
                if let Some(v) = self.is_italic {
                    e.is_italic = v;
                }
                if let Some(v) = self.is_underline {
                    e.is_underline = v;
                }
                if let Some(v) = self.align {
                    e.align = v;
                }
            }
            Element::Shape(e) => {
                if let Some(v) = self.transparency {
                    e.transparency = clamp_transparency(v);
                }
                if let Some(ref v) = self.fill_color {
                    e.fill_color.clone_from(v);
                }
                if let Some(ref v) = self.stroke_color {
                    e.stroke_color.clone_from(v);
                }
                if let Some(v) = self.stroke_width {
                    if v.is_finite() {
                        e.stroke_width = v.max(0.0);
                    }
                }
            }
        }

        *el != before
    }
}

// =============================================================
// Aggregate document
// =============================================================

/// Where an element lives inside a [`CardDoc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Image,
    Text(usize),
    Shape(usize),
}

/// The whole card: template plus every element.
///
/// Render order is shapes (list order), then the image, then texts
/// (list order); later entries draw on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDoc {
    pub template: Template,
    pub image: ImageElement,
    #[serde(default)]
    pub texts: Vec<TextElement>,
    #[serde(default)]
    pub shapes: Vec<ShapeElement>,
}

impl CardDoc {
    /// An empty card: no photo, no texts, no shapes.
    #[must_use]
    pub fn blank(template: Template) -> Self {
        Self { template, image: ImageElement::default(), texts: Vec::new(), shapes: Vec::new() }
    }

    /// Parse a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if `json` is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the persisted snapshot form.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Find which collection holds `id`.
    #[must_use]
    pub fn locate(&self, id: &ElementId) -> Option<Slot> {
        if *id == self.image.id {
            return Some(Slot::Image);
        }
        if let Some(i) = self.texts.iter().position(|t| t.id == *id) {
            return Some(Slot::Text(i));
        }
        self.shapes.iter().position(|s| s.id == *id).map(Slot::Shape)
    }

    /// Borrow the element at `slot`.
    #[must_use]
    pub fn at(&self, slot: Slot) -> Option<ElementRef<'_>> {
        match slot {
            Slot::Image => Some(ElementRef::Image(&self.image)),
            Slot::Text(i) => self.texts.get(i).map(ElementRef::Text),
            Slot::Shape(i) => self.shapes.get(i).map(ElementRef::Shape),
        }
    }

    /// Borrow the element with `id`.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<ElementRef<'_>> {
        self.locate(id).and_then(|slot| self.at(slot))
    }

    /// Overwrite the stored element that has `el`'s id. Returns `false` if absent.
    pub fn replace(&mut self, el: Element) -> bool {
        match (self.locate(el.id()), el) {
            (Some(Slot::Image), Element::Image(e)) => self.image = e,
            (Some(Slot::Text(i)), Element::Text(e)) => self.texts[i] = e,
            (Some(Slot::Shape(i)), Element::Shape(e)) => self.shapes[i] = e,
            _ => return false,
        }
        true
    }

    /// Write placement for `id`. Returns `false` if absent.
    pub fn set_placement(&mut self, id: &ElementId, p: Placement) -> bool {
        let Some(mut el) = self.get(id).map(ElementRef::cloned) else {
            return false;
        };
        el.set_placement(p);
        self.replace(el)
    }

    /// All elements bottom-first, in draw order.
    ///
    /// The image slot is included only when it holds a source.
    #[must_use]
    pub fn render_order(&self) -> Vec<ElementRef<'_>> {
        let mut out: Vec<ElementRef<'_>> = self.shapes.iter().map(ElementRef::Shape).collect();
        if self.image.src.is_some() {
            out.push(ElementRef::Image(&self.image));
        }
        out.extend(self.texts.iter().map(ElementRef::Text));
        out
    }

    /// Replace the image source.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::InvalidImageSource`] unless `src` is a `data:` URI
    /// or an `http(s)` URL.
    pub fn set_image_src(&mut self, src: &str) -> Result<bool, DocError> {
        let src = src.trim();
        let lower = src.to_ascii_lowercase();
        let accepted = lower.starts_with("data:image/") || lower.starts_with("https://") || lower.starts_with("http://");
        if !accepted {
            let shown: String = src.chars().take(32).collect();
            return Err(DocError::InvalidImageSource(shown));
        }
        if self.image.src.as_deref() == Some(src) {
            return Ok(false);
        }
        self.image.src = Some(src.to_owned());
        Ok(true)
    }

    /// Copy of the card with `{{key}}` placeholders in text content replaced
    /// by `values[key]`. Placeholders without a value are left verbatim.
    #[must_use]
    pub fn merge_fields(&self, values: &HashMap<String, String>) -> Self {
        let mut out = self.clone();
        for text in &mut out.texts {
            text.content = substitute(&text.content, values);
        }
        out
    }
}

impl Default for CardDoc {
    /// The sample card a new session starts with.
    fn default() -> Self {
        let mut name = TextElement::with_content("Jane Doe");
        name.id = ElementId::new("text-name");
        name.y = 70.0;
        name.font_size = 20.0;
        name.font_weight = 700;
        name.is_bold = true;

        let mut title = TextElement::with_content("Software Engineer");
        title.id = ElementId::new("text-title");
        title.y = 80.0;
        title.font_size = 14.0;
        title.color = "#333333".to_owned();

        Self {
            template: Template::default(),
            image: ImageElement { src: Some(PLACEHOLDER_IMAGE_SRC.to_owned()), ..ImageElement::default() },
            texts: vec![name, title],
            shapes: Vec::new(),
        }
    }
}

fn substitute(content: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = after[..end].trim();
        match values.get(key) {
            Some(v) => out.push_str(v),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}
