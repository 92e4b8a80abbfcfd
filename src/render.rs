//! Rendering: draws the live card preview to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads the document and UI state and produces pixels; it never mutates
//! application state. Drawing happens in card-local CSS pixels, so the
//! template's pixel sizes (fonts, strokes, borders) are scaled by the ratio of
//! the on-screen card to the template.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_RADIUS_PX};
use crate::doc::{CardDoc, ElementRef, ImageElement, ShapeElement, ShapeKind, TextAlign, TextElement, opacity};
use crate::geom::CardRect;
use crate::hit::{Corner, ElementBox, element_box};
use crate::input::UiState;
use crate::template::TemplateKind;

const SELECTION_COLOR: &str = "#1E90FF";
const LOCKED_COLOR: &str = "#9CA3AF";
const SELECTION_DASH_PX: f64 = 4.0;
const PLACEHOLDER_FILL: &str = "#E5E7EB";
const PLACEHOLDER_TEXT: &str = "#6B7280";

/// Draw the full card: background, elements, template decoration, selection UI.
///
/// `photo` is the decoded image for `doc.image.src`, when the host has one
/// loaded; otherwise a placeholder is drawn in the image slot.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    doc: &CardDoc,
    ui: &UiState,
    rect: &CardRect,
    dpr: f64,
    photo: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    if rect.is_degenerate() {
        return Ok(());
    }
    let scale = rect.width / doc.template.width;

    // Layer 1: clear and background.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, rect.width, rect.height);
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, rect.width, rect.height);

    // Layer 2: shapes, decoration, image, texts.
    for shape in &doc.shapes {
        let bx = element_box(ElementRef::Shape(shape), doc, rect);
        draw_shape(ctx, shape, &bx, scale)?;
    }
    draw_decoration(ctx, doc.template.id, rect, scale)?;
    let image_box = element_box(ElementRef::Image(&doc.image), doc, rect);
    draw_image(ctx, &doc.image, &image_box, scale, photo)?;
    for text in &doc.texts {
        draw_text(ctx, text, rect, scale)?;
    }

    // Layer 3: selection UI.
    if let Some(el) = ui.selected_id.as_ref().and_then(|id| doc.get(id)) {
        draw_selection(ctx, el, &element_box(el, doc, rect))?;
    }
    Ok(())
}

// =============================================================
// Elements
// =============================================================

fn draw_shape(ctx: &CanvasRenderingContext2d, s: &ShapeElement, bx: &ElementBox, scale: f64) -> Result<(), JsValue> {
    ctx.save();
    translate_and_rotate(ctx, bx)?;
    ctx.set_global_alpha(opacity(s.transparency));
    ctx.set_fill_style_str(&s.fill_color);
    ctx.set_stroke_style_str(&s.stroke_color);
    ctx.set_line_width(s.stroke_width * scale);

    let (hw, hh) = (bx.half_w, bx.half_h);
    match s.kind {
        ShapeKind::Rectangle => {
            ctx.begin_path();
            ctx.rect(-hw, -hh, hw * 2.0, hh * 2.0);
        }
        ShapeKind::Circle => {
            ctx.begin_path();
            ctx.ellipse(0.0, 0.0, hw, hh, 0.0, 0.0, 2.0 * PI)?;
        }
        ShapeKind::Triangle => {
            ctx.begin_path();
            ctx.move_to(0.0, -hh);
            ctx.line_to(hw, hh);
            ctx.line_to(-hw, hh);
            ctx.close_path();
        }
        ShapeKind::Line => {
            ctx.begin_path();
            ctx.move_to(-hw, 0.0);
            ctx.line_to(hw, 0.0);
            ctx.stroke();
            ctx.restore();
            return Ok(());
        }
    }
    ctx.fill();
    if s.stroke_width > 0.0 {
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

fn draw_image(
    ctx: &CanvasRenderingContext2d,
    img: &ImageElement,
    bx: &ElementBox,
    scale: f64,
    photo: Option<&HtmlImageElement>,
) -> Result<(), JsValue> {
    let (hw, hh) = (bx.half_w, bx.half_h);
    ctx.save();
    translate_and_rotate(ctx, bx)?;

    match photo.filter(|p| img.src.is_some() && p.complete() && p.natural_width() > 0) {
        Some(photo) => {
            ctx.set_global_alpha(opacity(img.transparency));
            ctx.draw_image_with_html_image_element_and_dw_and_dh(photo, -hw, -hh, hw * 2.0, hh * 2.0)?;
        }
        None => {
            ctx.set_fill_style_str(PLACEHOLDER_FILL);
            ctx.fill_rect(-hw, -hh, hw * 2.0, hh * 2.0);
            ctx.set_fill_style_str(PLACEHOLDER_TEXT);
            ctx.set_font(&format!("{}px sans-serif", (12.0 * scale).max(6.0)));
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");
            ctx.fill_text("Photo", 0.0, 0.0)?;
        }
    }

    if img.border_size > 0.0 {
        ctx.set_global_alpha(1.0);
        ctx.set_stroke_style_str(&img.border_color);
        ctx.set_line_width(img.border_size * scale);
        ctx.stroke_rect(-hw, -hh, hw * 2.0, hh * 2.0);
    }
    ctx.restore();
    Ok(())
}

fn draw_text(ctx: &CanvasRenderingContext2d, t: &TextElement, rect: &CardRect, scale: f64) -> Result<(), JsValue> {
    if t.content.is_empty() {
        return Ok(());
    }
    let x = rect.width * t.x / 100.0;
    let y = rect.height * t.y / 100.0;
    let size = t.font_size * scale;

    ctx.save();
    ctx.translate(x, y)?;
    ctx.rotate(t.rotation.to_radians())?;
    ctx.set_global_alpha(opacity(t.transparency));
    ctx.set_fill_style_str(&t.color);
    let style = if t.is_italic { "italic" } else { "normal" };
    ctx.set_font(&format!("{style} {} {size}px \"{}\", sans-serif", t.effective_weight(), t.font_family));
    let align = match t.align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    };
    ctx.set_text_align(align);
    ctx.set_text_baseline("middle");
    ctx.fill_text(&t.content, 0.0, 0.0)?;

    if t.is_underline {
        let width = ctx.measure_text(&t.content)?.width();
        let start = match t.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let underline_y = size * 0.55;
        ctx.set_stroke_style_str(&t.color);
        ctx.set_line_width((size / 14.0).max(1.0));
        ctx.begin_path();
        ctx.move_to(start, underline_y);
        ctx.line_to(start + width, underline_y);
        ctx.stroke();
    }
    ctx.restore();
    Ok(())
}

fn draw_decoration(
    ctx: &CanvasRenderingContext2d,
    kind: TemplateKind,
    rect: &CardRect,
    scale: f64,
) -> Result<(), JsValue> {
    ctx.save();
    match kind {
        TemplateKind::Modern => {
            let band = 16.0 * scale;
            ctx.set_global_alpha(0.8);
            ctx.set_fill_style_str("#78B0FF");
            ctx.fill_rect(0.0, rect.height - band, rect.width, band);
        }
        TemplateKind::Classic => {
            ctx.set_fill_style_str("#a0aec0");
            ctx.set_font(&format!("bold {}px sans-serif", 10.0 * scale));
            ctx.set_text_align("right");
            ctx.set_text_baseline("alphabetic");
            ctx.fill_text("EMPLOYEE ID", rect.width - 16.0 * scale, 24.0 * scale)?;
        }
        TemplateKind::Vertical => {
            ctx.set_fill_style_str("#78B0FF");
            ctx.set_font(&format!("bold {}px sans-serif", 14.0 * scale));
            ctx.set_text_align("left");
            ctx.set_text_baseline("alphabetic");
            ctx.fill_text("COMPANY", 16.0 * scale, 24.0 * scale)?;
        }
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Selection
// =============================================================

/// Dashed outline for any selection; handles only when unlocked.
fn draw_selection(ctx: &CanvasRenderingContext2d, el: ElementRef<'_>, bx: &ElementBox) -> Result<(), JsValue> {
    let locked = el.is_locked();
    let color = if locked { LOCKED_COLOR } else { SELECTION_COLOR };

    ctx.save();
    translate_and_rotate(ctx, bx)?;
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(1.0);
    let dash = js_sys::Array::new();
    dash.push(&SELECTION_DASH_PX.into());
    dash.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash)?;
    ctx.stroke_rect(-bx.half_w, -bx.half_h, bx.half_w * 2.0, bx.half_h * 2.0);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();

    if locked {
        return Ok(());
    }

    ctx.save();
    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);

    if el.has_box() {
        for corner in Corner::ALL {
            let p = bx.corner(corner);
            ctx.begin_path();
            ctx.arc(p.x, p.y, HANDLE_RADIUS_PX * 0.75, 0.0, 2.0 * PI)?;
            ctx.fill();
            ctx.stroke();
        }
    }

    // Rotate handle with a stem from the top edge.
    let top = bx.to_screen(0.0, -bx.half_h);
    let rh = bx.rotate_handle();
    ctx.begin_path();
    ctx.move_to(top.x, top.y);
    ctx.line_to(rh.x, rh.y);
    ctx.stroke();
    ctx.begin_path();
    ctx.arc(rh.x, rh.y, ROTATE_HANDLE_RADIUS_PX * 0.75, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.stroke();

    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the box center and rotate by its rotation.
fn translate_and_rotate(ctx: &CanvasRenderingContext2d, bx: &ElementBox) -> Result<(), JsValue> {
    ctx.translate(bx.center.x, bx.center.y)?;
    ctx.rotate(bx.rotation.to_radians())?;
    Ok(())
}
