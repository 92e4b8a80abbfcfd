//! SVG export.
//!
//! Produces a standalone document in template pixels. Output is a pure
//! function of the card: numbers are rounded to four decimals, and every
//! element is written in render order (shapes, template decoration, image,
//! texts), so exporting the same card twice yields identical bytes.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use crate::doc::{CardDoc, ImageElement, ShapeElement, ShapeKind, TextAlign, TextElement, opacity};
use crate::template::{Template, TemplateKind};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Render the card as an SVG document.
#[must_use]
pub fn export_svg(doc: &CardDoc) -> String {
    let t = &doc.template;
    let mut out = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"{SVG_NS}\" xmlns:xlink=\"{XLINK_NS}\">\n",
        fmt_num(t.width),
        fmt_num(t.height)
    );
    out.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    for shape in &doc.shapes {
        out.push_str(&shape_svg(shape, t));
    }
    out.push_str(&decoration_svg(t));
    if let Some(image) = image_svg(&doc.image, t) {
        out.push_str(&image);
    }
    for text in &doc.texts {
        out.push_str(&text_svg(text, t));
    }
    out.push_str("</svg>\n");
    out
}

/// Pixel box of a percent-placed element: `(left, top, width, height)`.
fn pixel_box(x: f64, y: f64, w: f64, h: f64, t: &Template) -> (f64, f64, f64, f64) {
    let width = t.width * w / 100.0;
    let height = t.height * h / 100.0;
    (t.width * x / 100.0 - width / 2.0, t.height * y / 100.0 - height / 2.0, width, height)
}

fn shape_svg(s: &ShapeElement, t: &Template) -> String {
    let (x, y, w, h) = pixel_box(s.x, s.y, s.width, s.height, t);
    let (cx, cy) = (x + w / 2.0, y + h / 2.0);
    let common = format!(
        "stroke=\"{}\" stroke-width=\"{}\" opacity=\"{}\" transform=\"rotate({} {} {})\"",
        escape(&s.stroke_color),
        fmt_num(s.stroke_width),
        fmt_num(opacity(s.transparency)),
        fmt_num(s.rotation),
        fmt_num(cx),
        fmt_num(cy)
    );
    let fill = escape(&s.fill_color);
    match s.kind {
        ShapeKind::Rectangle => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" {common}/>\n",
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        ),
        ShapeKind::Circle => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" fill=\"{fill}\" {common}/>\n",
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(w / 2.0),
            fmt_num(h / 2.0)
        ),
        ShapeKind::Triangle => format!(
            "<polygon points=\"{},{} {},{} {},{}\" fill=\"{fill}\" {common}/>\n",
            fmt_num(cx),
            fmt_num(y),
            fmt_num(x + w),
            fmt_num(y + h),
            fmt_num(x),
            fmt_num(y + h)
        ),
        ShapeKind::Line => format!(
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {common}/>\n",
            fmt_num(x),
            fmt_num(cy),
            fmt_num(x + w),
            fmt_num(cy)
        ),
    }
}

fn decoration_svg(t: &Template) -> String {
    match t.id {
        TemplateKind::Modern => format!(
            "<rect width=\"100%\" height=\"16\" y=\"{}\" fill=\"#78B0FF\" fill-opacity=\"0.8\"/>\n",
            fmt_num(t.height - 16.0)
        ),
        TemplateKind::Classic => format!(
            "<text x=\"{}\" y=\"24\" text-anchor=\"end\" font-size=\"10\" font-weight=\"bold\" fill=\"#a0aec0\">EMPLOYEE ID</text>\n",
            fmt_num(t.width - 16.0)
        ),
        TemplateKind::Vertical => {
            "<text x=\"16\" y=\"24\" font-size=\"14\" font-weight=\"bold\" fill=\"#78B0FF\">COMPANY</text>\n".to_owned()
        }
    }
}

fn image_svg(img: &ImageElement, t: &Template) -> Option<String> {
    let src = img.src.as_deref()?;
    let (x, y, w, h) = pixel_box(img.x, img.y, img.width, img.height, t);
    let (cx, cy) = (x + w / 2.0, y + h / 2.0);
    let geometry = format!("x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"", fmt_num(x), fmt_num(y), fmt_num(w), fmt_num(h));

    let mut out = format!(
        "<g transform=\"translate({} {}) rotate({}) translate({} {})\">\n",
        fmt_num(cx),
        fmt_num(cy),
        fmt_num(img.rotation),
        fmt_num(-cx),
        fmt_num(-cy)
    );
    out.push_str(&format!(
        "<image href=\"{}\" {geometry} opacity=\"{}\"/>\n",
        escape(src),
        fmt_num(opacity(img.transparency))
    ));
    if img.border_size > 0.0 {
        out.push_str(&format!(
            "<rect {geometry} fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            escape(&img.border_color),
            fmt_num(img.border_size)
        ));
    }
    out.push_str("</g>\n");
    Some(out)
}

fn text_svg(text: &TextElement, t: &Template) -> String {
    let x = t.width * text.x / 100.0;
    let y = t.height * text.y / 100.0;
    let anchor = match text.align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    format!(
        "<text x=\"{x}\" y=\"{y}\" font-family=\"{family}, sans-serif\" font-size=\"{size}\" font-weight=\"{weight}\" \
         font-style=\"{style}\" text-decoration=\"{decoration}\" fill=\"{fill}\" opacity=\"{opacity}\" \
         text-anchor=\"{anchor}\" dominant-baseline=\"middle\" transform=\"rotate({rot} {x} {y})\">{content}</text>\n",
        x = fmt_num(x),
        y = fmt_num(y),
        family = escape(&text.font_family),
        size = fmt_num(text.font_size),
        weight = text.effective_weight(),
        style = if text.is_italic { "italic" } else { "normal" },
        decoration = if text.is_underline { "underline" } else { "none" },
        fill = escape(&text.color),
        opacity = fmt_num(opacity(text.transparency)),
        rot = fmt_num(text.rotation),
        content = escape(&text.content),
    )
}

/// Format a coordinate: four decimals at most, at least one fractional digit.
#[must_use]
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0.0".to_owned();
    }
    // Adding 0.0 turns a rounded -0.0 into 0.0.
    let r = (v * 10_000.0).round() / 10_000.0 + 0.0;
    if r.fract().abs() < f64::EPSILON { format!("{r:.1}") } else { format!("{r}") }
}

/// Escape XML special characters for content and attribute values.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
