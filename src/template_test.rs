#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Presets
// =============================================================

#[test]
fn preset_sizes() {
    let modern = Template::preset(TemplateKind::Modern);
    assert_eq!((modern.width, modern.height), (338.0, 213.0));
    let classic = Template::preset(TemplateKind::Classic);
    assert_eq!((classic.width, classic.height), (338.0, 213.0));
    let vertical = Template::preset(TemplateKind::Vertical);
    assert_eq!((vertical.width, vertical.height), (213.0, 338.0));
}

#[test]
fn presets_in_picker_order() {
    let ids: Vec<TemplateKind> = Template::presets().into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TemplateKind::Modern, TemplateKind::Classic, TemplateKind::Vertical]);
}

#[test]
fn default_is_modern() {
    assert_eq!(Template::default().id, TemplateKind::Modern);
}

#[test]
fn from_name_is_case_insensitive() {
    assert_eq!(TemplateKind::from_name("Classic"), Some(TemplateKind::Classic));
    assert_eq!(TemplateKind::from_name(" vertical "), Some(TemplateKind::Vertical));
    assert_eq!(TemplateKind::from_name("badge"), None);
}

// =============================================================
// Orientation
// =============================================================

#[test]
fn orientation_from_aspect() {
    assert_eq!(Template::preset(TemplateKind::Classic).orientation(), Orientation::Landscape);
    assert_eq!(Template::preset(TemplateKind::Vertical).orientation(), Orientation::Portrait);
}

#[test]
fn toggle_orientation_flips_between_modern_and_vertical() {
    let portrait = Template::preset(TemplateKind::Classic).toggled_orientation();
    assert_eq!(portrait.id, TemplateKind::Vertical);
    let landscape = portrait.toggled_orientation();
    assert_eq!(landscape.id, TemplateKind::Modern);
}

// =============================================================
// Serde
// =============================================================

#[test]
fn serde_uses_lowercase_ids() {
    let json = serde_json::to_value(Template::preset(TemplateKind::Vertical)).unwrap();
    assert_eq!(json["id"], "vertical");
    assert_eq!(json["width"], 213.0);
    let back: Template = serde_json::from_value(json).unwrap();
    assert_eq!(back, Template::preset(TemplateKind::Vertical));
}
