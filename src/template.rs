//! Card templates: the fixed pixel size every element percentage is measured
//! against, plus the static decoration each preset prints on the card.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CARD_LONG_PX, CARD_SHORT_PX};

/// Which preset a template was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// Landscape card with a colored band along the bottom edge.
    #[default]
    Modern,
    /// Landscape card with an "EMPLOYEE ID" caption in the top-right corner.
    Classic,
    /// Portrait card with a "COMPANY" caption in the top-left corner.
    Vertical,
}

impl TemplateKind {
    /// Parse a preset name as used in persisted designs and on the CLI.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "modern" => Some(Self::Modern),
            "classic" => Some(Self::Classic),
            "vertical" => Some(Self::Vertical),
            _ => None,
        }
    }
}

/// Card orientation, derived from the template's aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// The card canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Preset this template came from; selects the static decoration.
    pub id: TemplateKind,
    /// Display name.
    pub name: String,
    /// Card width in pixels.
    pub width: f64,
    /// Card height in pixels.
    pub height: f64,
}

impl Template {
    /// Build the preset for `kind`.
    #[must_use]
    pub fn preset(kind: TemplateKind) -> Self {
        let (name, width, height) = match kind {
            TemplateKind::Modern => ("Modern", CARD_LONG_PX, CARD_SHORT_PX),
            TemplateKind::Classic => ("Classic", CARD_LONG_PX, CARD_SHORT_PX),
            TemplateKind::Vertical => ("Vertical", CARD_SHORT_PX, CARD_LONG_PX),
        };
        Self { id: kind, name: name.to_owned(), width, height }
    }

    /// All presets in picker order.
    #[must_use]
    pub fn presets() -> Vec<Self> {
        [TemplateKind::Modern, TemplateKind::Classic, TemplateKind::Vertical]
            .into_iter()
            .map(Self::preset)
            .collect()
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.width < self.height { Orientation::Portrait } else { Orientation::Landscape }
    }

    /// The preset on the other side of the orientation picker.
    ///
    /// Landscape templates flip to `Vertical`; portrait flips back to `Modern`.
    #[must_use]
    pub fn toggled_orientation(&self) -> Self {
        match self.orientation() {
            Orientation::Landscape => Self::preset(TemplateKind::Vertical),
            Orientation::Portrait => Self::preset(TemplateKind::Modern),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::preset(TemplateKind::Modern)
    }
}
