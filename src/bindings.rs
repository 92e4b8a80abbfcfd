//! JavaScript-facing facade.
//!
//! `CardEditor` is the only type exported through `wasm-bindgen`. It speaks
//! plain numbers and strings: pointer coordinates are client pixels, modifier
//! keys arrive as a bitmask (see [`Modifiers::from_bits`]), and every handler
//! returns the resulting [`Action`]s as a JSON array. When an action asks for
//! a repaint the editor redraws before returning.

use std::fmt::Display;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::consts::{EXPORT_FILE_NAME, PHOTO_LOADED_EVENT};
use crate::doc::{CardDoc, ElementId, ElementPatch, ShapeKind};
use crate::edit::LayerDirection;
use crate::engine::{Action, Engine};
use crate::geom::{CardRect, Point};
use crate::input::{Button, Key, Modifiers};
use crate::template::{Template, TemplateKind};

fn js_err(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// The card editor bound to one `<canvas>`.
#[wasm_bindgen]
pub struct CardEditor {
    engine: Engine,
}

#[wasm_bindgen]
impl CardEditor {
    /// Create an editor. `snapshot` is a saved design; the sample card is
    /// used when it is absent.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, snapshot: Option<String>) -> Result<CardEditor, JsValue> {
        console_error_panic_hook::set_once();
        let doc = match snapshot {
            Some(json) => CardDoc::from_json(&json).map_err(js_err)?,
            None => CardDoc::default(),
        };
        Ok(Self { engine: Engine::new(canvas, doc) })
    }

    /// Report the card's bounding client rect and the device pixel ratio.
    pub fn set_card_rect(&mut self, left: f64, top: f64, width: f64, height: f64, dpr: f64) -> Result<(), JsValue> {
        self.engine.set_card_rect(CardRect::new(left, top, width, height), dpr);
        self.engine.render()
    }

    // --- Pointer & keyboard ---

    pub fn pointer_down(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> Result<String, JsValue> {
        let actions =
            self.engine.core.on_pointer_down(Point::new(x, y), Button::from_dom(button), Modifiers::from_bits(modifiers));
        self.finish(&actions)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, modifiers: u8) -> Result<String, JsValue> {
        let actions = self.engine.core.on_pointer_move(Point::new(x, y), Modifiers::from_bits(modifiers));
        self.finish(&actions)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64, button: i16, modifiers: u8) -> Result<String, JsValue> {
        let actions =
            self.engine.core.on_pointer_up(Point::new(x, y), Button::from_dom(button), Modifiers::from_bits(modifiers));
        self.finish(&actions)
    }

    pub fn pointer_leave(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.on_pointer_leave();
        self.finish(&actions)
    }

    pub fn key_down(&mut self, key: String, modifiers: u8) -> Result<String, JsValue> {
        let actions = self.engine.core.on_key_down(Key(key), Modifiers::from_bits(modifiers));
        self.finish(&actions)
    }

    // --- Selection & editing ---

    /// Select an element by id; `None` clears the selection.
    pub fn select(&mut self, id: Option<String>) -> Result<String, JsValue> {
        let actions = self.engine.core.select(id.map(ElementId::new));
        self.finish(&actions)
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.engine.core.selection().map(ToString::to_string)
    }

    pub fn add_text(&mut self, content: &str) -> Result<String, JsValue> {
        let actions = self.engine.core.add_text(content);
        self.finish(&actions)
    }

    /// `kind` is one of `rectangle`, `circle`, `triangle`, `line`.
    pub fn add_shape(&mut self, kind: &str) -> Result<String, JsValue> {
        let kind = ShapeKind::from_name(kind).ok_or_else(|| js_err(format!("unknown shape kind: {kind}")))?;
        let actions = self.engine.core.add_shape(kind);
        self.finish(&actions)
    }

    pub fn delete_selected(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.delete_selected();
        self.finish(&actions)
    }

    pub fn duplicate_selected(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.duplicate_selected();
        self.finish(&actions)
    }

    /// `direction` is `forward` or `backward`.
    pub fn set_layer(&mut self, direction: &str) -> Result<String, JsValue> {
        let dir =
            LayerDirection::from_name(direction).ok_or_else(|| js_err(format!("unknown layer direction: {direction}")))?;
        let actions = self.engine.core.move_layer(dir);
        self.finish(&actions)
    }

    pub fn toggle_lock(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.toggle_lock();
        self.finish(&actions)
    }

    /// Apply a JSON property patch (camelCase field names) to the selection.
    pub fn patch_selected(&mut self, patch_json: &str) -> Result<String, JsValue> {
        let patch: ElementPatch = serde_json::from_str(patch_json).map_err(js_err)?;
        let actions = self.engine.core.patch_selected(&patch);
        self.finish(&actions)
    }

    /// Use an uploaded (`data:` URI) or remote (`http(s)`) image.
    ///
    /// The photo decodes asynchronously, so the immediate repaint shows a
    /// placeholder. Once the pixels are ready a `photoload` event (see
    /// [`CardEditor::photo_loaded_event`]) fires on the canvas; call
    /// [`CardEditor::render`] from its listener.
    pub fn set_image_src(&mut self, src: &str) -> Result<String, JsValue> {
        let actions = self.engine.core.set_image_src(src).map_err(js_err)?;
        self.finish(&actions)
    }

    /// The template presets, in picker order, as a JSON array.
    pub fn templates_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Template::presets()).map_err(js_err)
    }

    /// `name` is one of `modern`, `classic`, `vertical`.
    pub fn set_template(&mut self, name: &str) -> Result<String, JsValue> {
        let kind = TemplateKind::from_name(name).ok_or_else(|| js_err(format!("unknown template: {name}")))?;
        let actions = self.engine.core.set_template(kind);
        self.finish(&actions)
    }

    pub fn toggle_orientation(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.toggle_orientation();
        self.finish(&actions)
    }

    // --- History ---

    pub fn undo(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.undo();
        self.finish(&actions)
    }

    pub fn redo(&mut self) -> Result<String, JsValue> {
        let actions = self.engine.core.redo();
        self.finish(&actions)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.engine.core.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.engine.core.can_redo()
    }

    // --- Persistence & export ---

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        self.engine.core.snapshot_json().map_err(js_err)
    }

    pub fn load_snapshot_json(&mut self, json: &str) -> Result<String, JsValue> {
        let doc = CardDoc::from_json(json).map_err(js_err)?;
        let actions = self.engine.core.load_snapshot(doc);
        self.finish(&actions)
    }

    #[must_use]
    pub fn export_svg(&self) -> String {
        self.engine.core.export_svg()
    }

    #[must_use]
    pub fn export_file_name(&self) -> String {
        EXPORT_FILE_NAME.to_owned()
    }

    /// Name of the DOM event fired on the canvas when a new photo has decoded.
    #[must_use]
    pub fn photo_loaded_event(&self) -> String {
        PHOTO_LOADED_EVENT.to_owned()
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        self.engine.render()
    }
}

impl CardEditor {
    /// Repaint if asked to, then encode the actions for the host.
    fn finish(&mut self, actions: &[Action]) -> Result<String, JsValue> {
        if actions.contains(&Action::RenderNeeded) {
            self.engine.render()?;
        }
        serde_json::to_string(actions).map_err(js_err)
    }
}
