use serde::Serialize;
use tracing::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlImageElement};

use crate::consts::PHOTO_LOADED_EVENT;
use crate::doc::{CardDoc, DocError, ElementId, ElementPatch, ElementRef, ShapeElement, ShapeKind, TextElement};
use crate::edit::LayerDirection;
use crate::geom::{CardRect, Point};
use crate::hit::{HitPart, hit_test};
use crate::history::History;
use crate::input::{Button, Gesture, InputState, InteractionMode, Key, Modifiers, UiState};
use crate::template::{Template, TemplateKind};
use crate::{render, svg, transform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Action {
    SelectionChanged(Option<ElementId>),
    ElementCreated(ElementId),
    ElementUpdated(ElementId),
    ElementDeleted(ElementId),
    HistoryChanged {
        #[serde(rename = "canUndo")]
        can_undo: bool,
        #[serde(rename = "canRedo")]
        can_redo: bool,
    },
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: everything that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// `doc` is the live card, which gestures mutate frame by frame; `history`
/// holds committed snapshots and is only written when a gesture or edit ends.
pub struct EngineCore {
    pub doc: CardDoc,
    history: History<CardDoc>,
    pub ui: UiState,
    pub input: InputState,
    pub card_rect: CardRect,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(CardDoc::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(doc: CardDoc) -> Self {
        let card_rect = CardRect::sized(doc.template.width, doc.template.height);
        Self {
            history: History::new(doc.clone()),
            doc,
            ui: UiState::default(),
            input: InputState::default(),
            card_rect,
        }
    }

    // --- Data inputs ---

    /// Replace the card with a persisted snapshot, dropping history and selection.
    pub fn load_snapshot(&mut self, doc: CardDoc) -> Vec<Action> {
        info!(texts = doc.texts.len(), shapes = doc.shapes.len(), "loaded card snapshot");
        self.history.reset(doc.clone());
        self.doc = doc;
        self.input = InputState::Idle;
        self.ui.selected_id = None;
        vec![Action::SelectionChanged(None), self.history_action(), Action::RenderNeeded]
    }

    /// Update the card's on-screen rectangle (client coordinates, CSS pixels).
    pub fn set_card_rect(&mut self, rect: CardRect) {
        self.card_rect = rect;
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, client_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        let local = self.card_rect.client_to_local(client_pt);
        let hit = hit_test(local, &self.doc, &self.card_rect, self.ui.selected_id.as_ref());

        let Some(hit) = hit else {
            return self.select(None);
        };

        let mut actions = self.select(Some(hit.element_id.clone()));
        let locked = self.doc.get(&hit.element_id).is_none_or(ElementRef::is_locked);
        if locked {
            return actions;
        }

        let mode = match hit.part {
            HitPart::Body => InteractionMode::Dragging,
            HitPart::RotateHandle => InteractionMode::Rotating,
            HitPart::ResizeHandle(corner) => InteractionMode::Resizing(corner),
        };
        actions.extend(self.begin_interaction(&hit.element_id, mode, local));
        actions
    }

    pub fn on_pointer_move(&mut self, client_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let local = self.card_rect.client_to_local(client_pt);

        if self.input.is_idle() {
            return self.hover(local);
        }
        let InputState::Active(gesture) = &self.input else {
            return Vec::new();
        };

        let original = gesture.original.placement();
        let Some(next) =
            transform::apply(gesture.mode, original, gesture.original.has_box(), &self.card_rect, gesture.start, local)
        else {
            return Vec::new();
        };

        let id = gesture.id.clone();
        let before = self.doc.get(&id).map(ElementRef::placement);
        if !self.doc.set_placement(&id, next) {
            return Vec::new();
        }
        if self.doc.get(&id).map(ElementRef::placement) == before {
            return Vec::new();
        }
        vec![Action::ElementUpdated(id), Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, client_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.finish_interaction();
        if !actions.is_empty() {
            let local = self.card_rect.client_to_local(client_pt);
            actions.extend(self.hover(local));
        }
        actions
    }

    /// The pointer left the card; ends any gesture like pointer-up.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let mut actions = self.finish_interaction();
        actions.extend(self.set_cursor("default"));
        actions
    }

    // --- Keyboard ---

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        if modifiers.command() {
            if (key.is("z") && modifiers.shift) || key.is("y") {
                return self.redo();
            }
            if key.is("z") {
                return self.undo();
            }
            if key.is("d") {
                return self.duplicate_selected();
            }
            if key.is("l") {
                return self.toggle_lock();
            }
            return Vec::new();
        }
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => self.select(None),
            "]" => self.move_layer(LayerDirection::Forward),
            "[" => self.move_layer(LayerDirection::Backward),
            _ => Vec::new(),
        }
    }

    // --- Selection & editing ---

    /// Select `id`, or clear the selection. Unknown ids clear it.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        let id = id.filter(|id| self.doc.locate(id).is_some());
        if self.ui.selected_id == id {
            return Vec::new();
        }
        debug!(selected = ?id.as_ref().map(ElementId::as_str), "selection changed");
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    /// Add a text element with default styling and select it.
    pub fn add_text(&mut self, content: &str) -> Vec<Action> {
        let mut actions = self.settle();
        let text = TextElement::with_content(content);
        let id = text.id.clone();
        self.doc.texts.push(text);
        actions.extend(self.created(id));
        actions
    }

    /// Add a shape with default styling and select it.
    pub fn add_shape(&mut self, kind: ShapeKind) -> Vec<Action> {
        let mut actions = self.settle();
        let shape = ShapeElement::of_kind(kind);
        let id = shape.id.clone();
        self.doc.shapes.push(shape);
        actions.extend(self.created(id));
        actions
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        let mut actions = self.settle();
        let Some(id) = self.ui.selected_id.clone() else {
            return actions;
        };
        if !self.doc.delete(&id) {
            return actions;
        }
        info!(%id, "deleted element");
        self.ui.selected_id = None;
        actions.push(Action::ElementDeleted(id));
        actions.push(Action::SelectionChanged(None));
        actions.extend(self.commit());
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn duplicate_selected(&mut self) -> Vec<Action> {
        let mut actions = self.settle();
        let Some(id) = self.ui.selected_id.clone() else {
            return actions;
        };
        let Some(copy) = self.doc.duplicate(&id) else {
            return actions;
        };
        debug!(%id, copy = %copy, "duplicated element");
        actions.extend(self.created(copy));
        actions
    }

    /// Move the selection one step up or down within its list.
    pub fn move_layer(&mut self, dir: LayerDirection) -> Vec<Action> {
        let mut actions = self.settle();
        let Some(id) = self.ui.selected_id.clone() else {
            return actions;
        };
        if self.doc.move_layer(&id, dir) {
            actions.extend(self.updated(id));
        }
        actions
    }

    pub fn toggle_lock(&mut self) -> Vec<Action> {
        let mut actions = self.settle();
        let Some(id) = self.ui.selected_id.clone() else {
            return actions;
        };
        if let Some(locked) = self.doc.toggle_lock(&id) {
            debug!(%id, locked, "toggled lock");
            actions.extend(self.updated(id));
        }
        actions
    }

    /// Apply a property patch to the selection.
    pub fn patch_selected(&mut self, patch: &ElementPatch) -> Vec<Action> {
        let Some(id) = self.ui.selected_id.clone() else {
            return Vec::new();
        };
        self.patch_element(&id, patch)
    }

    /// Apply a property patch to a named element.
    pub fn patch_element(&mut self, id: &ElementId, patch: &ElementPatch) -> Vec<Action> {
        let mut actions = self.settle();
        if self.doc.patch(id, patch) {
            actions.extend(self.updated(id.clone()));
        }
        actions
    }

    /// Replace the image source with an uploaded or fetched image.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::InvalidImageSource`] for sources other than `data:`
    /// URIs and `http(s)` URLs.
    pub fn set_image_src(&mut self, src: &str) -> Result<Vec<Action>, DocError> {
        let mut actions = self.settle();
        if self.doc.set_image_src(src)? {
            info!(len = src.len(), "image source replaced");
            actions.extend(self.updated(ElementId::image()));
        }
        Ok(actions)
    }

    pub fn set_template(&mut self, kind: TemplateKind) -> Vec<Action> {
        let mut actions = self.settle();
        self.doc.template = Template::preset(kind);
        actions.extend(self.commit());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Flip between the landscape and portrait presets.
    pub fn toggle_orientation(&mut self) -> Vec<Action> {
        let next = self.doc.template.toggled_orientation();
        self.set_template(next.id)
    }

    // --- History ---

    pub fn undo(&mut self) -> Vec<Action> {
        let mut actions = self.settle();
        if !self.history.undo() {
            return actions;
        }
        debug!(depth = self.history.undo_depth(), "undo");
        actions.extend(self.restore_present());
        actions
    }

    pub fn redo(&mut self) -> Vec<Action> {
        let mut actions = self.settle();
        if !self.history.redo() {
            return actions;
        }
        debug!(depth = self.history.undo_depth(), "redo");
        actions.extend(self.restore_present());
        actions
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<&ElementId> {
        self.ui.selected_id.as_ref()
    }

    #[must_use]
    pub fn export_svg(&self) -> String {
        svg::export_svg(&self.doc)
    }

    /// The committed card, as the host should persist it.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if serialization fails.
    pub fn snapshot_json(&self) -> Result<String, DocError> {
        self.history.present().to_json()
    }

    // --- Internals ---

    fn begin_interaction(&mut self, id: &ElementId, mode: InteractionMode, local: Point) -> Vec<Action> {
        let Some(original) = self.doc.get(id).map(ElementRef::cloned) else {
            return Vec::new();
        };
        let start = match mode {
            InteractionMode::Dragging => {
                let p = original.placement();
                local - self.card_rect.percent_to_local(Point::new(p.x, p.y))
            }
            InteractionMode::Rotating | InteractionMode::Resizing(_) => local,
        };
        debug!(%id, mode = mode.name(), "gesture started");
        self.input = InputState::Active(Gesture { id: id.clone(), mode, original, start });

        let cursor = match mode {
            InteractionMode::Dragging => "grabbing",
            InteractionMode::Rotating => HitPart::RotateHandle.cursor(),
            InteractionMode::Resizing(corner) => HitPart::ResizeHandle(corner).cursor(),
        };
        self.set_cursor(cursor)
    }

    /// End the active gesture. Empty when there was none.
    fn finish_interaction(&mut self) -> Vec<Action> {
        let InputState::Active(gesture) = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        debug!(id = %gesture.id, mode = gesture.mode.name(), "gesture finished");
        let mut actions: Vec<Action> = self.commit().into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Commit an in-flight gesture before a discrete edit.
    fn settle(&mut self) -> Vec<Action> {
        if self.input.is_idle() { Vec::new() } else { self.finish_interaction() }
    }

    /// Record the live card in history if it changed.
    fn commit(&mut self) -> Option<Action> {
        if !self.history.set(self.doc.clone()) {
            return None;
        }
        debug!(depth = self.history.undo_depth(), "history committed");
        Some(self.history_action())
    }

    fn created(&mut self, id: ElementId) -> Vec<Action> {
        info!(%id, "element created");
        self.ui.selected_id = Some(id.clone());
        let mut actions = vec![Action::ElementCreated(id.clone()), Action::SelectionChanged(Some(id))];
        actions.extend(self.commit());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn updated(&mut self, id: ElementId) -> Vec<Action> {
        let mut actions = vec![Action::ElementUpdated(id)];
        actions.extend(self.commit());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn restore_present(&mut self) -> Vec<Action> {
        self.doc = self.history.present().clone();
        let mut actions = Vec::new();
        let stale = self.ui.selected_id.as_ref().is_some_and(|id| self.doc.locate(id).is_none());
        if stale {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(self.history_action());
        actions.push(Action::RenderNeeded);
        actions
    }

    fn hover(&mut self, local: Point) -> Vec<Action> {
        let part = hit_test(local, &self.doc, &self.card_rect, self.ui.selected_id.as_ref()).map(|h| h.part);
        self.set_cursor(part.map_or("default", HitPart::cursor))
    }

    fn set_cursor(&mut self, cursor: &str) -> Vec<Action> {
        if self.ui.cursor == cursor {
            return Vec::new();
        }
        cursor.clone_into(&mut self.ui.cursor);
        vec![Action::SetCursor(cursor.to_owned())]
    }

    fn history_action(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }
}

/// What the canvas-side photo element has to do to match the card's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSync {
    Unchanged,
    /// Start decoding this source.
    Load(String),
    /// The image slot was emptied.
    Clear,
}

/// Compare the source being decoded with the one the card now holds.
#[must_use]
pub fn photo_sync(current: Option<&str>, wanted: Option<&str>) -> PhotoSync {
    match (current, wanted) {
        (a, b) if a == b => PhotoSync::Unchanged,
        (_, Some(src)) => PhotoSync::Load(src.to_owned()),
        (_, None) => PhotoSync::Clear,
    }
}

/// The full card engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    /// Image element decoding `photo_src`.
    photo: Option<HtmlImageElement>,
    photo_src: Option<String>,
    /// Kept alive while `photo` may still fire `onload`.
    photo_onload: Option<Closure<dyn FnMut()>>,
    dpr: f64,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, doc: CardDoc) -> Self {
        Self { canvas, photo: None, photo_src: None, photo_onload: None, dpr: 1.0, core: EngineCore::new(doc) }
    }

    /// Update the card's client rectangle and size the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_card_rect(&mut self, rect: CardRect, dpr: f64) {
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        if !rect.is_degenerate() {
            self.canvas.set_width((rect.width * self.dpr).round() as u32);
            self.canvas.set_height((rect.height * self.dpr).round() as u32);
        }
        self.core.set_card_rect(rect);
    }

    /// Start decoding the image source if it changed since the last call.
    ///
    /// Decoding is asynchronous; until it completes the image slot shows a
    /// placeholder. When the browser has the pixels, a `photoload` event is
    /// dispatched on the canvas so the host can call `render` again.
    fn sync_photo(&mut self) -> Result<(), JsValue> {
        let change = photo_sync(self.photo_src.as_deref(), self.core.doc.image.src.as_deref());
        if change == PhotoSync::Unchanged {
            return Ok(());
        }
        if let Some(old) = self.photo.take() {
            old.set_onload(None);
        }
        self.photo_onload = None;
        self.photo_src.clone_from(&self.core.doc.image.src);

        if let PhotoSync::Load(src) = change {
            let img = HtmlImageElement::new()?;
            let onload = photo_loaded_notifier(self.canvas.clone());
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_cross_origin(Some("anonymous"));
            img.set_src(&src);
            debug!(len = src.len(), "decoding photo");
            self.photo = Some(img);
            self.photo_onload = Some(onload);
        }
        Ok(())
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a draw call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.sync_photo()?;
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core.doc, &self.core.ui, &self.core.card_rect, self.dpr, self.photo.as_ref())
    }
}

/// `onload` handler that tells the host the photo is ready to draw.
fn photo_loaded_notifier(canvas: HtmlCanvasElement) -> Closure<dyn FnMut()> {
    Closure::new(move || match Event::new(PHOTO_LOADED_EVENT) {
        Ok(event) => {
            if let Err(err) = canvas.dispatch_event(&event) {
                warn!(?err, "photo load event not delivered");
            }
        }
        Err(err) => warn!(?err, "could not create photo load event"),
    })
}
