//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. A gesture carries a snapshot of the element as it was when the
//! pointer went down plus the pointer's start point, so every pointer-move
//! recomputes placement from the original rather than accumulating deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{Element, ElementId};
use crate::geom::Point;
use crate::hit::Corner;

/// Which transform a gesture applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Dragging,
    Rotating,
    Resizing(Corner),
}

impl InteractionMode {
    /// Mode name as shown in the host's status line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dragging => "dragging",
            Self::Rotating => "rotating",
            Self::Resizing(Corner::Tl) => "resizing-tl",
            Self::Resizing(Corner::Tr) => "resizing-tr",
            Self::Resizing(Corner::Bl) => "resizing-bl",
            Self::Resizing(Corner::Br) => "resizing-br",
        }
    }
}

/// Context for one pointer gesture.
#[derive(Debug, Clone)]
pub struct Gesture {
    /// Element being manipulated.
    pub id: ElementId,
    pub mode: InteractionMode,
    /// The element as it was on pointer-down.
    pub original: Element,
    /// Card-local pixels. For `Dragging` this is the pointer's offset from
    /// the element center; otherwise the pointer position itself.
    pub start: Point,
}

/// Gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    Active(Gesture),
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn mode(&self) -> Option<InteractionMode> {
        match self {
            Self::Idle => None,
            Self::Active(g) => Some(g.mode),
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: u8 = 1;
    pub const CTRL: u8 = 2;
    pub const ALT: u8 = 4;
    pub const META: u8 = 8;

    /// Decode the bitmask the host passes across the wasm boundary.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self {
            shift: bits & Self::SHIFT != 0,
            ctrl: bits & Self::CTRL != 0,
            alt: bits & Self::ALT != 0,
            meta: bits & Self::META != 0,
        }
    }

    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Case-insensitive comparison for single-letter shortcuts.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// UI state the renderer and host panels read.
#[derive(Debug, Clone)]
pub struct UiState {
    /// At most one element is selected.
    pub selected_id: Option<ElementId>,
    /// Last cursor hint sent to the host.
    pub cursor: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self { selected_id: None, cursor: "default".to_owned() }
    }
}
