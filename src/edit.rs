//! Document edits behind the selection panel: delete, duplicate, layer
//! order, lock, and property patches.
//!
//! Every edit is a no-op on an absent id. All of them except `toggle_lock`
//! are also no-ops on a locked element.

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;

use serde::{Deserialize, Serialize};

use crate::consts::DUPLICATE_OFFSET_PCT;
use crate::doc::{CardDoc, ElementId, ElementPatch, ElementRef, Slot};

/// Direction for a one-step z-order change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerDirection {
    /// Toward the top (later in the list).
    Forward,
    /// Toward the bottom (earlier in the list).
    Backward,
}

impl LayerDirection {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "forward" | "up" => Some(Self::Forward),
            "backward" | "back" | "down" => Some(Self::Backward),
            _ => None,
        }
    }
}

impl CardDoc {
    fn unlocked_slot(&self, id: &ElementId) -> Option<Slot> {
        let slot = self.locate(id)?;
        let el = self.at(slot)?;
        if el.is_locked() { None } else { Some(slot) }
    }

    /// Remove an element. The image slot is emptied instead of removed.
    pub fn delete(&mut self, id: &ElementId) -> bool {
        match self.unlocked_slot(id) {
            Some(Slot::Image) => self.image.src.take().is_some(),
            Some(Slot::Text(i)) => {
                self.texts.remove(i);
                true
            }
            Some(Slot::Shape(i)) => {
                self.shapes.remove(i);
                true
            }
            None => false,
        }
    }

    /// Append a copy with a fresh id, shifted down. Returns the copy's id.
    ///
    /// The image singleton cannot be duplicated.
    pub fn duplicate(&mut self, id: &ElementId) -> Option<ElementId> {
        match self.unlocked_slot(id)? {
            Slot::Image => None,
            Slot::Text(i) => {
                let mut copy = self.texts[i].clone();
                copy.id = ElementId::generate("text");
                copy.y += DUPLICATE_OFFSET_PCT;
                let new_id = copy.id.clone();
                self.texts.push(copy);
                Some(new_id)
            }
            Slot::Shape(i) => {
                let mut copy = self.shapes[i].clone();
                copy.id = ElementId::generate(copy.kind.name());
                copy.y += DUPLICATE_OFFSET_PCT;
                let new_id = copy.id.clone();
                self.shapes.push(copy);
                Some(new_id)
            }
        }
    }

    /// Swap with the neighbor in the owning list. No-op at the list bounds.
    pub fn move_layer(&mut self, id: &ElementId, dir: LayerDirection) -> bool {
        match self.unlocked_slot(id) {
            Some(Slot::Text(i)) => swap_neighbor(&mut self.texts, i, dir),
            Some(Slot::Shape(i)) => swap_neighbor(&mut self.shapes, i, dir),
            Some(Slot::Image) | None => false,
        }
    }

    /// Flip the lock flag. Returns the new state.
    pub fn toggle_lock(&mut self, id: &ElementId) -> Option<bool> {
        match self.locate(id)? {
            Slot::Image => {
                self.image.is_locked = !self.image.is_locked;
                Some(self.image.is_locked)
            }
            Slot::Text(i) => {
                let t = self.texts.get_mut(i)?;
                t.is_locked = !t.is_locked;
                Some(t.is_locked)
            }
            Slot::Shape(i) => {
                let s = self.shapes.get_mut(i)?;
                s.is_locked = !s.is_locked;
                Some(s.is_locked)
            }
        }
    }

    /// Apply a sparse property patch. Returns whether anything changed.
    pub fn patch(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(slot) = self.unlocked_slot(id) else {
            return false;
        };
        let Some(mut el) = self.at(slot).map(ElementRef::cloned) else {
            return false;
        };
        patch.apply(&mut el) && self.replace(el)
    }
}

fn swap_neighbor<T>(list: &mut [T], i: usize, dir: LayerDirection) -> bool {
    let j = match dir {
        LayerDirection::Forward if i + 1 < list.len() => i + 1,
        LayerDirection::Backward if i > 0 => i - 1,
        _ => return false,
    };
    list.swap(i, j);
    true
}
