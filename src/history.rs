//! Undo/redo history over snapshots of any comparable value.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;

use crate::consts::HISTORY_LIMIT;

/// Past / present / future stacks.
///
/// `past` is bounded; once it exceeds the limit the oldest snapshot is
/// dropped. Committing a value equal to the present is ignored.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: Vec<T>,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    #[must_use]
    pub fn new(present: T) -> Self {
        Self::with_limit(present, HISTORY_LIMIT)
    }

    #[must_use]
    pub fn with_limit(present: T, limit: usize) -> Self {
        Self { past: VecDeque::new(), present, future: Vec::new(), limit: limit.max(1) }
    }

    #[must_use]
    pub fn present(&self) -> &T {
        &self.present
    }

    /// Commit `value` as the new present. Returns `false` if it equals the
    /// current present and nothing was recorded.
    pub fn set(&mut self, value: T) -> bool {
        if value == self.present {
            return false;
        }
        let prev = std::mem::replace(&mut self.present, value);
        self.past.push_back(prev);
        if self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
        true
    }

    /// Commit `f(present)`.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.present);
        self.set(next)
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop_back() else {
            return false;
        };
        let cur = std::mem::replace(&mut self.present, prev);
        self.future.push(cur);
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let cur = std::mem::replace(&mut self.present, next);
        self.past.push_back(cur);
        true
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Replace everything with a single present and empty stacks.
    pub fn reset(&mut self, present: T) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }
}
