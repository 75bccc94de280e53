//! Input model: modifier keys, mouse buttons, keys, and the note drag gesture.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a pointer
//! event. `DragSession` is the active note drag tracked between pointer-down
//! and pointer-up, carrying the group snapshot needed to compute rigid-body
//! deltas on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::drag::GroupMember;
use crate::geometry::Point;
use crate::ids::NoteId;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Modifier set with only Ctrl held.
    #[must_use]
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button. Drags and selects notes.
    #[default]
    Primary,
    /// Middle mouse button. Starts and finishes connect gestures on pins.
    Middle,
    /// Right mouse button. Unused by the board.
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete"
    }
}

/// State of an in-progress note drag.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// Note under the pointer when the drag started.
    pub pointer_note: NoteId,
    /// Surface-space pointer position at drag start.
    pub start: Point,
    /// Snapshot of every note moving with the drag.
    pub group: Vec<GroupMember>,
    /// Whether the pointer note asked for its group to stay inside the surface.
    pub clamp: bool,
}

impl DragSession {
    /// Drop a member whose note was removed mid-drag. Returns true if the group is now empty.
    pub fn forget(&mut self, note: NoteId) -> bool {
        self.group.retain(|m| m.note != note);
        self.group.is_empty()
    }
}
