//! Notes: positioned, resizable, selectable board entities.
//!
//! `NoteStore` owns every live note in insertion order (the order the host
//! stacks them in) and answers the selection queries the drag engine needs.
//! `ZCounter` hands out strictly increasing stacking values for "bring to
//! front".

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH};
use crate::error::BoardError;
use crate::geometry::{Point, Rect, Size};
use crate::ids::{NoteId, PinId};

/// Per-note behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteConfig {
    /// Keep dragged groups inside the measured surface.
    pub clamp_to_parent_bounds: bool,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self { clamp_to_parent_bounds: true, min_width: DEFAULT_MIN_WIDTH, min_height: DEFAULT_MIN_HEIGHT }
    }
}

impl NoteConfig {
    /// Reject minimums that are not finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMinimumSize` when either minimum is non-positive or non-finite.
    pub fn validate(&self) -> Result<(), BoardError> {
        if Size::new(self.min_width, self.min_height).is_measured() {
            Ok(())
        } else {
            Err(BoardError::InvalidMinimumSize { width: self.min_width, height: self.min_height })
        }
    }

    #[must_use]
    pub fn min_size(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }
}

/// A note on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: NoteId,
    /// The note's single attachment pin, resolved once at construction.
    pub pin: PinId,
    pub left: f64,
    pub top: f64,
    /// Explicit width, if one has been set.
    pub width: Option<f64>,
    /// Explicit height, if one has been set.
    pub height: Option<f64>,
    /// Size reported by the host's layout pass.
    pub measured: Option<Size>,
    pub selected: bool,
    /// The note's content is in edit mode.
    pub editing: bool,
    pub z_order: i64,
    pub config: NoteConfig,
}

impl Note {
    #[must_use]
    pub fn new(id: NoteId, pin: PinId, bounds: Rect, config: NoteConfig) -> Self {
        Self {
            id,
            pin,
            left: bounds.left,
            top: bounds.top,
            width: Some(bounds.width),
            height: Some(bounds.height),
            measured: None,
            selected: false,
            editing: false,
            z_order: 0,
            config,
        }
    }

    /// Size used for clamping and pin placement: explicit if set, else measured, else zero.
    #[must_use]
    pub fn effective_size(&self) -> Size {
        let measured = self.measured.unwrap_or_default();
        Size::new(pick_dimension(self.width, measured.width), pick_dimension(self.height, measured.height))
    }

    #[must_use]
    pub fn bounds(&self) -> Rect {
        let size = self.effective_size();
        Rect::new(self.left, self.top, size.width, size.height)
    }

    /// The note's center in surface space, or `None` while it has no size yet.
    #[must_use]
    pub fn pin_anchor(&self) -> Option<Point> {
        let bounds = self.bounds();
        bounds.size().is_measured().then(|| bounds.center())
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.left = bounds.left;
        self.top = bounds.top;
        self.width = Some(bounds.width);
        self.height = Some(bounds.height);
    }
}

fn pick_dimension(explicit: Option<f64>, measured: f64) -> f64 {
    match explicit {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ if measured.is_finite() && measured > 0.0 => measured,
        _ => 0.0,
    }
}

/// Board-wide stacking counter.
///
/// Every call to [`ZCounter::next_z`] returns a value strictly greater than all
/// earlier ones, so the most recently fronted note always stacks on top.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZCounter {
    last: i64,
}

impl ZCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next z-order value.
    pub fn next_z(&mut self) -> i64 {
        self.last += 1;
        self.last
    }

    /// The most recently issued value (0 before the first call).
    #[must_use]
    pub fn current(&self) -> i64 {
        self.last
    }
}

/// In-memory store of notes, iterated in insertion order.
#[derive(Debug, Default)]
pub struct NoteStore {
    notes: HashMap<NoteId, Note>,
    order: Vec<NoteId>,
}

impl NoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a note. A note with the same id is replaced in place.
    pub fn insert(&mut self, note: Note) {
        if !self.notes.contains_key(&note.id) {
            self.order.push(note.id);
        }
        self.notes.insert(note.id, note);
    }

    pub fn remove(&mut self, id: NoteId) -> Option<Note> {
        let note = self.notes.remove(&id)?;
        self.order.retain(|n| *n != id);
        Some(note)
    }

    #[must_use]
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.contains_key(&id)
    }

    /// Note ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[NoteId] {
        &self.order
    }

    /// Notes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.order.iter().filter_map(|id| self.notes.get(id))
    }

    /// Ids of selected notes, in insertion order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<NoteId> {
        self.iter().filter(|n| n.selected).map(|n| n.id).collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.notes.values().filter(|n| n.selected).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
