//! Actions returned to the host for rendering.
//!
//! The board never draws. Every visible consequence of an input event or a
//! scheduler tick is reported as an `Action`, in the order it happened.

use serde::Serialize;

use crate::geometry::{Point, Rect};
use crate::graph::Line;
use crate::ids::{ConnectionId, NoteId, PinId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    NoteAdded { id: NoteId, pin: PinId, bounds: Rect, z_order: i64 },
    NoteMoved { id: NoteId, left: f64, top: f64 },
    NoteResized { id: NoteId, bounds: Rect },
    NoteRemoved { id: NoteId },
    NoteSelectionChanged { id: NoteId, selected: bool },
    ZOrderChanged { id: NoteId, z_order: i64 },
    /// Tell the note's content to become editable.
    EnterEditMode { id: NoteId },
    /// Tell the note's content to become read-only again.
    ExitEditMode { id: NoteId },
    /// Route all pointer input to the board until released.
    PointerCaptured,
    PointerReleased,
    ConnectionAdded { id: ConnectionId, source: PinId, target: PinId, line: Line },
    LineMoved { id: ConnectionId, start: Point, end: Point },
    ConnectionRemoved { id: ConnectionId },
    OverlayAdded { id: ConnectionId, line: Line },
    OverlayMoved { id: ConnectionId, start: Point, end: Point },
    OverlayRemoved { id: ConnectionId },
    GhostShown { line: Line },
    GhostMoved { end: Point },
    GhostRemoved,
    /// A host event was rejected.
    Error { code: String, message: String },
}
