//! Host bridge — newline-delimited JSON in, actions out.
//!
//! DESIGN
//! ======
//! The host sends one `HostEvent` per line. Each line is decoded, applied to
//! the board, and answered with the actions it produced. Handler dispatch is
//! pure: it never writes to the transport, so the same path serves the
//! binary's stdin loop and the tests.
//!
//! ERROR HANDLING
//! ==============
//! A malformed line or a rejected operation never ends the session. The
//! failure is logged and reported to the host as `Action::Error`, appended
//! after whatever the board had already queued.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::action::Action;
use crate::board::Board;
use crate::error::BoardError;
use crate::geometry::{Point, Rect, Size};
use crate::ids::{ConnectionId, NoteId, PinId};
use crate::input::{Button, Key, Modifiers};
use crate::note::NoteConfig;
use crate::resize::ResizeHandle;
use crate::style::Style;
use crate::surface::FixedSurface;

// =============================================================================
// EVENTS
// =============================================================================

/// One input event from the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    /// Create a note. Missing bounds use the configured spawn rect.
    AddNote {
        #[serde(default)]
        bounds: Option<Rect>,
        #[serde(default)]
        config: Option<NoteConfig>,
    },
    RemoveNote { id: NoteId },
    /// Layout measured a note's rendered size.
    NoteMeasured { id: NoteId, width: f64, height: f64 },
    /// The note surface was resized, moved, attached, or detached.
    SurfaceResized {
        width: f64,
        height: f64,
        #[serde(default)]
        origin: Point,
        #[serde(default = "attached_default")]
        attached: bool,
    },
    NotePointerDown {
        id: NoteId,
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default = "click_count_default")]
        click_count: u32,
    },
    NoteDoubleClick { id: NoteId },
    PointerMove { x: f64, y: f64 },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: Button,
    },
    ResizeDelta { id: NoteId, handle: ResizeHandle, dx: f64, dy: f64 },
    ContentFocusLost { id: NoteId },
    BackgroundClick,
    KeyDown { key: Key },
    PinPointerDown {
        pin: PinId,
        #[serde(default)]
        button: Button,
    },
    ConnectionClick {
        id: ConnectionId,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Connect two pins directly. Every part must be present.
    AddConnection {
        #[serde(default)]
        source: Option<PinId>,
        #[serde(default)]
        target: Option<PinId>,
        #[serde(default)]
        style: Option<Style>,
    },
    RemoveConnection { id: ConnectionId },
}

fn attached_default() -> bool {
    true
}

fn click_count_default() -> u32 {
    1
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("malformed event: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl BridgeError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "E_DECODE",
            Self::Board(e) => e.error_code(),
        }
    }

    fn into_action(self) -> Action {
        Action::Error { code: self.error_code().to_owned(), message: self.to_string() }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Parse one line of host input.
///
/// # Errors
///
/// Returns `Decode` if the line is not a valid `HostEvent`.
pub fn decode(line: &str) -> Result<HostEvent, BridgeError> {
    Ok(serde_json::from_str(line)?)
}

/// Serialize one action as a single JSON line (without the newline).
///
/// # Errors
///
/// Returns `Decode` if serialization fails.
pub fn encode(action: &Action) -> Result<String, BridgeError> {
    Ok(serde_json::to_string(action)?)
}

/// Apply one event to the board and return the actions it produced.
///
/// # Errors
///
/// Returns `Board` when the board rejects the operation.
pub fn apply(board: &mut Board, event: HostEvent) -> Result<Vec<Action>, BridgeError> {
    let actions = match event {
        HostEvent::AddNote { bounds, config } => {
            let bounds = bounds.unwrap_or(board.config().new_note);
            match config {
                Some(config) => board.add_note_with(bounds, config)?,
                None => board.add_note_at(bounds),
            };
            board.take_actions()
        }
        HostEvent::RemoveNote { id } => {
            if !board.remove_note(id) {
                debug!(%id, "remove for unknown note; ignoring");
            }
            board.take_actions()
        }
        HostEvent::NoteMeasured { id, width, height } => {
            board.set_measured_size(id, Size::new(width, height))?;
            board.take_actions()
        }
        HostEvent::SurfaceResized { width, height, origin, attached } => {
            let mut surface = FixedSurface::new(Size::new(width, height)).with_origin(origin);
            if !attached {
                surface = surface.detached();
            }
            board.set_surface(Box::new(surface));
            board.take_actions()
        }
        HostEvent::NotePointerDown { id, x, y, modifiers, click_count } => {
            board.on_note_pointer_down(id, Point::new(x, y), modifiers, click_count)
        }
        HostEvent::NoteDoubleClick { id } => board.on_note_double_click(id),
        HostEvent::PointerMove { x, y } => board.on_pointer_move(Point::new(x, y)),
        HostEvent::PointerUp { x, y, button } => board.on_pointer_up(Point::new(x, y), button),
        HostEvent::ResizeDelta { id, handle, dx, dy } => board.on_resize_delta(id, handle, dx, dy),
        HostEvent::ContentFocusLost { id } => board.on_content_focus_lost(id),
        HostEvent::BackgroundClick => board.on_background_click(),
        HostEvent::KeyDown { key } => board.on_key_down(&key),
        HostEvent::PinPointerDown { pin, button } => board.on_pin_pointer_down(pin, button),
        HostEvent::ConnectionClick { id, modifiers } => board.on_connection_click(id, modifiers),
        HostEvent::AddConnection { source, target, style } => {
            board.add_connection_from_parts(source, target, style)?;
            board.take_actions()
        }
        HostEvent::RemoveConnection { id } => {
            board.remove_connection(id);
            board.take_actions()
        }
    };
    Ok(actions)
}

/// Decode and apply one line. Failures come back as a trailing `Action::Error`.
pub fn handle_line(board: &mut Board, line: &str) -> Vec<Action> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }
    match decode(line).and_then(|event| apply(board, event)) {
        Ok(actions) => actions,
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "bridge: event rejected");
            let mut actions = board.take_actions();
            actions.push(e.into_action());
            actions
        }
    }
}
