//! Connection graph: pins, directed connections, rendered lines, connection
//! selection, and the drag-to-connect gesture.
//!
//! DESIGN
//! ======
//! Pins live in the graph and are owned by exactly one note through
//! `Pin::owner`; the note holds the pin's id. Each pin keeps ordered outgoing
//! and incoming adjacency lists. The graph never computes positions itself:
//! callers resolve pin positions (which needs note geometry and the host
//! transform) and hand them in, so this module stays free of layout concerns.
//!
//! Connections have no dedup key. Completing the same source/target pair twice
//! yields two independent connections.

#[cfg(test)]
#[path = "graph_test.rs"]
mod graph_test;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::action::Action;
use crate::consts::HIGHLIGHT_EXTRA_THICKNESS;
use crate::error::BoardError;
use crate::geometry::Point;
use crate::ids::{ConnectionId, NoteId, PinId};
use crate::style::Style;

// =============================================================================
// PIN
// =============================================================================

/// A note's attachment point.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: PinId,
    pub owner: NoteId,
    outgoing: Vec<ConnectionId>,
    incoming: Vec<ConnectionId>,
    cached: Option<Point>,
    last_known: Point,
}

impl Pin {
    #[must_use]
    pub fn new(owner: NoteId) -> Self {
        Self {
            id: PinId::new(),
            owner,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            cached: None,
            last_known: Point::default(),
        }
    }

    /// Connections where this pin is the source, in creation order.
    #[must_use]
    pub fn outgoing(&self) -> &[ConnectionId] {
        &self.outgoing
    }

    /// Connections where this pin is the target, in creation order.
    #[must_use]
    pub fn incoming(&self) -> &[ConnectionId] {
        &self.incoming
    }

    /// Outgoing then incoming connections.
    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.outgoing.iter().chain(self.incoming.iter()).copied()
    }

    /// Drop the cached position; the next read recomputes it.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Cached rendering-space position, if still valid.
    #[must_use]
    pub fn cached_position(&self) -> Option<Point> {
        self.cached
    }

    /// Last successfully computed position. Used when a transform fails.
    #[must_use]
    pub fn last_known(&self) -> Point {
        self.last_known
    }

    pub fn store_position(&mut self, position: Point) {
        self.cached = Some(position);
        self.last_known = position;
    }
}

// =============================================================================
// CONNECTION
// =============================================================================

/// A directed, styled edge between two pins.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: PinId,
    pub target: PinId,
    pub style: Style,
}

impl Connection {
    #[must_use]
    pub fn new(source: PinId, target: PinId, style: Style) -> Self {
        Self { id: ConnectionId::new(), source, target, style }
    }

    /// Build a connection from parts that may be missing.
    ///
    /// # Errors
    ///
    /// Returns `MissingPart` naming the first absent part.
    pub fn try_from_parts(source: Option<PinId>, target: Option<PinId>, style: Option<Style>) -> Result<Self, BoardError> {
        let source = source.ok_or(BoardError::MissingPart("source"))?;
        let target = target.ok_or(BoardError::MissingPart("target"))?;
        let style = style.ok_or(BoardError::MissingPart("style"))?;
        Ok(Self::new(source, target, style))
    }
}

// =============================================================================
// LINE
// =============================================================================

/// A rendered line segment in the rendering frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub color: String,
    pub thickness: f64,
    /// Dash/gap lengths; `None` for a solid stroke.
    pub dash: Option<[f64; 2]>,
    pub z_index: i64,
    pub hit_testable: bool,
}

impl Line {
    /// A hit-testable line drawn with `style`.
    #[must_use]
    pub fn styled(start: Point, end: Point, style: &Style) -> Self {
        Self {
            start,
            end,
            color: style.color.clone(),
            thickness: style.thickness,
            dash: style.texture.dash_pattern(),
            z_index: 0,
            hit_testable: true,
        }
    }

    /// The highlight drawn just behind `main` while its connection is selected.
    #[must_use]
    pub fn overlay_for(main: &Line, style: &Style) -> Self {
        Self {
            start: main.start,
            end: main.end,
            color: style.highlight_color.clone(),
            thickness: main.thickness + HIGHLIGHT_EXTRA_THICKNESS,
            dash: None,
            z_index: main.z_index - 1,
            hit_testable: false,
        }
    }
}

// =============================================================================
// GRAPH
// =============================================================================

#[derive(Debug, Clone)]
struct ConnectSession {
    source: PinId,
    ghost: Line,
}

/// Authoritative store of pins and connections plus their rendered state.
#[derive(Debug, Default)]
pub struct ConnectionGraph {
    pins: HashMap<PinId, Pin>,
    connections: HashMap<ConnectionId, Connection>,
    lines: HashMap<ConnectionId, Line>,
    selected: HashSet<ConnectionId>,
    overlays: HashMap<ConnectionId, Line>,
    connecting: Option<ConnectSession>,
}

impl ConnectionGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Pins ---

    /// Create the pin for `owner` and return its id.
    pub fn add_pin(&mut self, owner: NoteId) -> PinId {
        let pin = Pin::new(owner);
        let id = pin.id;
        self.pins.insert(id, pin);
        id
    }

    /// Forget a pin. Callers cascade its connections first.
    pub fn remove_pin(&mut self, id: PinId) -> Option<Pin> {
        if self.connecting_source() == Some(id) {
            self.connecting = None;
        }
        self.pins.remove(&id)
    }

    #[must_use]
    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(&id)
    }

    pub fn pin_mut(&mut self, id: PinId) -> Option<&mut Pin> {
        self.pins.get_mut(&id)
    }

    #[must_use]
    pub fn has_pin(&self, id: PinId) -> bool {
        self.pins.contains_key(&id)
    }

    /// Every connection touching `pin`, outgoing first. Empty for unknown pins.
    #[must_use]
    pub fn connections_for_pin(&self, pin: PinId) -> Vec<ConnectionId> {
        self.pins.get(&pin).map(|p| p.connections().collect()).unwrap_or_default()
    }

    // --- Connections ---

    #[must_use]
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// `(source, target)` of a connection.
    #[must_use]
    pub fn endpoints(&self, id: ConnectionId) -> Option<(PinId, PinId)> {
        self.connections.get(&id).map(|c| (c.source, c.target))
    }

    /// Register a connection, render its line between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns `PinNotFound` if either endpoint pin is not on the board.
    pub fn add_connection(
        &mut self,
        connection: Connection,
        start: Point,
        end: Point,
        out: &mut Vec<Action>,
    ) -> Result<ConnectionId, BoardError> {
        for pin in [connection.source, connection.target] {
            if !self.pins.contains_key(&pin) {
                return Err(BoardError::PinNotFound(pin));
            }
        }

        let id = connection.id;
        if let Some(pin) = self.pins.get_mut(&connection.source) {
            pin.outgoing.push(id);
        }
        if let Some(pin) = self.pins.get_mut(&connection.target) {
            pin.incoming.push(id);
        }

        let line = Line::styled(start, end, &connection.style);
        out.push(Action::ConnectionAdded { id, source: connection.source, target: connection.target, line: line.clone() });
        self.lines.insert(id, line);
        self.connections.insert(id, connection);
        debug!(%id, "connection added");
        Ok(id)
    }

    /// Move a connection's rendered endpoints, and its overlay if selected.
    pub fn set_endpoints(&mut self, id: ConnectionId, start: Point, end: Point, out: &mut Vec<Action>) -> bool {
        let Some(line) = self.lines.get_mut(&id) else {
            return false;
        };
        line.start = start;
        line.end = end;
        out.push(Action::LineMoved { id, start, end });

        if let Some(overlay) = self.overlays.get_mut(&id) {
            overlay.start = start;
            overlay.end = end;
            out.push(Action::OverlayMoved { id, start, end });
        }
        true
    }

    /// Detach a connection from both pins, drop its selection, remove its line.
    /// Unknown ids are ignored.
    pub fn remove_connection(&mut self, id: ConnectionId, out: &mut Vec<Action>) -> bool {
        let Some(connection) = self.connections.remove(&id) else {
            return false;
        };
        if let Some(pin) = self.pins.get_mut(&connection.source) {
            pin.outgoing.retain(|c| *c != id);
        }
        if let Some(pin) = self.pins.get_mut(&connection.target) {
            pin.incoming.retain(|c| *c != id);
        }
        self.deselect(id, out);
        if self.lines.remove(&id).is_some() {
            out.push(Action::ConnectionRemoved { id });
        }
        true
    }

    /// Remove every connection touching `pin`. Returns how many were removed.
    pub fn remove_all_for_pin(&mut self, pin: PinId, out: &mut Vec<Action>) -> usize {
        // Removal edits the adjacency lists, so walk a copy.
        let ids = self.connections_for_pin(pin);
        ids.into_iter().filter(|id| self.remove_connection(*id, out)).count()
    }

    // --- Rendered state ---

    #[must_use]
    pub fn line(&self, id: ConnectionId) -> Option<&Line> {
        self.lines.get(&id)
    }

    #[must_use]
    pub fn overlay(&self, id: ConnectionId) -> Option<&Line> {
        self.overlays.get(&id)
    }

    #[must_use]
    pub fn ghost(&self) -> Option<&Line> {
        self.connecting.as_ref().map(|s| &s.ghost)
    }

    // --- Drag-to-connect ---

    #[must_use]
    pub fn is_connecting(&self) -> bool {
        self.connecting.is_some()
    }

    #[must_use]
    pub fn connecting_source(&self) -> Option<PinId> {
        self.connecting.as_ref().map(|s| s.source)
    }

    /// Begin a connect gesture from `source`, whose current position is `at`.
    /// Ignored while another gesture is active or if the pin is unknown.
    pub fn start_connection(&mut self, source: PinId, at: Point, out: &mut Vec<Action>) -> bool {
        if self.connecting.is_some() || !self.pins.contains_key(&source) {
            return false;
        }
        let mut ghost = Line::styled(at, at, &Style::default());
        ghost.hit_testable = false;
        out.push(Action::GhostShown { line: ghost.clone() });
        self.connecting = Some(ConnectSession { source, ghost });
        debug!(%source, "connect gesture started");
        true
    }

    /// Move the ghost's free end to `point` (rendering frame).
    pub fn update_ghost(&mut self, point: Point, out: &mut Vec<Action>) {
        if let Some(session) = self.connecting.as_mut() {
            session.ghost.end = point;
            out.push(Action::GhostMoved { end: point });
        }
    }

    /// Finish the active gesture on `target`. `start`/`end` are the resolved
    /// source and target pin positions. A missing gesture, an unknown target,
    /// or the source itself cancels instead.
    pub fn complete_connection(&mut self, target: PinId, start: Point, end: Point, out: &mut Vec<Action>) -> Option<ConnectionId> {
        let Some(session) = self.connecting.take() else {
            debug!("complete without an active connect gesture; ignoring");
            return None;
        };
        out.push(Action::GhostRemoved);
        if target == session.source || !self.pins.contains_key(&target) {
            debug!(%target, "connect target rejected; gesture cancelled");
            return None;
        }
        let connection = Connection::new(session.source, target, Style::default());
        match self.add_connection(connection, start, end, out) {
            Ok(id) => Some(id),
            Err(e) => {
                debug!(error = %e, "connect gesture dropped");
                None
            }
        }
    }

    /// Abandon the active gesture. No graph mutation.
    pub fn cancel_connection(&mut self, out: &mut Vec<Action>) -> bool {
        if self.connecting.take().is_none() {
            return false;
        }
        out.push(Action::GhostRemoved);
        debug!("connect gesture cancelled");
        true
    }

    // --- Selection ---

    #[must_use]
    pub fn has_selected(&self) -> bool {
        !self.selected.is_empty()
    }

    #[must_use]
    pub fn is_selected(&self, id: ConnectionId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected connection ids, in no particular order.
    #[must_use]
    pub fn selected(&self) -> Vec<ConnectionId> {
        self.selected.iter().copied().collect()
    }

    /// Apply a click on a connection's line. Ctrl toggles membership; a plain
    /// click replaces the selection. Returns false for unknown connections.
    pub fn click(&mut self, id: ConnectionId, ctrl: bool, out: &mut Vec<Action>) -> bool {
        if !self.connections.contains_key(&id) {
            return false;
        }
        if ctrl {
            if !self.deselect(id, out) {
                self.select(id, out);
            }
        } else {
            self.clear_selection(out);
            self.select(id, out);
        }
        true
    }

    /// Add a connection to the selection and draw its overlay.
    pub fn select(&mut self, id: ConnectionId, out: &mut Vec<Action>) -> bool {
        let Some(connection) = self.connections.get(&id) else {
            return false;
        };
        if !self.selected.insert(id) {
            return false;
        }
        if let Some(main) = self.lines.get(&id) {
            let overlay = Line::overlay_for(main, &connection.style);
            out.push(Action::OverlayAdded { id, line: overlay.clone() });
            self.overlays.insert(id, overlay);
        }
        true
    }

    /// Remove a connection from the selection and drop its overlay.
    pub fn deselect(&mut self, id: ConnectionId, out: &mut Vec<Action>) -> bool {
        if !self.selected.remove(&id) {
            return false;
        }
        if self.overlays.remove(&id).is_some() {
            out.push(Action::OverlayRemoved { id });
        }
        true
    }

    pub fn clear_selection(&mut self, out: &mut Vec<Action>) {
        for id in self.selected() {
            self.deselect(id, out);
        }
    }

    /// Remove every selected connection. Returns how many were removed.
    pub fn delete_selected(&mut self, out: &mut Vec<Action>) -> usize {
        let doomed = self.selected();
        self.clear_selection(out);
        doomed.into_iter().filter(|id| self.remove_connection(*id, out)).count()
    }
}
