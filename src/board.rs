//! Board — the interaction engine tying notes, pins, connections, selection,
//! and the update scheduler together.
//!
//! DESIGN
//! ======
//! `Board` owns every piece of mutable state: the note store, the connection
//! graph, the z-order counter, the active note drag, and the scheduler. All
//! mutation happens on the caller's thread, either in an input handler or in
//! `flush_updates`, so nothing here needs a lock.
//!
//! Visible consequences are queued as [`Action`]s. Every `on_*` input handler
//! drains the queue and returns it; data operations (`add_note`,
//! `add_connection`, `set_surface`, ...) leave their actions queued until the
//! next handler or an explicit `take_actions`.
//!
//! Geometry changes during a drag only mark the note's pin dirty; lines catch
//! up on the next scheduler flush. Drag end and every resize step recompute
//! the affected lines immediately so nothing lags when the gesture settles.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use tracing::{debug, info, trace};

use crate::action::Action;
use crate::config::BoardConfig;
use crate::drag::{GroupMember, clamp_group_delta};
use crate::error::BoardError;
use crate::geometry::{Point, Rect, Size};
use crate::graph::{Connection, ConnectionGraph};
use crate::ids::{ConnectionId, NoteId, PinId};
use crate::input::{Button, DragSession, Key, Modifiers};
use crate::mediator::{SelectionEvent, SelectionMediator};
use crate::note::{Note, NoteConfig, NoteStore, ZCounter};
use crate::resize::{ResizeHandle, resize};
use crate::scheduler::UpdateScheduler;
use crate::style::Style;
use crate::surface::{FixedSurface, Surface};

pub struct Board {
    config: BoardConfig,
    notes: NoteStore,
    graph: ConnectionGraph,
    scheduler: UpdateScheduler,
    z: ZCounter,
    drag: Option<DragSession>,
    surface: Box<dyn Surface>,
    mediator: SelectionMediator,
    outbox: Vec<Action>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default(), Box::new(FixedSurface::default()))
    }
}

impl Board {
    /// Create an empty board on `surface`. The scheduler starts immediately.
    #[must_use]
    pub fn new(config: BoardConfig, surface: Box<dyn Surface>) -> Self {
        let mut scheduler = UpdateScheduler::new(config.tick_period());
        scheduler.start();
        info!(tick_ms = config.tick_ms, "board created");
        Self {
            config,
            notes: NoteStore::new(),
            graph: ConnectionGraph::new(),
            scheduler,
            z: ZCounter::new(),
            drag: None,
            surface,
            mediator: SelectionMediator,
            outbox: Vec::new(),
        }
    }

    /// Stop the scheduler and abandon any gesture in progress.
    pub fn shutdown(&mut self) {
        self.drag = None;
        self.graph.cancel_connection(&mut self.outbox);
        self.scheduler.stop();
        info!(notes = self.notes.len(), connections = self.graph.connection_count(), "board shut down");
    }

    /// Drain queued actions.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    #[must_use]
    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    #[must_use]
    pub fn scheduler(&self) -> &UpdateScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn selected_notes(&self) -> Vec<NoteId> {
        self.notes.selected_ids()
    }

    #[must_use]
    pub fn selected_connections(&self) -> Vec<ConnectionId> {
        self.graph.selected()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn is_connecting(&self) -> bool {
        self.graph.is_connecting()
    }

    /// Most recently issued z-order value.
    #[must_use]
    pub fn z_counter(&self) -> i64 {
        self.z.current()
    }

    #[must_use]
    pub fn surface_extent(&self) -> Option<Size> {
        self.surface.extent()
    }

    // --- Surface ---

    /// Replace the host surface. Every pin is invalidated and queued for update.
    pub fn set_surface(&mut self, surface: Box<dyn Surface>) {
        self.surface = surface;
        let pins: Vec<PinId> = self.notes.iter().map(|n| n.pin).collect();
        for pin in pins {
            self.invalidate_and_request(pin);
        }
    }

    /// Record the size the host's layout measured for a note.
    ///
    /// # Errors
    ///
    /// Returns `NoteNotFound` if the note is not on the board.
    pub fn set_measured_size(&mut self, id: NoteId, size: Size) -> Result<(), BoardError> {
        let note = self.notes.get_mut(id).ok_or(BoardError::NoteNotFound(id))?;
        note.measured = Some(size);
        let pin = note.pin;
        self.invalidate_and_request(pin);
        Ok(())
    }

    // --- Notes ---

    /// Add a note at the configured spawn position and size.
    pub fn add_note(&mut self) -> NoteId {
        let bounds = self.config.new_note;
        self.insert_note(bounds, self.config.note_defaults)
    }

    /// Add a note with the board's default note config.
    pub fn add_note_at(&mut self, bounds: Rect) -> NoteId {
        self.insert_note(bounds, self.config.note_defaults)
    }

    /// Add a note with its own config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMinimumSize` if the config's minimum is not positive.
    pub fn add_note_with(&mut self, bounds: Rect, config: NoteConfig) -> Result<NoteId, BoardError> {
        config.validate()?;
        Ok(self.insert_note(bounds, config))
    }

    fn insert_note(&mut self, bounds: Rect, config: NoteConfig) -> NoteId {
        let min = config.min_size();
        let bounds = Rect::new(bounds.left, bounds.top, bounds.width.max(min.width), bounds.height.max(min.height));

        let id = NoteId::new();
        let pin = self.graph.add_pin(id);
        let note = Note::new(id, pin, bounds, config);
        self.outbox.push(Action::NoteAdded { id, pin, bounds, z_order: note.z_order });
        self.notes.insert(note);
        debug!(%id, %pin, "note added");
        id
    }

    /// Remove a note, cascading to every connection on its pin.
    pub fn remove_note(&mut self, id: NoteId) -> bool {
        let Some(pin) = self.notes.get(id).map(|n| n.pin) else {
            return false;
        };

        let removed = self.graph.remove_all_for_pin(pin, &mut self.outbox);
        if self.graph.connecting_source() == Some(pin) {
            self.graph.cancel_connection(&mut self.outbox);
            self.outbox.push(Action::PointerReleased);
        }
        self.graph.remove_pin(pin);
        self.scheduler.forget_pin(pin);
        self.notes.remove(id);
        self.outbox.push(Action::NoteRemoved { id });

        if self.drag.as_mut().is_some_and(|s| s.forget(id)) {
            self.drag = None;
            self.outbox.push(Action::PointerReleased);
        }
        debug!(%id, connections = removed, "note removed");
        true
    }

    /// Remove every selected note with its connections. Returns how many notes were removed.
    pub fn delete_selected_notes(&mut self) -> usize {
        self.notes.selected_ids().into_iter().filter(|id| self.remove_note(*id)).count()
    }

    // --- Z-order ---

    /// Give `id` the next z-order value.
    pub fn bring_to_front(&mut self, id: NoteId) -> Option<i64> {
        let note = self.notes.get_mut(id)?;
        let z = self.z.next_z();
        note.z_order = z;
        self.outbox.push(Action::ZOrderChanged { id, z_order: z });
        Some(z)
    }

    /// Raise every note in `group` except `top`, then `top` last so it stacks above the rest.
    pub fn bring_group_to_front(&mut self, group: &[NoteId], top: NoteId) {
        for id in group.iter().copied().filter(|id| *id != top) {
            self.bring_to_front(id);
        }
        self.bring_to_front(top);
    }

    // --- Selection ---

    fn select_note(&mut self, id: NoteId) {
        let Some(note) = self.notes.get_mut(id) else {
            return;
        };
        if note.selected {
            return;
        }
        note.selected = true;
        self.outbox.push(Action::NoteSelectionChanged { id, selected: true });
        self.bring_to_front(id);
        self.mediator
            .notify(SelectionEvent::NoteSelected(id), &mut self.notes, &mut self.graph, &mut self.outbox);
    }

    fn deselect_note(&mut self, id: NoteId) {
        if let Some(note) = self.notes.get_mut(id) {
            if note.selected {
                note.selected = false;
                self.outbox.push(Action::NoteSelectionChanged { id, selected: false });
            }
        }
    }

    fn exit_edit_mode(&mut self, id: NoteId) -> bool {
        match self.notes.get_mut(id) {
            Some(note) if note.editing => {
                note.editing = false;
                self.outbox.push(Action::ExitEditMode { id });
                true
            }
            _ => false,
        }
    }

    // --- Pin positions ---

    /// Rendering-space position of a pin: its note's center mapped through the
    /// surface transform. Cached until the note's geometry changes. When the
    /// transform is unavailable the last good position is returned.
    pub fn pin_position(&mut self, pin: PinId) -> Option<Point> {
        let pin = self.graph.pin_mut(pin)?;
        if let Some(cached) = pin.cached_position() {
            return Some(cached);
        }
        let anchor = self.notes.get(pin.owner).and_then(Note::pin_anchor);
        match anchor.and_then(|a| self.surface.to_render_space(a)) {
            Some(position) => {
                pin.store_position(position);
                Some(position)
            }
            None => {
                trace!(pin = %pin.id, "pin transform unavailable; using last known position");
                Some(pin.last_known())
            }
        }
    }

    /// Nearest pin to `point` (rendering frame) strictly within `max_distance`.
    pub fn find_closest_pin(&mut self, point: Point, max_distance: f64) -> Option<PinId> {
        let pins: Vec<PinId> = self.notes.iter().map(|n| n.pin).collect();
        let mut closest = None;
        let mut closest_dist = max_distance;
        for pin in pins {
            let Some(position) = self.pin_position(pin) else {
                continue;
            };
            let dist = position.distance_to(point);
            if dist < closest_dist {
                closest_dist = dist;
                closest = Some(pin);
            }
        }
        closest
    }

    fn invalidate_and_request(&mut self, pin: PinId) {
        if let Some(p) = self.graph.pin_mut(pin) {
            p.invalidate();
        }
        self.scheduler.request_update(pin);
    }

    // --- Endpoint updates ---

    /// Queue `pin`'s connections for the next scheduler flush.
    pub fn request_update_for_pin(&mut self, pin: PinId) {
        self.scheduler.request_update(pin);
    }

    /// Recompute every connection on `pin` now, bypassing the scheduler.
    pub fn update_all_connections_for_pin(&mut self, pin: PinId) {
        if let Some(p) = self.graph.pin_mut(pin) {
            p.invalidate();
        }
        for id in self.graph.connections_for_pin(pin) {
            self.recompute_connection(id);
        }
    }

    fn recompute_connection(&mut self, id: ConnectionId) -> bool {
        let Some((source, target)) = self.graph.endpoints(id) else {
            return false;
        };
        let start = self.pin_position(source).unwrap_or_default();
        let end = self.pin_position(target).unwrap_or_default();
        self.graph.set_endpoints(id, start, end, &mut self.outbox)
    }

    /// Run one scheduler batch: each connection touching a dirty pin is
    /// recomputed exactly once. Called on every tick; also usable as a manual flush.
    pub fn flush_updates(&mut self) -> Vec<Action> {
        if let Some(batch) = self.scheduler.begin_batch(&self.graph) {
            for id in &batch {
                self.recompute_connection(*id);
            }
            self.scheduler.finish_batch();
            trace!(connections = batch.len(), "endpoint batch applied");
        }
        self.take_actions()
    }

    // --- Note input ---

    /// Pointer pressed on a note's body (not a resize handle).
    pub fn on_note_pointer_down(&mut self, id: NoteId, pointer: Point, modifiers: Modifiers, click_count: u32) -> Vec<Action> {
        if click_count >= 2 || self.drag.is_some() || !self.notes.contains(id) {
            return self.take_actions();
        }

        let is_selected = self.notes.get(id).is_some_and(|n| n.selected);
        if modifiers.ctrl {
            if is_selected {
                self.deselect_note(id);
            } else {
                self.select_note(id);
            }
            return self.take_actions();
        }

        let part_of_multi = is_selected && self.notes.selected_count() > 1;
        if !part_of_multi {
            let others: Vec<NoteId> = self.notes.ids().iter().copied().filter(|n| *n != id).collect();
            for other in others {
                self.exit_edit_mode(other);
                self.deselect_note(other);
            }
            self.select_note(id);
        }

        self.begin_drag(id, pointer);
        self.take_actions()
    }

    fn begin_drag(&mut self, id: NoteId, pointer: Point) {
        let mut group = self.notes.selected_ids();
        if group.is_empty() {
            self.select_note(id);
            group = vec![id];
        }
        self.bring_group_to_front(&group, id);

        let members: Vec<GroupMember> = group
            .iter()
            .filter_map(|n| self.notes.get(*n))
            .map(|n| GroupMember {
                note: n.id,
                left: if n.left.is_nan() { 0.0 } else { n.left },
                top: if n.top.is_nan() { 0.0 } else { n.top },
                size: n.effective_size(),
            })
            .collect();
        let clamp = self.notes.get(id).map_or(true, |n| n.config.clamp_to_parent_bounds);

        debug!(%id, members = members.len(), "note drag started");
        self.drag = Some(DragSession { pointer_note: id, start: pointer, group: members, clamp });
        self.outbox.push(Action::PointerCaptured);
    }

    fn move_drag(&mut self, pointer: Point) {
        let Some(session) = self.drag.as_ref() else {
            return;
        };
        let mut dx = pointer.x - session.start.x;
        let mut dy = pointer.y - session.start.y;
        if session.clamp {
            (dx, dy) = clamp_group_delta(&session.group, self.surface.extent(), dx, dy);
        }
        let moves: Vec<(NoteId, f64, f64)> = session.group.iter().map(|m| (m.note, m.left + dx, m.top + dy)).collect();

        for (id, left, top) in moves {
            let Some(note) = self.notes.get_mut(id) else {
                continue;
            };
            note.left = left;
            note.top = top;
            let pin = note.pin;
            self.outbox.push(Action::NoteMoved { id, left, top });
            self.invalidate_and_request(pin);
        }
    }

    fn end_drag(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        self.outbox.push(Action::PointerReleased);
        for member in &session.group {
            if let Some(pin) = self.notes.get(member.note).map(|n| n.pin) {
                self.update_all_connections_for_pin(pin);
            }
        }
        debug!(id = %session.pointer_note, members = session.group.len(), "note drag ended");
    }

    /// Pointer moved. `pointer` is in surface space. Drives the active note
    /// drag and the ghost edge of an active connect gesture.
    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        self.move_drag(pointer);
        if self.graph.is_connecting() {
            let at = self.surface.to_render_space(pointer).unwrap_or(pointer);
            self.graph.update_ghost(at, &mut self.outbox);
        }
        self.take_actions()
    }

    /// Pointer released. Primary ends a note drag; middle finishes a connect gesture.
    pub fn on_pointer_up(&mut self, pointer: Point, button: Button) -> Vec<Action> {
        match button {
            Button::Primary => self.end_drag(),
            Button::Middle => self.finish_connect_gesture(pointer),
            Button::Secondary => {}
        }
        self.take_actions()
    }

    /// Double-click on a note: never drags, asks the content to become editable.
    pub fn on_note_double_click(&mut self, id: NoteId) -> Vec<Action> {
        if let Some(note) = self.notes.get_mut(id) {
            if !note.editing {
                note.editing = true;
                self.outbox.push(Action::EnterEditMode { id });
            }
        }
        self.take_actions()
    }

    /// The note's content lost focus while editing: leave edit mode and drop the selection.
    pub fn on_content_focus_lost(&mut self, id: NoteId) -> Vec<Action> {
        if self.exit_edit_mode(id) {
            self.deselect_note(id);
        }
        self.take_actions()
    }

    /// One drag step on a resize handle.
    pub fn on_resize_delta(&mut self, id: NoteId, handle: ResizeHandle, dx: f64, dy: f64) -> Vec<Action> {
        let Some(note) = self.notes.get_mut(id) else {
            return self.take_actions();
        };
        let before = note.bounds();
        let after = resize(before, handle, dx, dy, note.config.min_size());
        let pin = note.pin;
        if after != before {
            note.set_bounds(after);
            self.outbox.push(Action::NoteResized { id, bounds: after });
        }
        self.update_all_connections_for_pin(pin);
        self.take_actions()
    }

    /// Click on empty board space: clear both selections.
    pub fn on_background_click(&mut self) -> Vec<Action> {
        for id in self.notes.selected_ids() {
            self.deselect_note(id);
        }
        self.graph.clear_selection(&mut self.outbox);
        self.take_actions()
    }

    /// Delete removes selected connections if any, otherwise selected notes.
    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if key.is_delete() {
            if self.graph.has_selected() {
                self.delete_selected_connections();
            } else {
                self.delete_selected_notes();
            }
        }
        self.take_actions()
    }

    // --- Connection input ---

    /// Pointer pressed on a pin. Middle button starts a connect gesture.
    pub fn on_pin_pointer_down(&mut self, pin: PinId, button: Button) -> Vec<Action> {
        if button == Button::Middle && self.start_connection(pin) {
            self.outbox.push(Action::PointerCaptured);
        }
        self.take_actions()
    }

    /// Click on a rendered connection line.
    pub fn on_connection_click(&mut self, id: ConnectionId, modifiers: Modifiers) -> Vec<Action> {
        if self.graph.click(id, modifiers.ctrl, &mut self.outbox) {
            self.mediator
                .notify(SelectionEvent::ConnectionSelectionChanged, &mut self.notes, &mut self.graph, &mut self.outbox);
        }
        self.take_actions()
    }

    /// Start a connect gesture from `pin`. Ignored while one is already active.
    pub fn start_connection(&mut self, pin: PinId) -> bool {
        if self.graph.is_connecting() {
            return false;
        }
        let Some(at) = self.pin_position(pin) else {
            return false;
        };
        self.graph.start_connection(pin, at, &mut self.outbox)
    }

    /// Complete the active connect gesture on `target`. A silent no-op without one.
    pub fn complete_connection(&mut self, target: PinId) -> Option<ConnectionId> {
        let source = self.graph.connecting_source()?;
        let start = self.pin_position(source).unwrap_or_default();
        let end = self.pin_position(target).unwrap_or_default();
        self.graph.complete_connection(target, start, end, &mut self.outbox)
    }

    pub fn cancel_connection(&mut self) -> bool {
        self.graph.cancel_connection(&mut self.outbox)
    }

    fn finish_connect_gesture(&mut self, pointer: Point) {
        let Some(source) = self.graph.connecting_source() else {
            return;
        };
        let at = self.surface.to_render_space(pointer).unwrap_or(pointer);
        // The source competes too: releasing nearest to it cancels.
        match self.find_closest_pin(at, self.config.pin_snap_radius) {
            Some(target) if target != source => {
                self.complete_connection(target);
            }
            _ => {
                self.graph.cancel_connection(&mut self.outbox);
            }
        }
        self.outbox.push(Action::PointerReleased);
    }

    /// Connect two pins directly.
    ///
    /// # Errors
    ///
    /// Returns `PinNotFound` if either pin is not on the board.
    pub fn add_connection(&mut self, source: PinId, target: PinId, style: Style) -> Result<ConnectionId, BoardError> {
        self.insert_connection(Connection::new(source, target, style))
    }

    /// Connect two pins from parts that may be missing.
    ///
    /// # Errors
    ///
    /// Returns `MissingPart` if any part is absent, or `PinNotFound` if a pin is not on the board.
    pub fn add_connection_from_parts(
        &mut self,
        source: Option<PinId>,
        target: Option<PinId>,
        style: Option<Style>,
    ) -> Result<ConnectionId, BoardError> {
        self.insert_connection(Connection::try_from_parts(source, target, style)?)
    }

    fn insert_connection(&mut self, connection: Connection) -> Result<ConnectionId, BoardError> {
        for pin in [connection.source, connection.target] {
            if !self.graph.has_pin(pin) {
                return Err(BoardError::PinNotFound(pin));
            }
        }
        let start = self.pin_position(connection.source).unwrap_or_default();
        let end = self.pin_position(connection.target).unwrap_or_default();
        self.graph.add_connection(connection, start, end, &mut self.outbox)
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> bool {
        self.graph.remove_connection(id, &mut self.outbox)
    }

    /// Remove every selected connection. Returns how many were removed.
    pub fn delete_selected_connections(&mut self) -> usize {
        self.graph.delete_selected(&mut self.outbox)
    }
}
