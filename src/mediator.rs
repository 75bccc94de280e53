#[cfg(test)]
#[path = "mediator_test.rs"]
mod mediator_test;

use tracing::trace;

use crate::action::Action;
use crate::graph::ConnectionGraph;
use crate::ids::NoteId;
use crate::note::NoteStore;

/// A selection change reported by one side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    NoteSelected(NoteId),
    ConnectionSelectionChanged,
}

/// Keeps note selection and connection selection mutually exclusive.
///
/// Its only contract: when one side reports a new selection, clear the other.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionMediator;

impl SelectionMediator {
    pub fn notify(self, event: SelectionEvent, notes: &mut NoteStore, graph: &mut ConnectionGraph, out: &mut Vec<Action>) {
        trace!(?event, "selection mediator notified");
        match event {
            SelectionEvent::NoteSelected(_) => graph.clear_selection(out),
            SelectionEvent::ConnectionSelectionChanged => {
                for id in notes.selected_ids() {
                    if let Some(note) = notes.get_mut(id) {
                        note.selected = false;
                        out.push(Action::NoteSelectionChanged { id, selected: false });
                    }
                }
            }
        }
    }
}
