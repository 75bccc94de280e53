#![allow(clippy::float_cmp)]

use super::*;

fn make_note(left: f64, top: f64, w: f64, h: f64) -> Note {
    Note::new(NoteId::new(), PinId::new(), Rect::new(left, top, w, h), NoteConfig::default())
}

// =============================================================
// NoteConfig
// =============================================================

#[test]
fn config_defaults() {
    let cfg = NoteConfig::default();
    assert!(cfg.clamp_to_parent_bounds);
    assert_eq!(cfg.min_size(), Size::new(50.0, 50.0));
    assert!(cfg.validate().is_ok());
}

#[test]
fn config_rejects_non_positive_minimum() {
    let cfg = NoteConfig { min_width: 0.0, ..NoteConfig::default() };
    assert_eq!(cfg.validate().unwrap_err().error_code(), "E_INVALID_MIN_SIZE");
    let cfg = NoteConfig { min_height: f64::NAN, ..NoteConfig::default() };
    assert!(cfg.validate().is_err());
}

// =============================================================
// Note geometry
// =============================================================

#[test]
fn effective_size_prefers_explicit() {
    let mut note = make_note(0.0, 0.0, 120.0, 80.0);
    note.measured = Some(Size::new(10.0, 10.0));
    assert_eq!(note.effective_size(), Size::new(120.0, 80.0));
}

#[test]
fn effective_size_falls_back_to_measured_then_zero() {
    let mut note = make_note(0.0, 0.0, 120.0, 80.0);
    note.width = None;
    note.height = Some(f64::NAN);
    assert_eq!(note.effective_size(), Size::new(0.0, 0.0));
    note.measured = Some(Size::new(30.0, 40.0));
    assert_eq!(note.effective_size(), Size::new(30.0, 40.0));
}

#[test]
fn pin_anchor_is_center_once_sized() {
    let mut note = make_note(10.0, 20.0, 100.0, 60.0);
    assert_eq!(note.pin_anchor(), Some(Point::new(60.0, 50.0)));
    note.width = None;
    assert_eq!(note.pin_anchor(), None);
}

#[test]
fn set_bounds_writes_explicit_size() {
    let mut note = make_note(0.0, 0.0, 10.0, 10.0);
    note.set_bounds(Rect::new(1.0, 2.0, 3.0, 4.0));
    assert_eq!(note.bounds(), Rect::new(1.0, 2.0, 3.0, 4.0));
}

// =============================================================
// ZCounter
// =============================================================

#[test]
fn z_counter_strictly_increases() {
    let mut z = ZCounter::new();
    assert_eq!(z.current(), 0);
    let mut last = z.current();
    for _ in 0..100 {
        let next = z.next_z();
        assert!(next > last);
        last = next;
    }
    assert_eq!(z.current(), 100);
}

// =============================================================
// NoteStore
// =============================================================

#[test]
fn store_preserves_insertion_order() {
    let mut store = NoteStore::new();
    let a = make_note(0.0, 0.0, 10.0, 10.0);
    let b = make_note(0.0, 0.0, 10.0, 10.0);
    let c = make_note(0.0, 0.0, 10.0, 10.0);
    let ids = [a.id, b.id, c.id];
    store.insert(a);
    store.insert(b);
    store.insert(c);
    assert_eq!(store.ids(), &ids);
    assert_eq!(store.len(), 3);
}

#[test]
fn store_replace_keeps_position() {
    let mut store = NoteStore::new();
    let a = make_note(0.0, 0.0, 10.0, 10.0);
    let b = make_note(0.0, 0.0, 10.0, 10.0);
    let (ia, ib) = (a.id, b.id);
    let mut a2 = a.clone();
    a2.left = 99.0;
    store.insert(a);
    store.insert(b);
    store.insert(a2);
    assert_eq!(store.ids(), &[ia, ib]);
    assert_eq!(store.get(ia).unwrap().left, 99.0);
}

#[test]
fn store_remove_and_missing() {
    let mut store = NoteStore::new();
    let a = make_note(0.0, 0.0, 10.0, 10.0);
    let id = a.id;
    store.insert(a);
    assert!(store.remove(id).is_some());
    assert!(store.remove(id).is_none());
    assert!(store.is_empty());
    assert!(store.ids().is_empty());
}

#[test]
fn store_selection_queries() {
    let mut store = NoteStore::new();
    let mut a = make_note(0.0, 0.0, 10.0, 10.0);
    let b = make_note(0.0, 0.0, 10.0, 10.0);
    let mut c = make_note(0.0, 0.0, 10.0, 10.0);
    a.selected = true;
    c.selected = true;
    let (ia, ic) = (a.id, c.id);
    store.insert(a);
    store.insert(b);
    store.insert(c);
    assert_eq!(store.selected_count(), 2);
    assert_eq!(store.selected_ids(), vec![ia, ic]);
}
