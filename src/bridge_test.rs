use super::*;

fn first_note(board: &Board) -> (NoteId, PinId) {
    let note = board.notes().iter().next().unwrap();
    (note.id, note.pin)
}

fn error_code(actions: &[Action]) -> Option<&str> {
    actions.iter().find_map(|a| match a {
        Action::Error { code, .. } => Some(code.as_str()),
        _ => None,
    })
}

// =============================================================
// Decode
// =============================================================

#[test]
fn decode_minimal_events() {
    assert_eq!(decode(r#"{"event":"background_click"}"#).unwrap(), HostEvent::BackgroundClick);
    assert_eq!(
        decode(r#"{"event":"add_note"}"#).unwrap(),
        HostEvent::AddNote { bounds: None, config: None }
    );
    assert_eq!(
        decode(r#"{"event":"pointer_up","x":1,"y":2}"#).unwrap(),
        HostEvent::PointerUp { x: 1.0, y: 2.0, button: Button::Primary }
    );
}

#[test]
fn decode_applies_input_defaults() {
    let id = NoteId::new();
    let line = format!(r#"{{"event":"note_pointer_down","id":"{id}","x":3,"y":4}}"#);
    let event = decode(&line).unwrap();
    assert_eq!(
        event,
        HostEvent::NotePointerDown { id, x: 3.0, y: 4.0, modifiers: Modifiers::default(), click_count: 1 }
    );

    let line = format!(r#"{{"event":"connection_click","id":"{id}","modifiers":{{"ctrl":true}}}}"#);
    let HostEvent::ConnectionClick { modifiers, .. } = decode(&line).unwrap() else {
        panic!("expected connection_click");
    };
    assert!(modifiers.ctrl);
}

#[test]
fn decode_surface_defaults_to_attached() {
    let event = decode(r#"{"event":"surface_resized","width":800,"height":600}"#).unwrap();
    assert_eq!(
        event,
        HostEvent::SurfaceResized { width: 800.0, height: 600.0, origin: Point::default(), attached: true }
    );
}

#[test]
fn decode_rejects_unknown_event() {
    let err = decode(r#"{"event":"explode"}"#).unwrap_err();
    assert_eq!(err.error_code(), "E_DECODE");
}

// =============================================================
// Encode
// =============================================================

#[test]
fn encode_tags_actions() {
    let json = encode(&Action::GhostRemoved).unwrap();
    assert_eq!(json, r#"{"action":"ghost_removed"}"#);

    let id = NoteId::new();
    let json = encode(&Action::ZOrderChanged { id, z_order: 3 }).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["action"], "z_order_changed");
    assert_eq!(value["id"], id.to_string());
    assert_eq!(value["z_order"], 3);
}

// =============================================================
// Dispatch
// =============================================================

#[test]
fn add_note_line_creates_note_at_spawn_rect() {
    let mut board = Board::default();
    let actions = handle_line(&mut board, r#"{"event":"add_note"}"#);
    assert_eq!(actions.len(), 1);
    let (id, _) = first_note(&board);
    assert_eq!(board.note(id).unwrap().bounds(), Rect::new(150.0, 80.0, 200.0, 150.0));
}

#[test]
fn add_note_with_bad_config_reports_error() {
    let mut board = Board::default();
    let line = r#"{"event":"add_note","config":{"min_width":0}}"#;
    let actions = handle_line(&mut board, line);
    assert_eq!(error_code(&actions), Some("E_INVALID_MIN_SIZE"));
    assert!(board.notes().is_empty());
}

#[test]
fn malformed_line_reports_error_and_keeps_going() {
    let mut board = Board::default();
    let actions = handle_line(&mut board, "{not json");
    assert_eq!(error_code(&actions), Some("E_DECODE"));

    let actions = handle_line(&mut board, r#"{"event":"add_note"}"#);
    assert!(error_code(&actions).is_none());
    assert_eq!(board.notes().len(), 1);
}

#[test]
fn blank_lines_are_ignored() {
    let mut board = Board::default();
    assert!(handle_line(&mut board, "   ").is_empty());
}

#[test]
fn add_connection_with_missing_part_reports_error() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"add_note"}"#);
    let (_, pin) = first_note(&board);

    let line = format!(r#"{{"event":"add_connection","source":"{pin}"}}"#);
    let actions = handle_line(&mut board, &line);
    assert_eq!(error_code(&actions), Some("E_MISSING_PART"));

    let line = format!(r#"{{"event":"add_connection","source":"{pin}","target":"{}","style":{{}}}}"#, PinId::new());
    let actions = handle_line(&mut board, &line);
    assert_eq!(error_code(&actions), Some("E_PIN_NOT_FOUND"));
}

#[test]
fn add_connection_with_all_parts_renders_styled_line() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"add_note","bounds":{"left":0,"top":0,"width":100,"height":100}}"#);
    handle_line(&mut board, r#"{"event":"add_note","bounds":{"left":200,"top":0,"width":100,"height":100}}"#);
    let pins: Vec<PinId> = board.notes().iter().map(|n| n.pin).collect();

    let line = format!(
        r#"{{"event":"add_connection","source":"{}","target":"{}","style":{{"texture":"dashed","thickness":3}}}}"#,
        pins[0], pins[1]
    );
    let actions = handle_line(&mut board, &line);
    let Some(Action::ConnectionAdded { line, .. }) = actions.first() else {
        panic!("expected connection_added, got {actions:?}");
    };
    assert_eq!(line.dash, Some([6.0, 2.0]));
    assert!((line.thickness - 3.0).abs() < f64::EPSILON);
}

#[test]
fn remove_unknown_note_is_silent() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"add_note"}"#);
    let line = format!(r#"{{"event":"remove_note","id":"{}"}}"#, NoteId::new());
    assert!(handle_line(&mut board, &line).is_empty());
    assert_eq!(board.notes().len(), 1);
}

#[test]
fn remove_known_note_line_removes_it() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"add_note"}"#);
    let (id, _) = first_note(&board);
    let actions = handle_line(&mut board, &format!(r#"{{"event":"remove_note","id":"{id}"}}"#));
    assert_eq!(actions, vec![Action::NoteRemoved { id }]);
}

#[test]
fn delete_key_line_removes_selected_note() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"add_note"}"#);
    let (id, _) = first_note(&board);

    handle_line(&mut board, &format!(r#"{{"event":"note_pointer_down","id":"{id}","x":0,"y":0}}"#));
    handle_line(&mut board, r#"{"event":"pointer_up","x":0,"y":0}"#);
    let actions = handle_line(&mut board, r#"{"event":"key_down","key":"Delete"}"#);
    assert!(actions.contains(&Action::NoteRemoved { id }));
    assert!(board.notes().is_empty());
}

#[test]
fn surface_resized_line_enables_clamping() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"surface_resized","width":300,"height":300}"#);
    assert_eq!(board.surface_extent(), Some(Size::new(300.0, 300.0)));

    handle_line(&mut board, r#"{"event":"add_note","bounds":{"left":0,"top":0,"width":100,"height":100}}"#);
    let (id, _) = first_note(&board);
    handle_line(&mut board, &format!(r#"{{"event":"note_pointer_down","id":"{id}","x":0,"y":0}}"#));
    handle_line(&mut board, r#"{"event":"pointer_move","x":900,"y":900}"#);
    let note = board.note(id).unwrap();
    assert!((note.left - 200.0).abs() < f64::EPSILON);
    assert!((note.top - 200.0).abs() < f64::EPSILON);
}

#[test]
fn middle_drag_lines_connect_two_notes() {
    let mut board = Board::default();
    handle_line(&mut board, r#"{"event":"add_note","bounds":{"left":0,"top":0,"width":100,"height":100}}"#);
    handle_line(&mut board, r#"{"event":"add_note","bounds":{"left":300,"top":0,"width":100,"height":100}}"#);
    let pins: Vec<PinId> = board.notes().iter().map(|n| n.pin).collect();

    let down = handle_line(&mut board, &format!(r#"{{"event":"pin_pointer_down","pin":"{}","button":"middle"}}"#, pins[0]));
    assert!(down.contains(&Action::PointerCaptured));
    handle_line(&mut board, r#"{"event":"pointer_move","x":200,"y":50}"#);
    let up = handle_line(&mut board, r#"{"event":"pointer_up","x":345,"y":55,"button":"middle"}"#);
    assert!(up.contains(&Action::PointerReleased));
    assert_eq!(board.graph().connection_count(), 1);
}
