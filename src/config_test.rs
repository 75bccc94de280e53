#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================
// env_parse
// =============================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse(None, 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    let val: u64 = env_parse(Some(" 99 ".into()), 0);
    assert_eq!(val, 99);
}

#[test]
fn env_parse_present_invalid_returns_default() {
    let val: f64 = env_parse(Some("notanumber".into()), 7.0);
    assert_eq!(val, 7.0);
}

// =============================================================
// BoardConfig
// =============================================================

#[test]
fn defaults_match_constants() {
    let cfg = BoardConfig::from_lookup(|_| None);
    assert_eq!(cfg, BoardConfig::default());
    assert_eq!(cfg.tick_ms, 11);
    assert_eq!(cfg.tick_period(), Duration::from_millis(11));
    assert!(cfg.note_defaults.clamp_to_parent_bounds);
    assert_eq!(cfg.note_defaults.min_width, 50.0);
    assert_eq!(cfg.note_defaults.min_height, 50.0);
    assert_eq!(cfg.pin_snap_radius, 50.0);
    assert_eq!(cfg.new_note, Rect::new(150.0, 80.0, 200.0, 150.0));
}

#[test]
fn overrides_are_parsed() {
    let cfg = BoardConfig::from_lookup(lookup_from(&[
        ("CORKBOARD_TICK_MS", "33"),
        ("CORKBOARD_MIN_NOTE_WIDTH", "80"),
        ("CORKBOARD_MIN_NOTE_HEIGHT", "60"),
        ("CORKBOARD_CLAMP_TO_BOUNDS", "false"),
        ("CORKBOARD_PIN_SNAP_RADIUS", "12.5"),
        ("CORKBOARD_NOTE_LEFT", "-10"),
        ("CORKBOARD_NOTE_TOP", "5"),
        ("CORKBOARD_NOTE_WIDTH", "300"),
        ("CORKBOARD_NOTE_HEIGHT", "120"),
    ]));
    assert_eq!(cfg.tick_ms, 33);
    assert_eq!(cfg.note_defaults.min_width, 80.0);
    assert_eq!(cfg.note_defaults.min_height, 60.0);
    assert!(!cfg.note_defaults.clamp_to_parent_bounds);
    assert_eq!(cfg.pin_snap_radius, 12.5);
    assert_eq!(cfg.new_note, Rect::new(-10.0, 5.0, 300.0, 120.0));
}

#[test]
fn out_of_range_values_fall_back() {
    let cfg = BoardConfig::from_lookup(lookup_from(&[
        ("CORKBOARD_TICK_MS", "0"),
        ("CORKBOARD_MIN_NOTE_WIDTH", "-5"),
        ("CORKBOARD_MIN_NOTE_HEIGHT", "NaN"),
        ("CORKBOARD_CLAMP_TO_BOUNDS", "maybe"),
        ("CORKBOARD_NOTE_LEFT", "inf"),
    ]));
    assert_eq!(cfg.tick_ms, 11);
    assert_eq!(cfg.note_defaults.min_width, 50.0);
    assert_eq!(cfg.note_defaults.min_height, 50.0);
    assert!(cfg.note_defaults.clamp_to_parent_bounds);
    assert_eq!(cfg.new_note.left, 150.0);
}
