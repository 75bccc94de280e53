//! Board configuration parsed from environment variables.
//!
//! Every knob has a typed default. Unparseable or out-of-range values fall
//! back to the default rather than failing startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;
use std::time::Duration;

use crate::consts::{
    DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH, DEFAULT_NOTE_HEIGHT, DEFAULT_NOTE_LEFT, DEFAULT_NOTE_TOP, DEFAULT_NOTE_WIDTH,
    DEFAULT_TICK_MS, PIN_SNAP_RADIUS,
};
use crate::geometry::Rect;
use crate::note::NoteConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Scheduler period in milliseconds.
    pub tick_ms: u64,
    /// Config given to notes that don't bring their own.
    pub note_defaults: NoteConfig,
    /// Search radius for the pin a connect gesture is released over.
    pub pin_snap_radius: f64,
    /// Placement of a note created by "add note".
    pub new_note: Rect,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            note_defaults: NoteConfig::default(),
            pin_snap_radius: PIN_SNAP_RADIUS,
            new_note: Rect::new(DEFAULT_NOTE_LEFT, DEFAULT_NOTE_TOP, DEFAULT_NOTE_WIDTH, DEFAULT_NOTE_HEIGHT),
        }
    }
}

impl BoardConfig {
    /// Build config from process environment variables.
    ///
    /// All optional:
    /// - `CORKBOARD_TICK_MS`: default 11
    /// - `CORKBOARD_MIN_NOTE_WIDTH` / `CORKBOARD_MIN_NOTE_HEIGHT`: default 50
    /// - `CORKBOARD_CLAMP_TO_BOUNDS`: default true
    /// - `CORKBOARD_PIN_SNAP_RADIUS`: default 50
    /// - `CORKBOARD_NOTE_WIDTH` / `CORKBOARD_NOTE_HEIGHT`: default 200 / 150
    /// - `CORKBOARD_NOTE_LEFT` / `CORKBOARD_NOTE_TOP`: default 150 / 80
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let positive = |key: &str, default: f64| {
            let v = env_parse(lookup(key), default);
            if v.is_finite() && v > 0.0 { v } else { default }
        };
        let finite = |key: &str, default: f64| {
            let v = env_parse(lookup(key), default);
            if v.is_finite() { v } else { default }
        };

        let tick_ms = match env_parse(lookup("CORKBOARD_TICK_MS"), DEFAULT_TICK_MS) {
            0 => DEFAULT_TICK_MS,
            ms => ms,
        };

        Self {
            tick_ms,
            note_defaults: NoteConfig {
                clamp_to_parent_bounds: env_parse(lookup("CORKBOARD_CLAMP_TO_BOUNDS"), true),
                min_width: positive("CORKBOARD_MIN_NOTE_WIDTH", DEFAULT_MIN_WIDTH),
                min_height: positive("CORKBOARD_MIN_NOTE_HEIGHT", DEFAULT_MIN_HEIGHT),
            },
            pin_snap_radius: positive("CORKBOARD_PIN_SNAP_RADIUS", PIN_SNAP_RADIUS),
            new_note: Rect::new(
                finite("CORKBOARD_NOTE_LEFT", DEFAULT_NOTE_LEFT),
                finite("CORKBOARD_NOTE_TOP", DEFAULT_NOTE_TOP),
                positive("CORKBOARD_NOTE_WIDTH", DEFAULT_NOTE_WIDTH),
                positive("CORKBOARD_NOTE_HEIGHT", DEFAULT_NOTE_HEIGHT),
            ),
        }
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

pub(crate) fn env_parse<T>(raw: Option<String>, default: T) -> T
where
    T: FromStr,
{
    match raw.map(|v| v.trim().parse::<T>()) {
        Some(Ok(v)) => v,
        _ => default,
    }
}
