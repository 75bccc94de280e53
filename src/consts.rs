//! Shared numeric constants for the board engine.

// ── Notes ───────────────────────────────────────────────────────

/// Minimum note width applied when a note does not override it.
pub const DEFAULT_MIN_WIDTH: f64 = 50.0;

/// Minimum note height applied when a note does not override it.
pub const DEFAULT_MIN_HEIGHT: f64 = 50.0;

/// Width of a note created by the "add note" action.
pub const DEFAULT_NOTE_WIDTH: f64 = 200.0;

/// Height of a note created by the "add note" action.
pub const DEFAULT_NOTE_HEIGHT: f64 = 150.0;

/// Left edge of a note created by the "add note" action.
pub const DEFAULT_NOTE_LEFT: f64 = 150.0;

/// Top edge of a note created by the "add note" action.
pub const DEFAULT_NOTE_TOP: f64 = 80.0;

// ── Twines ──────────────────────────────────────────────────────

/// Stroke thickness of a connection line.
pub const DEFAULT_TWINE_THICKNESS: f64 = 5.0;

/// Stroke color of a connection line.
pub const DEFAULT_TWINE_COLOR: &str = "#FF0000";

/// Color of the selection overlay drawn behind a selected line.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#6495ED";

/// Extra stroke the selection overlay adds on top of the main line.
pub const HIGHLIGHT_EXTRA_THICKNESS: f64 = 2.0;

/// Dash/gap lengths for a dotted twine.
pub const DOTTED_DASH: [f64; 2] = [2.0, 2.0];

/// Dash/gap lengths for a dashed twine.
pub const DASHED_DASH: [f64; 2] = [6.0, 2.0];

/// Radius in rendering-space pixels within which a released connect gesture snaps to a pin.
pub const PIN_SNAP_RADIUS: f64 = 50.0;

// ── Scheduler ───────────────────────────────────────────────────

/// Period of the batched endpoint recompute (about 90 Hz).
pub const DEFAULT_TICK_MS: u64 = 11;
