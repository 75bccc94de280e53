//! Group drag geometry.
//!
//! A drag moves every selected note by the same delta. When clamping is on,
//! the requested delta is narrowed to the intersection of each member's
//! allowed range so the whole group stops as soon as any member touches a
//! surface edge, preserving relative offsets.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::geometry::Size;
use crate::ids::NoteId;

/// One note's snapshot at drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMember {
    pub note: NoteId,
    pub left: f64,
    pub top: f64,
    /// Effective size used for bounds checks (explicit, else measured, else zero).
    pub size: Size,
}

/// Clamp a requested group delta so every member stays inside `extent`.
///
/// An unmeasured extent (absent, zero, or non-finite) disables clamping and
/// the delta passes through unchanged.
#[must_use]
pub fn clamp_group_delta(group: &[GroupMember], extent: Option<Size>, dx: f64, dy: f64) -> (f64, f64) {
    let Some(extent) = extent.filter(|e| e.is_measured()) else {
        return (dx, dy);
    };

    let mut min_dx = f64::NEG_INFINITY;
    let mut max_dx = f64::INFINITY;
    let mut min_dy = f64::NEG_INFINITY;
    let mut max_dy = f64::INFINITY;

    for m in group {
        min_dx = min_dx.max(-m.left);
        max_dx = max_dx.min(extent.width - (m.left + m.size.width));
        min_dy = min_dy.max(-m.top);
        max_dy = max_dy.min(extent.height - (m.top + m.size.height));
    }

    (clamp_axis(dx, min_dx, max_dx), clamp_axis(dy, min_dy, max_dy))
}

/// Clamp `d` into `[lo, hi]`. When the range is empty (a member larger than
/// the surface) the lower bound wins, keeping top/left edges on the surface.
fn clamp_axis(d: f64, lo: f64, hi: f64) -> f64 {
    d.min(hi).max(lo)
}
