//! Resize handle geometry.
//!
//! Each of the eight handles maps to at most one vertical and one horizontal
//! edge adjustment. Far edges (right, bottom) change size only. Near edges
//! (left, top) change size and shift position by the same delta so the far
//! edge stays put. An adjustment that would shrink an axis below its minimum
//! is dropped for that axis.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// One of the eight resize handles on a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which edge along one axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top or left: moves position and size.
    Near,
    /// Bottom or right: moves size only.
    Far,
}

impl ResizeHandle {
    /// Edge adjusted along the vertical axis, if any.
    #[must_use]
    pub fn vertical(self) -> Option<Edge> {
        match self {
            Self::Top | Self::TopLeft | Self::TopRight => Some(Edge::Near),
            Self::Bottom | Self::BottomLeft | Self::BottomRight => Some(Edge::Far),
            Self::Left | Self::Right => None,
        }
    }

    /// Edge adjusted along the horizontal axis, if any.
    #[must_use]
    pub fn horizontal(self) -> Option<Edge> {
        match self {
            Self::Left | Self::TopLeft | Self::BottomLeft => Some(Edge::Near),
            Self::Right | Self::TopRight | Self::BottomRight => Some(Edge::Far),
            Self::Top | Self::Bottom => None,
        }
    }
}

/// Apply one drag step `(dx, dy)` on `handle` to `bounds`.
#[must_use]
pub fn resize(bounds: Rect, handle: ResizeHandle, dx: f64, dy: f64, min: Size) -> Rect {
    let mut out = bounds;
    if let Some(edge) = handle.vertical() {
        (out.top, out.height) = adjust(edge, bounds.top, bounds.height, dy, min.height);
    }
    if let Some(edge) = handle.horizontal() {
        (out.left, out.width) = adjust(edge, bounds.left, bounds.width, dx, min.width);
    }
    out
}

fn adjust(edge: Edge, pos: f64, len: f64, delta: f64, min: f64) -> (f64, f64) {
    match edge {
        Edge::Near => {
            let next = len - delta;
            if next >= min { (pos + delta, next) } else { (pos, len) }
        }
        Edge::Far => {
            let next = len + delta;
            if next >= min { (pos, next) } else { (pos, len) }
        }
    }
}
