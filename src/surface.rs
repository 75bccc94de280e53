//! Host surface boundary.
//!
//! The board never measures or renders anything itself. The host tells it how
//! large the note surface is (for clamping) and how to map a surface-space
//! point into the frame the connection lines are drawn in.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::geometry::{Point, Size};

/// What the board needs to know about the surface notes live on.
pub trait Surface {
    /// Measured extent of the note surface. `None` disables clamping.
    fn extent(&self) -> Option<Size>;

    /// Map a surface-space point into the rendering frame shared with
    /// connection lines. `None` means the transform is not available yet
    /// (e.g. the surface is not attached) and the caller should fall back.
    fn to_render_space(&self, point: Point) -> Option<Point>;
}

/// A surface with a fixed extent whose rendering frame is a pure translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSurface {
    pub extent: Option<Size>,
    /// Position of the surface's origin in the rendering frame.
    pub origin: Point,
    pub attached: bool,
}

impl Default for FixedSurface {
    fn default() -> Self {
        Self { extent: None, origin: Point::default(), attached: true }
    }
}

impl FixedSurface {
    /// An attached surface with the given measured extent and no offset.
    #[must_use]
    pub fn new(extent: Size) -> Self {
        Self { extent: Some(extent), ..Self::default() }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// A surface that is not attached to the rendering frame; every transform fails.
    #[must_use]
    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }
}

impl Surface for FixedSurface {
    fn extent(&self) -> Option<Size> {
        self.extent
    }

    fn to_render_space(&self, point: Point) -> Option<Point> {
        self.attached.then(|| point.offset(self.origin.x, self.origin.y))
    }
}
