#[cfg(test)]
#[path = "style_test.rs"]
mod style_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DASHED_DASH, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_TWINE_COLOR, DEFAULT_TWINE_THICKNESS, DOTTED_DASH};

/// Stroke texture of a connection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Texture {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

impl Texture {
    /// Dash/gap lengths for this texture. `None` means a continuous stroke.
    #[must_use]
    pub fn dash_pattern(self) -> Option<[f64; 2]> {
        match self {
            Self::Solid => None,
            Self::Dotted => Some(DOTTED_DASH),
            Self::Dashed => Some(DASHED_DASH),
        }
    }
}

/// Visual style of a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Stroke color as a CSS hex string.
    pub color: String,
    pub texture: Texture,
    /// Stroke thickness in rendering-space pixels.
    pub thickness: f64,
    /// Color of the overlay shown only while the connection is selected.
    pub highlight_color: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: DEFAULT_TWINE_COLOR.to_string(),
            texture: Texture::Solid,
            thickness: DEFAULT_TWINE_THICKNESS,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
        }
    }
}
