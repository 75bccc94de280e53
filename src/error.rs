//! Error type for board operations.
//!
//! Only contract violations surface as errors. Stale references handed to
//! interaction handlers (removing a connection that is already gone,
//! completing a connection with no active gesture) are silent no-ops, and
//! coordinate-transform failures are absorbed where they happen.

use crate::ids::{NoteId, PinId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("connection is missing its {0}")]
    MissingPart(&'static str),
    #[error("pin not found: {0}")]
    PinNotFound(PinId),
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    #[error("invalid minimum size {width}x{height}")]
    InvalidMinimumSize { width: f64, height: f64 },
}

impl BoardError {
    /// Grepable code reported to the host alongside the message.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPart(_) => "E_MISSING_PART",
            Self::PinNotFound(_) => "E_PIN_NOT_FOUND",
            Self::NoteNotFound(_) => "E_NOTE_NOT_FOUND",
            Self::InvalidMinimumSize { .. } => "E_INVALID_MIN_SIZE",
        }
    }
}
