//! # Error Types
//!
//! This module defines error types used throughout the labelsmith library.
//!
//! Every variant aborts the current generation run. Falling back to the
//! built-in bitmap font when the preferred font cannot be loaded is not an
//! error and never shows up here (see [`crate::render::font::LabelFont::load`]).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for labelsmith operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// The default logo could not be loaded at process start
    #[error("Default logo '{}' could not be loaded: {reason}", path.display())]
    StartupFailure { path: PathBuf, reason: String },

    /// Spreadsheet cannot be parsed, or a row lacks the expected columns
    #[error("Invalid spreadsheet: {0}")]
    InputFormat(String),

    /// More rows than there are image identifiers
    #[error("Too many rows: {rows} exceeds the limit of {capacity} labels per run")]
    CapacityExceeded { rows: usize, capacity: usize },

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Label document packaging error
    #[error("Document error: {0}")]
    Document(String),

    /// Archive packaging error
    #[error("Archive error: {0}")]
    Archive(String),

    /// Reading or writing working files
    #[error("I/O error: {0}")]
    Filesystem(#[from] std::io::Error),
}

impl LabelError {
    /// True when the error was caused by what the user supplied rather than
    /// by the host.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LabelError::InputFormat(_) | LabelError::CapacityExceeded { .. } | LabelError::Image(_)
        )
    }
}
