//! Error types for report generation.

use crate::layout::SectionKind;
use crate::units::Length;
use ar_common::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Layout impossibilities. Any of these aborts the whole render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A row (with its table header, if any) cannot fit on an empty page.
    #[error("{section} row {index} needs {height} but a page holds at most {max}")]
    RowTooTall {
        section: SectionKind,
        index: usize,
        height: Length,
        max: Length,
    },

    /// Page size, margins or content height make layout impossible.
    #[error("invalid page configuration: {0}")]
    InvalidPageConfig(String),
}

impl RenderError {
    pub fn code(&self) -> u32 {
        match self {
            RenderError::RowTooTall { .. } => 30,
            RenderError::InvalidPageConfig(_) => 31,
        }
    }
}

/// Errors that can occur during report generation.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Malformed record, model, style or option.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Layout could not be completed.
    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    /// The output could not be written. Any previous file at `path` is untouched.
    #[error("I/O error writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable error code; validation and render errors keep their own codes.
    pub fn code(&self) -> u32 {
        match self {
            ReportError::Validation(e) => e.code(),
            ReportError::Render(e) => e.code(),
            ReportError::Io { .. } => 60,
            ReportError::Json(_) => 61,
        }
    }
}
