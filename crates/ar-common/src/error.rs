//! Validation errors for activity records and report models.
//!
//! Every variant names the offending field so the data-entry layer can point
//! the user at it. Codes are stable:
//! - 10-19: record field errors
//! - 20-29: model-level errors

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed activity record or report model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: String },

    #[error("{field} ({end}) is before start_time ({start})")]
    EndBeforeStart {
        field: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid date range: end ({end}) is before start ({start})")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("{field} ({value}) is outside the report range [{range_start}, {range_end}]")]
    OutsideRange {
        field: String,
        value: DateTime<Utc>,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    },

    #[error("{field}: duplicate activity id '{id}'")]
    DuplicateId { field: String, id: String },

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub fn empty(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::EndBeforeStart { field, .. }
            | ValidationError::OutsideRange { field, .. }
            | ValidationError::DuplicateId { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
            ValidationError::InvalidRange { .. } => "range_end",
        }
    }

    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::EmptyField { .. } => 10,
            ValidationError::EndBeforeStart { .. } => 11,
            ValidationError::InvalidValue { .. } => 12,
            ValidationError::InvalidRange { .. } => 20,
            ValidationError::OutsideRange { .. } => 21,
            ValidationError::DuplicateId { .. } => 22,
        }
    }

    /// Prefix the field with its position inside a collection, e.g.
    /// `title` becomes `activities[3].title`.
    pub fn within(self, prefix: &str) -> Self {
        let scoped = |field: String| format!("{prefix}.{field}");
        match self {
            ValidationError::EmptyField { field } => ValidationError::EmptyField {
                field: scoped(field),
            },
            ValidationError::EndBeforeStart { field, start, end } => {
                ValidationError::EndBeforeStart {
                    field: scoped(field),
                    start,
                    end,
                }
            }
            ValidationError::OutsideRange {
                field,
                value,
                range_start,
                range_end,
            } => ValidationError::OutsideRange {
                field: scoped(field),
                value,
                range_start,
                range_end,
            },
            ValidationError::DuplicateId { field, id } => ValidationError::DuplicateId {
                field: scoped(field),
                id,
            },
            ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
                field: scoped(field),
                message,
            },
            range @ ValidationError::InvalidRange { .. } => range,
        }
    }
}
