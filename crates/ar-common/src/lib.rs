//! Activity report common types, IDs, and errors.
//!
//! This crate provides the foundational values shared by the report engine:
//! - Activity identity and the immutable [`ActivityRecord`]
//! - Field-level validation errors
//! - Duration formatting used across report sections

pub mod activity;
pub mod error;
pub mod id;

pub use activity::{format_duration, ActivityFields, ActivityRecord};
pub use error::{ValidationError, ValidationResult};
pub use id::ActivityId;
