//! Activity identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a logged activity.
///
/// Callers that already track activities (e.g. the data-entry layer) pass
/// their own ids; [`ActivityId::generate`] covers the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub String);

impl ActivityId {
    /// Create a fresh random id.
    ///
    /// Format: `act-<uuid-v4>`
    pub fn generate() -> Self {
        ActivityId(format!("act-{}", uuid::Uuid::new_v4()))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(id: &str) -> Self {
        ActivityId(id.to_string())
    }
}

impl From<String> for ActivityId {
    fn from(id: String) -> Self {
        ActivityId(id)
    }
}
