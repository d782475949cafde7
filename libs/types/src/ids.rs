//! Identifier types for kernel entities
//!
//! The engine treats identifiers as caller-opaque: they are assigned by
//! the submitting layer and never generated, deduplicated, or inspected
//! here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// Caller-assigned. The engine carries it through fills unchanged and
/// enforces no uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from a raw value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
