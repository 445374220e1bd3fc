//! Unique identifier types for engine entities
//!
//! Order ids are caller-assigned opaque 64-bit values, unique for the
//! lifetime of the engine. The engine never generates ids itself.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
///
/// Assigned by the submitter; the engine only requires uniqueness within
/// its own lifetime. Serialized as a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
