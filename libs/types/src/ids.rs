//! Identifier types for book entities
//!
//! Order ids are plain unsigned integers chosen by the caller. The book
//! never generates ids itself; it only rejects duplicates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create an OrderId from a raw integer
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id immediately following this one
    ///
    /// Used by callers that hand out synthetic, strictly increasing ids.
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
