//! Millisecond timestamp value object
//!
//! Time enters the system only as caller-supplied values from an external
//! monotonically increasing millisecond clock; nothing in the core reads a
//! clock itself.

use serde::{Deserialize, Serialize};

/// An externally supplied millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[inline]
    pub const fn millis(self) -> u64 {
        self.0
    }

    /// Deadline arithmetic; saturates at the numeric ceiling rather than
    /// wrapping into the past.
    pub const fn saturating_add_millis(self, millis: u64) -> Self {
        Self(self.0.saturating_add(millis))
    }

    /// True iff `self` is strictly after `deadline`.
    pub const fn is_after(self, deadline: Timestamp) -> bool {
        self.0 > deadline.0
    }
}
