//! Switch identifiers.

use std::fmt;

/// A switch (bridge) identifier.
///
/// Identifiers are totally ordered. The ordering is what drives convergence:
/// the smallest identifier in the network becomes the root, and equal-cost
/// parents are tie-broken toward the smaller identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SwitchId(pub u32);

impl SwitchId {
    /// Create a new identifier.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw identifier value.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for SwitchId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
