//! State invariants that every transition must preserve.

use thiserror::Error;

use crate::SwitchId;

/// A switch state that no sequence of transitions can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// A self-rooted switch still records a parent
    #[error("switch {switch} believes itself root but has parent {parent}")]
    SelfRootWithParent { switch: SwitchId, parent: SwitchId },

    /// A self-rooted switch is not at distance 0
    #[error("switch {switch} believes itself root at distance {distance}")]
    SelfRootWithDistance { switch: SwitchId, distance: u32 },

    /// A switch follows another root but has no next hop toward it
    #[error("switch {switch} follows root {root} without a parent")]
    ForeignRootWithoutParent { switch: SwitchId, root: SwitchId },

    /// A switch follows another root at distance 0
    #[error("switch {switch} follows root {root} at distance 0")]
    ForeignRootAtZeroDistance { switch: SwitchId, root: SwitchId },

    /// The parent link is missing from the active set
    #[error("switch {switch} has parent {parent} that is not an active link")]
    ParentNotActive { switch: SwitchId, parent: SwitchId },
}
