//! The switch state machine.
//!
//! A [`SwitchState`] is a plain record owned by exactly one switch. It only
//! changes through [`process_message`], which consumes one delivered
//! [`Message`] and yields the advertisements to send next.
//!
//! # Root Selection
//!
//! A message offers the candidate `(root, distance + 1, origin)`. It is
//! compared against the current `(root, distance, parent)` lexicographically:
//!
//! 1. smaller root wins unconditionally
//! 2. same root: shorter distance wins
//! 3. same root and distance: smaller parent wins (or any parent if unset)
//!
//! Every level is a total order, so the computation is a monotone
//! Bellman-Ford over the bridge graph and settles on the global minimum
//! identifier as root.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::invariant::InvariantViolation;
use crate::{Message, SwitchId};

/// Per-switch protocol state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchState {
    id: SwitchId,
    neighbors: Vec<SwitchId>,
    root: SwitchId,
    distance: u32,
    path_to_root: Option<SwitchId>,
    active_links: BTreeSet<SwitchId>,
}

/// Result of delivering one message to a switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Root, distance or parent changed
    pub updated: bool,
    /// TTL of the delivered message after the receiver's decrement
    pub ttl: u32,
    /// Advertisements to hand to the transport, one per neighbor
    pub outgoing: Vec<Message>,
}

impl Transition {
    /// Nothing to forward: this delivery ends here.
    pub fn is_quiescent(&self) -> bool {
        self.outgoing.is_empty()
    }
}

impl SwitchState {
    /// Create a switch that believes itself root and has no active links.
    pub fn new(id: SwitchId, neighbors: Vec<SwitchId>) -> Self {
        Self {
            id,
            neighbors,
            root: id,
            distance: 0,
            path_to_root: None,
            active_links: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> SwitchId {
        self.id
    }

    pub fn neighbors(&self) -> &[SwitchId] {
        &self.neighbors
    }

    /// Currently believed root.
    pub fn root(&self) -> SwitchId {
        self.root
    }

    /// Hop count to the believed root.
    pub fn distance(&self) -> u32 {
        self.distance
    }

    /// Next hop toward the root, `None` while self-rooted.
    pub fn path_to_root(&self) -> Option<SwitchId> {
        self.path_to_root
    }

    pub fn active_links(&self) -> &BTreeSet<SwitchId> {
        &self.active_links
    }

    /// Whether this switch currently believes itself the root.
    pub fn is_root(&self) -> bool {
        self.root == self.id
    }

    /// Check the invariants decidable from this state alone.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let switch = self.id;
        if self.is_root() {
            if let Some(parent) = self.path_to_root {
                return Err(InvariantViolation::SelfRootWithParent { switch, parent });
            }
            if self.distance != 0 {
                return Err(InvariantViolation::SelfRootWithDistance {
                    switch,
                    distance: self.distance,
                });
            }
        } else {
            let Some(parent) = self.path_to_root else {
                return Err(InvariantViolation::ForeignRootWithoutParent {
                    switch,
                    root: self.root,
                });
            };
            if self.distance == 0 {
                return Err(InvariantViolation::ForeignRootAtZeroDistance {
                    switch,
                    root: self.root,
                });
            }
            if !self.active_links.contains(&parent) {
                return Err(InvariantViolation::ParentNotActive { switch, parent });
            }
        }
        Ok(())
    }
}

/// The initial advertisement a switch makes before hearing from anyone.
pub fn announce(state: &SwitchState, ttl: u32) -> Vec<Message> {
    broadcast(state, ttl)
}

/// Deliver one message to a switch.
///
/// Updates `state` in place and returns the advertisements to send. A
/// message with `ttl` already 0 is still processed; it just cannot force a
/// re-flood of unchanged state.
pub fn process_message(state: &mut SwitchState, message: Message) -> Transition {
    let message = message.received();
    let old_root = state.root;
    let old_parent = state.path_to_root;
    let mut updated = false;

    let candidate_root = message.root;
    let candidate_distance = message.distance.saturating_add(1);
    let candidate_parent = message.origin;

    match candidate_root.cmp(&state.root) {
        Ordering::Less => {
            state.root = candidate_root;
            state.distance = candidate_distance;
            state.path_to_root = Some(candidate_parent);
            updated = true;
        }
        Ordering::Equal => {
            if candidate_distance < state.distance {
                state.distance = candidate_distance;
                state.path_to_root = Some(candidate_parent);
                updated = true;
            } else if candidate_distance == state.distance
                && state.path_to_root.is_none_or(|parent| candidate_parent < parent)
            {
                state.path_to_root = Some(candidate_parent);
                updated = true;
            }
        }
        Ordering::Greater => {}
    }

    if old_parent != state.path_to_root {
        if let Some(old) = old_parent {
            state.active_links.remove(&old);
        }
        if let Some(new) = state.path_to_root {
            state.active_links.insert(new);
        }
    }

    if message.path_through {
        state.active_links.insert(message.origin);
    } else if state.path_to_root != Some(message.origin) {
        state.active_links.remove(&message.origin);
    }

    // Self-rooted: drop any stale parent and re-announce if that changed anything.
    if state.is_root() {
        if state.path_to_root.is_some() || state.distance != 0 {
            updated = true;
        }
        state.distance = 0;
        if let Some(parent) = state.path_to_root.take() {
            state.active_links.remove(&parent);
        }
    }

    trace!(
        switch = %state.id,
        origin = %message.origin,
        root = %state.root,
        distance = state.distance,
        ttl = message.ttl,
        updated,
        "processed message"
    );
    if old_root != state.root || old_parent != state.path_to_root {
        debug!(
            switch = %state.id,
            root = %state.root,
            distance = state.distance,
            parent = ?state.path_to_root,
            "root path changed"
        );
    }

    let outgoing = if updated || message.ttl > 0 {
        broadcast(state, message.ttl)
    } else {
        Vec::new()
    };

    Transition {
        updated,
        ttl: message.ttl,
        outgoing,
    }
}

/// Render the active links as `"<id> - <neighbor>"` entries in increasing
/// neighbor order, joined with `", "`.
pub fn render_active_links(state: &SwitchState) -> String {
    state
        .active_links
        .iter()
        .map(|neighbor| format!("{} - {}", state.id, neighbor))
        .collect::<Vec<_>>()
        .join(", ")
}

fn broadcast(state: &SwitchState, ttl: u32) -> Vec<Message> {
    state
        .neighbors
        .iter()
        .map(|&neighbor| {
            Message::new(
                state.root,
                state.distance,
                state.id,
                neighbor,
                state.path_to_root == Some(neighbor),
                ttl,
            )
        })
        .collect()
}

#[cfg(test)]
impl SwitchState {
    /// Build an arbitrary state, bypassing the transition function.
    pub(crate) fn with_fields(
        id: SwitchId,
        neighbors: Vec<SwitchId>,
        root: SwitchId,
        distance: u32,
        path_to_root: Option<SwitchId>,
        active_links: &[u32],
    ) -> Self {
        Self {
            id,
            neighbors,
            root,
            distance,
            path_to_root,
            active_links: active_links.iter().copied().map(SwitchId).collect(),
        }
    }
}
