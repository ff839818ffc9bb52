//! Simulation timeline and state snapshots.

use serde::{Deserialize, Serialize};
use spantree_core::{Bridge, Message, SwitchId};

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A switch sent its initial advertisement
    Announced {
        switch: SwitchId,
        messages: usize,
        delivery: u64,
    },

    /// A message reached its destination
    Delivered {
        message: Message,
        updated: bool,
        sent: usize,
        delivery: u64,
    },

    /// A switch changed its root, distance or parent
    StateChanged {
        switch: SwitchId,
        root: SwitchId,
        distance: u32,
        parent: Option<SwitchId>,
        delivery: u64,
    },

    /// A message addressed to a switch that does not exist
    Dropped { message: Message, delivery: u64 },
}

impl SimEvent {
    /// Number of deliveries completed when this event happened.
    pub fn delivery(&self) -> u64 {
        match self {
            SimEvent::Announced { delivery, .. } => *delivery,
            SimEvent::Delivered { delivery, .. } => *delivery,
            SimEvent::StateChanged { delivery, .. } => *delivery,
            SimEvent::Dropped { delivery, .. } => *delivery,
        }
    }
}

/// One switch's state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSnapshot {
    pub id: SwitchId,
    pub root: SwitchId,
    pub distance: u32,
    pub parent: Option<SwitchId>,
    pub active_links: Vec<SwitchId>,
}

impl SwitchSnapshot {
    pub fn of<B: Bridge>(bridge: &B) -> Self {
        Self {
            id: bridge.id(),
            root: bridge.root(),
            distance: bridge.distance(),
            parent: bridge.path_to_root(),
            active_links: bridge.active_links().iter().copied().collect(),
        }
    }
}

/// Every switch's state, in increasing identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub deliveries: u64,
    pub switches: Vec<SwitchSnapshot>,
}

impl NetworkSnapshot {
    /// Number of undirected links considered active by both ends.
    pub fn tree_link_count(&self) -> usize {
        self.switches
            .iter()
            .flat_map(|s| s.active_links.iter().map(move |&to| (s.id, to)))
            .filter(|&(from, to)| from < to)
            .filter(|&(from, to)| {
                self.switches
                    .iter()
                    .any(|other| other.id == to && other.active_links.contains(&from))
            })
            .count()
    }
}
