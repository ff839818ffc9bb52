//! Spanning-tree checks over a converged active-link set.
//!
//! Each switch reports the links it considers active. Taken together the
//! reports must describe one tree: every active link is a real link, both
//! ends agree it is active, and the undirected active edges are acyclic and
//! reach every switch.

use std::collections::{BTreeMap, BTreeSet};

use spantree_core::SwitchId;
use thiserror::Error;

use crate::Topology;

/// Active links as reported per switch.
pub type ActiveLinks = BTreeMap<SwitchId, BTreeSet<SwitchId>>;

/// Why a set of active links is not a spanning tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeViolation {
    /// A switch reported that is not in the topology
    #[error("switch {0} is not in the topology")]
    UnknownSwitch(SwitchId),

    /// An active link with no physical link behind it
    #[error("{from} - {to} is active but not a link")]
    NotALink { from: SwitchId, to: SwitchId },

    /// Only one end considers the link active
    #[error("{from} - {to} is active at {from} only")]
    Asymmetric { from: SwitchId, to: SwitchId },

    /// Active links close a loop
    #[error("{a} - {b} closes a cycle")]
    Cycle { a: SwitchId, b: SwitchId },

    /// Active links leave the switches split up
    #[error("active links form {components} components")]
    NotSpanning { components: usize },
}

/// Check that `active` describes a spanning tree of `topology`.
pub fn check_spanning_tree(topology: &Topology, active: &ActiveLinks) -> Result<(), TreeViolation> {
    for (&from, links) in active {
        if !topology.contains(from) {
            return Err(TreeViolation::UnknownSwitch(from));
        }
        for &to in links {
            if !topology.are_neighbors(from, to) {
                return Err(TreeViolation::NotALink { from, to });
            }
            if !active.get(&to).is_some_and(|back| back.contains(&from)) {
                return Err(TreeViolation::Asymmetric { from, to });
            }
        }
    }

    let mut sets = DisjointSets::new(topology.switch_ids());
    for (&a, links) in active {
        for &b in links.range(a..) {
            if !sets.union(a, b) {
                return Err(TreeViolation::Cycle { a, b });
            }
        }
    }

    let components = sets.components();
    if components > 1 {
        return Err(TreeViolation::NotSpanning { components });
    }
    Ok(())
}

/// Union-find keyed by switch.
struct DisjointSets {
    parent: BTreeMap<SwitchId, SwitchId>,
}

impl DisjointSets {
    fn new(switches: impl Iterator<Item = SwitchId>) -> Self {
        Self {
            parent: switches.map(|s| (s, s)).collect(),
        }
    }

    fn find(&mut self, switch: SwitchId) -> SwitchId {
        let mut root = switch;
        while self.parent[&root] != root {
            root = self.parent[&root];
        }
        // Path compression
        let mut current = switch;
        while current != root {
            let next = self.parent[&current];
            self.parent.insert(current, root);
            current = next;
        }
        root
    }

    /// Merge two sets; false if already joined.
    fn union(&mut self, a: SwitchId, b: SwitchId) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        self.parent.insert(ra.max(rb), ra.min(rb));
        true
    }

    fn components(&mut self) -> usize {
        let switches: Vec<_> = self.parent.keys().copied().collect();
        switches
            .into_iter()
            .map(|s| self.find(s))
            .collect::<BTreeSet<_>>()
            .len()
    }
}
