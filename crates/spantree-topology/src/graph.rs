//! The undirected bridge graph.
//!
//! # File Format
//!
//! A topology file is a JSON object mapping each switch to its neighbors:
//!
//! ```text
//! { "1": [2], "2": [1, 3], "3": [2] }
//! ```
//!
//! Links are undirected. A link listed on only one side is added to both.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fs;
use std::path::Path;

use spantree_core::SwitchId;

use crate::error::{Result, TopologyError};

/// A fixed, undirected, simple graph of switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    links: BTreeMap<SwitchId, BTreeSet<SwitchId>>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an adjacency map, symmetrizing one-sided links.
    pub fn from_adjacency<I, N>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SwitchId, N)>,
        N: IntoIterator<Item = SwitchId>,
    {
        let mut topology = Self::new();
        for (switch, neighbors) in adjacency {
            topology.add_switch(switch);
            for neighbor in neighbors {
                topology.connect(switch, neighbor)?;
            }
        }
        Ok(topology)
    }

    /// Build from a list of undirected edges.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (SwitchId, SwitchId)>,
    {
        let mut topology = Self::new();
        for (a, b) in edges {
            topology.connect(a, b)?;
        }
        Ok(topology)
    }

    /// Parse a JSON adjacency map.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let adjacency: BTreeMap<SwitchId, Vec<SwitchId>> = serde_json::from_str(json)?;
        Self::from_adjacency(adjacency)
    }

    /// Load a topology file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Add an isolated switch (no-op if present).
    pub fn add_switch(&mut self, switch: SwitchId) {
        self.links.entry(switch).or_default();
    }

    /// Add an undirected link, creating either endpoint if needed.
    pub fn connect(&mut self, a: SwitchId, b: SwitchId) -> Result<()> {
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        self.insert_link(a, b);
        Ok(())
    }

    pub(crate) fn insert_link(&mut self, a: SwitchId, b: SwitchId) {
        debug_assert_ne!(a, b);
        self.links.entry(a).or_default().insert(b);
        self.links.entry(b).or_default().insert(a);
    }

    /// Reject graphs the protocol cannot converge on.
    pub fn validate(&self) -> Result<()> {
        let Some(start) = self.min_switch() else {
            return Err(TopologyError::Empty);
        };
        let reached = self.distances_from(start)?.len();
        if reached != self.switch_count() {
            return Err(TopologyError::Disconnected {
                start,
                unreachable: self.switch_count() - reached,
                total: self.switch_count(),
            });
        }
        Ok(())
    }

    /// Neighbors of a switch, in increasing identifier order.
    pub fn neighbors(&self, switch: SwitchId) -> Result<&BTreeSet<SwitchId>> {
        self.links
            .get(&switch)
            .ok_or(TopologyError::UnknownSwitch(switch))
    }

    /// All switches, in increasing identifier order.
    pub fn switch_ids(&self) -> impl Iterator<Item = SwitchId> + '_ {
        self.links.keys().copied()
    }

    pub fn switch_count(&self) -> usize {
        self.links.len()
    }

    /// Number of undirected links.
    pub fn link_count(&self) -> usize {
        self.links.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn contains(&self, switch: SwitchId) -> bool {
        self.links.contains_key(&switch)
    }

    pub fn are_neighbors(&self, a: SwitchId, b: SwitchId) -> bool {
        self.links.get(&a).is_some_and(|n| n.contains(&b))
    }

    /// The smallest identifier: the root every switch should converge on.
    pub fn min_switch(&self) -> Option<SwitchId> {
        self.links.keys().next().copied()
    }

    /// Hop counts from `start` to every reachable switch (BFS).
    pub fn distances_from(&self, start: SwitchId) -> Result<BTreeMap<SwitchId, u32>> {
        if !self.contains(start) {
            return Err(TopologyError::UnknownSwitch(start));
        }

        let mut distances = BTreeMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            let next = distances[&current] + 1;
            for &neighbor in &self.links[&current] {
                if let Entry::Vacant(entry) = distances.entry(neighbor) {
                    entry.insert(next);
                    queue.push_back(neighbor);
                }
            }
        }
        Ok(distances)
    }

    /// Longest shortest path, `None` if empty or disconnected.
    pub fn diameter(&self) -> Option<u32> {
        let total = self.switch_count();
        let mut diameter = None;
        for switch in self.switch_ids() {
            let distances = self.distances_from(switch).ok()?;
            if distances.len() != total {
                return None;
            }
            let eccentricity = distances.values().copied().max().unwrap_or(0);
            diameter = Some(diameter.map_or(eccentricity, |d: u32| d.max(eccentricity)));
        }
        diameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(id: u32) -> SwitchId {
        SwitchId(id)
    }

    #[test]
    fn connect_is_symmetric() {
        let mut topology = Topology::new();
        topology.connect(s(1), s(2)).unwrap();

        assert!(topology.are_neighbors(s(1), s(2)));
        assert!(topology.are_neighbors(s(2), s(1)));
        assert_eq!(topology.link_count(), 1);
    }

    #[test]
    fn self_loop_rejected() {
        let mut topology = Topology::new();
        assert!(matches!(
            topology.connect(s(3), s(3)),
            Err(TopologyError::SelfLoop(id)) if id == s(3)
        ));
    }

    #[test]
    fn json_one_sided_links_are_symmetrized() {
        let topology = Topology::from_json_str(r#"{"1": [2], "2": [3], "3": []}"#).unwrap();

        assert_eq!(topology.switch_count(), 3);
        assert_eq!(topology.link_count(), 2);
        assert!(topology.are_neighbors(s(3), s(2)));
        assert!(topology.are_neighbors(s(2), s(1)));
        assert!(!topology.are_neighbors(s(1), s(3)));
    }

    #[test]
    fn json_garbage_is_parse_error() {
        assert!(matches!(
            Topology::from_json_str("[1, 2, 3]"),
            Err(TopologyError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topo.json");
        fs::write(&path, r#"{"4": [5, 6], "5": [4], "6": [4]}"#).unwrap();

        let topology = Topology::load(&path).unwrap();
        assert_eq!(topology.min_switch(), Some(s(4)));
        assert_eq!(topology.link_count(), 2);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Topology::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, TopologyError::Io { .. }));
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(matches!(Topology::new().validate(), Err(TopologyError::Empty)));
    }

    #[test]
    fn validate_rejects_disconnected() {
        let topology = Topology::from_edges([(s(1), s(2)), (s(3), s(4))]).unwrap();
        match topology.validate() {
            Err(TopologyError::Disconnected { start, unreachable, total }) => {
                assert_eq!(start, s(1));
                assert_eq!(unreachable, 2);
                assert_eq!(total, 4);
            }
            other => panic!("expected Disconnected, got {:?}", other),
        }
    }

    #[test]
    fn single_switch_is_valid() {
        let mut topology = Topology::new();
        topology.add_switch(s(7));
        assert!(topology.validate().is_ok());
        assert_eq!(topology.diameter(), Some(0));
    }

    #[test]
    fn unknown_switch_queries_fail() {
        let topology = Topology::from_edges([(s(1), s(2))]).unwrap();
        assert!(matches!(
            topology.neighbors(s(9)),
            Err(TopologyError::UnknownSwitch(_))
        ));
        assert!(topology.distances_from(s(9)).is_err());
    }

    #[test]
    fn distances_follow_shortest_paths() {
        // 1 - 2 - 3 - 4 with shortcut 1 - 4
        let topology =
            Topology::from_edges([(s(1), s(2)), (s(2), s(3)), (s(3), s(4)), (s(1), s(4))]).unwrap();
        let distances = topology.distances_from(s(1)).unwrap();

        assert_eq!(distances[&s(2)], 1);
        assert_eq!(distances[&s(3)], 2);
        assert_eq!(distances[&s(4)], 1);
        assert_eq!(topology.diameter(), Some(2));
    }

    #[test]
    fn revisited_switches_keep_first_distance() {
        // Diamond: 4 is reached twice, and every neighbor links back to the start.
        let topology =
            Topology::from_edges([(s(1), s(2)), (s(1), s(3)), (s(2), s(4)), (s(3), s(4))]).unwrap();
        let distances = topology.distances_from(s(1)).unwrap();

        assert_eq!(distances.len(), 4);
        assert_eq!(distances[&s(1)], 0);
        assert_eq!(distances[&s(4)], 2);
    }

    #[test]
    fn diameter_of_disconnected_is_none() {
        let topology = Topology::from_edges([(s(1), s(2)), (s(3), s(4))]).unwrap();
        assert_eq!(topology.diameter(), None);
    }
}
