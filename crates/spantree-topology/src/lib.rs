//! Spantree Bridge Topology
//!
//! The fixed graph of switches a convergence run operates on.
//!
//! The switches themselves never see this structure: each one only knows its
//! own neighbor list. The topology exists for the harness, which uses it to
//! construct switches, route messages, and judge the outcome.
//!
//! # Contents
//!
//! - [`Topology`]: undirected simple graph, loadable from a JSON adjacency file
//! - [`generate`]: path, ring, star, complete and grid graphs
//! - [`check_spanning_tree`]: verifies that reported active links form one tree
//!
//! # Example
//!
//! ```
//! use spantree_topology::{generate, Topology};
//! use spantree_core::SwitchId;
//!
//! let topology = Topology::from_json_str(r#"{"1": [2], "2": [1, 3], "3": [2]}"#).unwrap();
//! assert!(topology.validate().is_ok());
//! assert_eq!(topology, generate::path(3));
//! assert_eq!(topology.min_switch(), Some(SwitchId(1)));
//! ```

mod error;
mod graph;
mod tree;

pub mod generate;

pub use error::{Result, TopologyError};
pub use graph::Topology;
pub use tree::{check_spanning_tree, ActiveLinks, TreeViolation};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use spantree_core::SwitchId;

    /// Random spanning tree over `n` switches plus some extra links.
    fn arb_connected() -> impl Strategy<Value = Topology> {
        (2u32..20).prop_flat_map(|n| {
            let tree = (1..n).map(|i| (0..i).prop_map(move |p| (p, i))).collect::<Vec<_>>();
            let extra = prop::collection::vec((0..n, 0..n), 0..(n as usize));
            (tree, extra).prop_map(|(tree, extra)| {
                let edges = tree
                    .into_iter()
                    .chain(extra.into_iter().filter(|(a, b)| a != b))
                    .map(|(a, b)| (SwitchId(a + 1), SwitchId(b + 1)));
                Topology::from_edges(edges).unwrap()
            })
        })
    }

    proptest! {
        #[test]
        fn random_connected_graphs_validate(topology in arb_connected()) {
            prop_assert!(topology.validate().is_ok());
            let diameter = topology.diameter().unwrap();
            prop_assert!((diameter as usize) < topology.switch_count());
        }

        #[test]
        fn bfs_tree_is_a_spanning_tree(topology in arb_connected()) {
            // Parent = smallest neighbor one hop closer to switch 1
            let distances = topology.distances_from(SwitchId(1)).unwrap();
            let mut active = ActiveLinks::new();
            for switch in topology.switch_ids() {
                active.entry(switch).or_default();
                if let Some(&parent) = topology
                    .neighbors(switch)
                    .unwrap()
                    .iter()
                    .find(|n| distances[*n] + 1 == distances[&switch])
                {
                    active.entry(switch).or_default().insert(parent);
                    active.entry(parent).or_default().insert(switch);
                }
            }
            prop_assert_eq!(check_spanning_tree(&topology, &active), Ok(()));
        }
    }
}
