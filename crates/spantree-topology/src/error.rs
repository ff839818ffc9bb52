//! Error types for spantree-topology.

use std::path::PathBuf;

use spantree_core::SwitchId;
use thiserror::Error;

/// Result type for spantree-topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while loading or validating a bridge graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The topology file could not be read.
    #[error("failed to read topology file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The topology file is not a valid adjacency map.
    #[error("invalid topology file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The graph has no switches.
    #[error("topology has no switches")]
    Empty,

    /// A switch lists itself as a neighbor.
    #[error("switch {0} is linked to itself")]
    SelfLoop(SwitchId),

    /// Some switches cannot reach the others.
    #[error("topology is disconnected: {unreachable} of {total} switches unreachable from {start}")]
    Disconnected {
        start: SwitchId,
        unreachable: usize,
        total: usize,
    },

    /// A query named a switch the graph does not contain.
    #[error("unknown switch {0}")]
    UnknownSwitch(SwitchId),
}
