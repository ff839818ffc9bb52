//! Error types for spantree-sim.

use std::path::PathBuf;

use spantree_topology::TopologyError;
use thiserror::Error;

/// Result type for spantree-sim operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors that can occur while setting up or reporting a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The topology could not be loaded or is not usable.
    #[error("topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding an event or snapshot failed.
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}
