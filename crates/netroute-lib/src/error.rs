use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the netroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Which routing endpoint a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A connection references a node id that is not declared in the node list.
    #[error("connection {source_id} -> {target_id} references unknown node {missing}")]
    UnknownNodeReference {
        source_id: String,
        target_id: String,
        missing: String,
    },

    /// The same node id was declared more than once.
    #[error("node {id} is declared more than once")]
    DuplicateNode { id: String },

    /// A connection carries a weight Dijkstra cannot work with.
    #[error("connection {source_id} -> {target_id} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight {
        source_id: String,
        target_id: String,
        weight: f64,
    },

    /// No node in the topology is flagged as the given endpoint.
    #[error("topology has no node marked as {endpoint}")]
    MissingEndpoint { endpoint: Endpoint },

    /// More than one node is flagged as the given endpoint.
    #[error("topology marks multiple nodes as {endpoint}: {}", .ids.join(", "))]
    DuplicateEndpoint { endpoint: Endpoint, ids: Vec<String> },

    /// Routing was asked for a node the graph does not contain.
    #[error("unknown node id: {id}")]
    UnknownNode { id: String },

    /// A path cap of zero leaves no room for the route being planned.
    #[error("path limit must be at least 1")]
    InvalidPathLimit,

    /// Path enumeration exceeded the configured cap under the reject policy.
    #[error("more than {limit} equal-cost paths exist; refusing to enumerate them all")]
    TooManyPaths { limit: usize },

    /// Topology file could not be located.
    #[error("topology not found at {path}")]
    TopologyNotFound { path: PathBuf },

    /// Topology document is not valid JSON or does not have the expected shape.
    #[error("failed to parse topology: {0}")]
    TopologyParse(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for malformed-topology errors raised by the graph builder.
    pub fn is_graph_integrity(&self) -> bool {
        matches!(
            self,
            Error::UnknownNodeReference { .. } | Error::DuplicateNode { .. } | Error::InvalidWeight { .. }
        )
    }

    /// Returns `true` when the topology does not identify a usable start/end pair.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::MissingEndpoint { .. } | Error::DuplicateEndpoint { .. }
        )
    }
}
