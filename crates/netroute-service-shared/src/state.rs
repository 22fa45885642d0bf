//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! access the topology snapshot loaded at startup.

use std::path::Path;
use std::sync::Arc;

use netroute_lib::{build_forward_graph, load_topology, Error as LibError, Topology};

/// Default cap on paths returned by one HTTP request.
pub const DEFAULT_SERVICE_MAX_PATHS: usize = 1_000;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to read or parse the topology document.
    TopologyLoad(LibError),

    /// The topology parsed but does not form a valid graph.
    InvalidTopology(LibError),

    /// Topology file not found.
    TopologyNotFound(String),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopologyLoad(e) => write!(f, "failed to load topology: {}", e),
            Self::InvalidTopology(e) => write!(f, "topology is not a valid graph: {}", e),
            Self::TopologyNotFound(path) => write!(f, "topology not found: {}", path),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TopologyLoad(e) | Self::InvalidTopology(e) => Some(e),
            Self::TopologyNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::TopologyLoad(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The topology is immutable after
/// startup, so concurrent requests never observe a partial snapshot.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use netroute_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let topology = state.topology();
///     // ... plan routes over topology
/// }
///
/// let state = AppState::load("/data/network_topology.json").unwrap();
/// let app = Router::new()
///     .route("/api/v1/route", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    topology: Topology,
    max_paths: usize,
}

impl AppState {
    /// Load application state from a topology document.
    ///
    /// The graph is built once here so malformed topologies fail at startup
    /// rather than on the first request.
    pub fn load(topology_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let topology_path = topology_path.as_ref();

        if !topology_path.exists() {
            return Err(AppStateError::TopologyNotFound(
                topology_path.display().to_string(),
            ));
        }

        tracing::info!(path = %topology_path.display(), "loading topology");
        let topology = load_topology(topology_path)?;
        let graph = build_forward_graph(&topology).map_err(AppStateError::InvalidTopology)?;
        tracing::info!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "topology loaded successfully"
        );

        Ok(Self::from_topology(topology))
    }

    /// Create application state from an already-loaded topology.
    ///
    /// This is useful for testing or when the topology is embedded.
    pub fn from_topology(topology: Topology) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                topology,
                max_paths: DEFAULT_SERVICE_MAX_PATHS,
            }),
        }
    }

    /// Replace the per-request path cap.
    pub fn with_max_paths(self, max_paths: usize) -> Self {
        let topology = match Arc::try_unwrap(self.inner) {
            Ok(inner) => inner.topology,
            Err(shared) => shared.topology.clone(),
        };
        Self {
            inner: Arc::new(AppStateInner {
                topology,
                max_paths,
            }),
        }
    }

    /// Access the loaded topology.
    pub fn topology(&self) -> &Topology {
        &self.inner.topology
    }

    /// Upper bound on `max_paths` accepted from clients.
    pub fn max_paths(&self) -> usize {
        self.inner.max_paths
    }

    /// Number of nodes in the loaded topology.
    pub fn node_count(&self) -> usize {
        self.inner.topology.nodes.len()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.topology.nodes.len())
            .field("connection_count", &self.inner.topology.connections.len())
            .field("max_paths", &self.inner.max_paths)
            .finish()
    }
}
