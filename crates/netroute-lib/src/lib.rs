//! netroute library entry points.
//!
//! This crate loads a network topology snapshot, builds the forward and
//! reverse routing graphs, and computes every minimum-cost route between the
//! topology's endpoints, optionally forced through at least one waypoint.
//! Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod enumerate;
pub mod error;
pub mod graph;
pub mod path;
pub mod routing;
pub mod topology;

pub use enumerate::{enumerate_paths, PathSet};
pub use error::{Endpoint, Error, Result};
pub use graph::{build_forward_graph, build_graph, Edge, Graph, NodeIndex};
pub use path::{shortest_paths, ShortestPaths};
pub use routing::{
    plan_route, route, OverflowPolicy, RouteOptions, RouteOutcome, RoutePlan, RouteRequest,
    DEFAULT_MAX_PATHS,
};
pub use topology::{load_topology, Connection, Node, NodeId, Topology, WaypointResolution};
