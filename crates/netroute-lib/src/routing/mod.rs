//! Route planning over a topology snapshot.
//!
//! This module provides:
//! - [`RouteRequest`] - Waypoint constraints and endpoint overrides for one request
//! - [`RouteOptions`] - Path cap and overflow policy
//! - [`RoutePlan`] - Planned routes expressed as node ids
//! - [`plan_route`] - Main entry point: topology in, every optimal route out
//! - [`route`] - Lower-level router over pre-built graphs
//!
//! # Strategy Pattern
//!
//! Routing dispatches through the [`RoutePlanner`] trait. [`DirectPlanner`]
//! handles requests without waypoints; [`WaypointPlanner`] runs a forward
//! search from the source and a backward search from the destination and joins
//! them at the cheapest waypoints.
//!
//! # Example
//!
//! ```ignore
//! use netroute_lib::{load_topology, plan_route, RouteRequest};
//!
//! let topology = load_topology("network_topology.json".as_ref())?;
//! let request = RouteRequest::through(["firewall-01"]);
//! let plan = plan_route(&topology, &request)?;
//! println!("{} optimal routes", plan.paths.len());
//! ```

mod planner;

pub use planner::{
    route, select_planner, DirectPlanner, RouteOutcome, RoutePlanner, WaypointPlanner,
};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::build_graph;
use crate::topology::{NodeId, Topology};

/// Default cap on the number of paths returned for one request.
pub const DEFAULT_MAX_PATHS: usize = 10_000;

/// What to do when more optimal paths exist than the cap allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Return the first `max_paths` routes and flag the plan as truncated.
    #[default]
    Truncate,
    /// Fail with [`crate::Error::TooManyPaths`].
    Reject,
}

/// Tunables for path enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteOptions {
    /// Maximum number of paths to enumerate; `None` means unbounded.
    pub max_paths: Option<usize>,
    pub overflow: OverflowPolicy,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            max_paths: Some(DEFAULT_MAX_PATHS),
            overflow: OverflowPolicy::Truncate,
        }
    }
}

/// High-level routing request.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Device ids of the waypoints; a route must pass through at least one.
    pub waypoints: Vec<String>,
    /// Source node override. Defaults to the node flagged `start`.
    pub source: Option<NodeId>,
    /// Destination node override. Defaults to the node flagged `end`.
    pub destination: Option<NodeId>,
    pub options: RouteOptions,
}

impl RouteRequest {
    /// Unconstrained request between the flagged endpoints.
    pub fn direct() -> Self {
        Self::default()
    }

    /// Request constrained to pass through any of the given devices.
    pub fn through<I, S>(devices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            waypoints: devices.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_endpoints(mut self, source: impl Into<NodeId>, destination: impl Into<NodeId>) -> Self {
        self.source = Some(source.into());
        self.destination = Some(destination.into());
        self
    }

    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }
}

/// Planned routes returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub source: NodeId,
    pub destination: NodeId,
    /// Waypoint node ids the request resolved to.
    pub waypoints: Vec<NodeId>,
    /// Waypoints the optimal routes actually pass through.
    pub selected_waypoints: Vec<NodeId>,
    /// Minimal cost; `None` when no route exists.
    pub cost: Option<f64>,
    pub paths: Vec<Vec<NodeId>>,
    pub truncated: bool,
}

impl RoutePlan {
    pub fn is_reachable(&self) -> bool {
        self.cost.is_some()
    }

    /// Hop count of each returned path.
    pub fn hop_counts(&self) -> Vec<usize> {
        self.paths
            .iter()
            .map(|path| path.len().saturating_sub(1))
            .collect()
    }
}

/// Compute every minimum-cost route for a request.
///
/// Waypoint device ids are resolved against the topology; ids matching no
/// node are dropped with a warning. When none match, the request falls back
/// to unconstrained routing between the endpoints rather than reporting that
/// no constrained route exists.
///
/// Errors: malformed topologies fail with a graph-integrity error, missing or
/// ambiguous endpoints with a configuration error. An unreachable destination
/// is a successful plan with `cost == None` and no paths.
pub fn plan_route(topology: &Topology, request: &RouteRequest) -> Result<RoutePlan> {
    let resolution = topology.resolve_waypoints(&request.waypoints);
    if !resolution.unmatched.is_empty() {
        tracing::warn!(
            unmatched = ?resolution.unmatched,
            "waypoint devices not present in topology; ignoring them"
        );
    }
    if !request.waypoints.is_empty() && resolution.nodes.is_empty() {
        tracing::warn!("no waypoint resolved to a node; routing without constraints");
    }

    let (graph, reverse) = build_graph(topology)?;

    let source = match &request.source {
        Some(id) => id.clone(),
        None => topology.start_node()?,
    };
    let destination = match &request.destination {
        Some(id) => id.clone(),
        None => topology.end_node()?,
    };
    let source_index = graph.require(&source)?;
    let destination_index = graph.require(&destination)?;
    let waypoint_indices = resolution
        .nodes
        .iter()
        .map(|id| graph.require(id))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        source = %source,
        destination = %destination,
        waypoints = waypoint_indices.len(),
        "routing request"
    );

    let outcome = route(
        &graph,
        &reverse,
        source_index,
        destination_index,
        &waypoint_indices,
        &request.options,
    )?;

    let plan = RoutePlan {
        source,
        destination,
        waypoints: resolution.nodes,
        selected_waypoints: graph.ids_of(&outcome.selected_waypoints),
        cost: outcome.cost.is_finite().then_some(outcome.cost),
        paths: outcome.paths.iter().map(|path| graph.ids_of(path)).collect(),
        truncated: outcome.truncated,
    };

    tracing::info!(
        source = %plan.source,
        destination = %plan.destination,
        cost = ?plan.cost,
        paths = plan.paths.len(),
        truncated = plan.truncated,
        "route planned"
    );

    Ok(plan)
}
