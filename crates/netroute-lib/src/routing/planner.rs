//! Route planning strategies.
//!
//! The `RoutePlanner` trait has one implementation per routing case:
//! [`DirectPlanner`] runs a single search when no waypoints are requested, and
//! [`WaypointPlanner`] combines a forward and a backward search to find the
//! cheapest routes through at least one waypoint. [`select_planner`] picks the
//! strategy from the effective waypoint list.

use std::collections::HashSet;

use crate::enumerate::{enumerate_paths, PathSet};
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeIndex};
use crate::path::shortest_paths;

use super::{OverflowPolicy, RouteOptions};

/// Routes computed over a graph, still expressed as node indices.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    /// Minimal cost, `f64::INFINITY` when no route exists.
    pub cost: f64,
    /// Every route achieving `cost`, without duplicates.
    pub paths: Vec<Vec<NodeIndex>>,
    /// Waypoints through which the optimal routes pass (empty for direct routes).
    pub selected_waypoints: Vec<NodeIndex>,
    /// Set when the path cap cut enumeration short.
    pub truncated: bool,
}

impl RouteOutcome {
    /// Outcome for an unreachable destination.
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            paths: Vec::new(),
            selected_waypoints: Vec::new(),
            truncated: false,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}

/// Strategy interface for the two routing cases.
pub trait RoutePlanner: Send + Sync {
    /// Short label used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Compute the optimal routes from `source` to `destination`.
    fn plan(
        &self,
        graph: &Graph,
        reverse: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
        options: &RouteOptions,
    ) -> RouteOutcome;
}

/// Unconstrained shortest paths from source to destination.
#[derive(Debug, Clone, Default)]
pub struct DirectPlanner;

impl RoutePlanner for DirectPlanner {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn plan(
        &self,
        graph: &Graph,
        _reverse: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
        options: &RouteOptions,
    ) -> RouteOutcome {
        let forward = shortest_paths(graph, source);
        let cost = forward.distance(destination);
        if cost.is_infinite() {
            return RouteOutcome::unreachable();
        }

        let PathSet { paths, truncated } =
            enumerate_paths(&forward, source, destination, options.max_paths);

        RouteOutcome {
            cost,
            paths,
            selected_waypoints: Vec::new(),
            truncated,
        }
    }
}

/// Shortest paths forced through at least one of a set of waypoints.
///
/// Routes are the concatenation of a shortest source-to-waypoint path and a
/// shortest waypoint-to-destination path. The two halves are not checked
/// against each other, so a route may revisit a node when the cheapest way
/// into and out of the waypoint shares it (`s-x-c-x-t` for waypoint `c`
/// hanging off `x`).
#[derive(Debug, Clone)]
pub struct WaypointPlanner {
    waypoints: Vec<NodeIndex>,
}

impl WaypointPlanner {
    pub fn new(waypoints: Vec<NodeIndex>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[NodeIndex] {
        &self.waypoints
    }
}

impl RoutePlanner for WaypointPlanner {
    fn name(&self) -> &'static str {
        "waypoint"
    }

    fn plan(
        &self,
        graph: &Graph,
        reverse: &Graph,
        source: NodeIndex,
        destination: NodeIndex,
        options: &RouteOptions,
    ) -> RouteOutcome {
        let forward = shortest_paths(graph, source);
        let backward = shortest_paths(reverse, destination);

        let mut best_cost = f64::INFINITY;
        let mut best: Vec<NodeIndex> = Vec::new();
        for &waypoint in &self.waypoints {
            let to_waypoint = forward.distance(waypoint);
            let from_waypoint = backward.distance(waypoint);
            if !to_waypoint.is_finite() || !from_waypoint.is_finite() {
                tracing::debug!(waypoint = %graph.node_id(waypoint), "waypoint unreachable");
                continue;
            }

            let total = to_waypoint + from_waypoint;
            tracing::debug!(waypoint = %graph.node_id(waypoint), cost = total, "waypoint candidate");
            if total < best_cost {
                best_cost = total;
                best.clear();
                best.push(waypoint);
            } else if total == best_cost && !best.contains(&waypoint) {
                best.push(waypoint);
            }
        }

        if best_cost.is_infinite() {
            return RouteOutcome::unreachable();
        }

        let mut truncated = false;
        let mut seen: HashSet<Vec<NodeIndex>> = HashSet::new();
        let mut paths: Vec<Vec<NodeIndex>> = Vec::new();

        'waypoints: for &waypoint in &best {
            let heads = enumerate_paths(&forward, source, waypoint, options.max_paths);
            let tails = enumerate_paths(&backward, destination, waypoint, options.max_paths);
            truncated |= heads.truncated || tails.truncated;

            for head in &heads.paths {
                for tail in &tails.paths {
                    // `tail` runs destination -> waypoint; skip its waypoint end.
                    let mut combined = head.clone();
                    combined.extend(tail.iter().rev().skip(1));

                    if seen.contains(&combined) {
                        continue;
                    }
                    if options.max_paths.is_some_and(|cap| paths.len() >= cap) {
                        truncated = true;
                        break 'waypoints;
                    }
                    seen.insert(combined.clone());
                    paths.push(combined);
                }
            }
        }

        RouteOutcome {
            cost: best_cost,
            paths,
            selected_waypoints: best,
            truncated,
        }
    }
}

/// Choose the planning strategy for the effective waypoint list.
///
/// An empty list selects [`DirectPlanner`]. This includes the case where the
/// caller asked for waypoints that matched no node.
pub fn select_planner(waypoints: &[NodeIndex]) -> Box<dyn RoutePlanner> {
    if waypoints.is_empty() {
        Box::new(DirectPlanner)
    } else {
        Box::new(WaypointPlanner::new(waypoints.to_vec()))
    }
}

/// Compute all minimum-cost routes from `source` to `destination`, passing
/// through at least one of `waypoints` when any are given.
///
/// `graph` and `reverse` must come from the same [`crate::build_graph`] call.
/// An unreachable destination is not an error; it yields a cost of
/// `f64::INFINITY` and no paths. A `max_paths` of zero fails with
/// [`Error::InvalidPathLimit`].
pub fn route(
    graph: &Graph,
    reverse: &Graph,
    source: NodeIndex,
    destination: NodeIndex,
    waypoints: &[NodeIndex],
    options: &RouteOptions,
) -> Result<RouteOutcome> {
    for node in [source, destination].iter().chain(waypoints) {
        if *node >= graph.node_count() {
            return Err(Error::UnknownNode {
                id: format!("#{}", node),
            });
        }
    }

    if options.max_paths == Some(0) {
        return Err(Error::InvalidPathLimit);
    }

    let planner = select_planner(waypoints);
    let outcome = planner.plan(graph, reverse, source, destination, options);

    if outcome.truncated {
        tracing::warn!(
            planner = planner.name(),
            returned = outcome.paths.len(),
            limit = ?options.max_paths,
            "path enumeration hit the configured cap"
        );
        if options.overflow == OverflowPolicy::Reject {
            return Err(Error::TooManyPaths {
                limit: options.max_paths.unwrap_or_default(),
            });
        }
    }

    Ok(outcome)
}
