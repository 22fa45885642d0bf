use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{Graph, NodeIndex};

/// Result of a single-source shortest-path run.
///
/// `distances[v]` is the minimal cost from the origin (`f64::INFINITY` when
/// unreachable). `predecessors[v]` holds every neighbour `u` through which a
/// shortest path reaches `v`, without repeats and in discovery order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    origin: NodeIndex,
    distances: Vec<f64>,
    predecessors: Vec<Vec<NodeIndex>>,
}

impl ShortestPaths {
    pub fn origin(&self) -> NodeIndex {
        self.origin
    }

    /// Minimal cost to `node`, `f64::INFINITY` when unreachable.
    pub fn distance(&self, node: NodeIndex) -> f64 {
        self.distances.get(node).copied().unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.distance(node).is_finite()
    }

    /// Tied predecessors of `node` on shortest paths from the origin.
    pub fn predecessors(&self, node: NodeIndex) -> &[NodeIndex] {
        self.predecessors
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }
}

/// Run Dijkstra's algorithm from `origin`, recording all tied predecessors.
///
/// Edge weights must be finite and non-negative. [`crate::build_graph`]
/// enforces this for topology-derived graphs; other callers are responsible
/// for it.
///
/// Neighbours are relaxed in adjacency order and heap ties are broken by node
/// index, so predecessor lists are identical across runs.
pub fn shortest_paths(graph: &Graph, origin: NodeIndex) -> ShortestPaths {
    let node_count = graph.node_count();
    let mut distances = vec![f64::INFINITY; node_count];
    let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); node_count];
    let mut queue = BinaryHeap::new();

    if origin < node_count {
        distances[origin] = 0.0;
        queue.push(QueueEntry::new(origin, 0.0));
    }

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        let current_distance = distances[current];
        if entry.cost.0 > current_distance {
            continue;
        }

        for edge in graph.neighbours(current) {
            debug_assert!(
                edge.weight >= 0.0,
                "negative edge weight {} out of node {}",
                edge.weight,
                current
            );
            let next = edge.target;
            if next == origin {
                continue;
            }

            let next_cost = current_distance + edge.weight;
            if next_cost < distances[next] {
                distances[next] = next_cost;
                predecessors[next].clear();
                predecessors[next].push(current);
                queue.push(QueueEntry::new(next, next_cost));
            } else if next_cost == distances[next] && !predecessors[next].contains(&current) {
                predecessors[next].push(current);
            }
        }
    }

    tracing::trace!(
        origin,
        reached = distances.iter().filter(|d| d.is_finite()).count(),
        "shortest path search complete"
    );

    ShortestPaths {
        origin,
        distances,
        predecessors,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
