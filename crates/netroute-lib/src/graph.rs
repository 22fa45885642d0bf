use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::topology::{NodeId, Topology};

/// Dense index of a node inside a [`Graph`], assigned in node-list order.
pub type NodeIndex = usize;

/// Directed, weighted edge within the routing graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub weight: f64,
}

/// Node table shared between a graph and its reverse.
#[derive(Debug, Default)]
struct NodeTable {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, NodeIndex>,
}

/// Adjacency-list graph used by the shortest-path engine.
///
/// Neighbour lists keep insertion order so that tie handling is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<NodeTable>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Number of nodes, including isolated ones.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Return the outgoing edges of a node.
    pub fn neighbours(&self, node: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up the dense index of a node id.
    pub fn index_of(&self, id: &NodeId) -> Option<NodeIndex> {
        self.nodes.index.get(id).copied()
    }

    /// Resolve a node id, failing with [`Error::UnknownNode`] when absent.
    pub fn require(&self, id: &NodeId) -> Result<NodeIndex> {
        self.index_of(id).ok_or_else(|| Error::UnknownNode { id: id.to_string() })
    }

    /// Node id stored at the given index.
    pub fn node_id(&self, node: NodeIndex) -> &NodeId {
        &self.nodes.ids[node]
    }

    /// Translate a sequence of indices back to node ids.
    pub fn ids_of(&self, path: &[NodeIndex]) -> Vec<NodeId> {
        path.iter().map(|&node| self.node_id(node).clone()).collect()
    }

    /// Node ids without any outgoing edge.
    pub fn isolated_nodes(&self) -> Vec<&NodeId> {
        self.adjacency
            .iter()
            .enumerate()
            .filter(|(_, edges)| edges.is_empty())
            .map(|(node, _)| self.node_id(node))
            .collect()
    }

    /// Build the graph with every edge direction flipped.
    ///
    /// The result shares this graph's node table, so indices are
    /// interchangeable between the two.
    pub fn reversed(&self) -> Graph {
        let mut adjacency = vec![Vec::new(); self.adjacency.len()];
        for (source, edges) in self.adjacency.iter().enumerate() {
            for edge in edges {
                adjacency[edge.target].push(Edge {
                    target: source,
                    weight: edge.weight,
                });
            }
        }

        Graph {
            nodes: Arc::clone(&self.nodes),
            adjacency,
        }
    }
}

/// Build the forward routing graph and its reverse from a topology.
///
/// Each connection becomes a pair of directed edges with the same weight.
/// Every declared node gets an adjacency entry, even when isolated.
pub fn build_graph(topology: &Topology) -> Result<(Graph, Graph)> {
    let graph = build_forward_graph(topology)?;
    let reverse = graph.reversed();
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built routing graph"
    );
    Ok((graph, reverse))
}

/// Build only the forward graph.
pub fn build_forward_graph(topology: &Topology) -> Result<Graph> {
    let mut table = NodeTable::default();
    for node in &topology.nodes {
        if table.index.contains_key(&node.id) {
            return Err(Error::DuplicateNode {
                id: node.id.to_string(),
            });
        }
        table.index.insert(node.id.clone(), table.ids.len());
        table.ids.push(node.id.clone());
    }

    let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); table.ids.len()];
    for connection in &topology.connections {
        let lookup = |id: &NodeId| {
            table
                .index
                .get(id)
                .copied()
                .ok_or_else(|| Error::UnknownNodeReference {
                    source_id: connection.source.to_string(),
                    target_id: connection.target.to_string(),
                    missing: id.to_string(),
                })
        };
        let source = lookup(&connection.source)?;
        let target = lookup(&connection.target)?;

        let weight = connection.weight();
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                source_id: connection.source.to_string(),
                target_id: connection.target.to_string(),
                weight,
            });
        }

        adjacency[source].push(Edge { target, weight });
        adjacency[target].push(Edge {
            target: source,
            weight,
        });
    }

    Ok(Graph {
        nodes: Arc::new(table),
        adjacency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{Connection, Node};

    fn triangle_with_island() -> Topology {
        Topology {
            nodes: vec![
                Node::new("a"),
                Node::new("b"),
                Node::new("c"),
                Node::new("island"),
            ],
            connections: vec![
                Connection::new("a", "b"),
                Connection::weighted("b", "c", 2.5),
                Connection::new("c", "a"),
            ],
        }
    }

    #[test]
    fn connections_are_inserted_symmetrically_in_order() {
        let (graph, _) = build_graph(&triangle_with_island()).expect("builds");
        let a = graph.index_of(&NodeId::from("a")).unwrap();
        let b = graph.index_of(&NodeId::from("b")).unwrap();
        let c = graph.index_of(&NodeId::from("c")).unwrap();

        assert_eq!(
            graph.neighbours(a),
            &[Edge { target: b, weight: 1.0 }, Edge { target: c, weight: 1.0 }]
        );
        assert_eq!(
            graph.neighbours(b),
            &[Edge { target: a, weight: 1.0 }, Edge { target: c, weight: 2.5 }]
        );
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn isolated_nodes_keep_an_entry() {
        let (graph, reverse) = build_graph(&triangle_with_island()).expect("builds");
        assert_eq!(graph.node_count(), 4);
        assert_eq!(reverse.node_count(), 4);
        assert_eq!(graph.isolated_nodes(), vec![&NodeId::from("island")]);
    }

    #[test]
    fn reverse_graph_flips_every_edge() {
        let (graph, reverse) = build_graph(&triangle_with_island()).expect("builds");
        assert_eq!(reverse.edge_count(), graph.edge_count());
        for source in 0..graph.node_count() {
            for edge in graph.neighbours(source) {
                assert!(reverse
                    .neighbours(edge.target)
                    .iter()
                    .any(|back| back.target == source && back.weight == edge.weight));
            }
        }
    }

    #[test]
    fn unknown_node_reference_is_rejected() {
        let mut topology = triangle_with_island();
        topology.connections.push(Connection::new("a", "ghost"));

        match build_graph(&topology) {
            Err(Error::UnknownNodeReference { missing, .. }) => assert_eq!(missing, "ghost"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut topology = triangle_with_island();
        topology.nodes.push(Node::new("b"));
        assert!(matches!(
            build_graph(&topology),
            Err(Error::DuplicateNode { .. })
        ));
    }

    #[test]
    fn negative_and_nan_weights_are_rejected() {
        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            let mut topology = triangle_with_island();
            topology
                .connections
                .push(Connection::weighted("a", "island", weight));
            let err = build_graph(&topology).unwrap_err();
            assert!(err.is_graph_integrity(), "weight {weight} should be rejected");
        }
    }

    #[test]
    fn require_reports_unknown_ids() {
        let (graph, _) = build_graph(&triangle_with_island()).expect("builds");
        assert!(matches!(
            graph.require(&NodeId::from("nope")),
            Err(Error::UnknownNode { .. })
        ));
    }
}
