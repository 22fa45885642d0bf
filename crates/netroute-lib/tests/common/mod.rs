//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use netroute_lib::{load_topology, Connection, Node, NodeId, Topology};

/// Path to fixtures directory shared by the workspace tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// The checked-in lab topology (host-a -> srv-db through access, core and firewall tiers).
#[allow(dead_code)]
pub fn lab_topology() -> Topology {
    load_topology(&fixtures_dir().join("lab_topology.json")).expect("load lab topology fixture")
}

/// Build a unit-weight topology from node ids and links. Every node's device
/// id is `dev-<id>`; `start` and `end` flag the endpoints.
#[allow(dead_code)]
pub fn topology(nodes: &[&str], links: &[(&str, &str)], start: &str, end: &str) -> Topology {
    Topology {
        nodes: nodes
            .iter()
            .map(|id| {
                let mut node = Node::new(*id).with_device(format!("dev-{id}"));
                node.start = *id == start;
                node.end = *id == end;
                node
            })
            .collect(),
        connections: links.iter().map(|(a, b)| Connection::new(*a, *b)).collect(),
    }
}

/// Convert paths of node ids to sorted string sequences for set comparison.
#[allow(dead_code)]
pub fn sorted(paths: &[Vec<NodeId>]) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = paths
        .iter()
        .map(|path| path.iter().map(|id| id.to_string()).collect())
        .collect();
    out.sort();
    out
}
