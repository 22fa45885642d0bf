mod common;

use std::fs;

use netroute_lib::{
    build_graph, load_topology, shortest_paths, Connection, Error, Node, NodeId, Topology,
};
use tempfile::tempdir;

use common::{fixtures_dir, lab_topology};

#[test]
fn lab_fixture_builds_symmetric_graphs() {
    let topology = lab_topology();
    let (graph, reverse) = build_graph(&topology).expect("graph builds");

    assert_eq!(graph.node_count(), 8);
    assert_eq!(graph.edge_count(), 16);
    assert_eq!(reverse.edge_count(), graph.edge_count());

    let mgmt = graph.index_of(&NodeId::from("mgmt")).expect("mgmt declared");
    assert!(graph.neighbours(mgmt).is_empty());
    assert_eq!(graph.isolated_nodes(), vec![&NodeId::from("mgmt")]);

    for node in 0..graph.node_count() {
        let mut out: Vec<_> = graph.neighbours(node).iter().map(|e| e.target).collect();
        let mut back: Vec<_> = reverse.neighbours(node).iter().map(|e| e.target).collect();
        out.sort_unstable();
        back.sort_unstable();
        assert_eq!(out, back, "undirected links must look the same both ways");
    }
}

#[test]
fn forward_and_backward_searches_agree_on_distances() {
    let (graph, reverse) = build_graph(&lab_topology()).expect("graph builds");
    let host = graph.index_of(&NodeId::from("host-a")).unwrap();
    let db = graph.index_of(&NodeId::from("srv-db")).unwrap();

    let forward = shortest_paths(&graph, host);
    let backward = shortest_paths(&reverse, db);
    assert_eq!(forward.distance(db), backward.distance(host));
    assert_eq!(forward.distance(db), 3.0);
}

#[test]
fn load_topology_reads_wrapped_and_bare_documents() {
    let dir = tempdir().expect("temp dir");
    let bare = dir.path().join("bare.json");
    fs::write(
        &bare,
        r#"{"nodes": [{"id": 10, "start": true}, {"id": 20, "end": true}],
            "connections": [{"source": 10, "target": 20, "weight": 2.5}]}"#,
    )
    .expect("write fixture");

    let topology = load_topology(&bare).expect("bare document loads");
    assert_eq!(topology.nodes[0].id, NodeId::from("10"));
    assert_eq!(topology.connections[0].weight(), 2.5);

    let wrapped = load_topology(&fixtures_dir().join("lab_topology.json")).expect("fixture loads");
    assert_eq!(wrapped.nodes.len(), 8);
    assert_eq!(wrapped.connections.len(), 8);
}

#[test]
fn load_topology_surfaces_parse_errors() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write fixture");

    let err = load_topology(&path).unwrap_err();
    assert!(matches!(err, Error::TopologyParse(_)));
}

#[test]
fn integrity_errors_name_the_offending_element() {
    let duplicate = Topology {
        nodes: vec![Node::new("a"), Node::new("a")],
        connections: vec![],
    };
    let err = build_graph(&duplicate).unwrap_err();
    assert!(err.is_graph_integrity());
    assert!(err.to_string().contains("node a"));

    let negative = Topology {
        nodes: vec![Node::new("a"), Node::new("b")],
        connections: vec![Connection::weighted("a", "b", -1.0)],
    };
    let err = build_graph(&negative).unwrap_err();
    assert!(matches!(err, Error::InvalidWeight { weight, .. } if weight == -1.0));
}
