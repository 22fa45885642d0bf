mod common;

use netroute_lib::{
    plan_route, Connection, Error, Node, NodeId, OverflowPolicy, RouteOptions, RouteRequest,
    Topology,
};

use common::{lab_topology, sorted, topology};

fn ids(path: &[&str]) -> Vec<String> {
    path.iter().map(|s| s.to_string()).collect()
}

#[test]
fn lab_direct_route_returns_both_access_switches() {
    let plan = plan_route(&lab_topology(), &RouteRequest::direct()).expect("route exists");

    assert_eq!(plan.source, NodeId::from("host-a"));
    assert_eq!(plan.destination, NodeId::from("srv-db"));
    assert_eq!(plan.cost, Some(3.0));
    assert!(plan.selected_waypoints.is_empty());
    assert_eq!(
        sorted(&plan.paths),
        vec![
            ids(&["host-a", "sw-acc-1", "core-1", "srv-db"]),
            ids(&["host-a", "sw-acc-2", "core-1", "srv-db"]),
        ]
    );
    assert_eq!(plan.hop_counts(), vec![3, 3]);
    assert!(!plan.truncated);
}

#[test]
fn lab_firewall_waypoint_forces_the_long_way_round() {
    let plan =
        plan_route(&lab_topology(), &RouteRequest::through(["fw-edge-01"])).expect("route exists");

    assert_eq!(plan.cost, Some(4.0));
    assert_eq!(plan.waypoints, vec![NodeId::from("fw-1")]);
    assert_eq!(
        sorted(&plan.paths),
        vec![ids(&["host-a", "sw-acc-2", "fw-1", "fw-2", "srv-db"])]
    );
}

#[test]
fn lab_waypoint_on_the_optimal_route_keeps_every_tie() {
    let plan =
        plan_route(&lab_topology(), &RouteRequest::through(["core-01"])).expect("route exists");

    assert_eq!(plan.cost, Some(3.0));
    assert_eq!(plan.paths.len(), 2);
    assert!(plan
        .paths
        .iter()
        .all(|path| path.contains(&NodeId::from("core-1"))));
}

#[test]
fn lab_cheapest_waypoint_wins() {
    let request = RouteRequest::through(["fw-edge-01", "core-01"]);
    let plan = plan_route(&lab_topology(), &request).expect("route exists");

    assert_eq!(plan.cost, Some(3.0));
    assert_eq!(plan.selected_waypoints, vec![NodeId::from("core-1")]);
    assert!(plan
        .paths
        .iter()
        .all(|path| !path.contains(&NodeId::from("fw-1"))));
}

#[test]
fn lab_isolated_waypoint_is_unreachable_not_an_error() {
    let plan =
        plan_route(&lab_topology(), &RouteRequest::through(["oob-01"])).expect("plan computed");

    assert!(!plan.is_reachable());
    assert_eq!(plan.cost, None);
    assert!(plan.paths.is_empty());
}

#[test]
fn lab_unknown_waypoint_falls_back_to_direct_routing() {
    let plan =
        plan_route(&lab_topology(), &RouteRequest::through(["ghost"])).expect("route exists");

    let direct = plan_route(&lab_topology(), &RouteRequest::direct()).expect("route exists");

    assert!(plan.waypoints.is_empty());
    assert_eq!(plan.cost, Some(3.0));
    assert_eq!(plan.cost, direct.cost);
    assert_eq!(plan.paths, direct.paths);
    assert_eq!(plan.truncated, direct.truncated);
}

#[test]
fn unconnected_destination_is_unreachable_not_an_error() {
    let topo = topology(&["a", "b", "z"], &[("a", "b")], "a", "z");
    let plan = plan_route(&topo, &RouteRequest::direct()).expect("plan computed");

    assert!(plan.waypoints.is_empty());
    assert_eq!(plan.cost, None);
    assert!(plan.paths.is_empty());
    assert!(!plan.truncated);
}

#[test]
fn endpoint_overrides_replace_the_flags() {
    let request = RouteRequest::direct().with_endpoints("sw-acc-1", "fw-2");
    let plan = plan_route(&lab_topology(), &request).expect("route exists");

    assert_eq!(plan.source, NodeId::from("sw-acc-1"));
    assert_eq!(plan.cost, Some(3.0));
    assert_eq!(
        sorted(&plan.paths),
        vec![ids(&["sw-acc-1", "core-1", "srv-db", "fw-2"])]
    );
}

#[test]
fn unique_shortest_path_on_a_line() {
    let topo = topology(&["a", "b", "c"], &[("a", "b"), ("b", "c")], "a", "c");
    let plan = plan_route(&topo, &RouteRequest::direct()).expect("route exists");

    assert_eq!(plan.cost, Some(2.0));
    assert_eq!(sorted(&plan.paths), vec![ids(&["a", "b", "c"])]);
}

#[test]
fn waypoint_ties_are_combined_without_duplicates() {
    // Both b and c sit on a shortest a-d route; each route is reported once.
    let topo = topology(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        "a",
        "d",
    );
    let plan = plan_route(&topo, &RouteRequest::through(["dev-b", "dev-c"])).expect("route");

    assert_eq!(plan.cost, Some(2.0));
    assert_eq!(plan.selected_waypoints.len(), 2);
    assert_eq!(
        sorted(&plan.paths),
        vec![ids(&["a", "b", "d"]), ids(&["a", "c", "d"])]
    );
}

#[test]
fn waypoint_shared_by_several_routes_is_deduplicated() {
    // The only shortest route passes both waypoints; it is reported once.
    let topo = topology(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("c", "e"), ("d", "e")],
        "a",
        "e",
    );
    let plan = plan_route(&topo, &RouteRequest::through(["dev-b", "dev-c"])).expect("route");

    assert_eq!(plan.cost, Some(3.0));
    assert_eq!(sorted(&plan.paths), vec![ids(&["a", "b", "c", "e"])]);
}

#[test]
fn source_equal_to_destination_is_a_zero_cost_single_node_route() {
    let topo = Topology {
        nodes: vec![Node::new("solo").as_start().as_end()],
        connections: vec![],
    };
    let plan = plan_route(&topo, &RouteRequest::direct()).expect("route exists");

    assert_eq!(plan.cost, Some(0.0));
    assert_eq!(sorted(&plan.paths), vec![ids(&["solo"])]);
}

#[test]
fn routes_are_symmetric_on_reversed_endpoints() {
    let topo = lab_topology();
    let forward = plan_route(&topo, &RouteRequest::direct()).expect("forward");
    let backward = plan_route(
        &topo,
        &RouteRequest::direct().with_endpoints("srv-db", "host-a"),
    )
    .expect("backward");

    assert_eq!(forward.cost, backward.cost);
    let mut reversed: Vec<Vec<NodeId>> = backward
        .paths
        .iter()
        .map(|path| path.iter().rev().cloned().collect())
        .collect();
    reversed.sort();
    let mut expected = forward.paths.clone();
    expected.sort();
    assert_eq!(reversed, expected);
}

#[test]
fn planning_is_idempotent() {
    let topo = lab_topology();
    let request = RouteRequest::through(["core-01", "fw-edge-01"]);
    let first = plan_route(&topo, &request).expect("first");
    let second = plan_route(&topo, &request).expect("second");
    assert_eq!(first, second);
}

#[test]
fn weighted_connections_change_the_optimum() {
    let topo = Topology {
        nodes: vec![
            Node::new("a").as_start(),
            Node::new("b"),
            Node::new("c").as_end(),
        ],
        connections: vec![
            Connection::weighted("a", "c", 5.0),
            Connection::weighted("a", "b", 1.5),
            Connection::weighted("b", "c", 1.5),
        ],
    };
    let plan = plan_route(&topo, &RouteRequest::direct()).expect("route exists");

    assert_eq!(plan.cost, Some(3.0));
    assert_eq!(sorted(&plan.paths), vec![ids(&["a", "b", "c"])]);
}

#[test]
fn path_cap_truncates_or_rejects() {
    let topo = lab_topology();
    let truncating = RouteRequest::direct().with_options(RouteOptions {
        max_paths: Some(1),
        overflow: OverflowPolicy::Truncate,
    });
    let plan = plan_route(&topo, &truncating).expect("truncated plan");
    assert_eq!(plan.paths.len(), 1);
    assert!(plan.truncated);

    let rejecting = RouteRequest::direct().with_options(RouteOptions {
        max_paths: Some(1),
        overflow: OverflowPolicy::Reject,
    });
    let err = plan_route(&topo, &rejecting).unwrap_err();
    assert!(matches!(err, Error::TooManyPaths { limit: 1 }));
}

#[test]
fn zero_path_cap_is_rejected_instead_of_returning_no_paths() {
    let request = RouteRequest::direct().with_options(RouteOptions {
        max_paths: Some(0),
        overflow: OverflowPolicy::Truncate,
    });
    let err = plan_route(&lab_topology(), &request).unwrap_err();
    assert!(matches!(err, Error::InvalidPathLimit));
}

#[test]
fn missing_end_flag_is_a_configuration_error() {
    let topo = Topology {
        nodes: vec![Node::new("a").as_start(), Node::new("b")],
        connections: vec![Connection::new("a", "b")],
    };
    let err = plan_route(&topo, &RouteRequest::direct()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn dangling_connection_is_an_integrity_error() {
    let topo = Topology {
        nodes: vec![Node::new("a").as_start(), Node::new("b").as_end()],
        connections: vec![Connection::new("a", "ghost")],
    };
    let err = plan_route(&topo, &RouteRequest::direct()).unwrap_err();
    assert!(err.is_graph_integrity());
}

#[test]
fn unknown_endpoint_override_is_rejected() {
    let request = RouteRequest::direct().with_endpoints("host-a", "nowhere");
    let err = plan_route(&lab_topology(), &request).unwrap_err();
    assert!(matches!(err, Error::UnknownNode { ref id } if id == "nowhere"));
}
