//! Output formatting for route plans and topology reports.
//!
//! Formatters return `String`s so they can be unit tested; the command
//! handlers own printing.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use netroute_lib::{build_forward_graph, NodeId, RoutePlan, Topology};

use crate::terminal::{format_cost, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON suitable for scripting.
    Json,
}

/// Summary of a topology file as printed by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyReport {
    pub nodes: usize,
    pub connections: usize,
    /// Nodes carrying a device id, i.e. usable as waypoints.
    pub devices: usize,
    pub start: Option<NodeId>,
    pub end: Option<NodeId>,
    /// Nodes with no connection at all.
    pub isolated: Vec<NodeId>,
    /// Endpoint flag problems that would make routing fail.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl TopologyReport {
    /// Inspect a topology. Graph integrity errors are returned; endpoint
    /// problems are collected into [`TopologyReport::issues`] instead.
    pub fn from_topology(topology: &Topology) -> netroute_lib::Result<Self> {
        let graph = build_forward_graph(topology)?;
        let mut issues = Vec::new();

        let start = topology
            .start_node()
            .map_err(|err| issues.push(err.to_string()))
            .ok();
        let end = topology
            .end_node()
            .map_err(|err| issues.push(err.to_string()))
            .ok();

        Ok(Self {
            nodes: topology.nodes.len(),
            connections: topology.connections.len(),
            devices: topology
                .nodes
                .iter()
                .filter(|node| node.device_id.is_some())
                .count(),
            start,
            end,
            isolated: graph.isolated_nodes().into_iter().cloned().collect(),
            issues,
        })
    }

    /// `true` when the topology can be routed without endpoint overrides.
    pub fn is_routable(&self) -> bool {
        self.issues.is_empty()
    }
}

fn join_path(path: &[NodeId], palette: &ColorPalette) -> String {
    let arrow = format!(" {}->{} ", palette.gray, palette.reset);
    path.iter()
        .map(|id| format!("{}{}{}", palette.white_bold, id, palette.reset))
        .collect::<Vec<_>>()
        .join(&arrow)
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a route plan as text.
pub fn format_route_text(plan: &RoutePlan, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();

    let Some(cost) = plan.cost else {
        let _ = write!(
            out,
            "{}No route{} from {} to {}",
            p.red, p.reset, plan.source, plan.destination
        );
        if !plan.waypoints.is_empty() {
            let _ = write!(out, " through any of {}", join_ids(&plan.waypoints));
        }
        out.push_str(".\n");
        return out;
    };

    let count = plan.paths.len();
    let noun = if count == 1 { "path" } else { "paths" };
    let _ = writeln!(
        out,
        "{}SRC{} {}  {}DST{} {}  cost {}{}{} ({} optimal {})",
        p.tag_source,
        p.reset,
        plan.source,
        p.tag_destination,
        p.reset,
        plan.destination,
        p.cyan,
        format_cost(cost),
        p.reset,
        count,
        noun
    );

    if !plan.selected_waypoints.is_empty() {
        let _ = writeln!(
            out,
            "{}VIA{} {}",
            p.tag_waypoint,
            p.reset,
            join_ids(&plan.selected_waypoints)
        );
    }

    for (index, path) in plan.paths.iter().enumerate() {
        let _ = writeln!(out, "  {:>3}. {}", index + 1, join_path(path, p));
    }

    if plan.truncated {
        let _ = writeln!(
            out,
            "{}Warning:{} more optimal paths exist; output stopped after {}.",
            p.yellow, p.reset, count
        );
    }

    out
}

/// Render a topology report as text.
pub fn format_topology_text(report: &TopologyReport, palette: &ColorPalette) -> String {
    let p = palette;
    let mut out = String::new();
    let show = |id: &Option<NodeId>| {
        id.as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string())
    };

    let _ = writeln!(out, "Nodes:       {}", report.nodes);
    let _ = writeln!(out, "Connections: {}", report.connections);
    let _ = writeln!(out, "Devices:     {}", report.devices);
    let _ = writeln!(out, "Start:       {}", show(&report.start));
    let _ = writeln!(out, "End:         {}", show(&report.end));
    if report.isolated.is_empty() {
        let _ = writeln!(out, "Isolated:    none");
    } else {
        let _ = writeln!(out, "Isolated:    {}", join_ids(&report.isolated));
    }
    for issue in &report.issues {
        let _ = writeln!(out, "{}Warning:{} {}", p.yellow, p.reset, issue);
    }

    out
}
