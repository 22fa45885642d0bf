//! Route command handler for computing every optimal path through a topology.

use std::path::PathBuf;

use anyhow::{Context, Result};

use netroute_cli::output::{format_route_text, OutputFormat};
use netroute_cli::terminal::ColorPalette;
use netroute_lib::{
    load_topology, plan_route, Error as RouteError, NodeId, OverflowPolicy, RouteOptions,
    RouteRequest, DEFAULT_MAX_PATHS,
};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Topology document to route over.
    pub topology: PathBuf,
    /// Waypoint device ids; routes must pass through at least one.
    pub waypoints: Vec<String>,
    /// Source node id override.
    pub from: Option<String>,
    /// Destination node id override.
    pub to: Option<String>,
    /// Maximum number of paths to print.
    pub max_paths: Option<usize>,
    /// Fail instead of truncating when more paths exist than `max_paths`.
    pub strict: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            waypoints: self.waypoints.clone(),
            source: self.from.as_deref().map(NodeId::from),
            destination: self.to.as_deref().map(NodeId::from),
            options: RouteOptions {
                max_paths: Some(self.max_paths.unwrap_or(DEFAULT_MAX_PATHS)),
                overflow: if self.strict {
                    OverflowPolicy::Reject
                } else {
                    OverflowPolicy::Truncate
                },
            },
        }
    }
}

/// Handle the route subcommand.
///
/// An unreachable destination is reported on stdout and is not an error.
pub fn handle_route_command(args: &RouteCommandArgs, format: OutputFormat) -> Result<()> {
    let topology = load_topology(&args.topology)
        .with_context(|| format!("failed to load topology from {}", args.topology.display()))?;

    let request = args.to_request();
    let plan = plan_route(&topology, &request).map_err(|err| handle_route_failure(args, err))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print!("{}", format_route_text(&plan, &ColorPalette::detect())),
    }

    Ok(())
}

fn handle_route_failure(args: &RouteCommandArgs, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::TooManyPaths { limit } => anyhow::anyhow!(
            "More than {} equal-cost paths exist. Raise --max-paths or omit --strict to truncate.",
            limit
        ),
        RouteError::MissingEndpoint { endpoint } => anyhow::anyhow!(
            "Topology {} has no node flagged as {}. Pass --{} to choose one.",
            args.topology.display(),
            endpoint,
            if endpoint == netroute_lib::Endpoint::Start {
                "from"
            } else {
                "to"
            }
        ),
        RouteError::UnknownNode { id } => {
            anyhow::anyhow!("Unknown node '{}' in {}.", id, args.topology.display())
        }
        other => anyhow::Error::new(other).context("route planning failed"),
    }
}
