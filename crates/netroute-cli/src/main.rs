use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use netroute_cli::output::OutputFormat;

mod commands;

use commands::inspect::handle_inspect_command;
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Constrained all-shortest-path routing over network topologies")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every minimum-cost route between the topology's endpoints.
    Route(RouteArgs),
    /// Summarise a topology file: counts, endpoints and isolated nodes.
    Inspect {
        /// Topology JSON document.
        #[arg(long)]
        topology: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Topology JSON document.
    #[arg(long)]
    topology: PathBuf,
    /// Device id a route must pass through. Repeat to allow several; a route
    /// through any one of them qualifies.
    #[arg(long = "waypoint", value_name = "DEVICE")]
    waypoints: Vec<String>,
    /// Source node id (defaults to the node flagged `start`).
    #[arg(long = "from")]
    from: Option<String>,
    /// Destination node id (defaults to the node flagged `end`).
    #[arg(long = "to")]
    to: Option<String>,
    /// Maximum number of paths to return (at least 1).
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    max_paths: Option<usize>,
    /// Fail instead of truncating when more paths exist than --max-paths.
    #[arg(long)]
    strict: bool,
}

impl From<RouteArgs> for RouteCommandArgs {
    fn from(args: RouteArgs) -> Self {
        Self {
            topology: args.topology,
            waypoints: args.waypoints,
            from: args.from,
            to: args.to,
            max_paths: args.max_paths,
            strict: args.strict,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route(args) => handle_route_command(&args.into(), cli.format),
        Command::Inspect { topology } => handle_inspect_command(&topology, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
