//! Inspect command handler: summarise a topology file.

use std::path::Path;

use anyhow::{Context, Result};

use netroute_cli::output::{format_topology_text, OutputFormat, TopologyReport};
use netroute_cli::terminal::ColorPalette;
use netroute_lib::load_topology;

/// Handle the inspect subcommand.
pub fn handle_inspect_command(topology_path: &Path, format: OutputFormat) -> Result<()> {
    let topology = load_topology(topology_path)
        .with_context(|| format!("failed to load topology from {}", topology_path.display()))?;
    let report = TopologyReport::from_topology(&topology)
        .with_context(|| format!("topology {} is malformed", topology_path.display()))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", format_topology_text(&report, &ColorPalette::detect())),
    }

    Ok(())
}
