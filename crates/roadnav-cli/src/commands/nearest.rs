//! Nearest command handler: snap a coordinate to the closest intersection.

use std::path::Path;

use anyhow::{ensure, Result};
use clap::Args;
use serde::Serialize;
use tracing::debug;

use roadnav_lib::{NodeId, NodeLocator, Position, DEFAULT_PICK_RADIUS_KM};

use crate::commands::load_network;
use crate::output::{print_json, print_text, OutputFormat};

/// Arguments for the nearest command.
#[derive(Debug, Clone, Args)]
pub struct NearestCommandArgs {
    /// X coordinate in kilometres.
    #[arg(long, allow_negative_numbers = true)]
    pub x: f64,
    /// Y coordinate in kilometres.
    #[arg(long, allow_negative_numbers = true)]
    pub y: f64,
    /// Furthest an intersection may be from the point, in kilometres.
    #[arg(long, default_value_t = DEFAULT_PICK_RADIUS_KM)]
    pub max_distance: f64,
}

#[derive(Debug, Serialize)]
struct NearestDocument {
    id: NodeId,
    label: Option<String>,
    distance_km: f64,
}

/// Handle the nearest subcommand. Finding nothing in range is not an error.
pub fn handle_nearest_command(
    dataset: Option<&Path>,
    format: OutputFormat,
    args: &NearestCommandArgs,
) -> Result<()> {
    ensure!(
        args.max_distance.is_finite() && args.max_distance >= 0.0,
        "--max-distance must be a non-negative number, got {}",
        args.max_distance
    );

    let network = load_network(dataset)?;
    let locator = NodeLocator::build(&network.graph);
    let point = Position::new(args.x, args.y);
    let hit = locator.nearest_within(point, args.max_distance);
    debug!(x = args.x, y = args.y, found = hit.is_some(), "nearest lookup");

    let document = hit.map(|(id, distance_km)| NearestDocument {
        id,
        label: network.graph.node_label(id),
        distance_km,
    });

    match (format, document) {
        (OutputFormat::Json, document) => print_json(&document),
        (_, Some(document)) => print_text(&format!(
            "Nearest intersection: {} ({:.3} km away)\n",
            document.label.unwrap_or_else(|| document.id.to_string()),
            document.distance_km
        )),
        (_, None) => print_text(&format!(
            "No intersection within {:.3} km of ({:.3}, {:.3}).\n",
            args.max_distance, args.x, args.y
        )),
    }
}
