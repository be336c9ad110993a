//! Node command handler: describe a single intersection.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use roadnav_lib::{Error as RoadnavError, NodeId};

use crate::commands::load_network;
use crate::output::{print_json, print_text, OutputFormat};

#[derive(Debug, Serialize)]
struct NodeDocument {
    id: NodeId,
    label: String,
    x: f64,
    y: f64,
    segments: usize,
}

/// Handle the node subcommand.
pub fn handle_node_command(
    dataset: Option<&Path>,
    format: OutputFormat,
    id: NodeId,
) -> Result<()> {
    let network = load_network(dataset)?;
    let graph = &network.graph;

    let (node, label) = graph
        .node(id)
        .zip(graph.node_label(id))
        .ok_or(RoadnavError::UnknownNode { id })?;

    match format {
        OutputFormat::Json => print_json(&NodeDocument {
            id,
            label,
            x: node.position.x,
            y: node.position.y,
            segments: node.segments().len(),
        }),
        OutputFormat::Text | OutputFormat::Rich => print_text(&format!(
            "{label} at ({:.3}, {:.3})\n",
            node.position.x, node.position.y
        )),
    }
}
