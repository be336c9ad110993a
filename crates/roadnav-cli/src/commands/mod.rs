//! Handlers for the CLI subcommands. `main.rs` parses arguments and dispatches
//! here.

pub mod nearest;
pub mod node;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use roadnav_lib::{load_dataset, resolve_dataset_path, RoadNetwork};

/// Resolve the dataset path (flag or `ROADNAV_DATASET`) and load it.
pub fn load_network(dataset: Option<&Path>) -> Result<RoadNetwork> {
    let path = resolve_dataset_path(dataset).context("failed to locate a road network dataset")?;
    load_dataset(&path)
        .with_context(|| format!("failed to load dataset from {}", path.display()))
}
