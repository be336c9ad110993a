//! Route command handler for computing itineraries between intersections.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use roadnav_lib::cost::DEFAULT_ROAD_CLASS_WEIGHT;
use roadnav_lib::{CostConfig, CostMode, NodeId, RoadMatching, RouteRequest, RouteSummary};

use crate::commands::load_network;
use crate::output::{print_route, OutputFormat};

/// Quantity to optimise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    /// Shortest distance.
    #[default]
    Distance,
    /// Fastest travel time.
    Time,
}

impl From<ModeArg> for CostMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Distance => CostMode::Distance,
            ModeArg::Time => CostMode::Time,
        }
    }
}

/// How consecutive segments are grouped into itinerary legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchArg {
    /// Same road name.
    #[default]
    Name,
    /// Same road record.
    Id,
}

impl From<MatchArg> for RoadMatching {
    fn from(value: MatchArg) -> Self {
        match value {
            MatchArg::Name => RoadMatching::ByName,
            MatchArg::Id => RoadMatching::ById,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Starting intersection id.
    #[arg(long = "from")]
    pub from: NodeId,
    /// Destination intersection id.
    #[arg(long = "to")]
    pub to: NodeId,
    /// Optimise for distance or travel time.
    #[arg(long, value_enum, default_value_t = ModeArg::Distance)]
    pub mode: ModeArg,
    /// Speed penalty per road class below the top class (time mode only).
    #[arg(long, default_value_t = DEFAULT_ROAD_CLASS_WEIGHT)]
    pub road_class_weight: f64,
    /// Merge consecutive segments by road name or by road id.
    #[arg(long = "match-roads", value_enum, default_value_t = MatchArg::Name)]
    pub match_roads: MatchArg,
    /// Also list the intersections the search explored.
    #[arg(long)]
    pub show_explored: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: self.from,
            goal: self.to,
            mode: self.mode.into(),
            cost: CostConfig {
                road_class_weight: self.road_class_weight,
            },
            matching: self.match_roads.into(),
        }
    }
}

/// Handle the route subcommand.
///
/// "No path" is a normal outcome and exits successfully; invalid requests
/// (unknown ids, identical endpoints, bad tuning) fail with context.
pub fn handle_route_command(
    dataset: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = load_network(dataset)?;
    let request = args.to_request();

    let outcome = network
        .find_route(&request)
        .with_context(|| format!("failed to route from {} to {}", args.from, args.to))?;
    info!(
        from = args.from,
        to = args.to,
        mode = %request.mode,
        found = outcome.route().is_some(),
        "route computed"
    );

    let summary = RouteSummary::from_outcome(&network.graph, request.mode, &outcome);
    let explored = args.show_explored.then(|| outcome.explored());
    print_route(&summary, explored, format)
}
