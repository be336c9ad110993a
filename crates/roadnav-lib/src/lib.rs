//! roadnav library entry points.
//!
//! This crate builds an immutable road graph with turn restrictions, runs a
//! direction- and restriction-aware A* search under a distance or travel-time
//! cost model, and turns the result into a road-by-road itinerary. Front ends
//! (the CLI, a map viewer) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cost;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod restrictions;
pub mod routing;
pub mod spatial;

pub use cost::{
    select_cost_model, speed_limit_kmh, CostConfig, CostMode, CostModel, DistanceCost, TimeCost,
    MAX_SPEED_KMH,
};
pub use dataset::{load_dataset, resolve_dataset_path, Dataset, RoadNetwork, DATASET_ENV};
pub use error::{Error, Result};
pub use graph::{
    Edge, Graph, GraphBuilder, Node, NodeId, Position, Road, RoadId, Segment, SegmentId,
};
pub use output::{format_hours, RouteEndpoint, RouteRenderMode, RouteSummary};
pub use path::{search, Predecessor, SearchOptions, SearchOutcome, SearchStats};
pub use restrictions::{Restriction, RestrictionIndex};
pub use routing::{
    find_route, find_route_with, reconstruct, RoadEquivalence, RoadMatching, RoadSummary, Route,
    RouteLeg, RouteOutcome, RouteRequest,
};
pub use spatial::{NodeLocator, DEFAULT_PICK_RADIUS_KM};
