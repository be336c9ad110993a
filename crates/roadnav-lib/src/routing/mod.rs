//! Route planning over a road graph.
//!
//! This module provides:
//! - [`RouteRequest`] - start, goal, cost mode and tuning for one search
//! - [`RouteOutcome`] - either a [`Route`] or a "no path" report
//! - [`find_route`] - main entry point: validate, search, reconstruct
//! - [`RoadEquivalence`] / [`RoadMatching`] - how segments are grouped into legs
//!
//! # Example
//!
//! ```ignore
//! use roadnav_lib::{find_route, load_dataset, RouteOutcome, RouteRequest};
//!
//! let network = load_dataset("city.json")?;
//! let request = RouteRequest::time(12, 480);
//! if let RouteOutcome::Found(route) = find_route(&network.graph, &network.restrictions, &request)? {
//!     println!("{} legs", route.legs.len());
//! }
//! ```

mod reconstruct;

pub use reconstruct::{reconstruct, RoadEquivalence, RoadMatching};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cost::{select_cost_model, CostConfig, CostMode};
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Road, RoadId, SegmentId};
use crate::path::{search, SearchOptions};
use crate::restrictions::RestrictionIndex;

/// Road identity shown to the user for one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoadSummary {
    pub id: RoadId,
    pub name: String,
    pub city: String,
}

impl From<&Road> for RoadSummary {
    fn from(road: &Road) -> Self {
        Self {
            id: road.id,
            name: road.name.clone(),
            city: road.city.clone(),
        }
    }
}

/// Consecutive segments on one (equivalent) road.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub road: RoadSummary,
    /// Reported cost of the leg: kilometres or hours depending on the mode.
    pub cost: f64,
    pub distance_km: f64,
    pub segments: Vec<SegmentId>,
}

/// Successful route from start to goal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub mode: CostMode,
    pub start: NodeId,
    pub goal: NodeId,
    pub legs: Vec<RouteLeg>,
    pub total_cost: f64,
    pub total_distance_km: f64,
    /// Intersections visited, start to goal.
    pub nodes: Vec<NodeId>,
    /// Intersections finalized by the search, in settle order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explored: Vec<NodeId>,
}

impl Route {
    /// Segments traversed by the route, for highlighting.
    pub fn segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.legs.iter().flat_map(|leg| leg.segments.iter().copied())
    }

    /// Number of segments traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Result of a route search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    /// The goal cannot be reached under the direction and turn rules.
    NoPath {
        start: NodeId,
        goal: NodeId,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        explored: Vec<NodeId>,
    },
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoPath { .. } => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoPath { .. } => None,
        }
    }

    /// Intersections finalized by the search.
    pub fn explored(&self) -> &[NodeId] {
        match self {
            RouteOutcome::Found(route) => &route.explored,
            RouteOutcome::NoPath { explored, .. } => explored,
        }
    }
}

/// High-level route request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goal: NodeId,
    #[serde(default)]
    pub mode: CostMode,
    #[serde(default)]
    pub cost: CostConfig,
    #[serde(default)]
    pub matching: RoadMatching,
}

impl RouteRequest {
    /// Shortest-distance request with default tuning.
    pub fn distance(start: NodeId, goal: NodeId) -> Self {
        Self {
            start,
            goal,
            mode: CostMode::Distance,
            cost: CostConfig::default(),
            matching: RoadMatching::default(),
        }
    }

    /// Fastest-time request with default tuning.
    pub fn time(start: NodeId, goal: NodeId) -> Self {
        Self {
            mode: CostMode::Time,
            ..Self::distance(start, goal)
        }
    }

    pub fn with_cost_config(mut self, cost: CostConfig) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_matching(mut self, matching: RoadMatching) -> Self {
        self.matching = matching;
        self
    }
}

/// Compute a route for `request`.
pub fn find_route(
    graph: &Graph,
    restrictions: &RestrictionIndex,
    request: &RouteRequest,
) -> Result<RouteOutcome> {
    find_route_with(graph, restrictions, request, &SearchOptions::default())
}

/// Compute a route for `request` with explicit search options (e.g. a
/// cancellation flag).
///
/// Steps:
/// 1. Reject unknown endpoints and `start == goal`
/// 2. Build the cost model (invalid tuning fails here, before searching)
/// 3. Run A*
/// 4. Reconstruct the road-aggregated route
pub fn find_route_with(
    graph: &Graph,
    restrictions: &RestrictionIndex,
    request: &RouteRequest,
    options: &SearchOptions<'_>,
) -> Result<RouteOutcome> {
    validate_request(graph, request)?;
    let model = select_cost_model(request.mode, request.cost)?;

    let outcome = search(
        graph,
        restrictions,
        model.as_ref(),
        request.start,
        request.goal,
        options,
    )?;

    if !outcome.reached_goal() {
        debug!(
            start = request.start,
            goal = request.goal,
            explored = outcome.explored.len(),
            "no path found"
        );
        return Ok(RouteOutcome::NoPath {
            start: request.start,
            goal: request.goal,
            explored: outcome.explored,
        });
    }

    let route = reconstruct(graph, model.as_ref(), &request.matching, &outcome)?;
    Ok(RouteOutcome::Found(route))
}

fn validate_request(graph: &Graph, request: &RouteRequest) -> Result<()> {
    for id in [request.start, request.goal] {
        if !graph.contains_node(id) {
            return Err(Error::UnknownNode { id });
        }
    }
    if request.start == request.goal {
        return Err(Error::SameStartAndGoal { id: request.start });
    }
    Ok(())
}
