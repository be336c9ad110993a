//! Turning a finished search into a road-by-road itinerary.

use serde::{Deserialize, Serialize};

use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Road, SegmentId};
use crate::path::SearchOutcome;

use super::{RoadSummary, Route, RouteLeg};

/// Decides whether two consecutive segments belong to the same itinerary leg.
pub trait RoadEquivalence: Send + Sync {
    fn equivalent(&self, a: &Road, b: &Road) -> bool;
}

/// Built-in equivalence policies.
///
/// [`RoadMatching::ByName`] treats every road with the same name as one
/// street. Distinct roads that share a name and happen to meet will be merged
/// into a single leg; this is a known limitation, kept because road ids in
/// typical datasets split a single street into many records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoadMatching {
    #[default]
    ByName,
    ById,
}

impl RoadEquivalence for RoadMatching {
    fn equivalent(&self, a: &Road, b: &Road) -> bool {
        match self {
            RoadMatching::ByName => a.name == b.name,
            RoadMatching::ById => a.id == b.id,
        }
    }
}

/// Walk predecessors from the goal back to the start and aggregate the
/// traversed segments into legs.
///
/// Costs use the model's reporting semantics. Fails with
/// [`Error::BrokenPredecessorChain`] rather than returning a partial route.
pub fn reconstruct(
    graph: &Graph,
    model: &dyn CostModel,
    equivalence: &dyn RoadEquivalence,
    outcome: &SearchOutcome,
) -> Result<Route> {
    let mut steps: Vec<(NodeId, SegmentId)> = Vec::new();
    let mut current = outcome.goal;
    while current != outcome.start {
        let predecessor = outcome
            .predecessors
            .get(&current)
            .ok_or(Error::BrokenPredecessorChain { node: current })?;
        steps.push((current, predecessor.segment));
        current = predecessor.node;

        if steps.len() > outcome.predecessors.len() {
            return Err(Error::BrokenPredecessorChain { node: current });
        }
    }
    steps.reverse();

    let mut legs: Vec<(&Road, RouteLeg)> = Vec::new();
    let mut nodes = vec![outcome.start];
    let mut total_cost = 0.0;
    let mut total_distance = 0.0;

    for (node, segment_id) in steps {
        let segment = graph
            .segment(segment_id)
            .ok_or(Error::BrokenPredecessorChain { node })?;
        let road = graph
            .road(segment.road)
            .ok_or(Error::BrokenPredecessorChain { node })?;

        let cost = model.report_cost(segment, road);
        total_cost += cost;
        total_distance += segment.length;
        nodes.push(node);

        if let Some((leg_road, leg)) = legs.last_mut() {
            if equivalence.equivalent(leg_road, road) {
                leg.cost += cost;
                leg.distance_km += segment.length;
                leg.segments.push(segment_id);
                continue;
            }
        }
        legs.push((
            road,
            RouteLeg {
                road: RoadSummary::from(road),
                cost,
                distance_km: segment.length,
                segments: vec![segment_id],
            },
        ));
    }

    Ok(Route {
        mode: model.mode(),
        start: outcome.start,
        goal: outcome.goal,
        legs: legs.into_iter().map(|(_, leg)| leg).collect(),
        total_cost,
        total_distance_km: total_distance,
        nodes,
        explored: outcome.explored.clone(),
    })
}
