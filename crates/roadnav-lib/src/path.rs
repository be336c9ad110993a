use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use tracing::{debug, warn};

use crate::cost::CostModel;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, SegmentId};
use crate::restrictions::RestrictionIndex;

/// Relative slack allowed before a falling estimate is reported as an
/// inconsistent heuristic.
const ESTIMATE_TOLERANCE: f64 = 1e-9;

/// How an intersection was reached: the previous intersection and the segment
/// taken from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    pub node: NodeId,
    pub segment: SegmentId,
}

/// Per-call search options.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchOptions<'a> {
    /// Checked once per fringe pop; when set the search stops with
    /// [`Error::SearchCancelled`].
    pub cancel: Option<&'a AtomicBool>,
}

impl<'a> SearchOptions<'a> {
    pub fn with_cancel_flag(flag: &'a AtomicBool) -> Self {
        Self { cancel: Some(flag) }
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .map(|flag| flag.load(AtomicOrdering::Relaxed))
            .unwrap_or(false)
    }
}

/// Counters collected while searching.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub popped: usize,
    pub pushed: usize,
    /// Pops discarded because the node was already finalized.
    pub stale: usize,
    /// Candidate edges skipped by a turn restriction.
    pub restricted: usize,
    /// Child estimates found below their parent's (debug builds only).
    pub inconsistent_estimates: usize,
}

/// Search-local state left behind by [`search`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub start: NodeId,
    pub goal: NodeId,
    /// Search cost of the goal, or `None` when it was unreachable.
    pub cost: Option<f64>,
    pub predecessors: HashMap<NodeId, Predecessor>,
    /// Finalized intersections in the order they were settled.
    pub explored: Vec<NodeId>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn reached_goal(&self) -> bool {
        self.cost.is_some()
    }
}

/// Run A* from `start` to `goal`.
///
/// Edges follow the graph's direction policy, and every candidate turn is
/// checked against `restrictions` before it enters the fringe. An unreachable
/// goal is reported through [`SearchOutcome::cost`] being `None`.
pub fn search(
    graph: &Graph,
    restrictions: &RestrictionIndex,
    model: &dyn CostModel,
    start: NodeId,
    goal: NodeId,
    options: &SearchOptions<'_>,
) -> Result<SearchOutcome> {
    let start_position = graph
        .position(start)
        .ok_or(Error::UnknownNode { id: start })?;
    let goal_position = graph.position(goal).ok_or(Error::UnknownNode { id: goal })?;

    let mut stats = SearchStats::default();
    let mut finalized: HashSet<NodeId> = HashSet::new();
    let mut explored = Vec::new();
    let mut predecessors: HashMap<NodeId, Predecessor> = HashMap::new();
    let mut fringe = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut goal_cost = None;

    fringe.push(FringeEntry::new(
        start,
        None,
        0.0,
        model.heuristic(&start_position, &goal_position),
        sequence,
    ));
    stats.pushed += 1;

    while let Some(entry) = fringe.pop() {
        if options.cancelled() {
            debug!(start, goal, popped = stats.popped, "route search cancelled");
            return Err(Error::SearchCancelled);
        }
        stats.popped += 1;

        if !finalized.insert(entry.node) {
            stats.stale += 1;
            continue;
        }
        explored.push(entry.node);
        if let Some(predecessor) = entry.predecessor {
            predecessors.insert(entry.node, predecessor);
        }

        if entry.node == goal {
            goal_cost = Some(entry.cost.0);
            break;
        }

        let arrived = entry.predecessor.and_then(|predecessor| {
            graph
                .segment(predecessor.segment)
                .map(|segment| (predecessor.node, segment.road))
        });
        for edge in graph.outgoing(entry.node) {
            if finalized.contains(&edge.to) {
                continue;
            }
            if restrictions.is_forbidden(arrived, entry.node, edge.to, edge.road.id) {
                stats.restricted += 1;
                continue;
            }

            let cost = entry.cost.0 + model.search_cost(edge.segment, edge.road);
            let heuristic = graph
                .position(edge.to)
                .map(|position| model.heuristic(&position, &goal_position))
                .unwrap_or(0.0);
            let estimate = cost + heuristic;

            if cfg!(debug_assertions) && falls_below(estimate, entry.estimate.0) {
                stats.inconsistent_estimates += 1;
                warn!(
                    from = entry.node,
                    to = edge.to,
                    parent_estimate = entry.estimate.0,
                    child_estimate = estimate,
                    "inconsistent heuristic; route may not be optimal"
                );
            }

            sequence += 1;
            fringe.push(FringeEntry::new(
                edge.to,
                Some(Predecessor {
                    node: entry.node,
                    segment: edge.segment.id,
                }),
                cost,
                estimate,
                sequence,
            ));
            stats.pushed += 1;
        }
    }

    debug!(
        start,
        goal,
        mode = %model.mode(),
        reached = goal_cost.is_some(),
        popped = stats.popped,
        pushed = stats.pushed,
        restricted = stats.restricted,
        "route search finished"
    );

    Ok(SearchOutcome {
        start,
        goal,
        cost: goal_cost,
        predecessors,
        explored,
        stats,
    })
}

fn falls_below(child: f64, parent: f64) -> bool {
    child < parent - ESTIMATE_TOLERANCE * parent.abs().max(1.0)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct FringeEntry {
    node: NodeId,
    predecessor: Option<Predecessor>,
    cost: FloatOrd,
    estimate: FloatOrd,
    sequence: u64,
}

impl FringeEntry {
    fn new(
        node: NodeId,
        predecessor: Option<Predecessor>,
        cost: f64,
        estimate: f64,
        sequence: u64,
    ) -> Self {
        Self {
            node,
            predecessor,
            cost: FloatOrd(cost),
            estimate: FloatOrd(estimate),
            sequence,
        }
    }
}

impl Ord for FringeEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest estimate; equal estimates pop
        // in insertion order.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FringeEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
