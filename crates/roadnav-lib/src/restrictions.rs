//! Turn restrictions keyed by the intersection where the turn happens.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, RoadId};

/// Forbidden manoeuvre: arriving at `node` from `prev_node` along `prev_road`,
/// the vehicle may not continue to `next_node` along `next_road`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Restriction {
    pub prev_node: NodeId,
    pub prev_road: RoadId,
    pub node: NodeId,
    pub next_road: RoadId,
    pub next_node: NodeId,
}

/// Restrictions grouped by pivot intersection for constant-time lookup during
/// expansion.
#[derive(Debug, Clone, Default)]
pub struct RestrictionIndex {
    by_pivot: HashMap<NodeId, Vec<Restriction>>,
    len: usize,
}

impl RestrictionIndex {
    /// Index without any restrictions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate `restrictions` against `graph` and index them by pivot.
    pub fn build(
        graph: &Graph,
        restrictions: impl IntoIterator<Item = Restriction>,
    ) -> Result<Self> {
        let mut index = Self::default();
        for restriction in restrictions {
            for node in [
                restriction.prev_node,
                restriction.node,
                restriction.next_node,
            ] {
                if !graph.contains_node(node) {
                    return Err(Error::RestrictionNodeMissing { node });
                }
            }
            for road in [restriction.prev_road, restriction.next_road] {
                if graph.road(road).is_none() {
                    return Err(Error::RestrictionRoadMissing { road });
                }
            }
            index
                .by_pivot
                .entry(restriction.node)
                .or_default()
                .push(restriction);
            index.len += 1;
        }

        debug!(
            restrictions = index.len,
            pivots = index.by_pivot.len(),
            "indexed turn restrictions"
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Restrictions pivoted at `node`.
    pub fn at(&self, node: NodeId) -> &[Restriction] {
        self.by_pivot
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether continuing from `curr` to `next` on `next_road` is forbidden,
    /// given the intersection and road the vehicle `arrived` on.
    ///
    /// The arrival road is the one actually driven, not any road that happens
    /// to join the two intersections. With no arrival (the search origin)
    /// nothing is forbidden.
    pub fn is_forbidden(
        &self,
        arrived: Option<(NodeId, RoadId)>,
        curr: NodeId,
        next: NodeId,
        next_road: RoadId,
    ) -> bool {
        let Some((prev, prev_road)) = arrived else {
            return false;
        };

        self.at(curr).iter().any(|restriction| {
            restriction.prev_node == prev
                && restriction.prev_road == prev_road
                && restriction.next_node == next
                && restriction.next_road == next_road
        })
    }
}
