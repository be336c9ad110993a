//! KD-tree lookup of the intersection closest to a point.
//!
//! A front end uses this to turn a click or a typed coordinate into a start or
//! goal intersection:
//!
//! ```ignore
//! let locator = NodeLocator::build(&network.graph);
//! let start = locator.nearest_within(Position::new(1.2, -0.4), DEFAULT_PICK_RADIUS_KM);
//! ```

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use tracing::debug;

use crate::graph::{Graph, NodeId, Position};

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Furthest a picked point may be from an intersection and still select it.
pub const DEFAULT_PICK_RADIUS_KM: f64 = 0.15;

/// Nearest-intersection index over a [`Graph`].
pub struct NodeLocator {
    tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32>,
    ids: Vec<NodeId>,
}

impl NodeLocator {
    /// Index every intersection of `graph`.
    pub fn build(graph: &Graph) -> Self {
        let mut nodes: Vec<(NodeId, Position)> =
            graph.nodes().map(|node| (node.id, node.position)).collect();
        // Stable item order keeps ties deterministic across runs.
        nodes.sort_by_key(|(id, _)| *id);

        let mut tree: KdTree<f64, usize, 2, BUCKET_SIZE, u32> = KdTree::new();
        let mut ids = Vec::with_capacity(nodes.len());
        for (index, (id, position)) in nodes.into_iter().enumerate() {
            tree.add(&[position.x, position.y], index);
            ids.push(id);
        }

        debug!(nodes = ids.len(), "built node locator");
        Self { tree, ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Closest intersection to `point` and its distance.
    pub fn nearest(&self, point: Position) -> Option<(NodeId, f64)> {
        if self.ids.is_empty() {
            return None;
        }

        self.tree
            .nearest_n::<SquaredEuclidean>(&[point.x, point.y], 1)
            .into_iter()
            .next()
            .map(|neighbour| (self.ids[neighbour.item], neighbour.distance.sqrt()))
    }

    /// Closest intersection to `point`, if it lies within `max_distance`.
    pub fn nearest_within(&self, point: Position, max_distance: f64) -> Option<(NodeId, f64)> {
        self.nearest(point)
            .filter(|(_, distance)| *distance <= max_distance)
    }
}

impl std::fmt::Debug for NodeLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeLocator")
            .field("nodes", &self.ids.len())
            .finish()
    }
}
