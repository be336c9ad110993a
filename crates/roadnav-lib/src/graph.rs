use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Stable identifier of an intersection.
pub type NodeId = i64;

/// Stable identifier of a road.
pub type RoadId = i64;

/// Index of a segment inside its [`Graph`].
pub type SegmentId = usize;

/// Planar position in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Intersection in the road graph.
///
/// Holds back-references to incident segments only; nothing computed during a
/// search is stored here.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    segments: Vec<SegmentId>,
}

impl Node {
    /// Segments incident to this intersection, in insertion order.
    pub fn segments(&self) -> &[SegmentId] {
        &self.segments
    }
}

/// Road metadata shared by every segment that belongs to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Road {
    pub id: RoadId,
    pub name: String,
    pub city: String,
    /// When set, segments of this road may only be traversed from `start` to `end`.
    pub one_way: bool,
    /// Discrete speed class, 0-6. Anything above 5 means "no limit".
    pub speed_class: u8,
    /// Road class, 0 (minor) to 4 (major).
    pub road_class: u8,
}

/// Piece of road connecting exactly two intersections.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub road: RoadId,
    pub start: NodeId,
    pub end: NodeId,
    /// Length in kilometres.
    pub length: f64,
}

impl Segment {
    /// Endpoint opposite to `node`, or `None` when `node` is not an endpoint.
    pub fn far_end(&self, node: NodeId) -> Option<NodeId> {
        if node == self.start {
            Some(self.end)
        } else if node == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    /// Whether the segment joins `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }
}

/// Directed traversal of a segment that the direction policy allows.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub from: NodeId,
    pub to: NodeId,
    pub segment: &'a Segment,
    pub road: &'a Road,
}

/// Road graph used by the search engine.
///
/// Read-only once built, and cheap to clone; concurrent searches can share a
/// single instance.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<HashMap<NodeId, Node>>,
    roads: Arc<HashMap<RoadId, Road>>,
    segments: Arc<Vec<Segment>>,
}

impl Graph {
    /// Start assembling a graph.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn position(&self, id: NodeId) -> Option<Position> {
        self.nodes.get(&id).map(|node| node.position)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Traversable edges leaving `node`.
    ///
    /// A segment is always usable from its `start`; from its `end` only when its
    /// road is bidirectional.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.incident(node).filter_map(move |segment| {
            let road = self.roads.get(&segment.road)?;
            let to = segment.far_end(node)?;
            if segment.start == node || !road.one_way {
                Some(Edge {
                    from: node,
                    to,
                    segment,
                    road,
                })
            } else {
                None
            }
        })
    }

    /// Segments joining `a` and `b`, regardless of direction.
    pub fn segments_between(&self, a: NodeId, b: NodeId) -> impl Iterator<Item = &Segment> + '_ {
        self.incident(a).filter(move |segment| segment.connects(a, b))
    }

    /// Short description of an intersection: its id and the names of the roads
    /// meeting there, e.g. `12 (Queen Street / Wakefield Street)`.
    pub fn node_label(&self, id: NodeId) -> Option<String> {
        let node = self.nodes.get(&id)?;
        let names: BTreeSet<&str> = node
            .segments
            .iter()
            .filter_map(|&segment| self.segments.get(segment))
            .filter_map(|segment| self.roads.get(&segment.road))
            .map(|road| road.name.as_str())
            .collect();

        if names.is_empty() {
            return Some(id.to_string());
        }

        let joined = names.into_iter().collect::<Vec<_>>().join(" / ");
        Some(format!("{id} ({joined})"))
    }

    fn incident(&self, node: NodeId) -> impl Iterator<Item = &Segment> + '_ {
        self.nodes
            .get(&node)
            .map(|node| node.segments.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&segment| self.segments.get(segment))
    }
}

/// Incremental, validating constructor for [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<NodeId, Node>,
    roads: HashMap<RoadId, Road>,
    segments: Vec<Segment>,
}

impl GraphBuilder {
    pub fn add_node(&mut self, id: NodeId, position: Position) -> Result<&mut Self> {
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        self.nodes.insert(
            id,
            Node {
                id,
                position,
                segments: Vec::new(),
            },
        );
        Ok(self)
    }

    pub fn add_road(&mut self, road: Road) -> Result<&mut Self> {
        if self.roads.contains_key(&road.id) {
            return Err(Error::DuplicateRoad { id: road.id });
        }
        self.roads.insert(road.id, road);
        Ok(self)
    }

    /// Register a segment of `road` running from `start` to `end`.
    ///
    /// The road and both endpoints must already be registered.
    pub fn add_segment(
        &mut self,
        road: RoadId,
        start: NodeId,
        end: NodeId,
        length: f64,
    ) -> Result<SegmentId> {
        let id = self.segments.len();

        if !self.roads.contains_key(&road) {
            return Err(Error::UnknownRoad { segment: id, road });
        }
        for node in [start, end] {
            if !self.nodes.contains_key(&node) {
                return Err(Error::SegmentEndpointMissing { segment: id, node });
            }
        }
        if start == end {
            return Err(Error::DegenerateSegment {
                segment: id,
                node: start,
            });
        }
        if !length.is_finite() || length < 0.0 {
            return Err(Error::InvalidSegmentLength {
                segment: id,
                length,
            });
        }

        for node in [start, end] {
            if let Some(node) = self.nodes.get_mut(&node) {
                node.segments.push(id);
            }
        }
        self.segments.push(Segment {
            id,
            road,
            start,
            end,
            length,
        });
        Ok(id)
    }

    pub fn build(self) -> Graph {
        info!(
            nodes = self.nodes.len(),
            roads = self.roads.len(),
            segments = self.segments.len(),
            "built road graph"
        );
        Graph {
            nodes: Arc::new(self.nodes),
            roads: Arc::new(self.roads),
            segments: Arc::new(self.segments),
        }
    }
}
