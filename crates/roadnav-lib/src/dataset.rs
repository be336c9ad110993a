//! JSON graph provider.
//!
//! A dataset holds intersections with planar kilometre coordinates, roads,
//! segments and optional turn restrictions:
//!
//! ```json
//! {
//!   "nodes": [{ "id": 1, "x": 0.0, "y": 0.0 }],
//!   "roads": [{ "id": 10, "name": "Queen Street", "city": "Auckland",
//!               "one_way": 0, "speed_class": 3, "road_class": 2 }],
//!   "segments": [{ "road": 10, "start": 1, "end": 2, "length": 0.42 }],
//!   "restrictions": [{ "prev_node": 1, "prev_road": 10, "node": 2,
//!                      "next_road": 11, "next_node": 3 }]
//! }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId, Position, Road, RoadId};
use crate::path::SearchOptions;
use crate::restrictions::{Restriction, RestrictionIndex};
use crate::routing::{find_route_with, RouteOutcome, RouteRequest};

/// Environment variable consulted when no dataset path is given.
pub const DATASET_ENV: &str = "ROADNAV_DATASET";

/// Intersection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

/// Road record. `one_way` follows the source data convention: 0 means
/// bidirectional, anything else means start-to-end only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub id: RoadId,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub one_way: u8,
    #[serde(default)]
    pub speed_class: u8,
    #[serde(default)]
    pub road_class: u8,
}

impl From<&RoadRecord> for Road {
    fn from(record: &RoadRecord) -> Self {
        Road {
            id: record.id,
            name: record.name.clone(),
            city: record.city.clone(),
            one_way: record.one_way != 0,
            speed_class: record.speed_class,
            road_class: record.road_class,
        }
    }
}

/// Segment record, directed from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub road: RoadId,
    pub start: NodeId,
    pub end: NodeId,
    pub length: f64,
}

/// Raw dataset as supplied by the graph provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub nodes: Vec<NodeRecord>,
    pub roads: Vec<RoadRecord>,
    pub segments: Vec<SegmentRecord>,
    #[serde(default)]
    pub restrictions: Vec<Restriction>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the records and build the graph and restriction index.
    pub fn build(&self) -> Result<RoadNetwork> {
        let mut builder = Graph::builder();
        for node in &self.nodes {
            builder.add_node(node.id, Position::new(node.x, node.y))?;
        }
        for road in &self.roads {
            builder.add_road(Road::from(road))?;
        }
        for segment in &self.segments {
            builder.add_segment(segment.road, segment.start, segment.end, segment.length)?;
        }
        let graph = builder.build();
        let restrictions = RestrictionIndex::build(&graph, self.restrictions.iter().copied())?;

        Ok(RoadNetwork {
            graph,
            restrictions,
        })
    }
}

/// Graph plus turn restrictions: everything a search needs.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub graph: Graph,
    pub restrictions: RestrictionIndex,
}

impl RoadNetwork {
    pub fn find_route(&self, request: &RouteRequest) -> Result<RouteOutcome> {
        self.find_route_with(request, &SearchOptions::default())
    }

    pub fn find_route_with(
        &self,
        request: &RouteRequest,
        options: &SearchOptions<'_>,
    ) -> Result<RouteOutcome> {
        find_route_with(&self.graph, &self.restrictions, request, options)
    }
}

/// Resolve the dataset path from an explicit argument or [`DATASET_ENV`].
pub fn resolve_dataset_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env::var_os(DATASET_ENV) {
        let path = PathBuf::from(env_path);
        debug!(path = %path.display(), "using dataset from {}", DATASET_ENV);
        return Ok(path);
    }
    Err(Error::DatasetPathUnresolved {
        env_var: DATASET_ENV,
    })
}

/// Read a JSON dataset from disk and build the road network.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<RoadNetwork> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = Dataset::from_json_str(&contents)?;
    let network = dataset.build()?;

    info!(
        path = %path.display(),
        nodes = network.graph.node_count(),
        segments = network.graph.segment_count(),
        restrictions = network.restrictions.len(),
        "loaded dataset"
    );
    Ok(network)
}
