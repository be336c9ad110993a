use std::path::PathBuf;

use thiserror::Error;

use crate::graph::{NodeId, RoadId, SegmentId};

/// Convenient result alias for the roadnav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// An unreachable goal is not represented here: it is a normal outcome and is
/// reported through [`crate::RouteOutcome::NoPath`].
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a request references an intersection the graph does not contain.
    #[error("unknown intersection: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when start and goal are the same intersection.
    #[error("start and goal are the same intersection ({id})")]
    SameStartAndGoal { id: NodeId },

    /// Raised when a cost model is configured with parameters that would yield a
    /// non-positive speed multiplier or an inadmissible heuristic.
    #[error("invalid cost configuration: {message}")]
    InvalidCostConfig { message: String },

    /// Raised when two intersections share an identifier.
    #[error("duplicate intersection id {id}")]
    DuplicateNode { id: NodeId },

    /// Raised when two roads share an identifier.
    #[error("duplicate road id {id}")]
    DuplicateRoad { id: RoadId },

    /// Raised when a segment references a road that was never registered.
    #[error("segment {segment} references unknown road {road}")]
    UnknownRoad { segment: SegmentId, road: RoadId },

    /// Raised when a segment endpoint is not a registered intersection.
    #[error("segment {segment} references unknown intersection {node}")]
    SegmentEndpointMissing { segment: SegmentId, node: NodeId },

    /// Raised when a segment starts and ends at the same intersection.
    #[error("segment {segment} connects intersection {node} to itself")]
    DegenerateSegment { segment: SegmentId, node: NodeId },

    /// Raised when a segment length is negative or not finite.
    #[error("segment {segment} has invalid length {length}")]
    InvalidSegmentLength { segment: SegmentId, length: f64 },

    /// Raised when a turn restriction references an intersection missing from the graph.
    #[error("turn restriction references unknown intersection {node}")]
    RestrictionNodeMissing { node: NodeId },

    /// Raised when a turn restriction references a road missing from the graph.
    #[error("turn restriction references unknown road {road}")]
    RestrictionRoadMissing { road: RoadId },

    /// Raised when walking predecessors from the goal fails to reach the start.
    #[error("predecessor chain broken at intersection {node} while reconstructing route")]
    BrokenPredecessorChain { node: NodeId },

    /// Raised when a caller-supplied cancellation flag stopped the search.
    #[error("route search was cancelled")]
    SearchCancelled,

    /// No dataset path was given and none could be resolved from the environment.
    #[error("no dataset path provided; pass one explicitly or set {env_var}")]
    DatasetPathUnresolved { env_var: &'static str },

    /// Raised when a dataset file could not be read.
    #[error("failed to read dataset at {path}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
