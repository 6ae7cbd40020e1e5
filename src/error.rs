use thiserror::Error;

use crate::topology::{EdgeId, FaceId};

/// Top-level error type for the unfolding kernel.
#[derive(Debug, Error)]
pub enum UnfoldError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("edge {edge:?} has zero length")]
    DegenerateEdge { edge: EdgeId },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to mesh topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(&'static str),

    #[error("edge cycle of face {face:?} is not closed")]
    OpenEdgeCycle { face: FaceId },

    #[error("faces {face:?} and {other:?} share no edge")]
    NoSharedEdge { face: FaceId, other: FaceId },

    #[error("face {face:?} is already part of the tree")]
    FaceAlreadyInTree { face: FaceId },

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to unfolding operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("operation requires a non-empty face set")]
    EmptyFaceSet,

    #[error("face set is not connected: reached {reached} of {expected} faces")]
    DisconnectedFaces { expected: usize, reached: usize },

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors related to patch output assembly.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("patch triangulation failed: {0}")]
    TriangulationFailed(String),
}

/// Convenience type alias for results using [`UnfoldError`].
pub type Result<T> = std::result::Result<T, UnfoldError>;
