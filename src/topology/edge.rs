use super::face::FaceId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in a mesh.
    pub struct EdgeId;
}

/// Data associated with a mesh edge.
///
/// An edge joins two vertices and is shared by the faces on either side.
/// The endpoint order is fixed when the edge is first created and stays
/// stable for the lifetime of the mesh (exposed as index 0 / index 1).
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The two endpoint vertices.
    pub vertices: [VertexId; 2],
    /// Faces incident to this edge (at most two on a manifold mesh).
    pub faces: Vec<FaceId>,
}
