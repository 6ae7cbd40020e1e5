use crate::error::TopologyError;
use crate::math::{Point3, Vector3};

use super::{EdgeId, FaceId, VertexId};

/// Read-only queries over a polygon mesh.
///
/// This is the interface the unfolding pipeline consumes. The flattener
/// never mutates the mesh; implementations over any face/edge/vertex
/// representation can be unfolded, [`PolygonMesh`](super::PolygonMesh)
/// being the one shipped with the crate.
pub trait MeshQuery {
    /// Returns the faces sharing an edge with `face`, deduplicated.
    ///
    /// The order is whatever the mesh representation reports; callers must
    /// not rely on a particular order for correctness, only for
    /// reproducibility of output layout on a fixed mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of the mesh.
    fn adjacent_faces(&self, face: FaceId) -> Result<Vec<FaceId>, TopologyError>;

    /// Returns the edges of a face: outer boundary loop first, then hole
    /// loops, each loop in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of the mesh.
    fn face_edges(&self, face: FaceId) -> Result<Vec<EdgeId>, TopologyError>;

    /// Returns the two endpoint vertices of an edge, in stable order.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not part of the mesh.
    fn edge_vertices(&self, edge: EdgeId) -> Result<[VertexId; 2], TopologyError>;

    /// Returns the position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex is not part of the mesh.
    fn vertex_position(&self, vertex: VertexId) -> Result<Point3, TopologyError>;

    /// Returns the unit normal of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of the mesh.
    fn face_normal(&self, face: FaceId) -> Result<Vector3, TopologyError>;
}
