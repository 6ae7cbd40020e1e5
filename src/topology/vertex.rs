use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in a mesh.
    pub struct VertexId;
}

/// Data associated with a mesh vertex.
#[derive(Debug, Clone, Copy)]
pub struct VertexData {
    /// Position of the vertex in 3D space.
    pub position: Point3,
}
