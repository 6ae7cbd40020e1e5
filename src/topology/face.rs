use crate::math::Vector3;

use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a face in a mesh.
    pub struct FaceId;
}

/// Data associated with a mesh face.
///
/// A face is a planar polygon bounded by one outer edge loop and zero or
/// more inner loops (holes). The edge list stores the outer loop first,
/// then each hole loop, every loop in traversal order. The outer loop runs
/// counter-clockwise when viewed against the normal, holes clockwise.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Edges of the face, loops concatenated in traversal order.
    pub edges: Vec<EdgeId>,
    /// Unit face normal.
    pub normal: Vector3,
}
