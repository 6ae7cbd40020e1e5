use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;

use crate::error::{GeometryError, TopologyError, UnfoldError};
use crate::math::{unit, Point3, Vector3};

use super::{EdgeData, EdgeId, FaceData, FaceId, MeshQuery, VertexData, VertexId};

/// A polygon mesh stored in slotmap arenas.
///
/// Vertices, edges and faces reference each other via typed IDs. Edges are
/// interned per unordered vertex pair, so faces built over the same vertex
/// pair share one edge; face adjacency queries rely on that sharing.
///
/// Faces may carry hole loops. The outer boundary is given counter-clockwise
/// when viewed against the face normal, holes clockwise; the normal itself
/// is derived from the outer loop, so a consistently wound mesh gets
/// consistent normals without supplying them by hand.
#[derive(Debug, Default)]
pub struct PolygonMesh {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    faces: SlotMap<FaceId, FaceData>,
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
}

impl PolygonMesh {
    /// Creates a new, empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, position: Point3) -> VertexId {
        self.vertices.insert(VertexData { position })
    }

    /// Creates a face from a boundary vertex loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop has fewer than three vertices, repeats
    /// an edge, references a vertex not in the mesh, has zero area, or
    /// would make an edge non-manifold.
    pub fn add_face(&mut self, boundary: &[VertexId]) -> Result<FaceId, UnfoldError> {
        self.add_face_with_holes(boundary, &[])
    }

    /// Creates a face from a boundary loop and interior hole loops.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`add_face`], applied
    /// to every loop.
    ///
    /// [`add_face`]: Self::add_face
    pub fn add_face_with_holes(
        &mut self,
        boundary: &[VertexId],
        holes: &[Vec<VertexId>],
    ) -> Result<FaceId, UnfoldError> {
        let normal = self.loop_normal(boundary)?;

        let mut pairs: Vec<(VertexId, VertexId)> = Vec::new();
        self.collect_loop_pairs(boundary, &mut pairs)?;
        for hole in holes {
            self.collect_loop_pairs(hole, &mut pairs)?;
        }

        // Manifold check before any edge is interned, so a rejected face
        // leaves the mesh untouched.
        let mut within_face: HashSet<(VertexId, VertexId)> = HashSet::new();
        for &pair in &pairs {
            if !within_face.insert(pair) {
                return Err(TopologyError::InvalidTopology(format!(
                    "face repeats edge {pair:?}"
                ))
                .into());
            }
            if let Some(&edge) = self.edge_lookup.get(&pair) {
                if self.edges[edge].faces.len() >= 2 {
                    return Err(TopologyError::InvalidTopology(format!(
                        "edge {edge:?} would join more than two faces"
                    ))
                    .into());
                }
            }
        }

        let edge_ids: Vec<EdgeId> = pairs.iter().map(|&(a, b)| self.intern_edge(a, b)).collect();
        let face = self.faces.insert(FaceData {
            edges: edge_ids.clone(),
            normal,
        });
        for edge in edge_ids {
            self.edges[edge].faces.push(face);
        }
        Ok(face)
    }

    /// Number of vertices in the mesh.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges in the mesh.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces in the mesh.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Iterates over all face IDs, in insertion order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    /// Unit normal of a vertex loop via Newell's method.
    fn loop_normal(&self, vertices: &[VertexId]) -> Result<Vector3, UnfoldError> {
        let mut positions = Vec::with_capacity(vertices.len());
        for &v in vertices {
            let data = self
                .vertices
                .get(v)
                .ok_or(TopologyError::EntityNotFound("vertex"))?;
            positions.push(data.position);
        }

        let mut normal = Vector3::zeros();
        for i in 0..positions.len() {
            let a = &positions[i];
            let b = &positions[(i + 1) % positions.len()];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        unit(normal)
            .map_err(|_| GeometryError::Degenerate("face boundary has zero area".into()).into())
    }

    /// Appends the consecutive vertex pairs of one loop, including the
    /// wrap-around pair.
    fn collect_loop_pairs(
        &self,
        vertices: &[VertexId],
        pairs: &mut Vec<(VertexId, VertexId)>,
    ) -> Result<(), UnfoldError> {
        if vertices.len() < 3 {
            return Err(TopologyError::InvalidTopology(
                "face loop needs at least 3 vertices".into(),
            )
            .into());
        }
        for i in 0..vertices.len() {
            let a = vertices[i];
            let b = vertices[(i + 1) % vertices.len()];
            if a == b {
                return Err(TopologyError::InvalidTopology(format!(
                    "face loop repeats vertex {a:?}"
                ))
                .into());
            }
            if !self.vertices.contains_key(a) {
                return Err(TopologyError::EntityNotFound("vertex").into());
            }
            pairs.push((a, b));
        }
        Ok(())
    }

    /// Returns the edge for a vertex pair, creating it on first use.
    fn intern_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&edge) = self.edge_lookup.get(&key) {
            return edge;
        }
        let edge = self.edges.insert(EdgeData {
            vertices: [a, b],
            faces: Vec::new(),
        });
        self.edge_lookup.insert(key, edge);
        edge
    }
}

impl MeshQuery for PolygonMesh {
    fn adjacent_faces(&self, face: FaceId) -> Result<Vec<FaceId>, TopologyError> {
        let data = self
            .faces
            .get(face)
            .ok_or(TopologyError::EntityNotFound("face"))?;
        let mut seen = HashSet::new();
        let mut neighbors = Vec::new();
        for &edge in &data.edges {
            for &other in &self.edges[edge].faces {
                if other != face && seen.insert(other) {
                    neighbors.push(other);
                }
            }
        }
        Ok(neighbors)
    }

    fn face_edges(&self, face: FaceId) -> Result<Vec<EdgeId>, TopologyError> {
        self.faces
            .get(face)
            .map(|data| data.edges.clone())
            .ok_or(TopologyError::EntityNotFound("face"))
    }

    fn edge_vertices(&self, edge: EdgeId) -> Result<[VertexId; 2], TopologyError> {
        self.edges
            .get(edge)
            .map(|data| data.vertices)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    fn vertex_position(&self, vertex: VertexId) -> Result<Point3, TopologyError> {
        self.vertices
            .get(vertex)
            .map(|data| data.position)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    fn face_normal(&self, face: FaceId) -> Result<Vector3, TopologyError> {
        self.faces
            .get(face)
            .map(|data| data.normal)
            .ok_or(TopologyError::EntityNotFound("face"))
    }
}
