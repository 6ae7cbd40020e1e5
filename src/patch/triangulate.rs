use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::FixedFaceHandle;
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{PatchError, Result};
use crate::math::Point3;
use crate::topology::FaceId;

use super::PatchBuilder;

/// A triangle mesh of the flattened layout.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions, in the layout plane.
    pub vertices: Vec<Point3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

/// One flattened polygon: a face's outer boundary plus its holes.
#[derive(Debug)]
struct FlatPolygon {
    face: FaceId,
    loops: Vec<Vec<Point3>>,
}

/// A [`PatchBuilder`] that triangulates the flattened layout.
///
/// Cycles are grouped per face as they arrive (the flattener emits all
/// cycles of one face consecutively, outer boundary first). `into_mesh`
/// then runs a constrained Delaunay triangulation per polygon, keeping
/// only the triangles inside the boundary and outside the holes.
///
/// Input cycles are expected in the layout plane (y = 0) the flattener
/// produces; the `u`/`v` triangulation coordinates are `x`/`z`.
#[derive(Debug, Default)]
pub struct TriangulatingPatchBuilder {
    polygons: Vec<FlatPolygon>,
}

impl PatchBuilder for TriangulatingPatchBuilder {
    fn add_face(&mut self, face: FaceId, cycle: &[Point3]) {
        match self.polygons.last_mut() {
            Some(polygon) if polygon.face == face => polygon.loops.push(cycle.to_vec()),
            _ => self.polygons.push(FlatPolygon {
                face,
                loops: vec![cycle.to_vec()],
            }),
        }
    }
}

impl TriangulatingPatchBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of polygons received so far.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Triangulates everything received, producing one mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if a cycle has fewer than three points or a
    /// triangulation insert fails.
    pub fn into_mesh(self) -> Result<TriangleMesh> {
        let mut mesh = TriangleMesh::default();
        for polygon in &self.polygons {
            triangulate_polygon(polygon, &mut mesh)?;
        }
        Ok(mesh)
    }
}

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

#[allow(clippy::cast_possible_truncation)]
fn triangulate_polygon(polygon: &FlatPolygon, mesh: &mut TriangleMesh) -> Result<()> {
    let mut cdt = Cdt::new();
    for cycle in &polygon.loops {
        let points: Vec<SpadePoint2<f64>> =
            cycle.iter().map(|p| SpadePoint2::new(p.x, p.z)).collect();
        insert_constraint_loop(&mut cdt, &points)?;
    }

    let interior = classify_interior_faces(&cdt);

    let mut vertex_map: HashMap<usize, u32> = HashMap::new();
    for face_handle in cdt.inner_faces() {
        if !interior.contains(&face_handle.fix().index()) {
            continue;
        }
        let mut triangle = [0u32; 3];
        for (i, vertex_handle) in face_handle.vertices().iter().enumerate() {
            let key = vertex_handle.fix().index();
            let index = if let Some(&existing) = vertex_map.get(&key) {
                existing
            } else {
                let position = vertex_handle.position();
                let index = mesh.vertices.len() as u32;
                mesh.vertices.push(Point3::new(position.x, 0.0, position.y));
                vertex_map.insert(key, index);
                index
            };
            triangle[i] = index;
        }
        mesh.indices.push(triangle);
    }
    Ok(())
}

/// Inserts a closed cycle as constraint edges into the CDT.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    if points.len() < 3 {
        return Err(
            PatchError::TriangulationFailed("cycle needs at least 3 points".into()).into(),
        );
    }

    let mut handles = Vec::with_capacity(points.len());
    for &point in points {
        let handle = cdt.insert(point).map_err(|e: InsertionError| {
            PatchError::TriangulationFailed(format!("CDT insert: {e}"))
        })?;
        handles.push(handle);
    }
    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from != to {
            cdt.add_constraint(from, to);
        }
    }
    Ok(())
}

/// Classifies which CDT faces lie inside the polygon.
///
/// Flood-fill from the faces touching the outer (infinite) face, counting
/// crossed constraint edges: odd depth means inside the boundary and
/// outside any hole.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<spade::handles::InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() == outer_fix {
            if let Some(inner) = edge.rev().face().as_inner() {
                let index = inner.fix().index();
                if depth_map.contains_key(&index) {
                    continue;
                }
                let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
                depth_map.insert(index, depth);
                if depth % 2 == 1 {
                    interior.insert(index);
                }
                queue.push_back((inner.fix(), depth));
            }
        }
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        for edge in cdt.face(face_fix).adjacent_edges() {
            if let Some(neighbor) = edge.rev().face().as_inner() {
                let index = neighbor.fix().index();
                if depth_map.contains_key(&index) {
                    continue;
                }
                let crossed = cdt.is_constraint_edge(edge.as_undirected().fix());
                let new_depth = depth + u32::from(crossed);
                depth_map.insert(index, new_depth);
                if new_depth % 2 == 1 {
                    interior.insert(index);
                }
                queue.push_back((neighbor.fix(), new_depth));
            }
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slotmap::SlotMap;

    fn layout(x: f64, z: f64) -> Point3 {
        Point3::new(x, 0.0, z)
    }

    fn face_ids(n: usize) -> Vec<FaceId> {
        let mut arena: SlotMap<FaceId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    fn mesh_area(mesh: &TriangleMesh) -> f64 {
        mesh.indices
            .iter()
            .map(|t| {
                let a = mesh.vertices[t[0] as usize];
                let b = mesh.vertices[t[1] as usize];
                let c = mesh.vertices[t[2] as usize];
                0.5 * (b - a).cross(&(c - a)).norm()
            })
            .sum()
    }

    #[test]
    fn square_triangulates_into_two_triangles() {
        let faces = face_ids(1);
        let mut builder = TriangulatingPatchBuilder::new();
        builder.add_face(
            faces[0],
            &[
                layout(0.0, 0.0),
                layout(1.0, 0.0),
                layout(1.0, 1.0),
                layout(0.0, 1.0),
            ],
        );
        let mesh = builder.into_mesh().unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 2);
        assert_relative_eq!(mesh_area(&mesh), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn hole_is_left_untriangulated() {
        let faces = face_ids(1);
        let mut builder = TriangulatingPatchBuilder::new();
        builder.add_face(
            faces[0],
            &[
                layout(0.0, 0.0),
                layout(4.0, 0.0),
                layout(4.0, 4.0),
                layout(0.0, 4.0),
            ],
        );
        builder.add_face(
            faces[0],
            &[layout(1.0, 1.0), layout(2.0, 2.0), layout(3.0, 1.0)],
        );
        assert_eq!(builder.polygon_count(), 1);

        let mesh = builder.into_mesh().unwrap();
        // Outer area 16, hole area 1.
        assert_relative_eq!(mesh_area(&mesh), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn faces_triangulate_independently() {
        let faces = face_ids(2);
        let mut builder = TriangulatingPatchBuilder::new();
        builder.add_face(
            faces[0],
            &[
                layout(0.0, 0.0),
                layout(1.0, 0.0),
                layout(1.0, 1.0),
                layout(0.0, 1.0),
            ],
        );
        builder.add_face(
            faces[1],
            &[
                layout(1.0, 0.0),
                layout(2.0, 0.0),
                layout(2.0, 1.0),
                layout(1.0, 1.0),
            ],
        );
        assert_eq!(builder.polygon_count(), 2);

        let mesh = builder.into_mesh().unwrap();
        assert_eq!(mesh.indices.len(), 4);
        assert_relative_eq!(mesh_area(&mesh), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn short_cycle_is_rejected() {
        let faces = face_ids(1);
        let mut builder = TriangulatingPatchBuilder::new();
        builder.add_face(faces[0], &[layout(0.0, 0.0), layout(1.0, 0.0)]);
        assert!(builder.into_mesh().is_err());
    }
}
