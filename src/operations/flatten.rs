use tracing::debug;

use crate::error::{GeometryError, Result, TopologyError};
use crate::math::{unit, PlaneFrame, Point3, Vector3};
use crate::patch::PatchBuilder;
use crate::topology::{EdgeId, FaceId, MeshQuery, VertexId};
use crate::tree::{FaceTree, NodeIndex};

/// The flattened image of the edge joining a face to its parent.
///
/// `origin` and `e1` live in layout space: they are where the shared edge
/// ended up after the parent was flattened, and they anchor the child's
/// frame so the edge is preserved.
#[derive(Debug, Clone)]
struct ConnectionEdge {
    edge: EdgeId,
    origin: Point3,
    e1: Vector3,
}

/// Unfolds a [`FaceTree`] into a flat layout.
///
/// Walks the tree from the root, rigidly mapping each face's 3D geometry
/// into the layout plane (y = 0) so that every face attaches to its parent
/// along their shared edge with lengths preserved. The root face is
/// anchored with its first edge at the layout origin, pointing along +x.
///
/// Each boundary or hole cycle of each face is emitted to the
/// [`PatchBuilder`] as one ordered vertex loop, in tree-traversal order.
pub struct FlattenTree<'a> {
    tree: &'a FaceTree,
}

impl<'a> FlattenTree<'a> {
    /// Creates a new `FlattenTree` operation.
    #[must_use]
    pub fn new(tree: &'a FaceTree) -> Self {
        Self { tree }
    }

    /// Executes the flattening, emitting geometry to `builder`.
    ///
    /// # Errors
    ///
    /// Returns an error on zero-length edges, faces whose edge cycles do
    /// not close, or mesh query failures. The builder may have received
    /// part of the patch by then; callers wanting atomicity flatten into a
    /// [`PatchRecorder`](crate::patch::PatchRecorder) and replay on
    /// success.
    pub fn execute(&self, mesh: &dyn MeshQuery, builder: &mut dyn PatchBuilder) -> Result<()> {
        let root_face = self.tree.face(self.tree.root());
        let root_edges = mesh.face_edges(root_face)?;
        let Some(&anchor) = root_edges.first() else {
            return Err(
                TopologyError::InvalidTopology(format!("face {root_face:?} has no edges")).into(),
            );
        };
        debug!(?root_face, faces = self.tree.face_count(), "flattening patch");

        let mut stack: Vec<(NodeIndex, ConnectionEdge)> = vec![(
            self.tree.root(),
            ConnectionEdge {
                edge: anchor,
                origin: Point3::origin(),
                e1: Vector3::x(),
            },
        )];

        while let Some((node, connection)) = stack.pop() {
            let face = self.tree.face(node);
            let local = face_frame(mesh, connection.edge, face)?;
            // The layout frame is derived from the connection edge alone:
            // output is constrained to one shared plane, not per-face
            // orientation.
            let e2 = connection.e1.cross(&Vector3::y());
            let layout = PlaneFrame::new(connection.origin, connection.e1, e2)?;

            let map = |vertex: VertexId| -> Result<Point3> {
                let position = mesh.vertex_position(vertex)?;
                Ok(layout.to_global(&local.to_local(&position)))
            };

            for cycle in edge_cycles(mesh, face)? {
                let vertices = vertex_cycle(mesh, &cycle)?;
                let mapped = vertices.into_iter().map(map).collect::<Result<Vec<_>>>()?;
                builder.add_face(face, &mapped);
            }

            let children = self.tree.children(node);
            let mut next = Vec::with_capacity(children.len());
            for &child in children {
                let shared = shared_edge(mesh, face, self.tree.face(child))?;
                let [a, b] = mesh.edge_vertices(shared)?;
                let begin = map(a)?;
                let end = map(b)?;
                let e1 =
                    unit(end - begin).map_err(|_| GeometryError::DegenerateEdge { edge: shared })?;
                next.push((
                    child,
                    ConnectionEdge {
                        edge: shared,
                        origin: begin,
                        e1,
                    },
                ));
            }
            // Reversed push so the first child is flattened first.
            for entry in next.into_iter().rev() {
                stack.push(entry);
            }
        }
        Ok(())
    }
}

/// Builds the face-plane frame anchored on one of the face's own edges.
///
/// Origin at the edge's first endpoint, `e1` along the edge, `e2` along
/// `normal × e1`. With counter-clockwise winding `e2` points into the face
/// and `(e1, e2, normal)` is right-handed.
fn face_frame(mesh: &dyn MeshQuery, edge: EdgeId, face: FaceId) -> Result<PlaneFrame> {
    let [a, b] = mesh.edge_vertices(edge)?;
    let begin = mesh.vertex_position(a)?;
    let end = mesh.vertex_position(b)?;
    let e1 = unit(end - begin).map_err(|_| GeometryError::DegenerateEdge { edge })?;
    let normal = mesh.face_normal(face)?;
    let e2 = normal.cross(&e1);
    PlaneFrame::new(begin, e1, e2)
}

/// Returns the first edge of `face` (in its reported edge order) that
/// `other` also owns.
fn shared_edge(mesh: &dyn MeshQuery, face: FaceId, other: FaceId) -> Result<EdgeId> {
    let other_edges = mesh.face_edges(other)?;
    mesh.face_edges(face)?
        .into_iter()
        .find(|edge| other_edges.contains(edge))
        .ok_or_else(|| TopologyError::NoSharedEdge { face, other }.into())
}

/// Partitions a face's edge list into its cycles.
///
/// A cycle is a maximal run of consecutive edges sharing an endpoint; a
/// new run starts wherever adjacency breaks. The first cycle is the outer
/// boundary, any further cycles are holes. Every cycle's first and last
/// edge must share a vertex; a face violating that is malformed and gets
/// rejected rather than flattened into degenerate geometry.
fn edge_cycles(mesh: &dyn MeshQuery, face: FaceId) -> Result<Vec<Vec<EdgeId>>> {
    let edges = mesh.face_edges(face)?;
    let Some((&first, rest)) = edges.split_first() else {
        return Err(TopologyError::InvalidTopology(format!("face {face:?} has no edges")).into());
    };

    let mut cycles: Vec<Vec<EdgeId>> = Vec::new();
    let mut current = vec![first];
    let mut prev = mesh.edge_vertices(first)?;
    for &edge in rest {
        let ends = mesh.edge_vertices(edge)?;
        if shares_vertex(prev, ends) {
            current.push(edge);
        } else {
            cycles.push(current);
            current = vec![edge];
        }
        prev = ends;
    }
    cycles.push(current);

    for cycle in &cycles {
        let Some((&head, _)) = cycle.split_first() else {
            continue;
        };
        let Some(&tail) = cycle.last() else {
            continue;
        };
        if !shares_vertex(mesh.edge_vertices(head)?, mesh.edge_vertices(tail)?) {
            return Err(TopologyError::OpenEdgeCycle { face }.into());
        }
    }
    Ok(cycles)
}

/// Orders the vertices of one edge cycle along its traversal direction.
///
/// For each edge the endpoint shared with the previous edge is taken,
/// starting from the wrap-around pair of the last and first edges.
fn vertex_cycle(mesh: &dyn MeshQuery, cycle: &[EdgeId]) -> Result<Vec<VertexId>> {
    let Some(&last) = cycle.last() else {
        return Ok(Vec::new());
    };
    let mut prev = mesh.edge_vertices(last)?;
    let mut vertices = Vec::with_capacity(cycle.len());
    for &edge in cycle {
        let [a, b] = mesh.edge_vertices(edge)?;
        if prev.contains(&a) {
            vertices.push(a);
        } else {
            vertices.push(b);
        }
        prev = [a, b];
    }
    Ok(vertices)
}

fn shares_vertex(a: [VertexId; 2], b: [VertexId; 2]) -> bool {
    a.iter().any(|v| b.contains(v))
}
