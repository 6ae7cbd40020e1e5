use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::topology::{FaceId, MeshQuery};

/// Partitions a face selection into maximal adjacency-connected subsets.
///
/// Two faces land in the same subset iff a path of shared-edge adjacency
/// connects them using only selected faces.
pub struct ConnectedFaces {
    selection: Vec<FaceId>,
}

impl ConnectedFaces {
    /// Creates a new `ConnectedFaces` operation.
    #[must_use]
    pub fn new(selection: Vec<FaceId>) -> Self {
        Self { selection }
    }

    /// Executes the partition.
    ///
    /// Seeds are taken in selection order; each component is fully
    /// consumed by a depth-first expansion before the next seed is
    /// picked. Faces within a component come out in traversal pre-order,
    /// components in order of discovery; neither ordering is stable
    /// across mesh-topology changes. An empty selection yields an empty
    /// result.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected face is not part of the mesh.
    pub fn execute(&self, mesh: &dyn MeshQuery) -> Result<Vec<Vec<FaceId>>> {
        let mut remaining: HashSet<FaceId> = self.selection.iter().copied().collect();
        let mut components = Vec::new();

        for &seed in &self.selection {
            if !remaining.remove(&seed) {
                continue;
            }
            let mut component = Vec::new();
            let mut stack = vec![seed];
            while let Some(face) = stack.pop() {
                component.push(face);
                for neighbor in mesh.adjacent_faces(face)? {
                    if remaining.remove(&neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
            components.push(component);
        }

        debug!(
            faces = self.selection.len(),
            components = components.len(),
            "partitioned face selection"
        );
        Ok(components)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::topology::PolygonMesh;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn triangle_at(mesh: &mut PolygonMesh, x: f64) -> FaceId {
        let v0 = mesh.add_vertex(p(x, 0.0, 0.0));
        let v1 = mesh.add_vertex(p(x + 1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(p(x + 1.0, 1.0, 0.0));
        mesh.add_face(&[v0, v1, v2]).unwrap()
    }

    #[test]
    fn empty_selection_yields_empty_result() {
        let mesh = PolygonMesh::new();
        let components = ConnectedFaces::new(Vec::new()).execute(&mesh).unwrap();
        assert!(components.is_empty());
    }

    #[test]
    fn two_disjoint_triangles_yield_two_components() {
        let mut mesh = PolygonMesh::new();
        let a = triangle_at(&mut mesh, 0.0);
        let b = triangle_at(&mut mesh, 5.0);

        let components = ConnectedFaces::new(vec![a, b]).execute(&mesh).unwrap();
        assert_eq!(components, vec![vec![a], vec![b]]);
    }

    #[test]
    fn partition_is_exact() {
        // 3-square strip plus an isolated triangle: selection splits into
        // exactly those two components, no face lost or duplicated.
        let mut mesh = PolygonMesh::new();
        let v: Vec<_> = (0..4)
            .map(|i| {
                let x = f64::from(i);
                (
                    mesh.add_vertex(p(x, 0.0, 0.0)),
                    mesh.add_vertex(p(x, 1.0, 0.0)),
                )
            })
            .collect();
        let mut strip = Vec::new();
        for w in v.windows(2) {
            strip.push(mesh.add_face(&[w[0].0, w[1].0, w[1].1, w[0].1]).unwrap());
        }
        let lone = triangle_at(&mut mesh, 10.0);

        let mut selection = strip.clone();
        selection.push(lone);
        let components = ConnectedFaces::new(selection.clone())
            .execute(&mesh)
            .unwrap();

        assert_eq!(components.len(), 2);
        let mut all: Vec<FaceId> = components.iter().flatten().copied().collect();
        assert_eq!(all.len(), selection.len());
        all.sort_unstable();
        let mut expected = selection;
        expected.sort_unstable();
        assert_eq!(all, expected);
    }

    #[test]
    fn adjacency_outside_selection_does_not_merge() {
        // Two squares joined only through a middle square that is not
        // selected: they must stay separate components.
        let mut mesh = PolygonMesh::new();
        let v: Vec<_> = (0..4)
            .map(|i| {
                let x = f64::from(i);
                (
                    mesh.add_vertex(p(x, 0.0, 0.0)),
                    mesh.add_vertex(p(x, 1.0, 0.0)),
                )
            })
            .collect();
        let mut faces = Vec::new();
        for w in v.windows(2) {
            faces.push(mesh.add_face(&[w[0].0, w[1].0, w[1].1, w[0].1]).unwrap());
        }

        let components = ConnectedFaces::new(vec![faces[0], faces[2]])
            .execute(&mesh)
            .unwrap();
        assert_eq!(components, vec![vec![faces[0]], vec![faces[2]]]);
    }

    #[test]
    fn duplicate_selection_entries_are_ignored() {
        let mut mesh = PolygonMesh::new();
        let a = triangle_at(&mut mesh, 0.0);
        let components = ConnectedFaces::new(vec![a, a]).execute(&mesh).unwrap();
        assert_eq!(components, vec![vec![a]]);
    }
}
