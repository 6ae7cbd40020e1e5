use std::collections::HashSet;

use crate::error::{OperationError, Result};
use crate::graph::GraphBuilder;
use crate::topology::{FaceId, MeshQuery};

use super::{FaceTree, NodeIndex};

/// A policy for growing a [`FaceTree`] over a connected set of faces.
///
/// Strategies differ only in which adjacent face becomes the next child at
/// each step; all of them must produce a tree that contains every input
/// face exactly once, every child attached to its parent across a shared
/// mesh edge.
pub trait SpanningStrategy {
    /// Builds a spanning tree over `component`.
    ///
    /// The input must be non-empty and adjacency-connected; the first face
    /// becomes the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not connected, or if a
    /// mesh query fails.
    fn build(&self, component: &[FaceId], mesh: &dyn MeshQuery) -> Result<FaceTree>;
}

/// The baseline depth-first strategy.
///
/// At each visited face, every not-yet-claimed neighbor is claimed as a
/// child in mesh-reported adjacency order, then the first child's subtree
/// is grown before the second's. Child order therefore follows whatever
/// order the mesh reports adjacency in: reproducible for a fixed mesh, not
/// stable across mesh representations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl SpanningStrategy for DepthFirst {
    fn build(&self, component: &[FaceId], mesh: &dyn MeshQuery) -> Result<FaceTree> {
        let Some(&root) = component.first() else {
            return Err(OperationError::EmptyFaceSet.into());
        };
        let in_component: HashSet<FaceId> = component.iter().copied().collect();

        let mut builder = GraphBuilder::new();
        for &face in component {
            let neighbors: Vec<FaceId> = mesh
                .adjacent_faces(face)?
                .into_iter()
                .filter(|n| in_component.contains(n))
                .collect();
            builder.add_node(face, neighbors);
        }
        let graph = builder.into_graph();

        // The root was interned first, so it sits at graph index 0.
        let mut tree = FaceTree::new(root);
        let mut visited = vec![false; graph.node_count()];
        visited[0] = true;
        let mut stack: Vec<(usize, NodeIndex)> = vec![(0, tree.root())];

        while let Some((node, tree_node)) = stack.pop() {
            let mut claimed: Vec<(usize, NodeIndex)> = Vec::new();
            for &neighbor in graph.neighbors(node) {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    let child = tree.add_child(tree_node, *graph.node(neighbor))?;
                    claimed.push((neighbor, child));
                }
            }
            // Reversed push so the first claimed child is grown first.
            for entry in claimed.into_iter().rev() {
                stack.push(entry);
            }
        }

        if tree.face_count() != component.len() {
            return Err(OperationError::DisconnectedFaces {
                expected: component.len(),
                reached: tree.face_count(),
            }
            .into());
        }
        Ok(tree)
    }
}
