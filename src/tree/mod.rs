mod strategy;

pub use strategy::{DepthFirst, SpanningStrategy};

use std::collections::HashSet;

use crate::error::{Result, TopologyError};
use crate::topology::FaceId;

/// Index of a node within a [`FaceTree`] arena.
///
/// Only valid for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIndex(usize);

#[derive(Debug)]
struct TreeNode {
    face: FaceId,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

/// A rooted tree over mesh faces.
///
/// Every non-root node attaches to its parent across exactly one shared
/// mesh edge; flattening walks this tree, unfolding each face against its
/// parent. Nodes live in a flat arena and reference each other by index,
/// so parent back-references need no shared ownership.
#[derive(Debug)]
pub struct FaceTree {
    nodes: Vec<TreeNode>,
    faces: HashSet<FaceId>,
}

impl FaceTree {
    /// Creates a tree containing only the root face.
    #[must_use]
    pub fn new(root: FaceId) -> Self {
        Self {
            nodes: vec![TreeNode {
                face: root,
                parent: None,
                children: Vec::new(),
            }],
            faces: HashSet::from([root]),
        }
    }

    /// Adds `face` as the last child of `parent` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if the face already appears anywhere in the tree.
    pub fn add_child(&mut self, parent: NodeIndex, face: FaceId) -> Result<NodeIndex> {
        if !self.faces.insert(face) {
            return Err(TopologyError::FaceAlreadyInTree { face }.into());
        }
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(TreeNode {
            face,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(index);
        Ok(index)
    }

    /// Returns the root node index.
    #[must_use]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Returns the face at a node.
    #[must_use]
    pub fn face(&self, node: NodeIndex) -> FaceId {
        self.nodes[node.0].face
    }

    /// Returns the children of a node, in insertion order.
    #[must_use]
    pub fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.nodes[node.0].children
    }

    /// Returns the parent of a node, or `None` for the root.
    #[must_use]
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.nodes[node.0].parent
    }

    /// Number of faces in the tree.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of parent-child links. Always `face_count() - 1`.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if the face appears in the tree.
    #[must_use]
    pub fn contains(&self, face: FaceId) -> bool {
        self.faces.contains(&face)
    }

    /// Returns all faces in pre-order (parent before children, first
    /// child's subtree before the second's).
    #[must_use]
    pub fn faces(&self) -> Vec<FaceId> {
        let mut result = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            result.push(self.face(node));
            for &child in self.children(node).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn face_ids(n: usize) -> Vec<FaceId> {
        let mut arena: SlotMap<FaceId, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn root_only_tree() {
        let faces = face_ids(1);
        let tree = FaceTree::new(faces[0]);
        assert_eq!(tree.face_count(), 1);
        assert_eq!(tree.edge_count(), 0);
        assert_eq!(tree.face(tree.root()), faces[0]);
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn duplicate_face_is_rejected() {
        let faces = face_ids(2);
        let mut tree = FaceTree::new(faces[0]);
        let root = tree.root();
        tree.add_child(root, faces[1]).unwrap();
        assert!(tree.add_child(root, faces[1]).is_err());
        assert!(tree.add_child(root, faces[0]).is_err());
    }

    #[test]
    fn preorder_visits_first_subtree_first() {
        let faces = face_ids(5);
        let mut tree = FaceTree::new(faces[0]);
        let root = tree.root();
        let a = tree.add_child(root, faces[1]).unwrap();
        tree.add_child(root, faces[2]).unwrap();
        tree.add_child(a, faces[3]).unwrap();
        tree.add_child(a, faces[4]).unwrap();

        let order = tree.faces();
        assert_eq!(order, vec![faces[0], faces[1], faces[3], faces[4], faces[2]]);
    }

    #[test]
    fn parent_links_are_consistent() {
        let faces = face_ids(3);
        let mut tree = FaceTree::new(faces[0]);
        let root = tree.root();
        let a = tree.add_child(root, faces[1]).unwrap();
        let b = tree.add_child(a, faces[2]).unwrap();
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.children(root), &[a]);
    }
}
