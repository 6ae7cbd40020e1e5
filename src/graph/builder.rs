use std::collections::HashMap;
use std::hash::Hash;

use super::{Graph, GraphEdge};

/// Incrementally builds a [`Graph`] with deduplicated nodes and edges.
///
/// Nodes are interned by value: adding a value twice reuses the existing
/// node. Edges are interned by their unordered endpoint pair, so adding a
/// connection that already exists (in either direction) is a no-op.
#[derive(Debug)]
pub struct GraphBuilder<T> {
    nodes: Vec<T>,
    node_map: HashMap<T, usize>,
    edge_lists: Vec<Vec<usize>>,
    edges: Vec<GraphEdge>,
    edge_map: HashMap<(usize, usize), usize>,
}

impl<T: Eq + Hash + Clone> GraphBuilder<T> {
    /// Creates a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_map: HashMap::new(),
            edge_lists: Vec::new(),
            edges: Vec::new(),
            edge_map: HashMap::new(),
        }
    }

    /// Ensures `value` exists as a node and connects it to every value in
    /// `connected`, creating missing nodes and edges as needed.
    ///
    /// A value connected to itself is ignored.
    pub fn add_node(&mut self, value: T, connected: impl IntoIterator<Item = T>) {
        let this = self.intern_node(value);
        for other_value in connected {
            let other = self.intern_node(other_value);
            if other != this {
                self.intern_edge(this, other);
            }
        }
    }

    /// Consumes the builder, producing the immutable graph snapshot.
    #[must_use]
    pub fn into_graph(self) -> Graph<T> {
        let neighbor_lists = self
            .edge_lists
            .iter()
            .enumerate()
            .map(|(node, list)| {
                list.iter()
                    .filter_map(|&edge| self.edges[edge].other(node))
                    .collect()
            })
            .collect();
        Graph::new(self.nodes, self.edges, neighbor_lists)
    }

    fn intern_node(&mut self, value: T) -> usize {
        if let Some(&index) = self.node_map.get(&value) {
            return index;
        }
        let index = self.nodes.len();
        self.nodes.push(value.clone());
        self.node_map.insert(value, index);
        self.edge_lists.push(Vec::new());
        index
    }

    fn intern_edge(&mut self, first: usize, second: usize) -> usize {
        let key = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        if let Some(&index) = self.edge_map.get(&key) {
            return index;
        }
        let index = self.edges.len();
        self.edges.push(GraphEdge::new(first, second));
        self.edge_map.insert(key, index);
        self.edge_lists[first].push(index);
        self.edge_lists[second].push(index);
        index
    }
}

impl<T: Eq + Hash + Clone> Default for GraphBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_deduplicated() {
        let mut builder = GraphBuilder::new();
        builder.add_node(1, [2, 3]);
        builder.add_node(2, [1]);
        builder.add_node(3, []);
        let graph = builder.into_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes(), &[1, 2, 3]);
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut first = GraphBuilder::new();
        first.add_node("a", ["b", "c"]);
        let once = first.into_graph();

        let mut second = GraphBuilder::new();
        second.add_node("a", ["b", "c"]);
        second.add_node("a", ["b", "c"]);
        let twice = second.into_graph();

        assert_eq!(once.nodes(), twice.nodes());
        assert_eq!(once.edges(), twice.edges());
    }

    #[test]
    fn reversed_edge_is_not_duplicated() {
        let mut builder = GraphBuilder::new();
        builder.add_node(1, [2]);
        builder.add_node(2, [1]);
        let graph = builder.into_graph();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn self_connection_is_ignored() {
        let mut builder = GraphBuilder::new();
        builder.add_node(1, [1, 2]);
        let graph = builder.into_graph();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0), &[1]);
    }

    #[test]
    fn neighbors_follow_edge_creation_order() {
        let mut builder = GraphBuilder::new();
        builder.add_node(10, [20, 30, 40]);
        let graph = builder.into_graph();
        let index = graph.index_of(&10).unwrap();
        let values: Vec<i32> = graph.neighbors(index).iter().map(|&n| *graph.node(n)).collect();
        assert_eq!(values, vec![20, 30, 40]);
    }
}
