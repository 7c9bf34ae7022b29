//! Undirected simple graph produced by the pairing samplers.

use std::{
    collections::{HashMap, HashSet},
    hash::Hash,
};

/// Undirected graph without self-loops or parallel edges.
///
/// Edges are reported in insertion order; adjacency is kept per vertex so
/// neighbour and degree queries are constant-time lookups.
///
/// # Examples
/// ```
/// use sortition_core::PairGraph;
///
/// let mut graph = PairGraph::with_vertices(["a", "b", "c"]);
/// assert!(graph.add_edge("a", "b"));
/// assert!(!graph.add_edge("b", "a"));
/// assert!(!graph.add_edge("c", "c"));
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.degree(&"c"), 0);
/// ```
#[derive(Clone, Debug)]
pub struct PairGraph<T> {
    adjacency: HashMap<T, HashSet<T>>,
    edges: Vec<(T, T)>,
}

impl<T> Default for PairGraph<T> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            edges: Vec::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> PairGraph<T> {
    /// Creates an edgeless graph with no vertices.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an edgeless graph over `vertices`; repeats collapse.
    #[must_use]
    pub fn with_vertices(vertices: impl IntoIterator<Item = T>) -> Self {
        let adjacency = vertices
            .into_iter()
            .map(|vertex| (vertex, HashSet::new()))
            .collect();
        Self {
            adjacency,
            edges: Vec::new(),
        }
    }

    /// Adds the undirected edge `{a, b}`, registering unknown endpoints.
    ///
    /// Returns `false`, leaving the graph untouched, for self-loops and
    /// edges that already exist.
    pub fn add_edge(&mut self, a: T, b: T) -> bool {
        if a == b || self.contains_edge(&a, &b) {
            return false;
        }
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency
            .entry(b.clone())
            .or_default()
            .insert(a.clone());
        self.edges.push((a, b));
        true
    }

    /// Whether `a` and `b` are adjacent.
    #[must_use]
    pub fn contains_edge(&self, a: &T, b: &T) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbours| neighbours.contains(b))
    }

    /// Vertices adjacent to `vertex`.
    pub fn neighbors(&self, vertex: &T) -> impl Iterator<Item = &T> {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flat_map(HashSet::iter)
    }

    /// Number of edges incident to `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: &T) -> usize {
        self.adjacency.get(vertex).map_or(0, HashSet::len)
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of registered vertices, isolated ones included.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Edges in insertion order, each as `(first endpoint, second endpoint)`.
    #[must_use]
    pub fn edges(&self) -> &[(T, T)] {
        &self.edges
    }

    /// Registered vertices in arbitrary order.
    pub fn vertices(&self) -> impl Iterator<Item = &T> {
        self.adjacency.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = PairGraph::new();
        assert!(graph.add_edge(1, 2));
        assert!(graph.contains_edge(&1, &2));
        assert!(graph.contains_edge(&2, &1));
        assert_eq!(graph.neighbors(&2).copied().collect::<Vec<_>>(), [1]);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn rejected_edges_leave_graph_unchanged() {
        let mut graph = PairGraph::with_vertices([1, 2, 3]);
        assert!(graph.add_edge(1, 2));
        assert!(!graph.add_edge(2, 1));
        assert!(!graph.add_edge(3, 3));
        assert_eq!(graph.edges(), [(1, 2)]);
        assert_eq!(graph.degree(&3), 0);
        assert_eq!(graph.neighbors(&3).count(), 0);
    }

    #[test]
    fn degrees_sum_to_twice_the_edge_count() {
        let mut graph = PairGraph::with_vertices(0..5);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)] {
            assert!(graph.add_edge(a, b));
        }
        let total: usize = (0..5).map(|vertex| graph.degree(&vertex)).sum();
        assert_eq!(total, 2 * graph.edge_count());
    }
}
