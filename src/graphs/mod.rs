use std::ops::Range;

use self::edge::{DirectedEdge, DirectedWeightedEdge};

pub mod edge;
pub mod error;
pub mod graph_factory;
pub mod path;
pub mod reversible_vec_graph;

pub type VertexId = u32;
pub type Weight = u32;
/// Cost of a path. Any simple path over `u32` weights fits.
pub type Distance = u64;

/// Read-only view on a directed weighted graph with dense vertex ids in
/// `0..number_of_vertices()`.
///
/// There is intentionally no way to change a graph through this trait. A
/// single graph can be shared by any number of concurrent searches.
pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        self.vertices()
            .map(|vertex| self.out_edges(vertex).len() as u32)
            .sum::<u32>()
    }

    fn vertices(&self) -> Range<VertexId> {
        0..self.number_of_vertices()
    }

    /// Edges leaving `source`, sorted by head and then by weight.
    fn out_edges(
        &self,
        source: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_>;

    /// Edges entering `target`, keeping their original orientation (so
    /// `edge.head() == target`). Sorted by tail and then by weight.
    fn in_edges(
        &self,
        target: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_>;

    /// Smallest weight over all parallel edges from `edge.tail()` to
    /// `edge.head()`.
    fn get_edge_weight(&self, edge: &DirectedEdge) -> Option<Weight> {
        self.out_edges(edge.tail())
            .filter(|out_edge| out_edge.head() == edge.head())
            .map(|out_edge| out_edge.weight())
            .min()
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.number_of_vertices()
    }
}

/// Small graph used throughout the tests. Distances towards vertex 6 are
/// `[8, 6, 8, 5, 3, 2, 0]` and the unique shortest path from 0 to 6 is
/// `0 -> 3 -> 5 -> 6` with weight 8.
#[cfg(test)]
pub(crate) fn small_test_graph() -> reversible_vec_graph::ReversibleVecGraph {
    let edges = [
        (0, 1, 4),
        (0, 2, 1),
        (0, 3, 3),
        (1, 3, 1),
        (1, 4, 3),
        (2, 4, 5),
        (2, 5, 6),
        (3, 4, 3),
        (3, 5, 3),
        (4, 6, 3),
        (5, 6, 2),
        (6, 0, 1),
    ]
    .into_iter()
    .map(|(tail, head, weight)| DirectedWeightedEdge::new(tail, head, weight))
    .collect::<Vec<_>>();

    reversible_vec_graph::ReversibleVecGraph::from_edges(7, &edges).unwrap()
}
