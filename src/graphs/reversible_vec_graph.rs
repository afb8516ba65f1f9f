use std::slice::Iter;

use serde::{Deserialize, Serialize};

use super::{
    edge::{DirectedHeadlessWeightedEdge, DirectedTaillessWeightedEdge, DirectedWeightedEdge},
    error::GraphError,
    Graph, VertexId,
};

/// Adjacency list graph that stores every edge twice, once in the out list of
/// its tail and once in the in list of its head. The in lists are what the
/// backward searches run on.
///
/// Parallel edges and self-loops are kept. Both lists are ordered by the
/// opposite endpoint and then by weight, edges comparing equal keep their
/// insertion order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReversibleVecGraph {
    out_edges: Vec<Vec<DirectedTaillessWeightedEdge>>,
    in_edges: Vec<Vec<DirectedHeadlessWeightedEdge>>,
}

impl Graph for ReversibleVecGraph {
    fn out_edges(
        &self,
        source: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_> {
        struct OutEdgeIterator<'a> {
            source: VertexId,
            tailless_edge_iterator: Iter<'a, DirectedTaillessWeightedEdge>,
        }

        impl<'a> Iterator for OutEdgeIterator<'a> {
            type Item = DirectedWeightedEdge;

            fn next(&mut self) -> Option<Self::Item> {
                let edge = self.tailless_edge_iterator.next()?;
                Some(edge.set_tail(self.source))
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.tailless_edge_iterator.size_hint()
            }
        }

        impl<'a> ExactSizeIterator for OutEdgeIterator<'a> {
            fn len(&self) -> usize {
                self.tailless_edge_iterator.len()
            }
        }

        let tailless_edge_iterator = if let Some(edges) = self.out_edges.get(source as usize) {
            edges.iter()
        } else {
            [].iter()
        };

        Box::new(OutEdgeIterator {
            source,
            tailless_edge_iterator,
        })
    }

    fn in_edges(
        &self,
        target: VertexId,
    ) -> Box<dyn ExactSizeIterator<Item = DirectedWeightedEdge> + Send + '_> {
        struct InEdgeIterator<'a> {
            target: VertexId,
            headless_edge_iterator: Iter<'a, DirectedHeadlessWeightedEdge>,
        }

        impl<'a> Iterator for InEdgeIterator<'a> {
            type Item = DirectedWeightedEdge;

            fn next(&mut self) -> Option<Self::Item> {
                let edge = self.headless_edge_iterator.next()?;
                Some(edge.set_head(self.target))
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.headless_edge_iterator.size_hint()
            }
        }

        impl<'a> ExactSizeIterator for InEdgeIterator<'a> {
            fn len(&self) -> usize {
                self.headless_edge_iterator.len()
            }
        }

        let headless_edge_iterator = if let Some(edges) = self.in_edges.get(target as usize) {
            edges.iter()
        } else {
            [].iter()
        };

        Box::new(InEdgeIterator {
            target,
            headless_edge_iterator,
        })
    }

    fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.out_edges.iter().map(Vec::len).sum::<usize>() as u32
    }
}

impl ReversibleVecGraph {
    /// Builds a graph on the vertices `0..number_of_vertices`. Fails if an
    /// edge references a vertex outside of that range.
    pub fn from_edges(
        number_of_vertices: u32,
        edges: &[DirectedWeightedEdge],
    ) -> Result<ReversibleVecGraph, GraphError> {
        let mut graph = ReversibleVecGraph {
            out_edges: vec![Vec::new(); number_of_vertices as usize],
            in_edges: vec![Vec::new(); number_of_vertices as usize],
        };

        for edge in edges {
            for vertex in [edge.tail(), edge.head()] {
                if vertex >= number_of_vertices {
                    return Err(GraphError::VertexOutOfRange {
                        vertex,
                        number_of_vertices,
                    });
                }
            }

            graph.add_out_edge(edge);
            graph.add_in_edge(edge);
        }

        Ok(graph)
    }

    /// Checks the invariants `from_edges` establishes. Needed for graphs that
    /// were decoded instead of built.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.out_edges.len() != self.in_edges.len() {
            return Err(GraphError::InconsistentAdjacency(format!(
                "{} out lists but {} in lists",
                self.out_edges.len(),
                self.in_edges.len()
            )));
        }

        let number_of_vertices = self.number_of_vertices();
        for vertex in self.vertices() {
            let neighbors = self
                .out_edges(vertex)
                .map(|edge| edge.head())
                .chain(self.in_edges(vertex).map(|edge| edge.tail()));
            for neighbor in neighbors {
                if neighbor >= number_of_vertices {
                    return Err(GraphError::VertexOutOfRange {
                        vertex: neighbor,
                        number_of_vertices,
                    });
                }
            }
        }

        let number_of_in_edges = self.in_edges.iter().map(Vec::len).sum::<usize>();
        if number_of_in_edges != self.number_of_edges() as usize {
            return Err(GraphError::InconsistentAdjacency(format!(
                "{} out edges but {} in edges",
                self.number_of_edges(),
                number_of_in_edges
            )));
        }

        Ok(())
    }

    fn add_out_edge(&mut self, edge: &DirectedWeightedEdge) {
        let out_edges = &mut self.out_edges[edge.tail() as usize];
        let idx = out_edges.partition_point(|out_edge| {
            (out_edge.head(), out_edge.weight()) <= (edge.head(), edge.weight())
        });
        out_edges.insert(idx, edge.tailless());
    }

    fn add_in_edge(&mut self, edge: &DirectedWeightedEdge) {
        let in_edges = &mut self.in_edges[edge.head() as usize];
        let idx = in_edges.partition_point(|in_edge| {
            (in_edge.tail(), in_edge.weight()) <= (edge.tail(), edge.weight())
        });
        in_edges.insert(idx, edge.headless());
    }
}
