use ahash::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    edge::{DirectedEdge, DirectedWeightedEdge},
    Distance, Graph, VertexId, Weight,
};

/// Represents a request for a set of paths between two vertices.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathRequest {
    source: VertexId,
    target: VertexId,
}

impl PathRequest {
    pub fn new(source: VertexId, target: VertexId) -> PathRequest {
        PathRequest { source, target }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn target(&self) -> VertexId {
        self.target
    }
}

/// Represents a path in a graph.
///
/// A path is the ordered sequence of edges walked from its first to its last
/// vertex together with the total weight. Self-loops never appear in a path,
/// they are stripped on construction as they do not contribute any distance.
/// Edge containment is answered through a hash index over the `(tail, head)`
/// pairs of the path.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Path {
    vertices: Vec<VertexId>,
    edges: Vec<DirectedWeightedEdge>,
    weight: Distance,
    #[serde(skip)]
    edge_index: HashMap<DirectedEdge, Weight>,
}

impl Path {
    /// Builds a path starting at `source` from consecutive edges. Self-loops
    /// are dropped.
    pub fn from_edges(
        source: VertexId,
        edges: impl IntoIterator<Item = DirectedWeightedEdge>,
    ) -> Path {
        let edges = edges
            .into_iter()
            .filter(|edge| !edge.is_loop())
            .collect_vec();
        debug_assert!(edges.first().map_or(true, |edge| edge.tail() == source));
        debug_assert!(edges
            .iter()
            .tuple_windows()
            .all(|(first, second)| first.head() == second.tail()));

        let mut vertices = Vec::with_capacity(edges.len() + 1);
        vertices.push(source);
        vertices.extend(edges.iter().map(|edge| edge.head()));

        let mut edge_index = HashMap::default();
        for edge in edges.iter() {
            edge_index
                .entry(edge.unweighted())
                .and_modify(|weight: &mut Weight| *weight = (*weight).min(edge.weight()))
                .or_insert(edge.weight());
        }

        let weight = edges.iter().map(|edge| edge.weight() as Distance).sum();

        Path {
            vertices,
            edges,
            weight,
            edge_index,
        }
    }

    /// Builds the path to `target` out of a predecessor map as produced by a
    /// plain Dijkstra run. A vertex that is its own predecessor is either the
    /// root of the search or was never reached. Returns `None` if following
    /// the predecessors from `target` does not lead back to `source`.
    pub fn from_predecessors(
        graph: &dyn Graph,
        predecessors: &[VertexId],
        source: VertexId,
        target: VertexId,
    ) -> Option<Path> {
        let mut edges = Vec::new();
        let mut current = target;

        // Naively following the chain ends in the self-loop (source, source),
        // which from_edges removes again.
        loop {
            let predecessor = *predecessors.get(current as usize)?;
            let weight = if predecessor == current {
                0
            } else {
                graph.get_edge_weight(&DirectedEdge::new(predecessor, current))?
            };
            edges.push(DirectedWeightedEdge::new(predecessor, current, weight));

            if predecessor == current {
                break;
            }
            if edges.len() > predecessors.len() {
                // predecessors contain a cycle
                return None;
            }
            current = predecessor;
        }

        if current != source {
            return None;
        }

        edges.reverse();
        Some(Path::from_edges(source, edges))
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn edges(&self) -> &[DirectedWeightedEdge] {
        &self.edges
    }

    pub fn weight(&self) -> Distance {
        self.weight
    }

    pub fn source(&self) -> VertexId {
        self.vertices[0]
    }

    pub fn target(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, edge: &DirectedEdge) -> bool {
        self.edge_index.contains_key(edge)
    }

    /// Weight the path spends on the given edge, if it traverses it.
    pub fn edge_weight(&self, edge: &DirectedEdge) -> Option<Weight> {
        self.edge_index.get(edge).copied()
    }

    /// Total weight of the edges both paths traverse. For an edge present in
    /// both paths with different weights (parallel edges) the smaller weight
    /// is counted.
    pub fn shared_weight(&self, other: &Path) -> Distance {
        self.edges
            .iter()
            .filter_map(|edge| {
                let other_weight = other.edge_weight(&edge.unweighted())?;
                Some(edge.weight().min(other_weight) as Distance)
            })
            .sum()
    }

    pub fn shares_edge_with(&self, other: &Path) -> bool {
        self.edges
            .iter()
            .any(|edge| other.contains_edge(&edge.unweighted()))
    }

    pub fn is_simple(&self) -> bool {
        self.vertices.iter().all_unique()
    }
}

/// Check if a path is a valid answer for a request on a graph.
pub fn validate_path(graph: &dyn Graph, request: &PathRequest, path: &Path) -> Result<(), String> {
    if path.source() != request.source() {
        return Err("first vertex of path is not source of request".to_string());
    }
    if path.target() != request.target() {
        return Err("last vertex of path is not target of request".to_string());
    }
    if !path.is_simple() {
        return Err("path visits a vertex twice".to_string());
    }

    // check if every edge of the path exists in the graph
    for edge in path.edges() {
        if !graph
            .out_edges(edge.tail())
            .any(|out_edge| out_edge == *edge)
        {
            return Err(format!(
                "no edge between {} and {} with weight {} found",
                edge.tail(),
                edge.head(),
                edge.weight()
            ));
        }
    }

    let true_cost = path
        .edges()
        .iter()
        .map(|edge| edge.weight() as Distance)
        .sum::<Distance>();
    if path.weight() != true_cost {
        return Err("wrong path weight".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::small_test_graph;

    fn path(source: VertexId, edges: &[(VertexId, VertexId, Weight)]) -> Path {
        Path::from_edges(
            source,
            edges
                .iter()
                .map(|&(tail, head, weight)| DirectedWeightedEdge::new(tail, head, weight)),
        )
    }

    #[test]
    fn self_loops_are_stripped() {
        let path = path(0, &[(0, 0, 0), (0, 1, 2), (1, 1, 4), (1, 2, 3)]);

        assert_eq!(path.vertices(), &[0, 1, 2]);
        assert_eq!(path.number_of_edges(), 2);
        assert_eq!(path.weight(), 5);
        assert!(!path.contains_edge(&DirectedEdge::new(0, 0)));
        assert!(!path.contains_edge(&DirectedEdge::new(1, 1)));
    }

    #[test]
    fn edge_containment_is_directed() {
        let path = path(0, &[(0, 1, 2), (1, 2, 3)]);

        assert!(path.contains_edge(&DirectedEdge::new(0, 1)));
        assert!(path.contains_edge(&DirectedEdge::new(1, 2)));
        assert!(!path.contains_edge(&DirectedEdge::new(1, 0)));
        assert!(!path.contains_edge(&DirectedEdge::new(0, 2)));
        assert_eq!(path.edge_weight(&DirectedEdge::new(1, 2)), Some(3));
    }

    #[test]
    fn shared_weight_is_symmetric() {
        let first = path(0, &[(0, 3, 3), (3, 5, 3), (5, 6, 2)]);
        let second = path(0, &[(0, 3, 3), (3, 4, 3), (4, 6, 3)]);
        let third = path(0, &[(0, 2, 1), (2, 4, 5), (4, 6, 3)]);

        assert_eq!(first.shared_weight(&second), 3);
        assert_eq!(second.shared_weight(&first), 3);
        assert_eq!(first.shared_weight(&third), 0);
        assert_eq!(second.shared_weight(&third), 3);
        assert!(!first.shares_edge_with(&third));
        assert_eq!(first.shared_weight(&first), first.weight());
    }

    #[test]
    fn trivial_path_has_no_edges() {
        let path = Path::from_edges(4, Vec::<DirectedWeightedEdge>::new());

        assert_eq!(path.source(), 4);
        assert_eq!(path.target(), 4);
        assert_eq!(path.weight(), 0);
        assert!(path.is_simple());
    }

    #[test]
    fn path_from_predecessors() {
        let graph = small_test_graph();
        // shortest path tree rooted at 0, vertex 6 is reached through 5 and 3
        let predecessors = vec![0, 0, 0, 0, 3, 3, 5];

        let path = Path::from_predecessors(&graph, &predecessors, 0, 6).unwrap();

        assert_eq!(path.number_of_edges(), 3);
        assert_eq!(path.vertices(), &[0, 3, 5, 6]);
        assert_eq!(path.edge_weight(&DirectedEdge::new(0, 3)), Some(3));
        assert_eq!(path.edge_weight(&DirectedEdge::new(3, 5)), Some(3));
        assert_eq!(path.edge_weight(&DirectedEdge::new(5, 6)), Some(2));
        assert_eq!(path.weight(), 8);
        assert!(validate_path(&graph, &PathRequest::new(0, 6), &path).is_ok());
    }

    #[test]
    fn unreached_target_has_no_path() {
        let graph = small_test_graph();
        let predecessors = vec![0, 1, 2, 3, 4, 5, 6];

        assert!(Path::from_predecessors(&graph, &predecessors, 0, 6).is_none());
        assert_eq!(
            Path::from_predecessors(&graph, &predecessors, 0, 0)
                .unwrap()
                .number_of_edges(),
            0
        );
    }

    #[test]
    fn invalid_paths_are_detected() {
        let graph = small_test_graph();
        let request = PathRequest::new(0, 6);

        let missing_edge = path(0, &[(0, 6, 1)]);
        assert!(validate_path(&graph, &request, &missing_edge).is_err());

        let wrong_target = path(0, &[(0, 3, 3)]);
        assert!(validate_path(&graph, &request, &wrong_target).is_err());

        let wrong_weight = path(0, &[(0, 3, 3), (3, 5, 4), (5, 6, 2)]);
        assert!(validate_path(&graph, &request, &wrong_weight).is_err());
    }
}
