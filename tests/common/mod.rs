#![allow(dead_code)]

use ahash::{HashSet, HashSetExt};
use kspwlo::graphs::{
    edge::DirectedWeightedEdge,
    graph_factory::{GraphFactory, IndexBase},
    path::Path,
    reversible_vec_graph::ReversibleVecGraph,
    Graph, VertexId,
};
use rand::Rng;

/// Seven vertex graph, distances towards 6 are `[8, 6, 8, 5, 3, 2, 0]`.
pub const SMALL_GRAPH_GR: &str = "c seven vertices, twelve arcs
p sp 7 12
a 0 1 4
a 0 2 1
a 0 3 3
a 1 3 1
a 1 4 3
a 2 4 5
a 2 5 6
a 3 4 3
a 3 5 3
a 4 6 3
a 5 6 2
a 6 0 1
";

pub fn small_graph() -> ReversibleVecGraph {
    GraphFactory::from_gr_str(SMALL_GRAPH_GR, IndexBase::Zero).unwrap()
}

/// Random graph without loops and parallel edges, weights in `1..=max_weight`.
pub fn random_graph(
    rng: &mut impl Rng,
    number_of_vertices: u32,
    number_of_edges: usize,
    max_weight: u32,
) -> ReversibleVecGraph {
    let mut pairs = HashSet::new();
    let mut edges = Vec::new();

    while edges.len() < number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        if tail == head || !pairs.insert((tail, head)) {
            continue;
        }
        edges.push(DirectedWeightedEdge::new(
            tail,
            head,
            rng.gen_range(1..=max_weight),
        ));
    }

    ReversibleVecGraph::from_edges(number_of_vertices, &edges).unwrap()
}

/// Every simple path from `source` to `target`, sorted by weight.
pub fn all_simple_paths(graph: &dyn Graph, source: VertexId, target: VertexId) -> Vec<Path> {
    fn extend(
        graph: &dyn Graph,
        vertex: VertexId,
        target: VertexId,
        visited: &mut Vec<bool>,
        edges: &mut Vec<DirectedWeightedEdge>,
        source: VertexId,
        paths: &mut Vec<Path>,
    ) {
        if vertex == target {
            paths.push(Path::from_edges(source, edges.iter().copied()));
            return;
        }

        for edge in graph.out_edges(vertex) {
            if visited[edge.head() as usize] {
                continue;
            }
            visited[edge.head() as usize] = true;
            edges.push(edge);
            extend(graph, edge.head(), target, visited, edges, source, paths);
            edges.pop();
            visited[edge.head() as usize] = false;
        }
    }

    let mut visited = vec![false; graph.number_of_vertices() as usize];
    visited[source as usize] = true;
    let mut paths = Vec::new();
    extend(
        graph,
        source,
        target,
        &mut visited,
        &mut Vec::new(),
        source,
        &mut paths,
    );

    paths.sort_by_key(|path| path.weight());
    paths
}
