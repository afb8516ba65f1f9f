use super::queue::{VertexDistanceQueue, VertexDistanceQueueRadixHeap};
use crate::graphs::{path::Path, Distance, Graph, VertexId};

/// Which edges a search follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Follow out edges, distances are measured from the root.
    Forward,
    /// Follow in edges against their orientation, distances are measured
    /// towards the root.
    Backward,
}

/// Distances and predecessors of one Dijkstra run. A vertex is its own
/// predecessor if it is the root or was never reached.
pub struct DijkstraData {
    root: VertexId,
    distances: Vec<Option<Distance>>,
    predecessors: Vec<VertexId>,
}

impl DijkstraData {
    pub fn new(number_of_vertices: u32, root: VertexId) -> DijkstraData {
        let mut distances = vec![None; number_of_vertices as usize];
        distances[root as usize] = Some(0);

        DijkstraData {
            root,
            distances,
            predecessors: (0..number_of_vertices).collect(),
        }
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn get_distance(&self, vertex: VertexId) -> Option<Distance> {
        self.distances.get(vertex as usize).copied().flatten()
    }

    pub fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        let predecessor = *self.predecessors.get(vertex as usize)?;
        if predecessor == vertex {
            return None;
        }
        Some(predecessor)
    }

    pub fn predecessors(&self) -> &[VertexId] {
        &self.predecessors
    }

    pub fn into_distances(self) -> Vec<Option<Distance>> {
        self.distances
    }

    /// Path from the root to `target` of a forward search.
    pub fn get_path(&self, graph: &dyn Graph, target: VertexId) -> Option<Path> {
        self.get_distance(target)?;
        Path::from_predecessors(graph, &self.predecessors, self.root, target)
    }

    fn update(&mut self, tail: VertexId, head: VertexId, alternative_distance: Distance) -> bool {
        let current_distance = self.distances[head as usize].unwrap_or(Distance::MAX);
        if alternative_distance < current_distance {
            self.distances[head as usize] = Some(alternative_distance);
            self.predecessors[head as usize] = tail;
            return true;
        }
        false
    }
}

/// Dijkstra from `root`. If `stop_at` is given the search ends as soon as
/// that vertex is settled.
pub fn dijkstra(
    graph: &dyn Graph,
    queue: &mut dyn VertexDistanceQueue,
    root: VertexId,
    direction: Direction,
    stop_at: Option<VertexId>,
) -> DijkstraData {
    let mut data = DijkstraData::new(graph.number_of_vertices(), root);
    let mut expanded = vec![false; graph.number_of_vertices() as usize];

    queue.clear();
    queue.insert(root, 0);

    while let Some((vertex, distance)) = queue.pop() {
        if std::mem::replace(&mut expanded[vertex as usize], true) {
            continue;
        }
        if Some(vertex) == stop_at {
            break;
        }

        let edges = match direction {
            Direction::Forward => graph.out_edges(vertex),
            Direction::Backward => graph.in_edges(vertex),
        };
        for edge in edges {
            let next = match direction {
                Direction::Forward => edge.head(),
                Direction::Backward => edge.tail(),
            };
            let alternative_distance = distance + edge.weight() as Distance;
            if data.update(vertex, next, alternative_distance) {
                queue.insert(next, alternative_distance);
            }
        }
    }

    data
}

pub fn dijkstra_one_to_all(graph: &dyn Graph, source: VertexId) -> DijkstraData {
    let mut queue = VertexDistanceQueueRadixHeap::new();
    dijkstra(graph, &mut queue, source, Direction::Forward, None)
}

pub fn dijkstra_one_to_one(graph: &dyn Graph, source: VertexId, target: VertexId) -> Option<Path> {
    let mut queue = VertexDistanceQueueRadixHeap::new();
    let data = dijkstra(graph, &mut queue, source, Direction::Forward, Some(target));
    data.get_path(graph, target)
}
