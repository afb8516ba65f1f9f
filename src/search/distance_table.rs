use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    dijkstra::{dijkstra, Direction},
    error::SearchError,
    queue::VertexDistanceQueueRadixHeap,
};
use crate::graphs::{Distance, Graph, VertexId};

/// Exact distances from every vertex towards one target. Used as lower bound
/// by the label setting search, it is admissible and consistent.
///
/// A table only depends on the graph and the target and can be reused for
/// any number of searches towards the same target.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistanceTable {
    target: VertexId,
    distances: Vec<Option<Distance>>,
}

impl DistanceTable {
    pub fn target(&self) -> VertexId {
        self.target
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.distances.len() as u32
    }

    /// Distance from `vertex` to the target, `None` if the target can not be
    /// reached from `vertex`.
    pub fn get(&self, vertex: VertexId) -> Option<Distance> {
        self.distances.get(vertex as usize).copied().flatten()
    }

    pub fn can_reach_target(&self, vertex: VertexId) -> bool {
        self.get(vertex).is_some()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().flatten().count()
    }
}

/// Runs Dijkstra from `target` against the direction of all edges.
pub fn distances_to(graph: &dyn Graph, target: VertexId) -> Result<DistanceTable, SearchError> {
    if !graph.contains_vertex(target) {
        return Err(SearchError::VertexOutOfRange {
            vertex: target,
            number_of_vertices: graph.number_of_vertices(),
        });
    }

    let mut queue = VertexDistanceQueueRadixHeap::new();
    let data = dijkstra(graph, &mut queue, target, Direction::Backward, None);
    let table = DistanceTable {
        target,
        distances: data.into_distances(),
    };

    debug!(
        "{} of {} vertices can reach target {}",
        table.reachable_count(),
        table.number_of_vertices(),
        target
    );
    Ok(table)
}
