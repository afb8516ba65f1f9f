use std::{collections::BinaryHeap, rc::Rc};

use log::{debug, info, trace, warn};
use serde::Serialize;

use super::{
    distance_table::{distances_to, DistanceTable},
    error::SearchError,
    label::Label,
    parameters::KspwloParameters,
    queue::LabelQueueElement,
    similarity::partial_overlap_exceeds,
};
use crate::graphs::{
    path::{Path, PathRequest},
    Distance, Graph, VertexId,
};

/// Counters collected during one search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    pub labels_created: usize,
    pub labels_expanded: usize,
    pub labels_pruned: usize,
    pub candidates_rejected: usize,
    /// The label limit was hit before k paths were found.
    pub truncated: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct KspwloResult {
    /// Accepted paths in order of acceptance, which is by increasing weight.
    pub paths: Vec<Path>,
    pub statistics: SearchStatistics,
}

impl KspwloResult {
    fn empty() -> KspwloResult {
        KspwloResult {
            paths: Vec::new(),
            statistics: SearchStatistics::default(),
        }
    }
}

/// Label setting search for k shortest paths with limited overlap.
///
/// Partial paths (labels) are expanded best first by their weight plus the
/// exact remaining distance to the target. Paths therefore reach the target
/// in order of increasing weight and the first one is a shortest path. Each
/// path reaching the target is accepted if its similarity to every
/// previously accepted path is at most `theta`.
///
/// Only simple paths are generated. The number of labels can grow
/// exponentially on graphs with many paths of similar weight, the label limit
/// of the parameters bounds the work.
pub struct OnePassPlus<'a> {
    graph: &'a dyn Graph,
    parameters: KspwloParameters,
}

impl<'a> OnePassPlus<'a> {
    pub fn new(
        graph: &'a dyn Graph,
        parameters: KspwloParameters,
    ) -> Result<OnePassPlus<'a>, SearchError> {
        parameters.validate()?;
        Ok(OnePassPlus { graph, parameters })
    }

    pub fn parameters(&self) -> &KspwloParameters {
        &self.parameters
    }

    /// Answers `request`. A precomputed distance table towards the target of
    /// the request may be passed to avoid computing it again.
    pub fn run(
        &self,
        request: &PathRequest,
        distance_table: Option<&DistanceTable>,
    ) -> Result<KspwloResult, SearchError> {
        for vertex in [request.source(), request.target()] {
            self.check_vertex(vertex)?;
        }

        if self.parameters.k == 0 {
            return Ok(KspwloResult::empty());
        }

        let computed_table;
        let distance_table = match distance_table {
            Some(distance_table) => {
                self.check_distance_table(distance_table, request.target())?;
                distance_table
            }
            None => {
                computed_table = distances_to(self.graph, request.target())?;
                &computed_table
            }
        };

        Ok(self.search(request, distance_table))
    }

    fn search(&self, request: &PathRequest, distance_table: &DistanceTable) -> KspwloResult {
        let KspwloParameters {
            k,
            theta,
            similarity,
            max_labels,
            ..
        } = self.parameters;
        let prune = self.parameters.pruning_enabled();
        let target = request.target();

        let mut result = KspwloResult::empty();
        let statistics = &mut result.statistics;
        let paths = &mut result.paths;

        let Some(source_lower_bound) = distance_table.get(request.source()) else {
            info!(
                "target {} is not reachable from source {}",
                target,
                request.source()
            );
            return result;
        };

        let mut queue = BinaryHeap::new();
        let mut sequence = 0;
        queue.push(LabelQueueElement::new(
            Label::root(request.source(), source_lower_bound),
            sequence,
        ));
        statistics.labels_created += 1;

        'search: while paths.len() < k {
            let Some(LabelQueueElement { label, .. }) = queue.pop() else {
                break;
            };

            if label.vertex() == target {
                let path = label.get_path();
                let too_similar = paths
                    .iter()
                    .enumerate()
                    .map(|(index, accepted)| (index, similarity.similarity(&path, accepted)))
                    .find(|&(_, path_similarity)| path_similarity > theta);

                if let Some((index, path_similarity)) = too_similar {
                    statistics.candidates_rejected += 1;
                    debug!(
                        "rejected path of weight {} with similarity {:.3} to path {}",
                        path.weight(),
                        path_similarity,
                        index
                    );
                } else {
                    debug!(
                        "accepted path {} of weight {} with {} edges",
                        paths.len(),
                        path.weight(),
                        path.number_of_edges()
                    );
                    paths.push(path);
                }
                continue;
            }

            let overlaps = complete_overlaps(&label, &paths[..]);
            if prune
                && overlaps
                    .iter()
                    .zip(paths.iter())
                    .any(|(&overlap, accepted)| {
                        partial_overlap_exceeds(overlap, accepted.weight(), theta)
                    })
            {
                statistics.labels_pruned += 1;
                trace!(
                    "pruned label at vertex {} with weight {}",
                    label.vertex(),
                    label.weight()
                );
                continue;
            }

            statistics.labels_expanded += 1;
            for edge in self.graph.out_edges(label.vertex()) {
                let Some(lower_bound) = distance_table.get(edge.head()) else {
                    continue;
                };
                if label.contains_vertex(edge.head()) {
                    continue;
                }
                if max_labels.is_some_and(|max_labels| statistics.labels_created >= max_labels) {
                    warn!(
                        "label limit of {} reached after accepting {} of {} paths",
                        statistics.labels_created,
                        paths.len(),
                        k
                    );
                    statistics.truncated = true;
                    break 'search;
                }

                let child_overlaps = overlaps
                    .iter()
                    .zip(paths.iter())
                    .map(|(&overlap, accepted)| {
                        let shared = accepted
                            .edge_weight(&edge.unweighted())
                            .map_or(0, |weight| weight.min(edge.weight()) as Distance);
                        overlap + shared
                    })
                    .collect();

                sequence += 1;
                statistics.labels_created += 1;
                queue.push(LabelQueueElement::new(
                    Label::child(&label, &edge, lower_bound, child_overlaps),
                    sequence,
                ));
            }
        }

        info!(
            "found {} of {} paths from {} to {}, created {} labels, expanded {}, pruned {}, rejected {} candidates",
            paths.len(),
            k,
            request.source(),
            target,
            statistics.labels_created,
            statistics.labels_expanded,
            statistics.labels_pruned,
            statistics.candidates_rejected
        );

        result
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), SearchError> {
        if !self.graph.contains_vertex(vertex) {
            return Err(SearchError::VertexOutOfRange {
                vertex,
                number_of_vertices: self.graph.number_of_vertices(),
            });
        }
        Ok(())
    }

    fn check_distance_table(
        &self,
        distance_table: &DistanceTable,
        target: VertexId,
    ) -> Result<(), SearchError> {
        if distance_table.target() != target
            || distance_table.number_of_vertices() != self.graph.number_of_vertices()
        {
            return Err(SearchError::DistanceTableMismatch {
                table_target: distance_table.target(),
                table_vertices: distance_table.number_of_vertices(),
                target,
                vertices: self.graph.number_of_vertices(),
            });
        }
        Ok(())
    }
}

/// Overlaps of the label with every accepted path. The label knows the
/// overlaps with the paths accepted before it was created, the rest are
/// computed by walking its partial path.
fn complete_overlaps(label: &Rc<Label>, paths: &[Path]) -> Vec<Distance> {
    let mut overlaps = label.overlaps().to_vec();
    overlaps.extend(
        paths[overlaps.len()..]
            .iter()
            .map(|accepted| label.overlap_with(accepted)),
    );
    overlaps
}

/// Computes up to `k` paths from `source` to `target` in order of increasing
/// weight such that no two of them are more similar than `theta`.
pub fn find_paths(
    graph: &dyn Graph,
    source: VertexId,
    target: VertexId,
    k: usize,
    theta: f64,
) -> Result<Vec<Path>, SearchError> {
    let one_pass_plus = OnePassPlus::new(graph, KspwloParameters::new(k, theta))?;
    let result = one_pass_plus.run(&PathRequest::new(source, target), None)?;
    Ok(result.paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graphs::{
            edge::DirectedWeightedEdge, path::validate_path,
            reversible_vec_graph::ReversibleVecGraph, small_test_graph,
        },
        search::similarity::SimilarityMeasure,
    };

    fn vertices(paths: &[Path]) -> Vec<Vec<VertexId>> {
        paths.iter().map(|path| path.vertices().to_vec()).collect()
    }

    #[test]
    fn three_paths_with_limited_overlap() {
        let graph = small_test_graph();
        let paths = find_paths(&graph, 0, 6, 3, 0.5).unwrap();

        assert_eq!(
            vertices(&paths),
            vec![vec![0, 3, 5, 6], vec![0, 3, 4, 6], vec![0, 2, 4, 6]]
        );
        assert_eq!(
            paths.iter().map(Path::weight).collect::<Vec<_>>(),
            vec![8, 9, 9]
        );
    }

    #[test]
    fn zero_threshold_yields_edge_disjoint_paths() {
        let graph = small_test_graph();
        let paths = find_paths(&graph, 0, 6, 3, 0.0).unwrap();

        assert_eq!(vertices(&paths), vec![vec![0, 3, 5, 6], vec![0, 2, 4, 6]]);
    }

    #[test]
    fn threshold_one_yields_plain_k_shortest_paths() {
        let graph = small_test_graph();
        let paths = find_paths(&graph, 0, 6, 7, 1.0).unwrap();

        assert_eq!(
            paths.iter().map(Path::weight).collect::<Vec<_>>(),
            vec![8, 9, 9, 9, 10, 10, 11]
        );
    }

    #[test]
    fn pruning_does_not_change_the_result() {
        let graph = small_test_graph();
        let request = PathRequest::new(0, 6);

        for theta in [0.0, 0.2, 0.4, 0.5, 0.7, 1.0] {
            let mut parameters = KspwloParameters::new(5, theta);
            let pruned = OnePassPlus::new(&graph, parameters.clone())
                .unwrap()
                .run(&request, None)
                .unwrap();
            parameters.prune_overlapping_labels = false;
            let unpruned = OnePassPlus::new(&graph, parameters)
                .unwrap()
                .run(&request, None)
                .unwrap();

            assert_eq!(pruned.paths, unpruned.paths);
            assert_eq!(unpruned.statistics.labels_pruned, 0);
            assert!(pruned.statistics.labels_expanded <= unpruned.statistics.labels_expanded);
        }
    }

    #[test]
    fn zero_k_returns_nothing() {
        let graph = small_test_graph();
        let result = OnePassPlus::new(&graph, KspwloParameters::new(0, 0.5))
            .unwrap()
            .run(&PathRequest::new(0, 6), None)
            .unwrap();

        assert!(result.paths.is_empty());
        assert_eq!(result.statistics.labels_created, 0);
    }

    #[test]
    fn unreachable_target_returns_nothing() {
        let edges = [
            DirectedWeightedEdge::new(0, 1, 1),
            DirectedWeightedEdge::new(2, 1, 1),
        ];
        let graph = ReversibleVecGraph::from_edges(3, &edges).unwrap();

        assert!(find_paths(&graph, 0, 2, 3, 0.5).unwrap().is_empty());
        assert!(find_paths(&graph, 1, 0, 3, 0.5).unwrap().is_empty());
    }

    #[test]
    fn source_equal_to_target() {
        let graph = small_test_graph();
        let paths = find_paths(&graph, 4, 4, 3, 0.5).unwrap();

        assert_eq!(vertices(&paths), vec![vec![4]]);
        assert_eq!(paths[0].weight(), 0);
    }

    #[test]
    fn invalid_input_is_reported() {
        let graph = small_test_graph();

        assert_eq!(
            find_paths(&graph, 0, 9, 3, 0.5),
            Err(SearchError::VertexOutOfRange {
                vertex: 9,
                number_of_vertices: 7
            })
        );
        assert_eq!(
            find_paths(&graph, 0, 6, 3, 1.5),
            Err(SearchError::InvalidThreshold(1.5))
        );
    }

    #[test]
    fn precomputed_distance_table_is_reused() {
        let graph = small_test_graph();
        let distance_table = distances_to(&graph, 6).unwrap();
        let one_pass_plus = OnePassPlus::new(&graph, KspwloParameters::new(3, 0.5)).unwrap();

        let with_table = one_pass_plus
            .run(&PathRequest::new(0, 6), Some(&distance_table))
            .unwrap();
        let without_table = one_pass_plus.run(&PathRequest::new(0, 6), None).unwrap();
        assert_eq!(with_table.paths, without_table.paths);

        let other_source = one_pass_plus
            .run(&PathRequest::new(1, 6), Some(&distance_table))
            .unwrap();
        // 1 -> 3 -> 5 -> 6 has the same weight, ties go to the smaller weight
        // of the partial path
        assert_eq!(other_source.paths[0].vertices(), &[1, 4, 6]);

        assert!(matches!(
            one_pass_plus.run(&PathRequest::new(0, 5), Some(&distance_table)),
            Err(SearchError::DistanceTableMismatch { .. })
        ));
    }

    #[test]
    fn label_limit_truncates_the_result() {
        let graph = small_test_graph();
        let mut parameters = KspwloParameters::new(3, 0.5);
        parameters.max_labels = Some(7);

        let one_pass_plus = OnePassPlus::new(&graph, parameters.clone()).unwrap();
        assert_eq!(one_pass_plus.parameters(), &parameters);
        let result = one_pass_plus.run(&PathRequest::new(0, 6), None).unwrap();

        assert!(result.statistics.truncated);
        assert_eq!(result.statistics.labels_created, 7);
        assert_eq!(vertices(&result.paths), vec![vec![0, 3, 5, 6]]);
    }

    #[test]
    fn self_loops_and_parallel_edges() {
        let edges = [
            DirectedWeightedEdge::new(0, 0, 0),
            DirectedWeightedEdge::new(0, 1, 2),
            DirectedWeightedEdge::new(0, 1, 3),
            DirectedWeightedEdge::new(1, 1, 1),
            DirectedWeightedEdge::new(1, 2, 2),
        ];
        let graph = ReversibleVecGraph::from_edges(3, &edges).unwrap();

        let paths = find_paths(&graph, 0, 2, 3, 1.0).unwrap();
        assert_eq!(
            paths.iter().map(Path::weight).collect::<Vec<_>>(),
            vec![4, 5]
        );
        assert!(paths.iter().all(|path| path.vertices() == [0, 1, 2]));

        // both share the edge (1, 2)
        let paths = find_paths(&graph, 0, 2, 3, 0.5).unwrap();
        assert_eq!(paths.len(), 1);
    }

    #[test]
    fn path_weights_above_edge_weight_range() {
        let edges = [
            DirectedWeightedEdge::new(0, 1, u32::MAX),
            DirectedWeightedEdge::new(1, 2, 1),
        ];
        let graph = ReversibleVecGraph::from_edges(3, &edges).unwrap();

        let paths = find_paths(&graph, 0, 2, 1, 0.5).unwrap();
        assert_eq!(vertices(&paths), vec![vec![0, 1, 2]]);
        assert_eq!(paths[0].weight(), u32::MAX as Distance + 1);
        assert!(validate_path(&graph, &PathRequest::new(0, 2), &paths[0]).is_ok());
    }

    #[test]
    fn large_weights_keep_their_order() {
        let edges = [
            DirectedWeightedEdge::new(0, 1, u32::MAX),
            DirectedWeightedEdge::new(1, 3, u32::MAX),
            DirectedWeightedEdge::new(0, 2, u32::MAX),
            DirectedWeightedEdge::new(2, 3, u32::MAX - 1),
        ];
        let graph = ReversibleVecGraph::from_edges(4, &edges).unwrap();

        let paths = find_paths(&graph, 0, 3, 2, 1.0).unwrap();
        assert_eq!(vertices(&paths), vec![vec![0, 2, 3], vec![0, 1, 3]]);
        assert_eq!(
            paths.iter().map(Path::weight).collect::<Vec<_>>(),
            vec![2 * u32::MAX as Distance - 1, 2 * u32::MAX as Distance]
        );
    }

    #[test]
    fn jaccard_measure_is_supported() {
        let graph = small_test_graph();
        let mut parameters = KspwloParameters::new(3, 0.25);
        parameters.similarity = SimilarityMeasure::WeightedJaccard;

        let result = OnePassPlus::new(&graph, parameters)
            .unwrap()
            .run(&PathRequest::new(0, 6), None)
            .unwrap();

        // 3 / 14 and 3 / 15 are below the threshold, pruning is not used
        assert_eq!(
            vertices(&result.paths),
            vec![vec![0, 3, 5, 6], vec![0, 3, 4, 6], vec![0, 2, 4, 6]]
        );
        assert_eq!(result.statistics.labels_pruned, 0);
    }
}
