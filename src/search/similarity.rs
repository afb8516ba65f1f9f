use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graphs::{path::Path, Distance};

/// How the overlap of two paths is turned into a similarity in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    /// Shared weight divided by the weight of the shorter path.
    #[default]
    SharedOverShorter,
    /// Shared weight divided by the weight of the longer path.
    SharedOverLonger,
    /// Shared weight divided by the weight of the union of both paths.
    WeightedJaccard,
}

impl SimilarityMeasure {
    pub fn similarity(&self, first: &Path, second: &Path) -> f64 {
        let shared = first.shared_weight(second);
        let (first_weight, second_weight) = (first.weight(), second.weight());
        let denominator = match self {
            SimilarityMeasure::SharedOverShorter => first_weight.min(second_weight),
            SimilarityMeasure::SharedOverLonger => first_weight.max(second_weight),
            // shared never exceeds the weight of either path
            SimilarityMeasure::WeightedJaccard => first_weight + (second_weight - shared),
        };

        if denominator == 0 {
            // only zero weight edges involved
            return if first.shares_edge_with(second) { 1.0 } else { 0.0 };
        }

        shared as f64 / denominator as f64
    }

    /// Whether a partial path may be discarded once its overlap with an
    /// accepted path, divided by the weight of that path, exceeds the
    /// threshold. Candidates are found in order of weight, so an accepted path
    /// is never longer than a later candidate.
    pub fn supports_pruning(&self) -> bool {
        matches!(self, SimilarityMeasure::SharedOverShorter)
    }
}

/// Pruning test for a partial path that shares `overlap` with an accepted path
/// of weight `accepted_weight`.
pub fn partial_overlap_exceeds(overlap: Distance, accepted_weight: Distance, theta: f64) -> bool {
    accepted_weight > 0 && overlap as f64 / accepted_weight as f64 > theta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::edge::DirectedWeightedEdge;

    fn path(edges: &[(u32, u32, u32)]) -> Path {
        Path::from_edges(
            edges[0].0,
            edges
                .iter()
                .map(|&(tail, head, weight)| DirectedWeightedEdge::new(tail, head, weight)),
        )
    }

    #[test]
    fn measures_normalize_differently() {
        let shortest = path(&[(0, 3, 3), (3, 5, 3), (5, 6, 2)]);
        let alternative = path(&[(0, 3, 3), (3, 4, 3), (4, 6, 3)]);

        let shorter = SimilarityMeasure::SharedOverShorter.similarity(&shortest, &alternative);
        let longer = SimilarityMeasure::SharedOverLonger.similarity(&shortest, &alternative);
        let jaccard = SimilarityMeasure::WeightedJaccard.similarity(&shortest, &alternative);

        assert_eq!(shorter, 3.0 / 8.0);
        assert_eq!(longer, 3.0 / 9.0);
        assert_eq!(jaccard, 3.0 / 14.0);
        assert_eq!(
            SimilarityMeasure::default().similarity(&alternative, &shortest),
            shorter
        );
    }

    #[test]
    fn identical_paths_are_fully_similar() {
        let shortest = path(&[(0, 3, 3), (3, 5, 3), (5, 6, 2)]);

        for measure in [
            SimilarityMeasure::SharedOverShorter,
            SimilarityMeasure::SharedOverLonger,
            SimilarityMeasure::WeightedJaccard,
        ] {
            assert_eq!(measure.similarity(&shortest, &shortest), 1.0);
        }
    }

    #[test]
    fn zero_weight_paths() {
        let first = path(&[(0, 1, 0), (1, 2, 0)]);
        let second = path(&[(0, 1, 0), (1, 3, 0), (3, 2, 0)]);
        let third = path(&[(0, 4, 0), (4, 2, 0)]);

        let measure = SimilarityMeasure::SharedOverShorter;
        assert_eq!(measure.similarity(&first, &second), 1.0);
        assert_eq!(measure.similarity(&first, &third), 0.0);
    }

    #[test]
    fn pruning_threshold() {
        assert!(partial_overlap_exceeds(5, 8, 0.5));
        assert!(!partial_overlap_exceeds(4, 8, 0.5));
        assert!(!partial_overlap_exceeds(0, 0, 0.0));
        assert!(partial_overlap_exceeds(1, 8, 0.0));
        assert!(!partial_overlap_exceeds(8, 8, 1.0));
    }
}
