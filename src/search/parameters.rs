use serde::{Deserialize, Serialize};

use super::{error::SearchError, similarity::SimilarityMeasure};

/// Parameters of a k shortest paths with limited overlap search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KspwloParameters {
    /// Maximum number of paths to return.
    pub k: usize,
    /// Maximum similarity allowed between any two returned paths.
    pub theta: f64,
    pub similarity: SimilarityMeasure,
    /// Stop the search after creating this many labels.
    pub max_labels: Option<usize>,
    /// Discard partial paths that already overlap too much with an accepted
    /// path. Only used with measures that support it.
    pub prune_overlapping_labels: bool,
}

impl Default for KspwloParameters {
    fn default() -> Self {
        KspwloParameters {
            k: 3,
            theta: 0.5,
            similarity: SimilarityMeasure::default(),
            max_labels: None,
            prune_overlapping_labels: true,
        }
    }
}

impl KspwloParameters {
    pub fn new(k: usize, theta: f64) -> KspwloParameters {
        KspwloParameters {
            k,
            theta,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&self.theta) {
            return Err(SearchError::InvalidThreshold(self.theta));
        }
        if self.max_labels == Some(0) {
            return Err(SearchError::InvalidLabelLimit);
        }
        Ok(())
    }

    pub(crate) fn pruning_enabled(&self) -> bool {
        self.prune_overlapping_labels && self.similarity.supports_pruning()
    }
}
