use thiserror::Error;

use crate::graphs::VertexId;

/// Errors reported before a search starts. Unreachable targets or too few
/// dissimilar paths are not errors, they yield short results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("vertex {vertex} is out of range for a graph with {number_of_vertices} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        number_of_vertices: u32,
    },

    #[error("overlap threshold {0} is not within [0, 1]")]
    InvalidThreshold(f64),

    #[error("the label limit has to be positive")]
    InvalidLabelLimit,

    /// A precomputed distance table was passed for another target or graph.
    #[error(
        "distance table towards {table_target} over {table_vertices} vertices does not fit a \
         search towards {target} over {vertices} vertices"
    )]
    DistanceTableMismatch {
        table_target: VertexId,
        table_vertices: u32,
        target: VertexId,
        vertices: u32,
    },
}
