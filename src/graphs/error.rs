use thiserror::Error;

use super::VertexId;

/// Errors raised while building or loading a graph.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("unable to read graph file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to decode bincode graph: {0}")]
    Bincode(#[from] bincode::Error),

    /// Malformed line in a `.gr` file. Line numbers start at 1.
    #[error("parse error in line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("vertex {vertex} is out of range for a graph with {number_of_vertices} vertices")]
    VertexOutOfRange {
        vertex: VertexId,
        number_of_vertices: u32,
    },

    /// Out and in lists of a decoded graph do not describe the same edges.
    #[error("inconsistent adjacency lists: {0}")]
    InconsistentAdjacency(String),

    #[error("unsupported graph file extension {0:?}")]
    UnsupportedExtension(String),
}

impl GraphError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> GraphError {
        GraphError::Parse {
            line,
            message: message.into(),
        }
    }
}
