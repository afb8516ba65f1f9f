//! k shortest paths with limited overlap.
//!
//! Given a directed graph with non-negative weights, [`find_paths`] computes
//! up to k paths between two vertices in order of increasing weight such that
//! no two of them share more than a given fraction of their weight. The search
//! is the label setting OnePass+ algorithm guided by exact distances towards
//! the target ([`distances_to`]).

pub mod graphs;
pub mod search;
pub mod utility;

pub use search::{distance_table::distances_to, one_pass_plus::find_paths};
