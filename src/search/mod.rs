pub mod dijkstra;
pub mod distance_table;
pub mod error;
pub mod label;
pub mod one_pass_plus;
pub mod parameters;
pub mod queue;
pub mod similarity;
