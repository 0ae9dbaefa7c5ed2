//! Input loading module

pub mod loader;
pub mod matrix;

pub use loader::{load_adjacency_matrix, read_adjacency_matrix};
pub use matrix::AdjacencyMatrix;
