//! Core library functions for the social graph analyzer
//!
//! Loads a labelled adjacency matrix, builds the directed and mutual graphs,
//! and computes centrality measures and community partitions over them.

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod storage;
pub mod viz;

pub use analysis::{Analysis, NodeMetrics};
pub use config::Config;
pub use data::{load_adjacency_matrix, AdjacencyMatrix};
pub use error::{GraphError, MalformedInput, NonConvergence, Result};
pub use graph::{DirectedGraph, MutualGraph};
