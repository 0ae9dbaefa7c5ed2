//! Graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod compressed;
pub mod social;

pub use algorithms::{connected_components, mutualize};
pub use builder::{build_directed, GraphBuilder};
pub use compressed::{Adjacency, CompressedAdjacency};
pub use social::{DirectedGraph, MutualGraph, SocialGraph};
