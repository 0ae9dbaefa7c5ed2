//! Labelled social graph built on petgraph

use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction, EdgeType, Undirected};

use crate::error::{GraphError, Result};

/// A graph whose nodes are people identified by unique labels.
///
/// Node `i` of the graph is row `i` of the matrix it was built from. There is
/// no way to mutate a `SocialGraph` once built; display attributes live in a
/// separate [`crate::viz::RenderSpec`].
#[derive(Debug, Clone)]
pub struct SocialGraph<Ty: EdgeType> {
    graph: Graph<String, (), Ty>,
    index: HashMap<String, NodeIndex>,
}

/// Who-follows-whom graph read straight from the adjacency matrix
pub type DirectedGraph = SocialGraph<Directed>;

/// Undirected graph of reciprocated relationships
pub type MutualGraph = SocialGraph<Undirected>;

impl<Ty: EdgeType> SocialGraph<Ty> {
    pub(crate) fn from_parts(graph: Graph<String, (), Ty>, index: HashMap<String, NodeIndex>) -> Self {
        Self { graph, index }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }

    /// Label of the node at `index`
    pub fn label(&self, index: usize) -> &str {
        &self.graph[NodeIndex::new(index)]
    }

    /// Node labels in index order
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Whether following edges in their direction can never return to a node
    pub fn is_acyclic(&self) -> bool {
        !petgraph::algo::is_cyclic_directed(&self.graph)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Index of the node labelled `id`
    pub fn node_index(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .map(|ix| ix.index())
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Whether an edge `src -> dst` exists (either way round when undirected)
    pub fn has_edge(&self, src: &str, dst: &str) -> Result<bool> {
        let a = NodeIndex::new(self.node_index(src)?);
        let b = NodeIndex::new(self.node_index(dst)?);
        Ok(self.graph.find_edge(a, b).is_some())
    }

    /// Edge endpoints as index pairs, in insertion order
    pub fn edge_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Neighbour indices in the given direction (ignored for undirected graphs)
    pub fn neighbors(&self, node: usize, direction: Direction) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(node), direction)
            .map(|ix| ix.index())
    }
}
