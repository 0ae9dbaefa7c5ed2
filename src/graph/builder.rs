//! Graph construction module

use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::{Directed, EdgeType};

use crate::data::AdjacencyMatrix;
use crate::error::{MalformedInput, Result};
use crate::graph::{DirectedGraph, SocialGraph};

/// Builder for incrementally constructing a SocialGraph
pub struct GraphBuilder<Ty: EdgeType> {
    /// Graph under construction
    graph: Graph<String, (), Ty>,

    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, NodeIndex>,
}

impl<Ty: EdgeType> GraphBuilder<Ty> {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: Graph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
        }
    }

    /// Start from the nodes of an existing graph, in the same order
    pub(crate) fn from_nodes_of<Other: EdgeType>(source: &SocialGraph<Other>, edges: usize) -> Self {
        let mut builder = Self::with_capacity(source.node_count(), edges);
        for label in source.labels() {
            let idx = builder.graph.add_node(label.to_string());
            builder.id_to_index.insert(label.to_string(), idx);
        }
        builder
    }

    /// Add a node; labels must be unique
    pub fn add_node(&mut self, id: &str) -> Result<usize> {
        if self.id_to_index.contains_key(id) {
            return Err(MalformedInput::DuplicateLabel(id.to_string()).into());
        }
        let idx = self.graph.add_node(id.to_string());
        self.id_to_index.insert(id.to_string(), idx);
        Ok(idx.index())
    }

    /// Add an edge between two existing node indices.
    ///
    /// Self-loops are dropped. Panics if either index was never added.
    pub fn add_edge(&mut self, src: usize, dst: usize) {
        if src == dst {
            log::debug!("Dropping self-loop on node {}", src);
            return;
        }
        self.graph
            .add_edge(NodeIndex::new(src), NodeIndex::new(dst), ());
    }

    /// Build the graph
    pub fn build(self) -> SocialGraph<Ty> {
        SocialGraph::from_parts(self.graph, self.id_to_index)
    }
}

/// Convert an adjacency matrix into a directed graph: one node per label,
/// one edge per nonzero entry.
pub fn build_directed(matrix: &AdjacencyMatrix) -> Result<DirectedGraph> {
    let n = matrix.len();
    let mut builder: GraphBuilder<Directed> = GraphBuilder::with_capacity(n, matrix.edge_count());

    for label in matrix.labels() {
        builder.add_node(label)?;
    }

    for src in 0..n {
        for dst in 0..n {
            if matrix.has_edge(src, dst) {
                builder.add_edge(src, dst);
            }
        }
    }

    let graph = builder.build();
    log::info!(
        "Built directed graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use petgraph::Undirected;

    #[test]
    fn builds_edges_from_nonzero_entries() {
        let m = AdjacencyMatrix::from_rows(
            vec!["A", "B", "C"],
            vec![
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ],
        )
        .unwrap();
        let g = build_directed(&m).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert!(g.has_edge("B", "C").unwrap());
        assert!(!g.has_edge("C", "B").unwrap());
        assert_eq!(g.node_index("C").unwrap(), 2);
        assert!(g.contains("A") && !g.contains("D"));
    }

    #[test]
    fn unknown_labels_are_errors() {
        let m = AdjacencyMatrix::from_rows(vec!["A"], vec![vec![0.0]]).unwrap();
        let g = build_directed(&m).unwrap();
        assert!(matches!(g.node_index("Z"), Err(GraphError::UnknownNode(_))));
        assert!(g.has_edge("A", "Z").is_err());
    }

    #[test]
    fn builder_drops_self_loops_and_rejects_duplicates() {
        let mut b: GraphBuilder<Undirected> = GraphBuilder::with_capacity(2, 1);
        let a = b.add_node("a").unwrap();
        let c = b.add_node("c").unwrap();
        assert!(b.add_node("a").is_err());
        b.add_edge(a, a);
        b.add_edge(a, c);
        let g = b.build();
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge("c", "a").unwrap());
    }
}
