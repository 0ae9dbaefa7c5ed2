//! Compressed sparse adjacency used by the centrality solvers

use petgraph::EdgeType;

use crate::graph::SocialGraph;

/// Compressed sparse row view of a graph's adjacency relation.
///
/// Adjacency lists are sorted and free of duplicates, so `has_edge` can
/// binary search.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedAdjacency {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's edges begin
    /// offsets[i] to offsets[i+1] defines the edge range for node i
    pub offsets: Vec<u32>,

    /// Edge array: concatenated lists of target nodes
    pub edges: Vec<u32>,
}

impl CompressedAdjacency {
    /// Compress per-node adjacency lists, sorting and deduplicating each one
    pub fn from_lists(mut lists: Vec<Vec<u32>>) -> Self {
        let node_count = lists.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);

        let mut edges = Vec::with_capacity(lists.iter().map(Vec::len).sum());
        for list in &mut lists {
            list.sort_unstable();
            list.dedup();
            edges.extend_from_slice(list);
            offsets.push(edges.len() as u32);
        }

        Self {
            node_count,
            offsets,
            edges,
        }
    }

    /// Successor lists of `graph`.
    ///
    /// With `directed == false`, or for an undirected graph, an edge in either
    /// direction links both endpoints.
    pub fn outgoing<Ty: EdgeType>(graph: &SocialGraph<Ty>, directed: bool) -> Self {
        Self::collect(graph, directed, false)
    }

    /// Predecessor lists of `graph` (identical to `outgoing` when undirected)
    pub fn incoming<Ty: EdgeType>(graph: &SocialGraph<Ty>, directed: bool) -> Self {
        Self::collect(graph, directed, true)
    }

    fn collect<Ty: EdgeType>(graph: &SocialGraph<Ty>, directed: bool, reverse: bool) -> Self {
        let symmetric = !directed || !graph.is_directed();
        let mut lists = vec![Vec::new(); graph.node_count()];
        for (src, dst) in graph.edge_pairs() {
            let (src, dst) = if reverse { (dst, src) } else { (src, dst) };
            lists[src].push(dst as u32);
            if symmetric {
                lists[dst].push(src as u32);
            }
        }
        Self::from_lists(lists)
    }

    /// Get outgoing edges for a node
    pub fn outgoing_edges(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if there's an edge from src to dst
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        self.outgoing_edges(src).binary_search(&dst).is_ok()
    }

    /// Get out-degree of a node
    pub fn out_degree(&self, node: usize) -> usize {
        (self.offsets[node + 1] - self.offsets[node]) as usize
    }

    /// Number of stored adjacency entries (twice the edge count when symmetric)
    pub fn entry_count(&self) -> usize {
        self.edges.len()
    }
}

/// Read access to per-node neighbour lists, shared by the shortest-path
/// solvers so they run on both frozen and edge-reduced graphs
pub trait Adjacency {
    fn node_count(&self) -> usize;

    /// Sorted neighbour indices of `node`
    fn neighbors(&self, node: usize) -> &[u32];
}

impl Adjacency for CompressedAdjacency {
    fn node_count(&self) -> usize {
        self.node_count
    }

    fn neighbors(&self, node: usize) -> &[u32] {
        self.outgoing_edges(node)
    }
}

impl Adjacency for Vec<Vec<u32>> {
    fn node_count(&self) -> usize {
        self.len()
    }

    fn neighbors(&self, node: usize) -> &[u32] {
        &self[node]
    }
}
