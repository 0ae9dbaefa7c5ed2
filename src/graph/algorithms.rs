//! Graph algorithms for analysis

use petgraph::{EdgeType, Undirected};

use crate::graph::{CompressedAdjacency, DirectedGraph, GraphBuilder, MutualGraph, SocialGraph};

/// Find reciprocated relationships: the undirected graph with an edge {u, v}
/// exactly when both u -> v and v -> u are present.
pub fn mutualize(graph: &DirectedGraph) -> MutualGraph {
    log::info!("Finding mutual relationships");

    let adjacency = CompressedAdjacency::outgoing(graph, true);
    let node_count = graph.node_count();

    let mut builder: GraphBuilder<Undirected> =
        GraphBuilder::from_nodes_of(graph, adjacency.entry_count() / 2);

    for src in 0..node_count {
        for &dst in adjacency.outgoing_edges(src) {
            let dst_idx = dst as usize;

            // Only store in one direction
            if src < dst_idx && adjacency.has_edge(dst_idx, src as u32) {
                builder.add_edge(src, dst_idx);
            }
        }
    }

    let mutual = builder.build();
    log::info!("Found {} mutual relationships", mutual.edge_count());
    mutual
}

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<usize>,

    /// Size of each set (for union by size)
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            size: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: usize) -> usize {
        let px = self.parent[x];
        if px != x {
            self.parent[x] = self.find(px);
        }
        self.parent[x]
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Attach smaller tree under root of larger tree
        if self.size[root_x] >= self.size[root_y] {
            self.parent[root_y] = root_x;
            self.size[root_x] += self.size[root_y];
        } else {
            self.parent[root_x] = root_y;
            self.size[root_y] += self.size[root_x];
        }
    }
}

/// Weakly connected components of `graph` as a membership vector, labelled
/// 0.. in order of first appearance by node index.
pub fn connected_components<Ty: EdgeType>(graph: &SocialGraph<Ty>) -> Vec<usize> {
    components_from_edges(graph.node_count(), graph.edge_pairs())
}

/// Connected components of the graph on `node_count` nodes with the given edges
pub fn components_from_edges<I>(node_count: usize, edges: I) -> Vec<usize>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut sets = DisjointSets::new(node_count);
    for (src, dst) in edges {
        sets.union(src, dst);
    }

    let roots: Vec<usize> = (0..node_count).map(|node| sets.find(node)).collect();
    normalize_labels(&roots)
}

/// Relabel arbitrary group keys to 0.. in order of first appearance
pub fn normalize_labels(keys: &[usize]) -> Vec<usize> {
    let mut mapping = std::collections::HashMap::new();
    keys.iter()
        .map(|&key| {
            let next = mapping.len();
            *mapping.entry(key).or_insert(next)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AdjacencyMatrix;
    use crate::graph::build_directed;

    #[test]
    fn mutual_graph_keeps_only_reciprocated_edges() {
        // A <-> B, B -> C
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
        let mutual = mutualize(&g);

        assert_eq!(mutual.node_count(), 3);
        assert_eq!(mutual.edge_count(), 1);
        assert!(mutual.has_edge("A", "B").unwrap());
        assert!(mutual.has_edge("B", "A").unwrap());
        assert!(!mutual.has_edge("B", "C").unwrap());
        assert_eq!(connected_components(&mutual), vec![0, 0, 1]);
    }

    #[test]
    fn disjoint_sets_merge_by_root() {
        let mut sets = DisjointSets::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);
        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(2), sets.find(0));
    }

    #[test]
    fn mutual_graph_copies_every_node_in_order() {
        let m = AdjacencyMatrix::from_rows(
            vec!["z", "y", "x"],
            vec![vec![0.0; 3]; 3],
        )
        .unwrap();
        let mutual = mutualize(&build_directed(&m).unwrap());
        assert_eq!(mutual.labels().collect::<Vec<_>>(), vec!["z", "y", "x"]);
        assert_eq!(mutual.node_index("x").unwrap(), 2);
        assert_eq!(mutual.edge_count(), 0);
    }

    #[test]
    fn components_are_labelled_by_first_appearance() {
        let labels = components_from_edges(5, vec![(3, 4), (1, 2)]);
        assert_eq!(labels, vec![0, 1, 1, 2, 2]);
    }

    #[test]
    fn normalize_keeps_grouping() {
        assert_eq!(normalize_labels(&[7, 7, 3, 9, 3]), vec![0, 0, 1, 2, 1]);
    }
}
