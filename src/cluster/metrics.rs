//! Community statistics and metrics

use std::collections::HashSet;

use crate::cluster::{Cluster, ClusterCentralNodes, CommunityAssignment};
use crate::graph::{Adjacency, CompressedAdjacency, MutualGraph};
use crate::metrics::CentralityVector;

/// Summarise every community of `assignment`, largest first
pub fn summarize_communities(
    assignment: &CommunityAssignment,
    mutual_graph: &MutualGraph,
    betweenness: &CentralityVector,
    top_n: usize,
) -> Vec<Cluster> {
    let adjacency = CompressedAdjacency::outgoing(mutual_graph, false);

    let mut clusters: Vec<Cluster> = assignment
        .communities()
        .into_iter()
        .enumerate()
        .map(|(id, members)| {
            let indices: Vec<usize> = members
                .iter()
                .filter_map(|label| mutual_graph.node_index(label).ok())
                .collect();
            Cluster {
                id,
                size: members.len(),
                density: calculate_density(&adjacency, &indices),
                central_nodes: identify_central_nodes(
                    &adjacency,
                    mutual_graph,
                    &indices,
                    betweenness,
                    top_n,
                ),
                members,
            }
        })
        .collect();

    // Sort clusters by size (largest first), keeping label order among equals
    clusters.sort_by(|a, b| b.size.cmp(&a.size));
    clusters
}

/// Calculate density (internal edges / potential edges) on an undirected graph
pub fn calculate_density<A: Adjacency + ?Sized>(adjacency: &A, members: &[usize]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let member_set: HashSet<usize> = members.iter().copied().collect();

    // Each internal edge is seen from both ends
    let endpoints: usize = members
        .iter()
        .map(|&node| {
            adjacency
                .neighbors(node)
                .iter()
                .filter(|&&other| member_set.contains(&(other as usize)))
                .count()
        })
        .sum();

    endpoints as f64 / (n * (n - 1)) as f64
}

/// Top members by internal mutual degree and by network-wide betweenness
fn identify_central_nodes<A: Adjacency + ?Sized>(
    adjacency: &A,
    mutual_graph: &MutualGraph,
    members: &[usize],
    betweenness: &CentralityVector,
    top_n: usize,
) -> ClusterCentralNodes {
    let member_set: HashSet<usize> = members.iter().copied().collect();

    let mut by_degree: Vec<(usize, usize)> = members
        .iter()
        .map(|&node| {
            let internal = adjacency
                .neighbors(node)
                .iter()
                .filter(|&&other| member_set.contains(&(other as usize)))
                .count();
            (node, internal)
        })
        .collect();
    by_degree.sort_by(|a, b| b.1.cmp(&a.1));

    let scores = betweenness.values();
    let mut by_betweenness: Vec<usize> = members.to_vec();
    by_betweenness.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    ClusterCentralNodes {
        degree: by_degree
            .iter()
            .take(top_n)
            .map(|&(node, _)| mutual_graph.label(node).to_string())
            .collect(),
        betweenness: by_betweenness
            .iter()
            .take(top_n)
            .map(|&node| mutual_graph.label(node).to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::greedy_modularity;
    use crate::data::AdjacencyMatrix;
    use crate::graph::{build_directed, mutualize};
    use crate::metrics::betweenness;

    #[test]
    fn summarises_bridged_triangles() {
        // triangle {a,b,c}, bridge c-d, pair {d,e}
        let labels = vec!["a", "b", "c", "d", "e"];
        let edges = [(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)];
        let mut rows = vec![vec![0.0; 5]; 5];
        for (u, v) in edges {
            rows[u][v] = 1.0;
            rows[v][u] = 1.0;
        }
        let g = build_directed(&AdjacencyMatrix::from_rows(labels, rows).unwrap()).unwrap();
        let mutual = mutualize(&g);
        let scores = betweenness(&mutual, false);
        let assignment = greedy_modularity(&mutual);

        let clusters = summarize_communities(&assignment, &mutual, &scores, 1);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].size, 3);
        assert_eq!(clusters[0].members, vec!["a", "b", "c"]);
        assert!((clusters[0].density - 1.0).abs() < 1e-12);
        assert_eq!(clusters[0].central_nodes.betweenness, vec!["c"]);
        assert_eq!(clusters[1].members, vec!["d", "e"]);
        assert_eq!(clusters[1].central_nodes.betweenness, vec!["d"]);
    }

    #[test]
    fn density_of_a_path() {
        let lists: Vec<Vec<u32>> = vec![vec![1], vec![0, 2], vec![1]];
        assert!((calculate_density(&lists, &[0, 1, 2]) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(calculate_density(&lists, &[1]), 1.0);
    }
}
