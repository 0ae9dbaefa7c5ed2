//! Newman–Girvan modularity

use crate::graph::Adjacency;

/// Modularity of `membership` on a symmetric adjacency:
///
/// ```text
/// Q = Σ_c [ L_c / m - (D_c / 2m)² ]
/// ```
///
/// where `L_c` is the number of edges inside community `c` and `D_c` the sum of
/// its members' degrees. An edgeless graph has modularity 0 by convention.
pub fn modularity<A: Adjacency + ?Sized>(adjacency: &A, membership: &[usize]) -> f64 {
    let n = adjacency.node_count();
    debug_assert_eq!(n, membership.len());

    let communities = membership.iter().max().map_or(0, |&max| max + 1);
    let mut internal = vec![0usize; communities];
    let mut degree_sum = vec![0usize; communities];
    let mut entries = 0usize;

    for node in 0..n {
        let community = membership[node];
        let neighbors = adjacency.neighbors(node);
        entries += neighbors.len();
        degree_sum[community] += neighbors.len();
        internal[community] += neighbors
            .iter()
            .filter(|&&other| membership[other as usize] == community)
            .count();
    }

    if entries == 0 {
        return 0.0;
    }

    // entries == 2m, internal[c] == 2 L_c
    let two_m = entries as f64;
    internal
        .iter()
        .zip(&degree_sum)
        .map(|(&inside, &degree)| inside as f64 / two_m - (degree as f64 / two_m).powi(2))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> Vec<Vec<u32>> {
        vec![
            vec![1, 2],
            vec![0, 2],
            vec![0, 1],
            vec![4, 5],
            vec![3, 5],
            vec![3, 4],
        ]
    }

    #[test]
    fn disjoint_triangles_split_scores_one_half() {
        let q = modularity(&two_triangles(), &[0, 0, 0, 1, 1, 1]);
        assert!((q - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_community_scores_zero() {
        let q = modularity(&two_triangles(), &[0; 6]);
        assert!(q.abs() < 1e-12);
    }

    #[test]
    fn singletons_score_negative() {
        let q = modularity(&two_triangles(), &[0, 1, 2, 3, 4, 5]);
        assert!((q + 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn edgeless_graph_is_zero() {
        let lists: Vec<Vec<u32>> = vec![vec![]; 3];
        assert_eq!(modularity(&lists, &[0, 1, 2]), 0.0);
    }
}
