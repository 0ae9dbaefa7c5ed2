//! PageRank centrality
//!
//! ```text
//! PR(v) = (1-d)/N + d * Σ PR(u)/outdegree(u) + d * Σ PR(w)/N
//!                      u→v                       w dangling
//! ```
//!
//! The result is a probability distribution (sums to 1), unlike eigenvector
//! centrality which is scaled to a maximum of 1.

use petgraph::EdgeType;

use crate::config::PageRankConfig;
use crate::graph::{CompressedAdjacency, SocialGraph};
use crate::metrics::{CentralityVector, IterativeCentrality};

const MEASURE: &str = "pagerank";

/// PageRank with uniform teleportation; dangling nodes spread their mass
/// uniformly over all nodes.
pub fn pagerank<Ty: EdgeType>(
    graph: &SocialGraph<Ty>,
    directed: bool,
    config: &PageRankConfig,
) -> IterativeCentrality {
    let n = graph.node_count();
    let outgoing = CompressedAdjacency::outgoing(graph, directed);
    let damping = config.damping_factor;
    let solver = config.solver;

    let uniform = 1.0 / n.max(1) as f64;
    let mut ranks = vec![uniform; n];
    let mut residual = 0.0;
    let mut iterations = 0;
    let mut converged = n == 0;

    while !converged && iterations < solver.max_iterations {
        iterations += 1;

        let dangling: f64 = (0..n)
            .filter(|&node| outgoing.out_degree(node) == 0)
            .map(|node| ranks[node])
            .sum();
        let base = (1.0 - damping) * uniform + damping * dangling * uniform;

        let mut next = vec![base; n];
        for (src, &rank) in ranks.iter().enumerate() {
            let targets = outgoing.outgoing_edges(src);
            if targets.is_empty() {
                continue;
            }
            let share = damping * rank / targets.len() as f64;
            for &dst in targets {
                next[dst as usize] += share;
            }
        }

        // Guard against drift so the vector stays a distribution
        let total: f64 = next.iter().sum();
        next.iter_mut().for_each(|v| *v /= total);

        residual = next
            .iter()
            .zip(&ranks)
            .map(|(a, b)| (a - b).abs())
            .sum();
        ranks = next;

        log::debug!("{} iteration {}: residual {:.3e}", MEASURE, iterations, residual);
        converged = residual < n as f64 * solver.tolerance;
    }

    if !converged {
        log::warn!(
            "{} stopped after {} iterations with residual {:.3e}",
            MEASURE,
            iterations,
            residual
        );
    }

    IterativeCentrality {
        measure: MEASURE,
        scores: CentralityVector::from_graph(graph, ranks),
        iterations,
        residual,
        tolerance: solver.tolerance,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AdjacencyMatrix;
    use crate::graph::build_directed;

    fn graph(rows: Vec<Vec<f64>>) -> crate::graph::DirectedGraph {
        let labels: Vec<String> = (0..rows.len()).map(|i| format!("n{i}")).collect();
        build_directed(&AdjacencyMatrix::from_rows(labels, rows).unwrap()).unwrap()
    }

    #[test]
    fn sums_to_one() {
        // cycle n0 -> n1 -> n2 -> n0 plus n3 -> n0; n3 has no in-edges
        let g = graph(vec![
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0],
        ]);
        let run = pagerank(&g, true, &PageRankConfig::default());
        assert!(run.converged);
        let total: f64 = run.scores.values().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        // n3 only receives teleportation mass
        assert!((run.scores.values()[3] - 0.15 / 4.0).abs() < 1e-9);
    }

    #[test]
    fn dangling_nodes_keep_distribution() {
        // n0 -> n1, n1 dangling
        let g = graph(vec![vec![0.0, 1.0], vec![0.0, 0.0]]);
        let run = pagerank(&g, true, &PageRankConfig::default());
        let total: f64 = run.scores.values().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(run.scores.values()[1] > run.scores.values()[0]);
    }

    #[test]
    fn edgeless_graph_is_uniform() {
        let g = graph(vec![vec![0.0; 3]; 3]);
        let run = pagerank(&g, true, &PageRankConfig::default());
        assert!(run.converged);
        for v in run.scores.values() {
            assert!((v - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_graph_yields_empty_vector() {
        let g = graph(vec![]);
        let run = pagerank(&g, true, &PageRankConfig::default());
        assert!(run.scores.is_empty());
        assert!(run.converged);
    }

    #[test]
    fn undirected_mode_is_symmetric_on_a_path() {
        // n0 -> n1 -> n2 treated as a path
        let g = graph(vec![
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.0, 0.0, 0.0],
        ]);
        let run = pagerank(&g, false, &PageRankConfig::default());
        let v = run.scores.values();
        assert!((v[0] - v[2]).abs() < 1e-9);
        assert!(v[1] > v[0]);
    }
}
