//! Eigenvector centrality
//!
//! A node is important when important nodes point at it. The score vector is
//! the principal eigenvector of the adjacency relation, found by power
//! iteration on the shifted operator `A + I`. The shift leaves the
//! eigenvectors unchanged but makes the principal eigenvalue strictly
//! dominant, so bipartite graphs such as stars converge instead of
//! oscillating.
//!
//! On graphs whose principal eigenvalue is degenerate (several components of
//! equal spectral radius, or directed graphs with no cycles) the limit depends
//! on the start vector and convergence can be slow. The start vector is all
//! ones, which keeps the result independent of node order; slow cases are
//! reported through [`IterativeCentrality::warning`].
//!
//! A directed graph without cycles has a nilpotent adjacency matrix. Its
//! principal eigenvalue is 0 and the iterates approach their limit far more
//! slowly than successive steps shrink, so the step-size test cannot certify
//! convergence. Such runs are always reported as not converged.

use petgraph::EdgeType;

use crate::config::SolverConfig;
use crate::graph::{CompressedAdjacency, SocialGraph};
use crate::metrics::{CentralityVector, IterativeCentrality};

const MEASURE: &str = "eigenvector centrality";

/// Eigenvector centrality scaled so the largest score is 1.
///
/// With `directed` set, a node's score accumulates from its in-neighbours.
/// An edgeless graph scores every node 1.
pub fn eigenvector_centrality<Ty: EdgeType>(
    graph: &SocialGraph<Ty>,
    directed: bool,
    config: &SolverConfig,
) -> IterativeCentrality {
    let n = graph.node_count();
    let incoming = CompressedAdjacency::incoming(graph, directed);
    let nilpotent =
        directed && graph.is_directed() && graph.edge_count() > 0 && graph.is_acyclic();

    let mut scores = vec![1.0; n];
    let mut residual = 0.0;
    let mut iterations = 0;
    let mut converged = n == 0;

    while !converged && iterations < config.max_iterations {
        iterations += 1;

        let mut next = scores.clone();
        for (node, value) in next.iter_mut().enumerate() {
            *value += incoming
                .outgoing_edges(node)
                .iter()
                .map(|&src| scores[src as usize])
                .sum::<f64>();
        }

        // Scores stay non-negative and next >= scores, so the max is >= 1
        let max = next.iter().copied().fold(0.0, f64::max);
        next.iter_mut().for_each(|v| *v /= max);

        residual = next
            .iter()
            .zip(&scores)
            .map(|(a, b)| (a - b).abs())
            .sum();
        scores = next;

        log::debug!("{} iteration {}: residual {:.3e}", MEASURE, iterations, residual);
        converged = residual < n as f64 * config.tolerance;
    }

    if nilpotent && converged {
        log::warn!(
            "{}: graph has no directed cycles, scores after {} iterations are an estimate",
            MEASURE,
            iterations
        );
        converged = false;
    } else if !converged {
        log::warn!(
            "{} stopped after {} iterations with residual {:.3e}",
            MEASURE,
            iterations,
            residual
        );
    }

    IterativeCentrality {
        measure: MEASURE,
        scores: CentralityVector::from_graph(graph, scores),
        iterations,
        residual,
        tolerance: config.tolerance,
        converged,
    }
}
