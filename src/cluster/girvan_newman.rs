//! Divisive community detection by edge-betweenness removal (Girvan & Newman, 2002)

use serde::Serialize;

use crate::cluster::{modularity, Algorithm, CommunityAssignment};
use crate::graph::algorithms::{components_from_edges, connected_components};
use crate::graph::{Adjacency, CompressedAdjacency, MutualGraph};
use crate::metrics::edge_betweenness;

const BETWEENNESS_TIE: f64 = 1e-9;
const MODULARITY_TIE: f64 = 1e-12;

/// One edge removal and the partition it left behind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRemoval {
    /// 1-based position in the removal sequence
    pub step: usize,

    /// Endpoint labels of the removed edge
    pub edge: (String, String),

    /// Edge betweenness at the time of removal
    pub betweenness: f64,

    /// Connected components after the removal
    pub communities: usize,

    /// Modularity of those components, measured on the full graph
    pub modularity: f64,
}

/// Community structure found by iterative edge-betweenness removal
pub fn girvan_newman(graph: &MutualGraph) -> CommunityAssignment {
    girvan_newman_with_history(graph).0
}

/// Girvan–Newman, also returning every removal step.
///
/// The connected components of the untouched graph are scored first; then the
/// edge with the highest betweenness (ties to the lowest index pair) is
/// removed, betweenness is recomputed, and so on until no edges remain. The
/// earliest partition with the highest modularity is returned.
pub fn girvan_newman_with_history(graph: &MutualGraph) -> (CommunityAssignment, Vec<EdgeRemoval>) {
    log::info!("Running Girvan-Newman edge removal");

    let original = CompressedAdjacency::outgoing(graph, false);
    let n = original.node_count();
    let mut remaining: Vec<Vec<u32>> = (0..n).map(|node| original.neighbors(node).to_vec()).collect();

    let mut membership = connected_components(graph);
    let mut best = (modularity(&original, &membership), membership.clone());
    let mut history = Vec::new();

    while let Some(((u, v), score)) = most_central_edge(&remaining) {
        remaining[u].retain(|&w| w as usize != v);
        remaining[v].retain(|&w| w as usize != u);

        membership = components_from_edges(n, edge_list(&remaining));
        let q = modularity(&original, &membership);
        let communities = membership.iter().max().map_or(0, |&max| max + 1);

        let step = history.len() + 1;
        log::debug!(
            "Removal {}: {} - {} (betweenness {:.2}) -> {} components, Q {:.4}",
            step,
            graph.label(u),
            graph.label(v),
            score,
            communities,
            q
        );
        history.push(EdgeRemoval {
            step,
            edge: (graph.label(u).to_string(), graph.label(v).to_string()),
            betweenness: score,
            communities,
            modularity: q,
        });

        if q > best.0 + MODULARITY_TIE {
            best = (q, membership.clone());
        }
    }

    let (q, membership) = best;
    let assignment = CommunityAssignment::new(graph, Algorithm::GirvanNewman, &membership, q);

    log::info!(
        "Girvan-Newman found {} communities (Q = {:.4}) over {} removals",
        assignment.community_count(),
        q,
        history.len()
    );

    (assignment, history)
}

fn edge_list(lists: &[Vec<u32>]) -> impl Iterator<Item = (usize, usize)> + '_ {
    lists.iter().enumerate().flat_map(|(u, targets)| {
        targets
            .iter()
            .map(|&v| v as usize)
            .filter(move |&v| u < v)
            .map(move |v| (u, v))
    })
}

/// Edge with the highest betweenness; `None` once the graph is edgeless
fn most_central_edge<A: Adjacency + ?Sized>(adjacency: &A) -> Option<((usize, usize), f64)> {
    let mut best: Option<((usize, usize), f64)> = None;
    for (edge, score) in edge_betweenness(adjacency) {
        match best {
            Some((_, current)) if score <= current + BETWEENNESS_TIE => {}
            _ => best = Some((edge, score)),
        }
    }
    best
}
