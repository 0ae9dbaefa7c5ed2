//! Betweenness centrality (Brandes, 2001)
//!
//! The betweenness of `x` is the sum over pairs `(s, t)`, `s != x != t`, of the
//! fraction of shortest `s`-`t` paths passing through `x`. Ties among several
//! shortest paths split the credit proportionally. Undirected graphs count
//! each unordered pair once; directed graphs count ordered pairs.

use std::collections::{BTreeMap, VecDeque};

use petgraph::EdgeType;
use rayon::prelude::*;

use crate::graph::{Adjacency, CompressedAdjacency, SocialGraph};
use crate::metrics::CentralityVector;

/// Breadth-first shortest-path DAG from one source
struct ShortestPaths {
    /// Nodes in non-decreasing distance from the source
    order: Vec<usize>,

    /// Predecessors of each node on shortest paths
    predecessors: Vec<Vec<usize>>,

    /// Number of shortest paths from the source to each node
    sigma: Vec<f64>,
}

impl ShortestPaths {
    fn from_source<A: Adjacency + ?Sized>(adjacency: &A, source: usize) -> Self {
        let n = adjacency.node_count();
        let mut order = Vec::with_capacity(n);
        let mut predecessors = vec![Vec::new(); n];
        let mut sigma = vec![0.0; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];

        sigma[source] = 1.0;
        distance[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let next_distance = distance[v].map_or(0, |d| d + 1);
            for &w in adjacency.neighbors(v) {
                let w = w as usize;
                if distance[w].is_none() {
                    distance[w] = Some(next_distance);
                    queue.push_back(w);
                }
                if distance[w] == Some(next_distance) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        Self {
            order,
            predecessors,
            sigma,
        }
    }

    /// Accumulate pair dependencies onto nodes, in reverse BFS order
    fn node_dependencies(&self, source: usize, into: &mut [f64]) {
        let mut delta = vec![0.0; self.sigma.len()];
        for &w in self.order.iter().rev() {
            let coefficient = (1.0 + delta[w]) / self.sigma[w];
            for &v in &self.predecessors[w] {
                delta[v] += self.sigma[v] * coefficient;
            }
            if w != source {
                into[w] += delta[w];
            }
        }
    }

    /// Accumulate pair dependencies onto the edges of the DAG
    fn edge_dependencies(&self, into: &mut BTreeMap<(usize, usize), f64>) {
        let mut delta = vec![0.0; self.sigma.len()];
        for &w in self.order.iter().rev() {
            let coefficient = (1.0 + delta[w]) / self.sigma[w];
            for &v in &self.predecessors[w] {
                let credit = self.sigma[v] * coefficient;
                delta[v] += credit;
                *into.entry((v.min(w), v.max(w))).or_insert(0.0) += credit;
            }
        }
    }
}

/// Unnormalised betweenness centrality of every node.
///
/// `directed == false` treats a directed graph as its undirected shadow.
/// Sources are processed in parallel.
pub fn betweenness<Ty: EdgeType>(graph: &SocialGraph<Ty>, directed: bool) -> CentralityVector {
    let n = graph.node_count();
    let adjacency = CompressedAdjacency::outgoing(graph, directed);
    let symmetric = !directed || !graph.is_directed();

    let mut scores = (0..n)
        .into_par_iter()
        .fold(
            || vec![0.0; n],
            |mut acc, source| {
                ShortestPaths::from_source(&adjacency, source).node_dependencies(source, &mut acc);
                acc
            },
        )
        .reduce(
            || vec![0.0; n],
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(x, y)| *x += y);
                a
            },
        );

    if symmetric {
        // Every unordered pair was visited from both ends
        scores.iter_mut().for_each(|v| *v /= 2.0);
    }

    CentralityVector::from_graph(graph, scores)
}

/// Betweenness of every edge of an undirected adjacency, keyed by
/// `(min, max)` endpoint indices.
pub fn edge_betweenness<A: Adjacency + ?Sized>(adjacency: &A) -> BTreeMap<(usize, usize), f64> {
    let mut scores = BTreeMap::new();
    for source in 0..adjacency.node_count() {
        ShortestPaths::from_source(adjacency, source).edge_dependencies(&mut scores);
    }
    scores.values_mut().for_each(|v| *v /= 2.0);
    scores
}
