//! End-to-end analysis run
//!
//! Builds the directed and mutual graphs once, then computes every centrality
//! vector and both community partitions exactly once. Independent groups of
//! measures run concurrently on the rayon pool.

use serde::Serialize;

use crate::cluster::{
    girvan_newman_with_history, greedy_modularity_with_dendrogram, summarize_communities, Cluster,
    CommunityAssignment, Dendrogram, EdgeRemoval,
};
use crate::config::Config;
use crate::data::AdjacencyMatrix;
use crate::error::{NonConvergence, Result};
use crate::graph::{build_directed, mutualize, DirectedGraph, MutualGraph};
use crate::metrics::{
    betweenness, degree, eigenvector_centrality, pagerank, CentralityVector, DegreeMode,
    DegreeVector, IterativeCentrality,
};

/// Per-node measures of the directed graph plus mutual degree
#[derive(Debug, Clone, Serialize)]
pub struct Centralities {
    pub degree_total: DegreeVector,
    pub degree_in: DegreeVector,
    pub degree_out: DegreeVector,
    pub mutual_degree: DegreeVector,
    pub eigenvector: IterativeCentrality,
    pub pagerank: IterativeCentrality,
    pub betweenness: CentralityVector,
    pub mutual_betweenness: CentralityVector,
}

/// One community partition with its history and summaries
#[derive(Debug, Clone, Serialize)]
pub struct CommunityResult {
    pub assignment: CommunityAssignment,
    pub clusters: Vec<Cluster>,
}

/// Everything computed about one individual
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub id: String,
    pub degree_total: usize,
    pub degree_in: usize,
    pub degree_out: usize,
    pub mutual_degree: usize,
    pub eigenvector: f64,
    pub pagerank: f64,
    pub betweenness: f64,
    pub greedy_community: usize,
    pub girvan_newman_community: usize,
}

/// Result of a full analysis run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub graph: DirectedGraph,
    pub mutual_graph: MutualGraph,
    pub centralities: Centralities,
    pub greedy: CommunityResult,
    pub dendrogram: Dendrogram,
    pub girvan_newman: CommunityResult,
    pub removals: Vec<EdgeRemoval>,
    pub warnings: Vec<NonConvergence>,
}

impl Analysis {
    /// Run the full pipeline on a validated matrix
    pub fn run(matrix: &AdjacencyMatrix, config: &Config) -> Result<Self> {
        config.validate()?;

        let graph = build_directed(matrix)?;
        let mutual_graph = mutualize(&graph);

        let (centralities, ((greedy, dendrogram), (girvan_newman, removals))) = rayon::join(
            || compute_centralities(&graph, &mutual_graph, config),
            || {
                rayon::join(
                    || greedy_modularity_with_dendrogram(&mutual_graph),
                    || girvan_newman_with_history(&mutual_graph),
                )
            },
        );

        let summarize = |assignment: CommunityAssignment| {
            let clusters = summarize_communities(
                &assignment,
                &mutual_graph,
                &centralities.mutual_betweenness,
                config.top_n,
            );
            CommunityResult {
                assignment,
                clusters,
            }
        };
        let greedy = summarize(greedy);
        let girvan_newman = summarize(girvan_newman);

        let warnings: Vec<NonConvergence> = [&centralities.eigenvector, &centralities.pagerank]
            .into_iter()
            .filter_map(IterativeCentrality::warning)
            .collect();
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        Ok(Self {
            graph,
            mutual_graph,
            centralities,
            greedy,
            dendrogram,
            girvan_newman,
            removals,
            warnings,
        })
    }

    /// All measures for the node labelled `id`
    pub fn node_metrics(&self, id: &str) -> Result<NodeMetrics> {
        let c = &self.centralities;
        Ok(NodeMetrics {
            id: id.to_string(),
            degree_total: *c.degree_total.get(id)?,
            degree_in: *c.degree_in.get(id)?,
            degree_out: *c.degree_out.get(id)?,
            mutual_degree: *c.mutual_degree.get(id)?,
            eigenvector: *c.eigenvector.scores.get(id)?,
            pagerank: *c.pagerank.scores.get(id)?,
            betweenness: *c.betweenness.get(id)?,
            greedy_community: self.greedy.assignment.community_of(id)?,
            girvan_newman_community: self.girvan_newman.assignment.community_of(id)?,
        })
    }

    /// Measures for every node, in graph order
    pub fn all_node_metrics(&self) -> Vec<NodeMetrics> {
        self.graph
            .labels()
            .filter_map(|id| self.node_metrics(id).ok())
            .collect()
    }
}

fn compute_centralities(graph: &DirectedGraph, mutual_graph: &MutualGraph, config: &Config) -> Centralities {
    log::info!("Computing centrality measures");

    let ((eigenvector, pagerank), (betweenness_directed, betweenness_mutual)) = rayon::join(
        || {
            rayon::join(
                || eigenvector_centrality(graph, true, &config.solver()),
                || pagerank(graph, true, &config.pagerank()),
            )
        },
        || {
            rayon::join(
                || betweenness(graph, true),
                || betweenness(mutual_graph, false),
            )
        },
    );

    Centralities {
        degree_total: degree(graph, DegreeMode::Total),
        degree_in: degree(graph, DegreeMode::In),
        degree_out: degree(graph, DegreeMode::Out),
        mutual_degree: degree(mutual_graph, DegreeMode::Total),
        eigenvector,
        pagerank,
        betweenness: betweenness_directed,
        mutual_betweenness: betweenness_mutual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn sample() -> AdjacencyMatrix {
        // A <-> B, B -> C
        AdjacencyMatrix::from_rows(
            vec!["A", "B", "C"],
            vec![
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn runs_the_three_person_example() {
        let analysis = Analysis::run(&sample(), &Config::default()).unwrap();
        let c = &analysis.centralities;
        assert_eq!(c.degree_in.values(), &[1, 1, 1]);
        assert_eq!(c.degree_out.values(), &[1, 2, 0]);
        assert_eq!(c.mutual_degree.values(), &[1, 1, 0]);
        assert_eq!(analysis.mutual_graph.edge_count(), 1);

        let b = analysis.node_metrics("B").unwrap();
        assert_eq!(b.degree_total, 3);
        assert_eq!(b.greedy_community, b.girvan_newman_community);
        assert_eq!(analysis.node_metrics("A").unwrap().greedy_community, 0);
        assert_eq!(analysis.node_metrics("C").unwrap().greedy_community, 1);
        assert_eq!(analysis.all_node_metrics().len(), 3);
    }

    #[test]
    fn unknown_individual_is_an_error() {
        let analysis = Analysis::run(&sample(), &Config::default()).unwrap();
        assert!(matches!(
            analysis.node_metrics("Z"),
            Err(GraphError::UnknownNode(_))
        ));
    }

    #[test]
    fn acyclic_network_carries_eigenvector_warning() {
        // a -> b -> c -> d
        let matrix = AdjacencyMatrix::from_rows(
            vec!["a", "b", "c", "d"],
            vec![
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0, 0.0],
            ],
        )
        .unwrap();
        let analysis = Analysis::run(&matrix, &Config::default()).unwrap();
        assert_eq!(analysis.warnings.len(), 1);
        assert_eq!(analysis.warnings[0].measure, "eigenvector centrality");
        assert!(analysis.centralities.pagerank.converged);
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let config = Config::new(2.0, 1e-6, 10, 5);
        assert!(matches!(
            Analysis::run(&sample(), &config),
            Err(GraphError::InvalidParameter(_))
        ));
    }
}
