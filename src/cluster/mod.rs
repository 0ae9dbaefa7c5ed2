//! Community detection module

pub mod girvan_newman;
pub mod greedy;
pub mod metrics;
pub mod modularity;

use std::fmt;

use petgraph::EdgeType;
use serde::Serialize;

use crate::error::Result;
use crate::graph::algorithms::normalize_labels;
use crate::graph::SocialGraph;
use crate::metrics::NodeVector;

pub use girvan_newman::{girvan_newman, girvan_newman_with_history, EdgeRemoval};
pub use greedy::{greedy_modularity, greedy_modularity_with_dendrogram, Dendrogram, Merge};
pub use metrics::summarize_communities;
pub use modularity::modularity;

/// Partitioning algorithm that produced a [`CommunityAssignment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    GreedyModularity,
    GirvanNewman,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::GreedyModularity => "greedy_modularity",
            Algorithm::GirvanNewman => "girvan_newman",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Community label per node.
///
/// Labels run 0.. in order of first appearance by node index. Labels from
/// different algorithms are not comparable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityAssignment {
    pub algorithm: Algorithm,
    pub membership: NodeVector<usize>,
    pub modularity: f64,
}

impl CommunityAssignment {
    pub(crate) fn new<Ty: EdgeType>(
        graph: &SocialGraph<Ty>,
        algorithm: Algorithm,
        keys: &[usize],
        modularity: f64,
    ) -> Self {
        Self {
            algorithm,
            membership: NodeVector::from_graph(graph, normalize_labels(keys)),
            modularity,
        }
    }

    pub fn community_count(&self) -> usize {
        self.membership.values().iter().max().map_or(0, |&max| max + 1)
    }

    /// Community label of the node labelled `id`
    pub fn community_of(&self, id: &str) -> Result<usize> {
        self.membership.get(id).copied()
    }

    /// Member labels of each community, indexed by community label
    pub fn communities(&self) -> Vec<Vec<String>> {
        let mut groups = vec![Vec::new(); self.community_count()];
        for (node, &label) in self.membership.iter() {
            groups[label].push(node.to_string());
        }
        groups
    }
}

/// Summary of one detected community
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Community label
    pub id: usize,

    /// Member labels
    pub members: Vec<String>,

    /// Size of the community
    pub size: usize,

    /// Density: internal mutual edges / potential edges
    pub density: f64,

    /// Central nodes using various centrality measures
    pub central_nodes: ClusterCentralNodes,
}

/// Key members of a community identified by different centrality measures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterCentralNodes {
    /// Members with the most mutual ties inside the community
    pub degree: Vec<String>,

    /// Members with the highest betweenness in the whole network
    pub betweenness: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AdjacencyMatrix;
    use crate::error::GraphError;
    use crate::graph::build_directed;

    #[test]
    fn assignment_groups_and_lookup() {
        let m = AdjacencyMatrix::from_rows(vec!["a", "b", "c"], vec![vec![0.0; 3]; 3]).unwrap();
        let g = build_directed(&m).unwrap();
        let assignment = CommunityAssignment::new(&g, Algorithm::GirvanNewman, &[9, 4, 9], 0.0);

        assert_eq!(assignment.membership.values(), &[0, 1, 0]);
        assert_eq!(assignment.community_count(), 2);
        assert_eq!(assignment.community_of("c").unwrap(), 0);
        assert!(matches!(
            assignment.community_of("d"),
            Err(GraphError::UnknownNode(_))
        ));
        assert_eq!(
            assignment.communities(),
            vec![vec!["a".to_string(), "c".to_string()], vec!["b".to_string()]]
        );
    }
}
