//! Per-node centrality measures
//!
//! Every function here is a pure function of its graph argument and returns a
//! fresh vector indexed like the graph's nodes.

pub mod betweenness;
pub mod degree;
pub mod eigenvector;
pub mod pagerank;

use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;
use petgraph::EdgeType;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, NonConvergence, Result};
use crate::graph::SocialGraph;

pub use betweenness::{betweenness, edge_betweenness};
pub use degree::{degree, degree_of};
pub use eigenvector::eigenvector_centrality;
pub use pagerank::pagerank;

/// Which edges count towards a node's degree on a directed graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeMode {
    Total,
    In,
    Out,
}

/// One value per node, in graph order, addressable by node label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeVector<T> {
    nodes: Vec<String>,
    values: Vec<T>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// Real-valued centrality scores
pub type CentralityVector = NodeVector<f64>;

/// Integer degree counts
pub type DegreeVector = NodeVector<usize>;

impl<T> NodeVector<T> {
    /// Pair `values` with the node labels of `graph`.
    ///
    /// Panics if the lengths disagree.
    pub(crate) fn from_graph<Ty: EdgeType>(graph: &SocialGraph<Ty>, values: Vec<T>) -> Self {
        let nodes: Vec<String> = graph.labels().map(str::to_string).collect();
        Self::new(nodes, values)
    }

    /// Panics if the lengths disagree.
    pub(crate) fn new(nodes: Vec<String>, values: Vec<T>) -> Self {
        assert_eq!(nodes.len(), values.len(), "one value per node");
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), i))
            .collect();
        Self {
            nodes,
            values,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node labels in graph order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Values in graph order
    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.nodes.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Value for the node labelled `id`
    pub fn get(&self, id: &str) -> Result<&T> {
        self.index
            .get(id)
            .map(|&i| &self.values[i])
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }
}

impl<T: Copy + PartialOrd> NodeVector<T> {
    /// The `n` highest-valued nodes, ties kept in graph order
    pub fn top(&self, n: usize) -> Vec<(&str, T)> {
        self.iter()
            .map(|(node, &value)| (node, value))
            .sorted_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
            .take(n)
            .collect()
    }
}

impl DegreeVector {
    /// Degrees as real-valued scores, e.g. for sizing nodes in a rendering
    pub fn to_centrality(&self) -> CentralityVector {
        NodeVector::new(
            self.nodes.clone(),
            self.values.iter().map(|&v| v as f64).collect(),
        )
    }
}

/// Output of a power-iteration solver together with its convergence record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterativeCentrality {
    pub measure: &'static str,
    pub scores: CentralityVector,
    pub iterations: usize,
    pub residual: f64,
    pub tolerance: f64,
    pub converged: bool,
}

impl IterativeCentrality {
    /// The non-convergence warning, if the solver hit its iteration cap
    pub fn warning(&self) -> Option<NonConvergence> {
        (!self.converged).then(|| NonConvergence {
            measure: self.measure.to_string(),
            iterations: self.iterations,
            residual: self.residual,
            tolerance: self.tolerance,
        })
    }
}
