//! Degree centrality

use petgraph::{Direction, EdgeType};

use crate::error::Result;
use crate::graph::SocialGraph;
use crate::metrics::{DegreeMode, DegreeVector};

/// Count each node's direct connections.
///
/// `mode` only matters for directed graphs; on an undirected graph every
/// mode returns the number of neighbours.
pub fn degree<Ty: EdgeType>(graph: &SocialGraph<Ty>, mode: DegreeMode) -> DegreeVector {
    let values = (0..graph.node_count())
        .map(|node| node_degree(graph, node, mode))
        .collect();
    DegreeVector::from_graph(graph, values)
}

/// Degree of the single node labelled `id`
pub fn degree_of<Ty: EdgeType>(graph: &SocialGraph<Ty>, id: &str, mode: DegreeMode) -> Result<usize> {
    let node = graph.node_index(id)?;
    Ok(node_degree(graph, node, mode))
}

fn node_degree<Ty: EdgeType>(graph: &SocialGraph<Ty>, node: usize, mode: DegreeMode) -> usize {
    let incoming = || graph.neighbors(node, Direction::Incoming).count();
    let outgoing = || graph.neighbors(node, Direction::Outgoing).count();

    if !graph.is_directed() {
        return outgoing();
    }

    match mode {
        DegreeMode::In => incoming(),
        DegreeMode::Out => outgoing(),
        DegreeMode::Total => incoming() + outgoing(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AdjacencyMatrix;
    use crate::error::GraphError;
    use crate::graph::{build_directed, mutualize, DirectedGraph};

    fn three_people() -> DirectedGraph {
        // A -> B, B -> A, B -> C
        let m = AdjacencyMatrix::from_rows(
            vec!["A", "B", "C"],
            vec![
                vec![0.0, 1.0, 0.0],
                vec![1.0, 0.0, 1.0],
                vec![0.0, 0.0, 0.0],
            ],
        )
        .unwrap();
        build_directed(&m).unwrap()
    }

    #[test]
    fn in_and_out_degree() {
        let g = three_people();
        assert_eq!(degree(&g, DegreeMode::In).values(), &[1, 1, 1]);
        assert_eq!(degree(&g, DegreeMode::Out).values(), &[1, 2, 0]);
        assert_eq!(degree(&g, DegreeMode::Total).values(), &[2, 3, 1]);
    }

    #[test]
    fn mutual_degree_ignores_mode() {
        let mutual = mutualize(&three_people());
        for mode in [DegreeMode::In, DegreeMode::Out, DegreeMode::Total] {
            assert_eq!(degree(&mutual, mode).values(), &[1, 1, 0]);
        }
    }

    #[test]
    fn single_lookup() {
        let g = three_people();
        assert_eq!(degree_of(&g, "B", DegreeMode::Out).unwrap(), 2);
        assert!(matches!(
            degree_of(&g, "Nobody", DegreeMode::Out),
            Err(GraphError::UnknownNode(_))
        ));
    }
}
