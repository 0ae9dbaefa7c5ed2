//! Per-rendering node styles, kept apart from the graph itself

use std::collections::HashMap;

use petgraph::EdgeType;
use serde::Serialize;

use crate::cluster::CommunityAssignment;
use crate::error::{GraphError, Result};
use crate::graph::SocialGraph;
use crate::metrics::CentralityVector;

pub const DEFAULT_SIZE: f64 = 12.0;
pub const DEFAULT_COLOR: &str = "#97c2fc";
pub const HIGHLIGHT_COLOR: &str = "#e41a1c";

/// Categorical palette for community colouring, reused cyclically
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf", "#aec7e8",
];

/// How one node should be drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeStyle {
    pub id: String,
    pub label: String,
    pub size: f64,
    pub color: String,
    pub highlighted: bool,

    /// Hover text
    pub title: String,
}

/// Side table of node styles for one rendering, keyed by node label.
///
/// Building a `RenderSpec` never touches the graph; each rendering gets its own.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSpec {
    styles: Vec<NodeStyle>,
    index: HashMap<String, usize>,
}

impl RenderSpec {
    /// Default style for every node of `graph`
    pub fn new<Ty: EdgeType>(graph: &SocialGraph<Ty>) -> Self {
        let styles: Vec<NodeStyle> = graph
            .labels()
            .map(|id| NodeStyle {
                id: id.to_string(),
                label: id.to_string(),
                size: DEFAULT_SIZE,
                color: DEFAULT_COLOR.to_string(),
                highlighted: false,
                title: id.to_string(),
            })
            .collect();
        let index = styles
            .iter()
            .enumerate()
            .map(|(i, style)| (style.id.clone(), i))
            .collect();
        Self { styles, index }
    }

    /// Size nodes linearly between `min` and `max` by their score.
    ///
    /// A constant vector puts every node at the midpoint.
    pub fn size_by(mut self, scores: &CentralityVector, min: f64, max: f64) -> Result<Self> {
        let values = scores.values();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;

        for (id, &score) in scores.iter() {
            let size = if span > 0.0 {
                min + (score - lo) / span * (max - min)
            } else {
                (min + max) / 2.0
            };
            let style = self.style_mut(id)?;
            style.size = size;
            style.title = format!("{id}: {score:.4}");
        }
        Ok(self)
    }

    /// Colour nodes by community label
    pub fn color_by(mut self, assignment: &CommunityAssignment) -> Result<Self> {
        for (id, &community) in assignment.membership.iter() {
            let style = self.style_mut(id)?;
            style.color = PALETTE[community % PALETTE.len()].to_string();
            style.title = format!("{} (community {community})", style.title);
        }
        Ok(self)
    }

    /// Mark one individual so the rendering singles them out
    pub fn highlight(mut self, id: &str) -> Result<Self> {
        let style = self.style_mut(id)?;
        style.highlighted = true;
        style.color = HIGHLIGHT_COLOR.to_string();
        Ok(self)
    }

    /// Style of the node labelled `id`
    pub fn style(&self, id: &str) -> Result<&NodeStyle> {
        self.index
            .get(id)
            .map(|&i| &self.styles[i])
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))
    }

    /// Styles in graph order
    pub fn styles(&self) -> &[NodeStyle] {
        &self.styles
    }

    fn style_mut(&mut self, id: &str) -> Result<&mut NodeStyle> {
        match self.index.get(id) {
            Some(&i) => Ok(&mut self.styles[i]),
            None => Err(GraphError::UnknownNode(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::greedy_modularity;
    use crate::data::AdjacencyMatrix;
    use crate::graph::{build_directed, mutualize, DirectedGraph};
    use crate::metrics::{degree, DegreeMode};

    fn sample() -> DirectedGraph {
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
    fn sizes_scale_with_scores() {
        let g = sample();
        let spec = RenderSpec::new(&g)
            .size_by(&degree(&g, DegreeMode::Total).to_centrality(), 10.0, 30.0)
            .unwrap();
        assert_eq!(spec.style("C").unwrap().size, 10.0);
        assert_eq!(spec.style("B").unwrap().size, 30.0);
        assert_eq!(spec.style("A").unwrap().size, 20.0);
    }

    #[test]
    fn constant_scores_use_midpoint() {
        let g = sample();
        let flat = CentralityVector::from_graph(&g, vec![0.3; 3]);
        let spec = RenderSpec::new(&g).size_by(&flat, 10.0, 20.0).unwrap();
        assert!(spec.styles().iter().all(|s| s.size == 15.0));
    }

    #[test]
    fn colours_and_highlight() {
        let g = sample();
        let mutual = mutualize(&g);
        let spec = RenderSpec::new(&mutual)
            .color_by(&greedy_modularity(&mutual))
            .unwrap()
            .highlight("A")
            .unwrap();
        assert_eq!(spec.style("B").unwrap().color, PALETTE[0]);
        assert_eq!(spec.style("C").unwrap().color, PALETTE[1]);
        assert!(spec.style("A").unwrap().highlighted);
        assert_eq!(spec.style("A").unwrap().color, HIGHLIGHT_COLOR);
    }

    #[test]
    fn unknown_highlight_is_an_error() {
        let g = sample();
        assert!(matches!(
            RenderSpec::new(&g).highlight("Z"),
            Err(GraphError::UnknownNode(_))
        ));
    }
}
