//! Labelled adjacency matrix

use std::collections::HashSet;

use ndarray::{Array2, ArrayView2};

use crate::error::{GraphError, MalformedInput, Result};

/// Square 0/1 matrix whose rows and columns share one list of node labels.
///
/// Entry `(i, j)` is nonzero iff node `i` points at node `j`. The diagonal is
/// always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    labels: Vec<String>,
    values: Array2<f64>,
}

impl AdjacencyMatrix {
    /// Validate and wrap a labelled matrix
    pub fn new(labels: Vec<String>, values: Array2<f64>) -> Result<Self> {
        let n = labels.len();
        let (rows, columns) = values.dim();
        if rows != n || columns != n {
            return Err(MalformedInput::NotSquare {
                rows,
                columns: n,
                row: 0,
                cells: columns,
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(n);
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(MalformedInput::DuplicateLabel(label.clone()).into());
            }
        }

        for (i, label) in labels.iter().enumerate() {
            let value = values[[i, i]];
            if value != 0.0 {
                return Err(MalformedInput::NonZeroDiagonal {
                    label: label.clone(),
                    value,
                }
                .into());
            }
        }

        Ok(Self { labels, values })
    }

    /// Build from row vectors, mostly useful for small hand-written fixtures
    pub fn from_rows<S: Into<String>>(labels: Vec<S>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let n = labels.len();
        if let Some((row, cells)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != n)
            .map(|(i, r)| (i, r.len()))
        {
            return Err(MalformedInput::NotSquare {
                rows: rows.len(),
                columns: n,
                row,
                cells,
            }
            .into());
        }
        if rows.len() != n {
            return Err(MalformedInput::NotSquare {
                rows: rows.len(),
                columns: n,
                row: rows.len().saturating_sub(1),
                cells: n,
            }
            .into());
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((n, n), flat).map_err(|_| MalformedInput::NotSquare {
            rows: n,
            columns: n,
            row: 0,
            cells: n,
        })?;
        Self::new(labels, values)
    }

    /// Node labels in row/column order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the matrix records an edge `src -> dst`
    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.values[[src, dst]] != 0.0
    }

    /// Number of nonzero entries
    pub fn edge_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0.0).count()
    }

    /// Reorder nodes so that new position `k` holds old node `order[k]`.
    ///
    /// `order` must be a permutation of `0..len()`.
    pub fn permuted(&self, order: &[usize]) -> Result<Self> {
        let mut seen = vec![false; self.len()];
        for &i in order {
            if i >= self.len() || std::mem::replace(&mut seen[i], true) {
                return Err(GraphError::InvalidParameter(format!(
                    "{:?} is not a permutation of 0..{}",
                    order,
                    self.len()
                )));
            }
        }
        if order.len() != self.len() {
            return Err(GraphError::InvalidParameter(format!(
                "{:?} is not a permutation of 0..{}",
                order,
                self.len()
            )));
        }

        let labels = order.iter().map(|&i| self.labels[i].clone()).collect();
        let values = Array2::from_shape_fn((self.len(), self.len()), |(r, c)| {
            self.values[[order[r], order[c]]]
        });
        Ok(Self { labels, values })
    }
}
