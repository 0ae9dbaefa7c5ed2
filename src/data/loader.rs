//! CSV adjacency matrix loading

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, Trim};
use ndarray::Array2;

use crate::data::AdjacencyMatrix;
use crate::error::{MalformedInput, Result};

/// Load a labelled adjacency matrix from a CSV file.
///
/// The header row holds a corner cell followed by the column labels; every
/// following row starts with its row label.
pub fn load_adjacency_matrix<P: AsRef<Path>>(path: P) -> Result<AdjacencyMatrix> {
    let path = path.as_ref();
    log::info!("Reading adjacency matrix: {}", path.display());

    let file = File::open(path)?;
    let matrix = read_adjacency_matrix(file)?;

    log::info!(
        "Loaded matrix with {} nodes and {} directed edges",
        matrix.len(),
        matrix.edge_count()
    );

    Ok(matrix)
}

/// Parse a labelled adjacency matrix from any CSV source
pub fn read_adjacency_matrix<R: Read>(reader: R) -> Result<AdjacencyMatrix> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(MalformedInput::Empty.into());
    }

    // First header cell is the corner above the row labels
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();
    let n = columns.len();
    log::debug!("Header declares {} columns", n);

    let mut row_labels: Vec<String> = Vec::with_capacity(n);
    let mut cells: Vec<f64> = Vec::with_capacity(n * n);

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() != n + 1 {
            return Err(MalformedInput::NotSquare {
                rows: row + 1,
                columns: n,
                row,
                cells: record.len().saturating_sub(1),
            }
            .into());
        }

        let label = record[0].to_string();
        for (column, raw) in record.iter().skip(1).enumerate() {
            let value = raw
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MalformedInput::InvalidCell {
                    row: label.clone(),
                    column: columns[column].clone(),
                    value: raw.to_string(),
                })?;
            cells.push(value);
        }
        row_labels.push(label);
    }

    if row_labels.len() != n {
        return Err(MalformedInput::NotSquare {
            rows: row_labels.len(),
            columns: n,
            row: row_labels.len().saturating_sub(1),
            cells: n,
        }
        .into());
    }

    let mut seen = HashSet::with_capacity(n);
    for label in &columns {
        if !seen.insert(label.as_str()) {
            return Err(MalformedInput::DuplicateLabel(label.clone()).into());
        }
    }

    if let Some((position, (row, column))) = row_labels
        .iter()
        .zip(&columns)
        .enumerate()
        .find(|(_, (r, c))| r != c)
    {
        return Err(MalformedInput::LabelMismatch {
            position,
            row: row.clone(),
            column: column.clone(),
        }
        .into());
    }

    let values = Array2::from_shape_vec((n, n), cells).map_err(|_| MalformedInput::NotSquare {
        rows: n,
        columns: n,
        row: 0,
        cells: n,
    })?;

    AdjacencyMatrix::new(columns, values)
}
