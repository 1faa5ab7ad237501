//! Matrix cells and flattening of two-dimensional value tables.

use serde::{Deserialize, Serialize};

/// One (row category, column category, value) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Label on the y axis.
    pub row: String,
    /// Label on the x axis.
    pub column: String,
    /// Percentage-like value, nominally 0-100 but not enforced.
    pub value: f64,
}

impl Cell {
    pub fn new(row: impl Into<String>, column: impl Into<String>, value: f64) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
            value,
        }
    }
}

/// Cells flattened from a table, plus the count of entries that had no label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellTable {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub cells: Vec<Cell>,
    /// Table entries skipped because their row or column index had no declared label.
    pub dropped: usize,
}

impl CellTable {
    /// Flatten `table[row][column]` row-major into cells.
    ///
    /// Rows beyond `row_labels` and columns beyond `column_labels` are dropped
    /// rather than mapped to an undefined position. Rows missing from the table
    /// simply produce no cells.
    pub fn flatten(row_labels: &[String], column_labels: &[String], table: &[Vec<f64>]) -> Self {
        let mut cells = Vec::with_capacity(row_labels.len() * column_labels.len());
        let mut dropped = 0;

        for (row_idx, values) in table.iter().enumerate() {
            let Some(row) = row_labels.get(row_idx) else {
                dropped += values.len();
                continue;
            };
            for (col_idx, value) in values.iter().enumerate() {
                match column_labels.get(col_idx) {
                    Some(column) => cells.push(Cell::new(row.as_str(), column.as_str(), *value)),
                    None => dropped += 1,
                }
            }
        }

        if dropped > 0 {
            log::warn!(
                "matrix: dropped {dropped} value(s) without a row/column label ({} rows x {} columns declared)",
                row_labels.len(),
                column_labels.len()
            );
        }

        Self {
            row_labels: row_labels.to_vec(),
            column_labels: column_labels.to_vec(),
            cells,
            dropped,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no cell was produced.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Find the cell at the given row and column labels.
    pub fn get(&self, row: &str, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_flatten_row_major() {
        let table = CellTable::flatten(
            &labels(&["Mon", "Tue"]),
            &labels(&["Breakfast", "Lunch", "Dinner"]),
            &[vec![10.0, 90.0, 50.0], vec![20.0, 80.0, 60.0]],
        );
        assert_eq!(table.len(), 6);
        assert_eq!(table.dropped, 0);
        assert_eq!(table.cells[0], Cell::new("Mon", "Breakfast", 10.0));
        assert_eq!(table.cells[5], Cell::new("Tue", "Dinner", 60.0));
    }

    #[test]
    fn test_flatten_drops_unlabelled() {
        let table = CellTable::flatten(
            &labels(&["Mon"]),
            &labels(&["Breakfast", "Lunch"]),
            &[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped, 3);
    }

    #[test]
    fn test_flatten_short_table() {
        let table = CellTable::flatten(&labels(&["Mon", "Tue"]), &labels(&["Lunch"]), &[vec![7.0]]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Mon", "Lunch").map(|c| c.value), Some(7.0));
        assert!(table.get("Tue", "Lunch").is_none());
    }
}
