//! Identifier-by-date output tables.

use std::collections::HashMap;
use std::path::Path;

use crate::error::SampleError;

/// A time-series table: rows keyed by entity identifier, columns named by
/// date (`<date>` for Point layers, `mean_<date>`/`sum_<date>` for
/// Polygon layers). Cells start NaN and are written once per
/// (record, entity) pair; NaN cells serialize as empty CSV fields.
#[derive(Debug, Clone)]
pub struct OutputTable {
    ids: Vec<u32>,
    columns: Vec<String>,
    row_of: HashMap<u32, usize>,
    col_of: HashMap<String, usize>,
    cells: Vec<f64>,
}

impl OutputTable {
    /// Creates an empty table over the given row identifiers and columns.
    pub fn new(ids: &[u32], columns: Vec<String>) -> Self {
        let row_of = ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let col_of = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        let cells = vec![f64::NAN; ids.len() * columns.len()];
        Self {
            ids: ids.to_vec(),
            columns,
            row_of,
            col_of,
            cells,
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    /// Column labels in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Writes `value` into the cell at (`id`, `column`).
    ///
    /// Unknown identifiers or columns are ignored: a record date outside
    /// the table's period contributes nothing.
    pub fn set(&mut self, id: u32, column: &str, value: f64) {
        if let (Some(&r), Some(&c)) = (self.row_of.get(&id), self.col_of.get(column)) {
            self.cells[r * self.columns.len() + c] = value;
        }
    }

    /// Reads the cell at (`id`, `column`), if both exist.
    pub fn get(&self, id: u32, column: &str) -> Option<f64> {
        match (self.row_of.get(&id), self.col_of.get(column)) {
            (Some(&r), Some(&c)) => Some(self.cells[r * self.columns.len() + c]),
            _ => None,
        }
    }

    /// Writes the table as CSV: a leading unnamed identifier column, then
    /// one column per date label.
    pub fn write_csv(&self, path: &Path) -> Result<(), SampleError> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = Vec::with_capacity(self.columns.len() + 1);
        header.push(String::new());
        header.extend(self.columns.iter().cloned());
        writer.write_record(&header)?;

        let ncols = self.columns.len();
        for (r, id) in self.ids.iter().enumerate() {
            let mut row = Vec::with_capacity(ncols + 1);
            row.push(id.to_string());
            for c in 0..ncols {
                let v = self.cells[r * ncols + c];
                row.push(if v.is_nan() { String::new() } else { v.to_string() });
            }
            writer.write_record(&row)?;
        }

        writer.flush().map_err(SampleError::Io)?;
        Ok(())
    }
}
