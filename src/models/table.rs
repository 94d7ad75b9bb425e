//! Tabular data as returned by the upstream provider.
//!
//! The provider answers with named result sets, each a list of column
//! headers plus a row set. [`Table`] keeps that shape so the pipelines can
//! select, filter and extend columns before the rows are flattened into
//! [`StatRecord`]s.

use serde_json::{Map, Value};

/// One row of a table after normalization: lower-cased column name to a
/// JSON value that is guaranteed not to contain NaN or infinity.
pub type StatRecord = Map<String, Value>;

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            // Nested structures never appear in stat tables; keep them as text.
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

/// A named result set: ordered columns and rows of equal width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column headers.
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding with nulls or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    pub fn with_rows(mut self, rows: Vec<Vec<Cell>>) -> Self {
        for row in rows {
            self.push_row(row);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [String] {
        &mut self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Sum of a numeric column, or `None` if the column does not exist.
    ///
    /// Null and non-numeric cells contribute nothing; NaN cells are skipped.
    pub fn column_sum(&self, name: &str) -> Option<f64> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| row[idx].as_f64())
                .filter(|v| !v.is_nan())
                .sum(),
        )
    }

    /// Keep only rows whose cell in `column` satisfies `keep`.
    ///
    /// When the column does not exist no row survives.
    pub fn retain_where<F>(&mut self, column: &str, mut keep: F)
    where
        F: FnMut(&Cell) -> bool,
    {
        match self.column_index(column) {
            Some(idx) => self.rows.retain(|row| keep(&row[idx])),
            None => self.rows.clear(),
        }
    }

    /// Append a derived column. `values` must have one entry per row.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.into());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().unwrap_or(Cell::Null));
        }
    }

    /// Remove every column whose name matches `drop`.
    pub fn drop_columns<F>(&mut self, drop: F)
    where
        F: Fn(&str) -> bool,
    {
        let keep: Vec<bool> = self.columns.iter().map(|c| !drop(c)).collect();
        if keep.iter().all(|k| *k) {
            return;
        }

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// Keep rows in `start..end`, clamped to the table bounds.
    pub fn slice_rows(&mut self, start: usize, end: usize) {
        let end = end.min(self.rows.len());
        if start >= end {
            self.rows.clear();
            return;
        }
        self.rows.truncate(end);
        self.rows.drain(..start);
    }

    /// Stack several tables into one frame.
    ///
    /// Columns are the union of all inputs in first-seen order; cells a
    /// table does not provide are null.
    pub fn concat(name: impl Into<String>, tables: Vec<Table>) -> Table {
        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for column in &table.columns {
                if !columns.contains(column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut combined = Table::new(name, columns);
        for table in tables {
            let positions: Vec<Option<usize>> = combined
                .columns
                .iter()
                .map(|c| table.column_index(c))
                .collect();
            for row in table.rows {
                let out = positions
                    .iter()
                    .map(|pos| pos.and_then(|i| row.get(i).cloned()).unwrap_or(Cell::Null))
                    .collect();
                combined.rows.push(out);
            }
        }
        combined
    }
}
