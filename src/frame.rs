//! Log Frame Module
//!
//! Column-major tabular dataset loaded from one CSV time-series log.
//!
//! The first CSV column becomes the frame's index (formatted timestamps);
//! every remaining column is held as `f64` samples, with NaN standing in for
//! cells that are empty or not numeric.

use std::mem;

use crate::cache::EstimateSize;

// == Column ==
/// A single named series of samples.
#[derive(Debug, Clone)]
pub struct Column {
    /// Whitespace-trimmed header name
    pub name: String,
    /// One sample per row; NaN for missing or non-numeric cells
    pub values: Vec<f64>,
}

// == Log Frame ==
/// An immutable tabular dataset: a shared index plus named columns.
#[derive(Debug, Clone)]
pub struct LogFrame {
    index: Vec<String>,
    columns: Vec<Column>,
}

impl LogFrame {
    /// Creates a frame from an index and columns.
    ///
    /// Every column is expected to have one value per index row.
    pub fn new(index: Vec<String>, columns: Vec<Column>) -> Self {
        Self { index, columns }
    }

    /// Returns the row labels (formatted timestamps).
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// Returns the column names in file order.
    pub fn fields(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

// == Size Estimation ==
impl EstimateSize for LogFrame {
    /// Sums per-column buffer sizes plus the index's string payload.
    ///
    /// The bulk numeric payload dominates a loaded log, so the estimate
    /// charges `rows * 8` per column rather than a per-object constant.
    fn estimate_bytes(&self) -> Option<usize> {
        let mut bytes = mem::size_of::<Self>();
        bytes += self.index.capacity() * mem::size_of::<String>();
        for label in &self.index {
            bytes += label.capacity();
        }
        for col in &self.columns {
            bytes += mem::size_of::<Column>()
                + col.name.capacity()
                + col.values.capacity() * mem::size_of::<f64>();
        }
        Some(bytes)
    }
}
