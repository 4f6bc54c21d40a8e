/// Row-major height field storage with NaN as the missing-sample marker.
use crate::error::ConvertError;

/// A 2-D grid of elevation samples. Immutable once built; every pipeline
/// stage produces a fresh field instead of mutating its input.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    values: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl HeightField {
    /// Validate shape and wrap a row-major sample buffer
    pub fn new(values: Vec<f64>, rows: usize, cols: usize) -> Result<Self, ConvertError> {
        if rows == 0 || cols == 0 {
            return Err(ConvertError::invalid_shape(format!("{rows}x{cols}")));
        }
        if values.len() != rows * cols {
            return Err(ConvertError::invalid_shape(format!(
                "{} samples for a {rows}x{cols} grid",
                values.len()
            )));
        }
        Ok(Self { values, rows, cols })
    }

    /// Constructor for stage outputs whose shape is correct by construction
    pub(crate) fn from_parts(values: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        Self { values, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// A sample is valid unless it carries the NaN missing marker
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        !self.get(row, col).is_nan()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Build a small field from nested rows, for tests
    #[cfg(test)]
    pub fn from_rows(rows: &[&[f64]]) -> Self {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, |r| r.len());
        let mut values = Vec::with_capacity(row_count * col_count);
        for row in rows {
            assert_eq!(row.len(), col_count);
            values.extend_from_slice(row);
        }
        Self::from_parts(values, row_count, col_count)
    }
}
