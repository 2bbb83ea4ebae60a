//! Dense row-major matrix of aligned series.
//!
//! Rows are samples and columns are signals. k-Shape treats every row as a
//! series of length `n_cols`; the agglomerative path treats every column as
//! a series of length `n_rows`.

use crate::error::{ClusterError, Result};

/// A two-dimensional numeric matrix (`rows × columns`).
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesMatrix {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl SeriesMatrix {
    /// Create a matrix from row-major data.
    pub fn new(n_rows: usize, n_cols: usize, data: Vec<f64>) -> Result<Self> {
        let expected = n_rows.checked_mul(n_cols).ok_or_else(|| {
            ClusterError::InvalidParameter(format!(
                "matrix shape {}x{} overflows",
                n_rows, n_cols
            ))
        })?;
        if data.len() != expected {
            return Err(ClusterError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            n_rows,
            n_cols,
        })
    }

    /// Create a matrix from a slice of equal-length rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(ClusterError::DimensionMismatch {
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            n_rows: rows.len(),
            n_cols,
        })
    }

    /// Create a matrix whose columns are the given equal-length series.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Vec::len);
        for column in columns {
            if column.len() != n_rows {
                return Err(ClusterError::DimensionMismatch {
                    expected: n_rows,
                    got: column.len(),
                });
            }
        }
        let n_cols = columns.len();
        let mut data = vec![0.0; n_rows * n_cols];
        for (j, column) in columns.iter().enumerate() {
            for (i, &v) in column.iter().enumerate() {
                data[i * n_cols + j] = v;
            }
        }
        Ok(Self {
            data,
            n_rows,
            n_cols,
        })
    }

    /// All-zero matrix.
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            data: vec![0.0; n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.n_rows && col < self.n_cols {
            Some(self.data[row * self.n_cols + col])
        } else {
            None
        }
    }

    /// Borrow a row.
    ///
    /// # Panics
    /// Panics if `i >= n_rows`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.n_rows).map(move |i| self.row(i))
    }

    /// Copy out a column.
    ///
    /// # Panics
    /// Panics if `j >= n_cols`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        assert!(j < self.n_cols, "column {} out of bounds ({})", j, self.n_cols);
        (0..self.n_rows)
            .map(|i| self.data[i * self.n_cols + j])
            .collect()
    }

    /// Copy out every column.
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.n_cols).map(|j| self.column(j)).collect()
    }

    /// Copy out every row.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    /// Sub-matrix holding rows `start..end`.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.n_rows {
            return Err(ClusterError::InvalidParameter(format!(
                "row range {}..{} invalid for {} rows",
                start, end, self.n_rows
            )));
        }
        Ok(Self {
            data: self.data[start * self.n_cols..end * self.n_cols].to_vec(),
            n_rows: end - start,
            n_cols: self.n_cols,
        })
    }

    /// Row-major backing slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SeriesMatrix {
        SeriesMatrix::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
            vec![10.0, 11.0, 12.0],
        ])
        .unwrap()
    }

    #[test]
    fn from_rows_keeps_row_major_order() {
        let m = sample();
        assert_eq!(m.shape(), (4, 3));
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m.get(3, 2), Some(12.0));
        assert_eq!(m.get(4, 0), None);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = SeriesMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            ClusterError::DimensionMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn new_validates_length() {
        assert!(SeriesMatrix::new(2, 2, vec![1.0, 2.0, 3.0, 4.0]).is_ok());
        assert!(matches!(
            SeriesMatrix::new(2, 3, vec![1.0; 5]),
            Err(ClusterError::DimensionMismatch { expected: 6, got: 5 })
        ));
    }

    #[test]
    fn columns_are_transposed_rows() {
        let m = sample();
        assert_eq!(m.column(0), vec![1.0, 4.0, 7.0, 10.0]);
        assert_eq!(m.columns().len(), 3);

        let back = SeriesMatrix::from_columns(&m.columns()).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn slice_rows_selects_range() {
        let m = sample();
        let s = m.slice_rows(1, 3).unwrap();
        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s.to_rows(), vec![vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]);

        assert!(m.slice_rows(2, 5).is_err());
        assert!(m.slice_rows(3, 2).is_err());
        assert_eq!(m.slice_rows(2, 2).unwrap().n_rows(), 0);
    }

    #[test]
    fn empty_matrix() {
        let m = SeriesMatrix::from_rows(&[]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.shape(), (0, 0));
        assert_eq!(SeriesMatrix::zeros(2, 3).as_slice(), &[0.0; 6]);
    }
}
