//! Compressed sparse row matrix.
//!
//! Vocabularies are large and per-document term sets small, so encoded
//! matrices store only non-zero entries. Rows are documents in dataset
//! order; the fuser relies on that ordering staying intact.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VeracityError};

/// Sparse row-major f64 matrix in CSR layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl CsrMatrix {
    /// An all-zero matrix with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        CsrMatrix {
            rows,
            cols,
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// An empty matrix ready for row-by-row construction.
    pub fn with_cols(cols: usize) -> Self {
        Self::zeros(0, cols)
    }

    /// Append one row given `(column, value)` entries. Entries are sorted by
    /// column; explicit zeros are dropped.
    pub fn push_row(&mut self, entries: &[(usize, f64)]) {
        let mut sorted: Vec<(usize, f64)> = entries
            .iter()
            .copied()
            .filter(|(_, v)| *v != 0.0)
            .collect();
        sorted.sort_by_key(|(c, _)| *c);
        for (c, v) in sorted {
            assert!(c < self.cols, "column {} out of range {}", c, self.cols);
            self.indices.push(c);
            self.values.push(v);
        }
        self.rows += 1;
        self.indptr.push(self.indices.len());
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Sorted `(columns, values)` slices of one row.
    pub fn row(&self, i: usize) -> (&[usize], &[f64]) {
        let (lo, hi) = (self.indptr[i], self.indptr[i + 1]);
        (&self.indices[lo..hi], &self.values[lo..hi])
    }

    /// Single element lookup.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let (cols, vals) = self.row(row);
        match cols.binary_search(&col) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// True if any stored entry is negative.
    pub fn has_negative(&self) -> bool {
        self.values.iter().any(|v| *v < 0.0)
    }

    /// Element-wise scalar multiple.
    pub fn scale(&self, w: f64) -> CsrMatrix {
        if w == 0.0 {
            return CsrMatrix::zeros(self.rows, self.cols);
        }
        let mut out = self.clone();
        for v in &mut out.values {
            *v *= w;
        }
        out
    }

    /// Copy with all-zero rows appended until `target` rows. Never truncates.
    pub fn pad_rows(&self, target: usize) -> CsrMatrix {
        assert!(target >= self.rows, "pad_rows never drops rows");
        let mut out = self.clone();
        out.indptr.extend(std::iter::repeat(out.indices.len()).take(target - self.rows));
        out.rows = target;
        out
    }

    /// Column-wise concatenation. All parts must share a row count.
    pub fn hstack(parts: &[&CsrMatrix]) -> Result<CsrMatrix> {
        let rows = match parts.first() {
            Some(m) => m.rows,
            None => return Ok(CsrMatrix::zeros(0, 0)),
        };
        for m in parts {
            if m.rows != rows {
                return Err(VeracityError::DimensionMismatch {
                    expected: rows,
                    found: m.rows,
                });
            }
        }

        let cols = parts.iter().map(|m| m.cols).sum();
        let mut out = CsrMatrix::with_cols(cols);
        let mut row_buf = Vec::new();
        for i in 0..rows {
            row_buf.clear();
            let mut offset = 0;
            for m in parts {
                let (cs, vs) = m.row(i);
                row_buf.extend(cs.iter().zip(vs).map(|(c, v)| (c + offset, *v)));
                offset += m.cols;
            }
            out.push_row(&row_buf);
        }
        Ok(out)
    }

    /// Dense copy, mostly for small matrices in tests and reports.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let mut dense = vec![vec![0.0; self.cols]; self.rows];
        for i in 0..self.rows {
            let (cols, vals) = self.row(i);
            for (c, v) in cols.iter().zip(vals) {
                dense[i][*c] = *v;
            }
        }
        dense
    }

    /// Row-major gather of the given columns into a dense matrix.
    pub fn gather_columns(&self, columns: &[usize]) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|i| columns.iter().map(|&c| self.get(i, c)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsrMatrix {
        let mut m = CsrMatrix::with_cols(3);
        m.push_row(&[(0, 1.0), (2, 2.0)]);
        m.push_row(&[]);
        m.push_row(&[(1, -0.5)]);
        m
    }

    #[test]
    fn stores_only_nonzeros() {
        let mut m = CsrMatrix::with_cols(4);
        m.push_row(&[(3, 1.0), (1, 0.0), (0, 2.0)]);
        assert_eq!(m.nnz(), 2);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(0, 3), 1.0);
    }

    #[test]
    fn scale_and_negativity() {
        let m = sample();
        assert!(m.has_negative());
        let doubled = m.scale(2.0);
        assert_eq!(doubled.get(0, 2), 4.0);
        assert_eq!(doubled.get(2, 1), -1.0);
        assert!(!m.scale(0.0).has_negative());
        assert_eq!(m.scale(0.0).nnz(), 0);
    }

    #[test]
    fn pad_rows_appends_zero_rows() {
        let padded = sample().pad_rows(5);
        assert_eq!(padded.rows(), 5);
        assert_eq!(padded.get(0, 0), 1.0);
        let (cols, _) = padded.row(4);
        assert!(cols.is_empty());
    }

    #[test]
    fn hstack_concatenates_columns() {
        let a = sample();
        let b = sample().scale(10.0);
        let out = CsrMatrix::hstack(&[&a, &b]).unwrap();
        assert_eq!(out.cols(), 6);
        assert_eq!(out.rows(), 3);
        let dense = out.to_dense();
        assert_eq!(dense[0], vec![1.0, 0.0, 2.0, 10.0, 0.0, 20.0]);
        assert_eq!(dense[1], vec![0.0; 6]);
    }

    #[test]
    fn gather_columns_is_row_major() {
        let m = sample();
        let gathered = m.gather_columns(&[2, 0]);
        assert_eq!(gathered, vec![vec![2.0, 1.0], vec![0.0, 0.0], vec![0.0, 0.0]]);
    }

    #[test]
    fn hstack_rejects_row_mismatch() {
        let a = sample();
        let b = sample().pad_rows(4);
        let err = CsrMatrix::hstack(&[&a, &b]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::VeracityError::DimensionMismatch { expected: 3, found: 4 }
        ));
    }

    #[test]
    fn serde_round_trip() {
        let m = sample();
        let json = serde_json::to_string(&m).unwrap();
        let back: CsrMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(m, back);
    }
}
