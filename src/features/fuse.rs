//! Weighted fusion of encoded branches.
//!
//! Scales each branch matrix by its scalar weight, right-pads shorter
//! matrices with all-zero rows up to the tallest branch, then concatenates
//! columns in the caller's branch order (pipeline order: lexical,
//! part-of-speech, semantic). Rows are never reordered or dropped, so index
//! alignment with the label vector is preserved; the caller is responsible
//! for keeping that vector consistent with the padded row count.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::sparse::CsrMatrix;

/// Base branch coefficients and the shared magnitude factor. The factor is
/// a magnitude convenience only; relative branch weighting is unchanged by
/// it.
const LEXICAL_BASE: f64 = 0.5;
const POS_BASE: f64 = 0.15;
const SEMANTIC_BASE: f64 = 0.35;
const MAGNITUDE: f64 = 3.0;

/// Per-branch fusion weights, in branch order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FusionWeights {
    pub lexical: f64,
    pub pos: f64,
    pub semantic: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        FusionWeights {
            lexical: LEXICAL_BASE * MAGNITUDE,
            pos: POS_BASE * MAGNITUDE,
            semantic: SEMANTIC_BASE * MAGNITUDE,
        }
    }
}

/// Fuse weighted branch matrices into one combined matrix.
///
/// Output row count is the maximum input row count; output column count is
/// the sum of input column counts. An empty branch list yields a 0x0 matrix.
pub fn fuse(branches: &[(CsrMatrix, f64)]) -> Result<CsrMatrix> {
    let target_rows = branches.iter().map(|(m, _)| m.rows()).max().unwrap_or(0);
    let padded: Vec<CsrMatrix> = branches
        .iter()
        .map(|(m, w)| m.scale(*w).pad_rows(target_rows))
        .collect();
    let refs: Vec<&CsrMatrix> = padded.iter().collect();
    CsrMatrix::hstack(&refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(rows: usize, cols: usize, value: f64) -> CsrMatrix {
        let mut m = CsrMatrix::with_cols(cols);
        for _ in 0..rows {
            let entries: Vec<(usize, f64)> = (0..cols).map(|c| (c, value)).collect();
            m.push_row(&entries);
        }
        m
    }

    #[test]
    fn pads_shorter_branches_to_max_rows() {
        let out = fuse(&[
            (filled(3, 2, 1.0), 1.0),
            (filled(5, 2, 1.0), 1.0),
            (filled(4, 2, 1.0), 1.0),
        ])
        .unwrap();
        assert_eq!(out.rows(), 5);

        // Rows 3-4 of the first branch and row 4 of the third are all zero
        // in their column ranges. Padded rows carry no signal for their
        // branch: if an upstream encoder ever really dropped rows instead of
        // emitting empty ones, those documents would be silently misaligned.
        for row in 3..5 {
            assert_eq!(out.get(row, 0), 0.0);
            assert_eq!(out.get(row, 1), 0.0);
        }
        assert_eq!(out.get(4, 4), 0.0);
        assert_eq!(out.get(4, 5), 0.0);
        // The tallest branch keeps its data in every row.
        assert_eq!(out.get(4, 2), 1.0);
        assert_eq!(out.get(3, 4), 1.0);
    }

    #[test]
    fn column_count_is_exact_sum() {
        let out = fuse(&[
            (filled(2, 100, 1.0), 1.0),
            (filled(2, 50, 1.0), 1.0),
            (filled(2, 30, 1.0), 1.0),
        ])
        .unwrap();
        assert_eq!(out.cols(), 180);
    }

    #[test]
    fn weights_scale_their_column_block() {
        let base = filled(2, 3, 2.0);
        for w in [0.0, 1.0, 1.5] {
            let out = fuse(&[(base.clone(), w), (filled(2, 2, 1.0), 1.0)]).unwrap();
            for row in 0..2 {
                for col in 0..3 {
                    assert_eq!(out.get(row, col), w * base.get(row, col));
                }
                assert_eq!(out.get(row, 3), 1.0);
            }
        }
    }

    #[test]
    fn empty_branch_list_yields_empty_matrix() {
        let out = fuse(&[]).unwrap();
        assert_eq!((out.rows(), out.cols()), (0, 0));
    }

    #[test]
    fn default_weights_follow_branch_coefficients() {
        let w = FusionWeights::default();
        assert!((w.lexical - 1.5).abs() < 1e-12);
        assert!((w.pos - 0.45).abs() < 1e-12);
        assert!((w.semantic - 1.05).abs() < 1e-12);
    }
}
