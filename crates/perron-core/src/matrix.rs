//! Dense integer matrices acting on big-integer and approximate vectors.
//!
//! [`Matrix`] is the collaborator the eigenvector engine consumes: it
//! multiplies exact integer vectors during power iteration and decides the
//! nonnegative-image certificate over [`AlgebraicApproximation`] vectors.

use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::approximation::AlgebraicApproximation;
use crate::error::{EigenError, MatrixError};

/// A dense, rectangular integer matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i64>>", into = "Vec<Vec<i64>>")]
pub struct Matrix {
    rows: Vec<Vec<i64>>,
    cols: usize,
}

impl Matrix {
    /// Build a matrix from its rows. Rows must be nonempty and equally long.
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, MatrixError> {
        let cols = rows.first().map(Vec::len).ok_or(MatrixError::Empty)?;
        if cols == 0 {
            return Err(MatrixError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::Ragged {
                    row: i,
                    expected: cols,
                    got: row.len(),
                });
            }
        }
        Ok(Self { rows, cols })
    }

    /// The `n x n` identity. `n` must be positive.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        if n == 0 {
            return Err(MatrixError::Empty);
        }
        let rows = (0..n)
            .map(|i| (0..n).map(|j| i64::from(i == j)).collect())
            .collect();
        Ok(Self { rows, cols: n })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn col_count(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.row_count() == self.cols
    }

    /// Side length of a square matrix.
    pub fn dimension(&self) -> Result<usize, MatrixError> {
        if self.cols == 0 {
            return Err(MatrixError::Empty);
        }
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.row_count(),
                cols: self.cols,
            });
        }
        Ok(self.cols)
    }

    /// Entry at `(row, col)`, or `None` outside the matrix.
    pub fn entry(&self, row: usize, col: usize) -> Option<i64> {
        self.rows.get(row)?.get(col).copied()
    }

    pub fn is_nonnegative(&self) -> bool {
        self.rows.iter().flatten().all(|&x| x >= 0)
    }

    /// Largest absolute value of any entry.
    pub fn max_abs_entry(&self) -> u64 {
        self.rows
            .iter()
            .flatten()
            .map(|x| x.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    fn check_len(&self, len: usize) -> Result<(), MatrixError> {
        if len != self.cols {
            return Err(MatrixError::DimensionMismatch {
                expected: self.cols,
                got: len,
            });
        }
        Ok(())
    }

    /// Exact product `self * vector`.
    pub fn mul_vector(&self, vector: &[BigInt]) -> Result<Vec<BigInt>, MatrixError> {
        self.check_len(vector.len())?;
        Ok(self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(vector)
                    .filter(|(a, _)| **a != 0)
                    .map(|(&a, v)| v * BigInt::from(a))
                    .sum()
            })
            .collect())
    }

    /// `floor(log10)` of `(1 + n * m)^n`, where `n` is the column count and
    /// `m` the largest absolute entry.
    ///
    /// Every coefficient of the characteristic polynomial of a square matrix
    /// is bounded by this quantity. The minimal polynomial of a normalized
    /// eigenvector coordinate is a different polynomial, so as a height bound
    /// for coordinates this is a heuristic default, not a proven one. Callers
    /// that need a proof supply their own bound through
    /// `RefinementConfig::log_height`.
    pub fn log_height_bound(&self) -> u32 {
        let n = self.cols as u32;
        let base = BigUint::from(1u32) + BigUint::from(self.cols) * BigUint::from(self.max_abs_entry());
        let bound = base.pow(n);
        (bound.to_string().len() - 1) as u32
    }

    /// Whether a square nonnegative matrix is primitive, i.e. some power of
    /// it is strictly positive.
    ///
    /// Decided exactly on the zero pattern: a primitive `n x n` matrix has a
    /// positive power at every exponent from `(n - 1)^2 + 1` (Wielandt) on,
    /// and an imprimitive one has none. Matrices with negative entries or a
    /// non-square shape are not primitive.
    pub fn is_primitive(&self) -> bool {
        if self.cols == 0 || !self.is_square() || !self.is_nonnegative() {
            return false;
        }
        let n = self.cols;
        let wielandt = (n - 1) * (n - 1) + 1;
        let mut pattern: Vec<Vec<bool>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|&x| x > 0).collect())
            .collect();
        let mut exponent = 1;
        while exponent < wielandt {
            pattern = boolean_square(&pattern);
            exponent *= 2;
        }
        let primitive = pattern.iter().flatten().all(|&b| b);
        trace!(dimension = n, exponent, primitive, "primitivity test");
        primitive
    }

    /// Whether every coordinate of `self * vector` is certifiably nonnegative.
    ///
    /// Fails with an accuracy error if some coordinate's sign cannot be
    /// decided at the accuracy `vector` holds.
    pub fn nonnegative_image(&self, vector: &[AlgebraicApproximation]) -> Result<bool, EigenError> {
        self.check_len(vector.len())?;
        for row in &self.rows {
            let mut image: Option<AlgebraicApproximation> = None;
            for (&coefficient, value) in row.iter().zip(vector) {
                if coefficient == 0 {
                    continue;
                }
                let term = value.mul(coefficient);
                image = Some(match image {
                    Some(sum) => sum.add(&term),
                    None => term,
                });
            }
            if let Some(image) = image {
                if !image.is_nonnegative()? {
                    debug!(value = %image, "negative coordinate in image");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

fn boolean_square(pattern: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let n = pattern.len();
    (0..n)
        .map(|i| {
            (0..n)
                .map(|j| (0..n).any(|k| pattern[i][k] && pattern[k][j]))
                .collect()
        })
        .collect()
}

impl TryFrom<Vec<Vec<i64>>> for Matrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Matrix::new(rows)
    }
}

impl From<Matrix> for Vec<Vec<i64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows
    }
}
