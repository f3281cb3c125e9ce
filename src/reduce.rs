use crate::matrix::Matrix;
use crate::ops::ensure_same_shape;
use crate::{MatrixError, Result, DEFAULT_TOLERANCE};

impl Matrix {
    /// Fold every element into a single value.
    pub fn reduce<U, R>(&self, init: U, reduce_fn: R) -> U
    where
        R: Fn(U, f64) -> U,
    {
        self.as_slice().iter().fold(init, |acc, &x| reduce_fn(acc, x))
    }

    /// Fold along one axis.
    ///
    /// Axis `0` folds down each column into a `1 × cols` matrix; axis `1`
    /// folds across each row into a `rows × 1` matrix.
    ///
    /// # Errors
    /// [`MatrixError::InvalidAxis`] for any other axis.
    pub fn reduce_axis<R>(&self, axis: usize, init: f64, reduce_fn: R) -> Result<Matrix>
    where
        R: Fn(f64, f64) -> f64,
    {
        let (rows, cols) = self.shape();
        let src = self.as_slice();
        match axis {
            0 => {
                let mut out = vec![init; cols];
                for row in src.chunks_exact(cols) {
                    for (acc, &x) in out.iter_mut().zip(row) {
                        *acc = reduce_fn(*acc, x);
                    }
                }
                Ok(Matrix::from_vec_unchecked(out, 1, cols))
            }
            1 => {
                let out = src
                    .chunks_exact(cols)
                    .map(|row| row.iter().fold(init, |acc, &x| reduce_fn(acc, x)))
                    .collect();
                Ok(Matrix::from_vec_unchecked(out, rows, 1))
            }
            _ => Err(MatrixError::InvalidAxis { axis }),
        }
    }

    /// Total of all elements.
    pub fn sum(&self) -> f64 {
        self.reduce(0.0, |acc, x| acc + x)
    }

    /// Column sums (axis `0`, `1 × cols`) or row sums (axis `1`, `rows × 1`).
    pub fn sum_axis(&self, axis: usize) -> Result<Matrix> {
        self.reduce_axis(axis, 0.0, |acc, x| acc + x)
    }

    /// Largest absolute elementwise difference. NaN anywhere yields NaN.
    ///
    /// # Errors
    /// [`MatrixError::ShapeMismatch`] if the shapes differ.
    pub fn max_difference(&self, other: &Matrix) -> Result<f64> {
        ensure_same_shape(self, other)?;
        Ok(self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .fold(0.0, |acc: f64, (a, b)| {
                let d = (a - b).abs();
                if d.is_nan() || d > acc {
                    d
                } else {
                    acc
                }
            }))
    }

    /// `true` if the shapes match and every element differs by less than `tolerance`.
    ///
    /// A shape mismatch is `false`, never an error.
    pub fn equals_within_tolerance(&self, other: &Matrix, tolerance: f64) -> bool {
        match self.max_difference(other) {
            Ok(diff) => diff < tolerance,
            Err(_) => false,
        }
    }

    /// [`Matrix::equals_within_tolerance`] with [`DEFAULT_TOLERANCE`].
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.equals_within_tolerance(other, DEFAULT_TOLERANCE)
    }
}
