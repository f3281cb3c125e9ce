//! Scalar and elementwise arithmetic, products, concatenation, transpose, reshape.

use crate::matrix::{validate_dims, Matrix};
use crate::{MatrixError, Result};

/// Ensure `found` has exactly the shape of `expected`.
pub(crate) fn ensure_same_shape(expected: &Matrix, found: &Matrix) -> Result<()> {
    if expected.rows() != found.rows() {
        return Err(MatrixError::ShapeMismatch {
            dim: "rows",
            expected: expected.rows(),
            found: found.rows(),
        });
    }
    if expected.cols() != found.cols() {
        return Err(MatrixError::ShapeMismatch {
            dim: "cols",
            expected: expected.cols(),
            found: found.cols(),
        });
    }
    Ok(())
}

#[inline]
fn ensure_multipliable(left: &Matrix, right: &Matrix) -> Result<()> {
    if left.cols() != right.rows() {
        return Err(MatrixError::DimensionMismatch {
            left: left.shape(),
            right: right.shape(),
        });
    }
    Ok(())
}

/// `a · b` with dimensions already validated.
fn matmul_unchecked(a: &Matrix, b: &Matrix) -> Matrix {
    let (m, k) = a.shape();
    let n = b.cols();
    let (a_data, b_data) = (a.as_slice(), b.as_slice());

    let mut out = vec![0.0; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut acc = 0.0;
            for p in 0..k {
                acc += a_data[i * k + p] * b_data[p * n + j];
            }
            out[i * n + j] = acc;
        }
    }
    Matrix::from_vec_unchecked(out, m, n)
}

impl Matrix {
    // ========================================================================
    // Scalar operations
    // ========================================================================

    /// Elementwise `x + scalar`.
    pub fn add_scalar(&self, scalar: f64) -> Matrix {
        self.map(|x| x + scalar)
    }

    /// Elementwise `x * scalar`.
    pub fn multiply_scalar(&self, scalar: f64) -> Matrix {
        self.map(|x| x * scalar)
    }

    // ========================================================================
    // Elementwise sums
    // ========================================================================

    /// Elementwise `self + other`.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.add_all(&[other])
    }

    /// Elementwise sum of `self` and every matrix in `others`.
    ///
    /// # Errors
    /// [`MatrixError::ShapeMismatch`] if any operand's shape differs from `self`.
    pub fn add_all(&self, others: &[&Matrix]) -> Result<Matrix> {
        for other in others {
            ensure_same_shape(self, other)?;
        }
        let mut out = self.clone();
        let data = out.data_mut();
        for other in others {
            for (acc, &v) in data.iter_mut().zip(other.as_slice()) {
                *acc += v;
            }
        }
        Ok(out)
    }

    /// Elementwise `self - other`.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        ensure_same_shape(self, other)?;
        let mut out = self.clone();
        for (acc, &v) in out.data_mut().iter_mut().zip(other.as_slice()) {
            *acc -= v;
        }
        Ok(out)
    }

    /// Elementwise sum of `matrices`, seeded with zeros.
    ///
    /// # Errors
    /// - [`MatrixError::EmptyOperandList`] if `matrices` is empty.
    /// - [`MatrixError::ShapeMismatch`] if any shape differs from the first.
    pub fn sum_of(matrices: &[&Matrix]) -> Result<Matrix> {
        let first = matrices
            .first()
            .ok_or(MatrixError::EmptyOperandList("sum"))?;
        Matrix::zeros_like(first).add_all(matrices)
    }

    // ========================================================================
    // Matrix products
    // ========================================================================

    /// `self · other`.
    ///
    /// # Errors
    /// [`MatrixError::DimensionMismatch`] if `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        ensure_multipliable(self, other)?;
        Ok(matmul_unchecked(self, other))
    }

    /// `other · self`.
    pub fn multiply_left(&self, other: &Matrix) -> Result<Matrix> {
        other.multiply(self)
    }

    /// Product of a chain of matrices, associated right-to-left:
    /// `prod(&[a, b, c]) == a · (b · c)`.
    ///
    /// Every adjacent pair is validated before any multiplication runs.
    ///
    /// # Errors
    /// - [`MatrixError::EmptyOperandList`] if `matrices` is empty.
    /// - [`MatrixError::DimensionMismatch`] for the first incompatible pair.
    pub fn prod(matrices: &[&Matrix]) -> Result<Matrix> {
        let (last, rest) = matrices
            .split_last()
            .ok_or(MatrixError::EmptyOperandList("prod"))?;
        for pair in matrices.windows(2) {
            ensure_multipliable(pair[0], pair[1])?;
        }

        log::trace!(
            "prod: chain of {} matrices, result {}x{}",
            matrices.len(),
            matrices[0].rows(),
            last.cols()
        );

        let mut acc = (*last).clone();
        for m in rest.iter().rev() {
            acc = matmul_unchecked(m, &acc);
        }
        Ok(acc)
    }

    // ========================================================================
    // Concatenation
    // ========================================================================

    /// Place `matrices` side by side, left to right.
    ///
    /// # Errors
    /// - [`MatrixError::EmptyOperandList`] if `matrices` is empty.
    /// - [`MatrixError::ShapeMismatch`] if the row counts differ.
    pub fn horizontal_concatenate(matrices: &[&Matrix]) -> Result<Matrix> {
        let first = matrices
            .first()
            .ok_or(MatrixError::EmptyOperandList("horizontal concatenation"))?;
        let rows = first.rows();
        for m in matrices {
            if m.rows() != rows {
                return Err(MatrixError::ShapeMismatch {
                    dim: "rows",
                    expected: rows,
                    found: m.rows(),
                });
            }
        }

        let cols: usize = matrices.iter().map(|m| m.cols()).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for m in matrices {
                let start = r * m.cols();
                data.extend_from_slice(&m.as_slice()[start..start + m.cols()]);
            }
        }
        Ok(Matrix::from_vec_unchecked(data, rows, cols))
    }

    /// Stack `matrices` top to bottom.
    ///
    /// # Errors
    /// - [`MatrixError::EmptyOperandList`] if `matrices` is empty.
    /// - [`MatrixError::ShapeMismatch`] if the column counts differ.
    pub fn vertical_concatenate(matrices: &[&Matrix]) -> Result<Matrix> {
        let first = matrices
            .first()
            .ok_or(MatrixError::EmptyOperandList("vertical concatenation"))?;
        let cols = first.cols();
        for m in matrices {
            if m.cols() != cols {
                return Err(MatrixError::ShapeMismatch {
                    dim: "cols",
                    expected: cols,
                    found: m.cols(),
                });
            }
        }

        let rows: usize = matrices.iter().map(|m| m.rows()).sum();
        let mut data = Vec::with_capacity(rows * cols);
        for m in matrices {
            data.extend_from_slice(m.as_slice());
        }
        Ok(Matrix::from_vec_unchecked(data, rows, cols))
    }

    /// `[self | other]`.
    pub fn hstack(&self, other: &Matrix) -> Result<Matrix> {
        Self::horizontal_concatenate(&[self, other])
    }

    /// `self` on top of `other`.
    pub fn vstack(&self, other: &Matrix) -> Result<Matrix> {
        Self::vertical_concatenate(&[self, other])
    }

    // ========================================================================
    // Shape changes
    // ========================================================================

    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = self.shape();
        let src = self.as_slice();
        let mut data = Vec::with_capacity(self.len());
        for c in 0..cols {
            for r in 0..rows {
                data.push(src[r * cols + c]);
            }
        }
        Matrix::from_vec_unchecked(data, cols, rows)
    }

    /// Reinterpret the row-major buffer under new dimensions.
    ///
    /// Element order is preserved, not the 2-D arrangement.
    ///
    /// # Errors
    /// - [`MatrixError::InvalidShape`] if either dimension is zero.
    /// - [`MatrixError::ShapeOverflow`] if `rows * cols` overflows.
    /// - [`MatrixError::LengthMismatch`] if `rows * cols != self.len()`.
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Matrix> {
        let len = validate_dims(rows, cols)?;
        if len != self.len() {
            return Err(MatrixError::LengthMismatch {
                what: "reshape target",
                len,
                expected: self.len(),
            });
        }
        Ok(Matrix::from_vec_unchecked(self.to_vec(), rows, cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(data: &[f64], rows: usize, cols: usize) -> Matrix {
        Matrix::create(data, rows, cols).unwrap()
    }

    #[test]
    fn test_scalar_ops() {
        let a = m(&[1.0, 2.0, 3.0, 4.0], 2, 2);
        assert_eq!(a.add_scalar(1.0).as_slice(), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(a.multiply_scalar(-2.0).as_slice(), &[-2.0, -4.0, -6.0, -8.0]);
        assert_eq!(a.add_scalar(0.0), a);
        assert_eq!(a.multiply_scalar(1.0), a);
    }

    #[test]
    fn test_add_all() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[10.0, 20.0], 1, 2);
        let c = m(&[100.0, 200.0], 1, 2);
        assert_eq!(a.add_all(&[&b, &c]).unwrap().as_slice(), &[111.0, 222.0]);
        assert_eq!(a.add(&b).unwrap().as_slice(), &[11.0, 22.0]);
        assert_eq!(a.add_all(&[]).unwrap(), a);
        assert_eq!(b.subtract(&a).unwrap().as_slice(), &[9.0, 18.0]);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[1.0, 2.0], 2, 1);
        assert_eq!(
            a.add(&b).unwrap_err(),
            MatrixError::ShapeMismatch {
                dim: "rows",
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_sum_of() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[3.0, 4.0], 1, 2);
        assert_eq!(Matrix::sum_of(&[&a, &b]).unwrap().as_slice(), &[4.0, 6.0]);
        assert_eq!(Matrix::sum_of(&[&a]).unwrap(), a);
        assert_eq!(
            Matrix::sum_of(&[]).unwrap_err(),
            MatrixError::EmptyOperandList("sum")
        );
    }

    #[test]
    fn test_multiply_basic() {
        let a = Matrix::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = Matrix::from_nested(&[[1.0], [2.0]]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.shape(), (2, 1));
        assert_eq!(c.as_slice(), &[5.0, 11.0]);
        assert_eq!(b.multiply_left(&a).unwrap(), c);
    }

    #[test]
    fn test_multiply_rectangular() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let b = m(&[7.0, 8.0, 9.0, 10.0, 11.0, 12.0], 3, 2);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_multiply_dimension_mismatch() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let err = a.multiply(&a).unwrap_err();
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                left: (2, 3),
                right: (2, 3)
            }
        );
        assert_eq!(err.to_string(), "dimension mismatch: cannot multiply (2, 3) by (2, 3) (rows, cols)");
    }

    #[test]
    fn test_prod_chain() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[1.0, 0.0, 0.0, 1.0, 1.0, 1.0], 2, 3);
        let c = m(&[1.0, 2.0, 3.0], 3, 1);
        let p = Matrix::prod(&[&a, &b, &c]).unwrap();
        assert_eq!(p.shape(), (1, 1));
        // a·b = [1, 2, 2]; · c = 1 + 4 + 6
        assert_eq!(p.to_scalar().unwrap(), 11.0);
        assert_eq!(Matrix::prod(&[&b]).unwrap(), b);
    }

    #[test]
    fn test_prod_validates_every_pair() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[1.0, 2.0, 3.0, 4.0], 2, 2);
        let c = m(&[1.0, 2.0, 3.0], 3, 1);
        assert_eq!(
            Matrix::prod(&[&a, &b, &c]).unwrap_err(),
            MatrixError::DimensionMismatch {
                left: (2, 2),
                right: (3, 1)
            }
        );
        assert_eq!(
            Matrix::prod(&[]).unwrap_err(),
            MatrixError::EmptyOperandList("prod")
        );
    }

    #[test]
    fn test_horizontal_concatenate() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let h = Matrix::horizontal_concatenate(&[&a, &a]).unwrap();
        assert_eq!(h.shape(), (2, 6));
        assert_eq!(
            h.as_slice(),
            &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 4.0, 5.0, 6.0]
        );
        assert_eq!(a.hstack(&a).unwrap(), h);
    }

    #[test]
    fn test_vertical_concatenate() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[3.0, 4.0, 5.0, 6.0], 2, 2);
        let v = Matrix::vertical_concatenate(&[&a, &b]).unwrap();
        assert_eq!(v.shape(), (3, 2));
        assert_eq!(v.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.vstack(&b).unwrap(), v);
    }

    #[test]
    fn test_concatenate_errors() {
        let a = m(&[1.0, 2.0], 1, 2);
        let b = m(&[1.0, 2.0], 2, 1);
        assert_eq!(
            Matrix::horizontal_concatenate(&[&a, &b]).unwrap_err(),
            MatrixError::ShapeMismatch {
                dim: "rows",
                expected: 1,
                found: 2
            }
        );
        assert_eq!(
            Matrix::vertical_concatenate(&[&a, &b]).unwrap_err(),
            MatrixError::ShapeMismatch {
                dim: "cols",
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            Matrix::horizontal_concatenate(&[]),
            Err(MatrixError::EmptyOperandList(_))
        ));
        assert!(matches!(
            Matrix::vertical_concatenate(&[]),
            Err(MatrixError::EmptyOperandList(_))
        ));
    }

    #[test]
    fn test_transpose() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let t = a.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t.transpose(), a);
    }

    #[test]
    fn test_reshape() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let r = a.reshape(3, 2).unwrap();
        assert_eq!(r.shape(), (3, 2));
        assert_eq!(r.as_slice(), a.as_slice());
        assert_eq!(r.reshape(2, 3).unwrap(), a);
        assert_eq!(
            a.reshape(4, 2).unwrap_err(),
            MatrixError::LengthMismatch {
                what: "reshape target",
                len: 8,
                expected: 6
            }
        );
        assert!(matches!(
            a.reshape(0, 6),
            Err(MatrixError::InvalidShape { name: "rows", .. })
        ));
    }

    #[test]
    fn test_reshape_overflowing_target() {
        let a = m(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let huge = (1usize << 63) + 3;
        assert_eq!(
            a.reshape(huge, 2).unwrap_err(),
            MatrixError::ShapeOverflow {
                rows: huge,
                cols: 2
            }
        );
        assert_eq!(a.shape(), (2, 3));
    }
}
