//! Bounds-checked element, row, column, diagonal and block access.

use crate::matrix::{validate_dims, Matrix};
use crate::{MatrixError, Result};
use std::ops::{Bound, RangeBounds};

#[inline]
fn check_index(name: &'static str, index: usize, extent: usize) -> Result<()> {
    if index >= extent {
        return Err(MatrixError::IndexOutOfRange {
            name,
            index,
            max: extent.saturating_sub(1),
        });
    }
    Ok(())
}

/// Resolve `range` against `0..extent` into a half-open `(start, end)`.
fn resolve_range<R: RangeBounds<usize>>(
    name: &'static str,
    range: &R,
    extent: usize,
) -> Result<(usize, usize)> {
    let start = match range.start_bound() {
        Bound::Unbounded => 0,
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
    };
    let end = match range.end_bound() {
        Bound::Unbounded => extent,
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
    };

    if end > extent {
        return Err(MatrixError::IndexOutOfRange {
            name,
            index: end - 1,
            max: extent - 1,
        });
    }
    if start > end {
        return Err(MatrixError::IndexOutOfRange {
            name,
            index: start,
            max: end.saturating_sub(1),
        });
    }
    Ok((start, end))
}

impl Matrix {
    /// Row-major offset of `(row, col)`.
    ///
    /// # Errors
    /// [`MatrixError::IndexOutOfRange`] naming the offending index and its
    /// inclusive valid range.
    pub fn index(&self, row: usize, col: usize) -> Result<usize> {
        check_index("row", row, self.rows())?;
        check_index("col", col, self.cols())?;
        Ok(row * self.cols() + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.index(row, col)?;
        Ok(self.as_slice()[idx])
    }

    /// A copy of `self` with `(row, col)` set to `value`.
    pub fn set(&self, row: usize, col: usize, value: f64) -> Result<Matrix> {
        let idx = self.index(row, col)?;
        let mut out = self.clone();
        out.data_mut()[idx] = value;
        Ok(out)
    }

    /// In-place `set`, for results still owned by the operation building them.
    pub(crate) fn put(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let idx = self.index(row, col)?;
        self.data_mut()[idx] = value;
        Ok(())
    }

    /// Row `i` as a `1 × cols` matrix.
    pub fn get_row(&self, i: usize) -> Result<Matrix> {
        check_index("row", i, self.rows())?;
        let cols = self.cols();
        let start = i * cols;
        Ok(Matrix::from_vec_unchecked(
            self.as_slice()[start..start + cols].to_vec(),
            1,
            cols,
        ))
    }

    /// Column `j` as a `rows × 1` matrix.
    pub fn get_col(&self, j: usize) -> Result<Matrix> {
        check_index("col", j, self.cols())?;
        let values = self
            .as_slice()
            .iter()
            .skip(j)
            .step_by(self.cols())
            .copied()
            .collect();
        Ok(Matrix::from_vec_unchecked(values, self.rows(), 1))
    }

    /// A copy of `self` with row `i` replaced by the `1 × cols` matrix `row`.
    pub fn set_row(&self, row: &Matrix, i: usize) -> Result<Matrix> {
        check_index("row", i, self.rows())?;
        if row.rows() != 1 {
            return Err(MatrixError::ShapeMismatch {
                dim: "rows",
                expected: 1,
                found: row.rows(),
            });
        }
        if row.cols() != self.cols() {
            return Err(MatrixError::ShapeMismatch {
                dim: "cols",
                expected: self.cols(),
                found: row.cols(),
            });
        }

        let cols = self.cols();
        let mut out = self.clone();
        out.data_mut()[i * cols..(i + 1) * cols].copy_from_slice(row.as_slice());
        Ok(out)
    }

    /// A copy of `self` with column `j` replaced by the `rows × 1` matrix `col`.
    pub fn set_col(&self, col: &Matrix, j: usize) -> Result<Matrix> {
        self.check_col_operand(col, j)?;
        let mut out = self.clone();
        out.put_col(col, j)?;
        Ok(out)
    }

    /// In-place `set_col`, for results still owned by the operation building them.
    pub(crate) fn put_col(&mut self, col: &Matrix, j: usize) -> Result<()> {
        self.check_col_operand(col, j)?;
        let cols = self.cols();
        let data = self.data_mut();
        for (r, &v) in col.as_slice().iter().enumerate() {
            data[r * cols + j] = v;
        }
        Ok(())
    }

    fn check_col_operand(&self, col: &Matrix, j: usize) -> Result<()> {
        check_index("col", j, self.cols())?;
        if col.cols() != 1 {
            return Err(MatrixError::ShapeMismatch {
                dim: "cols",
                expected: 1,
                found: col.cols(),
            });
        }
        if col.rows() != self.rows() {
            return Err(MatrixError::ShapeMismatch {
                dim: "rows",
                expected: self.rows(),
                found: col.rows(),
            });
        }
        Ok(())
    }

    /// The main diagonal as a `min(rows, cols) × 1` matrix.
    pub fn get_diagonal(&self) -> Matrix {
        let n = self.rows().min(self.cols());
        let values = (0..n).map(|i| self.as_slice()[i * self.cols() + i]).collect();
        Matrix::from_vec_unchecked(values, n, 1)
    }

    /// A copy of `self` with every diagonal entry set to `value`.
    pub fn set_diagonal(&self, value: f64) -> Matrix {
        let n = self.rows().min(self.cols());
        let cols = self.cols();
        let mut out = self.clone();
        let data = out.data_mut();
        for i in 0..n {
            data[i * cols + i] = value;
        }
        out
    }

    /// A copy of `self` with the diagonal replaced by `vector`.
    ///
    /// # Errors
    /// - [`MatrixError::NotAVector`] unless `vector` is `1 × n` or `n × 1`.
    /// - [`MatrixError::LengthMismatch`] unless `n == min(rows, cols)`.
    pub fn set_diagonal_from(&self, vector: &Matrix) -> Result<Matrix> {
        if !vector.is_vector() {
            return Err(MatrixError::NotAVector {
                rows: vector.rows(),
                cols: vector.cols(),
            });
        }
        let n = self.rows().min(self.cols());
        if vector.len() != n {
            return Err(MatrixError::LengthMismatch {
                what: "diagonal vector",
                len: vector.len(),
                expected: n,
            });
        }

        let cols = self.cols();
        let mut out = self.clone();
        let data = out.data_mut();
        for (i, &v) in vector.as_slice().iter().enumerate() {
            data[i * cols + i] = v;
        }
        Ok(out)
    }

    /// Copy the sub-matrix covering `rows × cols` ranges.
    ///
    /// # Errors
    /// - [`MatrixError::IndexOutOfRange`] if a range leaves the matrix or is reversed.
    /// - [`MatrixError::InvalidShape`] if a range is empty.
    pub fn get_block<R, C>(&self, rows: R, cols: C) -> Result<Matrix>
    where
        R: RangeBounds<usize>,
        C: RangeBounds<usize>,
    {
        let (r0, r1) = resolve_range("row", &rows, self.rows())?;
        let (c0, c1) = resolve_range("col", &cols, self.cols())?;
        let (nrows, ncols) = (r1 - r0, c1 - c0);
        let len = validate_dims(nrows, ncols)?;

        let mut data = Vec::with_capacity(len);
        for r in r0..r1 {
            let start = r * self.cols();
            data.extend_from_slice(&self.as_slice()[start + c0..start + c1]);
        }
        Ok(Matrix::from_vec_unchecked(data, nrows, ncols))
    }

    /// A copy of `self` with `block` written at top-left corner `(row, col)`.
    ///
    /// # Errors
    /// [`MatrixError::IndexOutOfRange`] if the corner or the far edge of
    /// `block` falls outside `self`.
    pub fn set_block(&self, block: &Matrix, row: usize, col: usize) -> Result<Matrix> {
        check_index("row", row, self.rows())?;
        check_index("col", col, self.cols())?;
        check_index("row", row + block.rows() - 1, self.rows())?;
        check_index("col", col + block.cols() - 1, self.cols())?;

        let cols = self.cols();
        let mut out = self.clone();
        let data = out.data_mut();
        for (r, src) in block.as_slice().chunks_exact(block.cols()).enumerate() {
            let start = (row + r) * cols + col;
            data[start..start + src.len()].copy_from_slice(src);
        }
        Ok(out)
    }
}
