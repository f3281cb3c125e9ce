//! Owned row-major matrix storage and its factories.
//!
//! Every constructor funnels through [`Matrix::from_vec_unchecked`] only after
//! the shape invariant `rows > 0 && cols > 0 && data.len() == rows * cols`
//! has been established.

use crate::{MatrixError, Result};
use std::hash::{Hash, Hasher};

/// A dense `rows × cols` matrix of `f64` stored in row-major order.
///
/// Values are immutable once built: operations that "modify" a matrix return
/// a new one.
///
/// # Example
/// ```
/// use dense_matrix::Matrix;
///
/// let m = Matrix::create(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 0).unwrap(), 4.0);
/// ```
#[derive(Clone, Debug)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

/// Check both dimensions are positive and return the element count.
pub(crate) fn validate_dims(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 {
        return Err(MatrixError::InvalidShape {
            name: "rows",
            value: rows,
        });
    }
    if cols == 0 {
        return Err(MatrixError::InvalidShape {
            name: "cols",
            value: cols,
        });
    }
    rows.checked_mul(cols).ok_or(MatrixError::ShapeOverflow { rows, cols })
}

impl Matrix {
    /// Wrap a buffer whose shape has already been validated.
    #[inline]
    pub(crate) fn from_vec_unchecked(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0 && data.len() == rows * cols);
        Self { data, rows, cols }
    }

    /// Mutable access to the buffer. Only used on freshly allocated results.
    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// A `rows × cols` matrix with every cell set to `value`.
    ///
    /// # Errors
    /// - [`MatrixError::InvalidShape`] if either dimension is zero.
    /// - [`MatrixError::ShapeOverflow`] if `rows * cols` overflows.
    pub fn of(value: f64, rows: usize, cols: usize) -> Result<Self> {
        let len = validate_dims(rows, cols)?;
        Ok(Self::from_vec_unchecked(vec![value; len], rows, cols))
    }

    /// Copy `buffer` into a new `rows × cols` matrix.
    ///
    /// # Errors
    /// - [`MatrixError::InvalidShape`] if either dimension is zero.
    /// - [`MatrixError::ShapeOverflow`] if `rows * cols` overflows.
    /// - [`MatrixError::LengthMismatch`] if `buffer.len() != rows * cols`.
    pub fn create(buffer: &[f64], rows: usize, cols: usize) -> Result<Self> {
        let len = validate_dims(rows, cols)?;
        if buffer.len() != len {
            return Err(MatrixError::LengthMismatch {
                what: "'array'",
                len: buffer.len(),
                expected: len,
            });
        }
        Ok(Self::from_vec_unchecked(buffer.to_vec(), rows, cols))
    }

    /// Like [`Matrix::create`], for callers whose buffer may be absent.
    ///
    /// # Errors
    /// [`MatrixError::NullInput`] if `buffer` is `None`, otherwise as [`Matrix::create`].
    pub fn from_optional_buffer(buffer: Option<&[f64]>, rows: usize, cols: usize) -> Result<Self> {
        validate_dims(rows, cols)?;
        let buffer = buffer.ok_or_else(|| MatrixError::NullInput("array".to_string()))?;
        Self::create(buffer, rows, cols)
    }

    /// Take ownership of `data` as a `rows × cols` matrix without copying.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        let len = validate_dims(rows, cols)?;
        if data.len() != len {
            return Err(MatrixError::LengthMismatch {
                what: "'array'",
                len: data.len(),
                expected: len,
            });
        }
        Ok(Self::from_vec_unchecked(data, rows, cols))
    }

    /// A matrix of "unset" NaN sentinels.
    pub fn uninit(rows: usize, cols: usize) -> Result<Self> {
        Self::of(f64::NAN, rows, cols)
    }

    /// A NaN-filled matrix with the same shape as `other`.
    pub fn uninit_like(other: &Matrix) -> Self {
        Self::from_vec_unchecked(vec![f64::NAN; other.len()], other.rows, other.cols)
    }

    /// Like [`Matrix::uninit_like`], for callers whose template may be absent.
    pub fn uninit_like_opt(other: Option<&Matrix>) -> Result<Self> {
        other
            .map(Self::uninit_like)
            .ok_or_else(|| MatrixError::NullInput("matrix".to_string()))
    }

    /// A `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::of(0.0, rows, cols)
    }

    /// An `n × n` matrix of zeros.
    pub fn zeros_square(n: usize) -> Result<Self> {
        Self::of(0.0, n, n)
    }

    /// Zeros with the same shape as `other`.
    pub fn zeros_like(other: &Matrix) -> Self {
        Self::from_vec_unchecked(vec![0.0; other.len()], other.rows, other.cols)
    }

    /// A `rows × cols` matrix of ones.
    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::of(1.0, rows, cols)
    }

    /// An `n × n` matrix of ones.
    pub fn ones_square(n: usize) -> Result<Self> {
        Self::of(1.0, n, n)
    }

    /// Ones with the same shape as `other`.
    pub fn ones_like(other: &Matrix) -> Self {
        Self::from_vec_unchecked(vec![1.0; other.len()], other.rows, other.cols)
    }

    /// Zeros with ones on the main diagonal (`min(rows, cols)` entries).
    pub fn eye(rows: usize, cols: usize) -> Result<Self> {
        let mut out = Self::zeros(rows, cols)?;
        for i in 0..rows.min(cols) {
            out.data[i * cols + i] = 1.0;
        }
        Ok(out)
    }

    /// The `n × n` identity.
    pub fn eye_square(n: usize) -> Result<Self> {
        Self::eye(n, n)
    }

    /// Build from a sequence of equal-length rows.
    ///
    /// # Errors
    /// - [`MatrixError::EmptyShape`] if there are no rows or the first row is empty.
    /// - [`MatrixError::RaggedRows`] naming the first row whose length differs
    ///   from the first row's.
    pub fn from_nested<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(MatrixError::EmptyShape("rows"))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(MatrixError::EmptyShape("rows[0]"));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self::from_vec_unchecked(data, rows.len(), cols))
    }

    /// Like [`Matrix::from_nested`], for inputs where the outer sequence or
    /// individual rows may be absent.
    ///
    /// # Errors
    /// [`MatrixError::NullInput`] naming `rows` or `rows[i]`, otherwise as
    /// [`Matrix::from_nested`].
    pub fn from_optional_rows<R: AsRef<[f64]>>(rows: Option<&[Option<R>]>) -> Result<Self> {
        let rows = rows.ok_or_else(|| MatrixError::NullInput("rows".to_string()))?;
        let present = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.as_ref()
                    .map(|r| r.as_ref())
                    .ok_or_else(|| MatrixError::NullInput(format!("rows[{i}]")))
            })
            .collect::<Result<Vec<&[f64]>>>()?;
        Self::from_nested(&present)
    }

    /// The rows as nested vectors; inverse of [`Matrix::from_nested`].
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.data.chunks_exact(self.cols).map(<[f64]>::to_vec).collect()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of elements, `rows * cols`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: zero-sized matrices cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// A copy of the row-major buffer.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True for a `1 × 1` matrix.
    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// True for a `1 × n` or `n × 1` matrix.
    #[inline]
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Unwrap a `1 × 1` matrix into its only element.
    pub fn to_scalar(&self) -> Result<f64> {
        if !self.is_singleton() {
            return Err(MatrixError::NotASingleton {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.data[0])
    }

    /// Apply `f` to every element.
    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: FnMut(&f64) -> f64,
    {
        Self::from_vec_unchecked(self.data.iter().map(f).collect(), self.rows, self.cols)
    }
}

// Equality is exact: shapes agree and every element has the same bit pattern.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Matrix {}

impl Hash for Matrix {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        for v in &self.data {
            v.to_bits().hash(state);
        }
    }
}
