//! Vector primitives and QR decomposition via Gram-Schmidt.
//!
//! # Key functions
//!
//! - [`Matrix::dot`]: Inner product of two vectors of equal length
//! - [`Matrix::norm`]: Euclidean norm of a vector
//! - [`Matrix::decompose_qr`]: `A = Q·R` for square `A`
//!
//! The decomposition is plain Gram-Schmidt without pivoting or
//! re-orthogonalization. It loses orthogonality on ill-conditioned input, and
//! a rank-deficient column divides by a (near-)zero norm, leaving `inf`/`NaN`
//! in the result. Neither case is trapped.

use crate::matrix::Matrix;
use crate::{trace_enabled, MatrixError, Result};

/// The factors of `A = Q·R`.
///
/// `Q` has orthonormal columns and `R` is upper triangular.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition {
    q: Matrix,
    r: Matrix,
}

impl QrDecomposition {
    /// The orthonormal factor.
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// The upper-triangular factor.
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.q, self.r)
    }

    /// `Q·R`, which approximates the decomposed matrix.
    pub fn reconstruct(&self) -> Result<Matrix> {
        self.q.multiply(&self.r)
    }
}

impl Matrix {
    fn ensure_vector(&self) -> Result<()> {
        if !self.is_vector() {
            return Err(MatrixError::NotAVector {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    /// Inner product of two vectors. Either may be a row or a column.
    ///
    /// # Errors
    /// - [`MatrixError::NotAVector`] if either operand is not `1 × n` / `n × 1`.
    /// - [`MatrixError::LengthMismatch`] if the lengths differ.
    pub fn dot(&self, other: &Matrix) -> Result<f64> {
        self.ensure_vector()?;
        other.ensure_vector()?;
        if self.len() != other.len() {
            return Err(MatrixError::LengthMismatch {
                what: "dot operand",
                len: other.len(),
                expected: self.len(),
            });
        }
        Ok(self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .fold(0.0, |acc, (a, b)| acc + a * b))
    }

    /// Euclidean norm `sqrt(vᵗ·v)` of a vector.
    pub fn norm(&self) -> Result<f64> {
        Ok(self.dot(self)?.sqrt())
    }

    /// Decompose a square matrix into `Q·R` by Gram-Schmidt orthogonalization.
    ///
    /// Column `k` of `A` is orthogonalized against the already computed columns
    /// `0..k` of `Q` in increasing order, then normalized. `R[j, k]` holds the
    /// projection coefficients and `R[k, k]` is recomputed as `A[:, k]ᵗ · Q[:, k]`.
    ///
    /// # Errors
    /// [`MatrixError::NotSquare`] if `self` is not square.
    ///
    /// # Example
    /// ```
    /// use dense_matrix::Matrix;
    ///
    /// let a = Matrix::create(&[1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0], 3, 3).unwrap();
    /// let qr = a.decompose_qr().unwrap();
    /// let qtq = qr.q().transpose().multiply(qr.q()).unwrap();
    /// assert!(qtq.equals_within_tolerance(&Matrix::eye_square(3).unwrap(), 1e-12));
    /// ```
    pub fn decompose_qr(&self) -> Result<QrDecomposition> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let n = self.rows();

        let mut q = self.clone();
        let mut r = Matrix::zeros_square(n)?;

        for k in 0..n {
            let a_k = self.get_col(k)?;
            let mut v = a_k.clone();

            for j in 0..k {
                let q_j = q.get_col(j)?;
                let r_jk = q_j.dot(&v)?;
                r.put(j, k, r_jk)?;
                v = v.subtract(&q_j.multiply_scalar(r_jk))?;
            }

            let norm = v.norm()?;
            log::trace!("qr: column {k} residual norm {norm:e}");
            if norm <= f64::EPSILON * a_k.norm()? {
                log::debug!("qr: column {k} is numerically dependent (norm {norm:e})");
            }

            let q_k = v.map(|x| x / norm);
            r.put(k, k, a_k.dot(&q_k)?)?;
            q.put_col(&q_k, k)?;
        }

        let qr = QrDecomposition { q, r };
        if trace_enabled() {
            let ident = Matrix::eye_square(n)?;
            let orthogonality = qr.q.transpose().multiply(&qr.q)?.max_difference(&ident)?;
            let reconstruction = qr.reconstruct()?.max_difference(self)?;
            log::debug!(
                "qr: n={n} |QtQ - I|max={orthogonality:e} |QR - A|max={reconstruction:e}"
            );
        }
        Ok(qr)
    }
}
