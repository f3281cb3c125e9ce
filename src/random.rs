//! Standard-normal random matrices.
//!
//! Elements are drawn in strict row-major order, one draw per element, so a
//! seeded generator reproduces the same matrix bit for bit.

use crate::matrix::Matrix;
use crate::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

impl Matrix {
    /// Fill a `rows × cols` matrix with independent standard-normal draws
    /// from `rng`.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Result<Self> {
        let mut out = Self::zeros(rows, cols)?;
        for x in out.data_mut().iter_mut() {
            *x = rng.sample(StandardNormal);
        }
        Ok(out)
    }

    /// Like [`Matrix::random_with`], using a [`StdRng`] seeded from `seed`.
    ///
    /// # Example
    /// ```
    /// use dense_matrix::Matrix;
    ///
    /// let a = Matrix::random_seeded(42, 3, 4).unwrap();
    /// let b = Matrix::random_seeded(42, 3, 4).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn random_seeded(seed: u64, rows: usize, cols: usize) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random_with(&mut rng, rows, cols)
    }

    /// Like [`Matrix::random_with`], using a fresh generator seeded from the
    /// operating system. Not reproducible.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        let mut rng = StdRng::from_entropy();
        Self::random_with(&mut rng, rows, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    #[test]
    fn test_seeded_is_deterministic() {
        let a = Matrix::random_seeded(7, 4, 5).unwrap();
        let b = Matrix::random_seeded(7, 4, 5).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Matrix::random_seeded(8, 4, 5).unwrap());
    }

    #[test]
    fn test_draws_in_row_major_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let expected: Vec<f64> = (0..6).map(|_| rng.sample(StandardNormal)).collect();
        let m = Matrix::random_seeded(3, 2, 3).unwrap();
        assert_eq!(m.as_slice(), &expected[..]);
    }

    #[test]
    fn test_shared_generator_advances() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = Matrix::random_with(&mut rng, 2, 2).unwrap();
        let b = Matrix::random_with(&mut rng, 2, 2).unwrap();
        assert_ne!(a, b);

        let joined = Matrix::random_seeded(11, 2, 4).unwrap().reshape(4, 2).unwrap();
        assert_eq!(joined, Matrix::vertical_concatenate(&[&a, &b]).unwrap());
    }

    #[test]
    fn test_unseeded_shape() {
        let m = Matrix::random(3, 2).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert!(m.as_slice().iter().all(|x| x.is_finite()));
        assert_eq!(
            Matrix::random(0, 2).unwrap_err(),
            MatrixError::InvalidShape {
                name: "rows",
                value: 0
            }
        );
    }
}
