//! Dense row-major `f64` matrices with value semantics.
//!
//! Every operation validates its inputs up front and returns a freshly
//! allocated [`Matrix`]; the receiver is never mutated.
//!
//! # Core Types
//!
//! - [`Matrix`]: Owned `rows × cols` buffer, row-major (`index = row * cols + col`)
//! - [`QrDecomposition`]: The `(Q, R)` pair produced by [`Matrix::decompose_qr`]
//! - [`ElementFormat`]: Parsed printf-style element format used by [`Matrix::render`]
//!
//! # Primary API
//!
//! ## Construction
//!
//! - [`Matrix::create`], [`Matrix::of`], [`Matrix::from_nested`]
//! - [`Matrix::zeros`], [`Matrix::ones`], [`Matrix::eye`], [`Matrix::uninit`]
//! - [`Matrix::random_seeded`], [`Matrix::random_with`]: Standard-normal draws in row-major order
//!
//! ## Access
//!
//! - [`Matrix::get`], [`Matrix::set`], [`Matrix::get_row`], [`Matrix::get_col`]
//! - [`Matrix::get_diagonal`], [`Matrix::set_diagonal`], [`Matrix::get_block`], [`Matrix::set_block`]
//!
//! ## Arithmetic
//!
//! - [`Matrix::add_scalar`], [`Matrix::multiply_scalar`], [`Matrix::add`], [`Matrix::sum_of`]
//! - [`Matrix::multiply`], [`Matrix::prod`]: Matrix products (chains associate right-to-left)
//! - [`Matrix::horizontal_concatenate`], [`Matrix::vertical_concatenate`]
//! - [`Matrix::transpose`], [`Matrix::reshape`]
//!
//! ## Reductions
//!
//! - [`Matrix::sum`], [`Matrix::sum_axis`], [`Matrix::max_difference`]
//! - [`Matrix::equals_within_tolerance`]
//!
//! # Example
//!
//! ```rust
//! use dense_matrix::Matrix;
//!
//! let a = Matrix::from_nested(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let x = Matrix::from_nested(&[[1.0], [2.0]]).unwrap();
//!
//! let y = Matrix::prod(&[&a, &x]).unwrap();
//! assert_eq!(y.as_slice(), &[5.0, 11.0]);
//!
//! let qr = a.decompose_qr().unwrap();
//! assert!(qr.reconstruct().unwrap().equals_within_tolerance(&a, 1e-12));
//! ```
//!
//! # Diagnostics
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//! Setting `MATRIX_TRACE=1` additionally makes [`Matrix::decompose_qr`]
//! compute and log its orthogonality and reconstruction residuals.

mod fmt;
mod index;
mod linalg;
mod matrix;
mod ops;
mod random;
mod reduce;

pub use fmt::{ElementFormat, FormatKind};
pub use linalg::QrDecomposition;
pub use matrix::Matrix;

// ============================================================================
// Constants
// ============================================================================

/// Default tolerance for [`Matrix::approx_eq`].
pub const DEFAULT_TOLERANCE: f64 = 1e-15;

/// Default element format for [`Matrix::render`] and `Display`.
pub const DEFAULT_FORMAT: &str = "%.4e";

/// Default row delimiter: a newline indented to the width of `Matrix{`.
pub const DEFAULT_ROW_DELIMITER: &str = "\n       ";

/// Default column delimiter.
pub const DEFAULT_COL_DELIMITER: &str = " ";

#[inline]
pub(crate) fn trace_enabled() -> bool {
    matches!(std::env::var("MATRIX_TRACE"), Ok(ref v) if v == "1")
}

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while building or combining matrices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A row or column count is zero.
    #[error("'{name}' ({value}) has to be a positive integer")]
    InvalidShape { name: &'static str, value: usize },

    /// A required input was absent.
    #[error("'{0}' cannot be null")]
    NullInput(String),

    /// A buffer, vector or reshape target has the wrong number of elements.
    #[error("length of {what} ({len}) does not match {expected}")]
    LengthMismatch {
        what: &'static str,
        len: usize,
        expected: usize,
    },

    /// Nested input with no rows or no columns.
    #[error("'{0}' cannot be empty")]
    EmptyShape(&'static str),

    /// Nested input whose rows differ in length.
    #[error("inconsistent row length: row {row} has {len} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// Index outside the inclusive range `[0, max]`.
    #[error("{name} index ({index}) has to be between 0 and {max}")]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        max: usize,
    },

    /// Operand shapes disagree along `dim`.
    #[error("shape mismatch in {dim}: expected {expected}, found {found}")]
    ShapeMismatch {
        dim: &'static str,
        expected: usize,
        found: usize,
    },

    /// Inner dimensions of a product do not agree.
    #[error("dimension mismatch: cannot multiply {left:?} by {right:?} (rows, cols)")]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A variadic operation was called without operands.
    #[error("{0} requires at least one matrix")]
    EmptyOperandList(&'static str),

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NotSquare { rows: usize, cols: usize },

    /// Matrix is not 1x1.
    #[error("not a singleton: rows={rows}, cols={cols}")]
    NotASingleton { rows: usize, cols: usize },

    /// Matrix is neither a row nor a column vector.
    #[error("not a vector: rows={rows}, cols={cols}")]
    NotAVector { rows: usize, cols: usize },

    /// `rows * cols` does not fit in `usize`.
    #[error("shape overflow: {rows} x {cols} elements do not fit in usize")]
    ShapeOverflow { rows: usize, cols: usize },

    /// Axis outside `{0, 1}`.
    #[error("invalid axis {axis}, expected 0 or 1")]
    InvalidAxis { axis: usize },

    /// Malformed element format string.
    #[error("invalid element format: {0}")]
    InvalidFormat(String),
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
