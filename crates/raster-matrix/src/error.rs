//! Error types for matrix operations.
//!
//! Every failure in this crate is reported synchronously through the single
//! [`Error`] enum; there are no partial results and no silent clamping.
//!
//! # Overview
//!
//! The variants fall into five kinds:
//!
//! - **Shape errors**: [`Empty`](Error::Empty), [`RaggedInput`](Error::RaggedInput),
//!   [`ShapeMismatch`](Error::ShapeMismatch),
//!   [`InnerDimensionMismatch`](Error::InnerDimensionMismatch)
//! - **Value errors**: [`NonFinite`](Error::NonFinite)
//! - **Domain errors**: [`NotSquare`](Error::NotSquare), [`InvalidSize`](Error::InvalidSize)
//! - **Index errors**: [`OutOfBounds`](Error::OutOfBounds)
//! - **Numerical errors**: [`Singular`](Error::Singular)
//!
//! `Singular` is deliberately distinct from `NotSquare`: a singular input to
//! [`Matrix::inverse`](crate::Matrix::inverse) is structurally valid and fails
//! only on a numerical condition.
//!
//! # Usage
//!
//! ```rust
//! use raster_matrix::{Error, Matrix};
//!
//! let m = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
//! match m.inverse() {
//!     Err(Error::Singular { .. }) => {} // expected: rows are dependent
//!     other => panic!("expected singular matrix error, got {other:?}"),
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during matrix construction and arithmetic.
///
/// Uses [`thiserror`] for the [`std::error::Error`] and [`std::fmt::Display`]
/// implementations.
#[derive(Debug, Error)]
pub enum Error {
    /// Constructor input had no rows or no columns.
    ///
    /// A matrix with zero rows or zero columns is invalid, not merely empty.
    #[error("matrix input is empty: a matrix needs at least one row and one column")]
    Empty,

    /// Constructor input rows (or columns) had inconsistent lengths.
    #[error("ragged input: row {row} has {got} elements, expected {expected}")]
    RaggedInput {
        /// Index of the offending row (or column for `from_cols`)
        row: usize,
        /// Length of the first row, which sets the expectation
        expected: usize,
        /// Length actually found
        got: usize,
    },

    /// Constructor input contained a NaN or infinite element.
    #[error("non-finite element at ({row}, {col})")]
    NonFinite {
        /// Row of the offending element
        row: usize,
        /// Column of the offending element
        col: usize,
    },

    /// Two matrices must have identical dimensions for this operation.
    ///
    /// Returned by elementwise operations such as [`Matrix::add`](crate::Matrix::add)
    /// and [`Matrix::sub`](crate::Matrix::sub).
    #[error("shape mismatch: {a_rows}x{a_cols} vs {b_rows}x{b_cols}")]
    ShapeMismatch {
        /// Left operand rows
        a_rows: usize,
        /// Left operand columns
        a_cols: usize,
        /// Right operand rows
        b_rows: usize,
        /// Right operand columns
        b_cols: usize,
    },

    /// Inner dimensions do not agree for a matrix product.
    ///
    /// `a.mul(&b)` requires `a.cols() == b.rows()`.
    #[error("inner dimension mismatch: left has {a_cols} columns, right has {b_rows} rows")]
    InnerDimensionMismatch {
        /// Column count of the left operand
        a_cols: usize,
        /// Row count of the right operand
        b_rows: usize,
    },

    /// The operation requires a square matrix.
    ///
    /// Returned by [`Matrix::inverse`](crate::Matrix::inverse) and
    /// [`Matrix::determinant`](crate::Matrix::determinant).
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// Requested size is outside the valid domain.
    ///
    /// Returned by [`Matrix::identity`](crate::Matrix::identity) and
    /// [`Matrix::zeros`](crate::Matrix::zeros) when a dimension is zero.
    #[error("invalid matrix size: {size}")]
    InvalidSize {
        /// The offending size
        size: usize,
    },

    /// Element access outside the matrix bounds.
    ///
    /// Indices never wrap or clamp; they always fail.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix row count
        rows: usize,
        /// Matrix column count
        cols: usize,
    },

    /// Elimination could not find a usable pivot: the matrix is singular or
    /// numerically too close to singular to invert.
    #[error("singular matrix: pivot column {pivot_col} has max |value| {max_abs:e}")]
    Singular {
        /// Pivot column at which elimination stalled
        pivot_col: usize,
        /// Largest absolute value found in that column
        max_abs: f64,
    },
}

impl Error {
    /// Creates an [`Error::ShapeMismatch`] from two (rows, cols) pairs.
    #[inline]
    pub fn shape_mismatch(a: (usize, usize), b: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            a_rows: a.0,
            a_cols: a.1,
            b_rows: b.0,
            b_cols: b.1,
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        Self::OutOfBounds {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Creates an [`Error::NotSquare`] error.
    #[inline]
    pub fn not_square(rows: usize, cols: usize) -> Self {
        Self::NotSquare { rows, cols }
    }

    /// Returns `true` if this is a shape-compatibility error.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::Empty
                | Self::RaggedInput { .. }
                | Self::ShapeMismatch { .. }
                | Self::InnerDimensionMismatch { .. }
        )
    }

    /// Returns `true` if this is a bounds error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this is a singularity error.
    #[inline]
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::Singular { .. })
    }
}
