//! # raster-matrix
//!
//! Column-major dense matrix engine backing graphics-transform pipelines.
//!
//! This crate provides the generic core used by `raster-transform` to build
//! model/view/projection matrices:
//!
//! - [`Matrix`] - heap-allocated matrix with runtime dimensions and
//!   column-major storage
//! - Construction from row-major or column-major input, identity generation
//! - Elementwise arithmetic, scalar scaling, matrix product
//! - Gaussian-elimination [`Matrix::inverse`] and [`Matrix::determinant`]
//! - Exact equality via `PartialEq`, tolerance equality via the [`approx`]
//!   traits
//!
//! # Design
//!
//! Immutable-value semantics: every operation returns a freshly allocated
//! matrix and never aliases an input buffer into its output. The only
//! in-place mutation lives inside the elimination engine, which works on a
//! private clone.
//!
//! The column-major flat buffer ([`Matrix::as_slice`]) is the external
//! contract: a 4x4 matrix's buffer uploads directly as a column-major uniform.
//!
//! # Usage
//!
//! ```rust
//! use raster_matrix::Matrix;
//!
//! let m = Matrix::from_rows(&[
//!     [6.0, 1.0, 1.0],
//!     [4.0, -2.0, 5.0],
//!     [2.0, 8.0, 7.0],
//! ])?;
//!
//! let det = m.determinant()?;
//! assert!((det - -306.0).abs() < 1e-9);
//!
//! let inv = m.inverse()?;
//! let product = m.mul(&inv)?;
//! # Ok::<(), raster_matrix::Error>(())
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Error derive
//! - [`approx`] - Tolerance-comparison traits
//!
//! # Used By
//!
//! - `raster-transform` - Fixed 4x4 transform builders

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod gauss;
mod matrix;

pub use error::{Error, Result};
pub use gauss::{DET_PIVOT_EPS, ELIM_EPS, SINGULAR_EPS};
pub use matrix::Matrix;
