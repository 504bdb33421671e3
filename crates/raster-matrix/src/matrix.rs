//! Column-major dense matrix type.
//!
//! [`Matrix`] owns a flat `Vec<f64>` in **column-major** order: the element at
//! (row, col) lives at `data[col * rows + row]`. This layout is a load-bearing
//! contract — the flat buffer from [`Matrix::as_slice`] is handed directly to
//! graphics APIs that expect column-major float arrays, and changing it would
//! silently transpose every consumer's transforms.
//!
//! # Convention
//!
//! Matrices use **column vectors**: `result = matrix * vector`. Constructors
//! accept either row-major input ([`Matrix::from_rows`], transposed into
//! storage) or column-major input ([`Matrix::from_cols`], flattened directly).
//!
//! # Usage
//!
//! ```rust
//! use raster_matrix::Matrix;
//!
//! let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
//! let b = Matrix::identity(2)?;
//! let product = a.mul(&b)?;
//! assert_eq!(product, a);
//! # Ok::<(), raster_matrix::Error>(())
//! ```

use std::fmt;
use std::ops::{Index, Mul};

use approx::{AbsDiffEq, RelativeEq};

use crate::error::{Error, Result};

/// A dense, heap-allocated matrix with runtime dimensions.
///
/// Value semantics throughout: every operation returns a freshly allocated
/// result and no operation ever aliases an input buffer into its output.
/// `Clone` performs a deep copy of the value buffer.
///
/// Dimensions are strictly positive; constructors reject empty input.
///
/// # Example
///
/// ```rust
/// use raster_matrix::Matrix;
///
/// let m = Matrix::from_rows(&[[4.0, 6.0], [3.0, 8.0]])?;
/// assert_eq!(m.determinant()?, 14.0);
/// # Ok::<(), raster_matrix::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    /// Elements in column-major order: `data[col * rows + row]`.
    pub(crate) data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from row-major input.
    ///
    /// Every inner slice must have the same length as the first; elements are
    /// transposed into column-major storage.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] for no rows or empty rows, [`Error::RaggedInput`] for
    /// inconsistent row lengths, [`Error::NonFinite`] for NaN or infinite
    /// elements.
    ///
    /// # Example
    ///
    /// ```rust
    /// use raster_matrix::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    /// assert_eq!(m.get(1, 0)?, 3.0);
    /// // Column-major storage: first column, then second
    /// assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// # Ok::<(), raster_matrix::Error>(())
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(Error::Empty);
        }

        let mut data = vec![0.0; nrows * ncols];
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(Error::RaggedInput {
                    row: r,
                    expected: ncols,
                    got: row.len(),
                });
            }
            for (c, &value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(Error::NonFinite { row: r, col: c });
                }
                data[c * nrows + r] = value;
            }
        }

        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Creates a matrix from column-major input.
    ///
    /// Input is already column-grouped, so it flattens directly with no
    /// transpose. Validation matches [`Matrix::from_rows`].
    ///
    /// # Errors
    ///
    /// [`Error::Empty`], [`Error::RaggedInput`] (the `row` field holds the
    /// offending column index), or [`Error::NonFinite`].
    pub fn from_cols<C: AsRef<[f64]>>(cols: &[C]) -> Result<Self> {
        let ncols = cols.len();
        let nrows = cols.first().map(|c| c.as_ref().len()).unwrap_or(0);
        if nrows == 0 || ncols == 0 {
            return Err(Error::Empty);
        }

        let mut data = Vec::with_capacity(nrows * ncols);
        for (c, col) in cols.iter().enumerate() {
            let col_slice = col.as_ref();
            if col_slice.len() != nrows {
                return Err(Error::RaggedInput {
                    row: c,
                    expected: nrows,
                    got: col_slice.len(),
                });
            }
            for (r, &value) in col_slice.iter().enumerate() {
                if !value.is_finite() {
                    return Err(Error::NonFinite { row: r, col: c });
                }
                data.push(value);
            }
        }

        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Creates a matrix from a row-major array literal.
    ///
    /// Infallible counterpart of [`Matrix::from_rows`] for statically
    /// rectangular input. Does **not** check for NaN or infinity — callers
    /// that construct matrices from computed values (the 4x4 transform
    /// builders) deliberately let non-finite values propagate.
    ///
    /// # Panics
    ///
    /// Panics if `M` or `N` is zero.
    pub fn from_rows_array<const M: usize, const N: usize>(rows: [[f64; N]; M]) -> Self {
        assert!(M > 0 && N > 0, "matrix dimensions must be positive");
        let mut data = vec![0.0; M * N];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                data[c * M + r] = value;
            }
        }
        Self {
            rows: M,
            cols: N,
            data,
        }
    }

    /// Creates a matrix from a column-major array literal.
    ///
    /// Infallible counterpart of [`Matrix::from_cols`]; same non-finite
    /// caveat as [`Matrix::from_rows_array`].
    ///
    /// # Panics
    ///
    /// Panics if `M` or `N` is zero.
    pub fn from_cols_array<const N: usize, const M: usize>(cols: [[f64; M]; N]) -> Self {
        assert!(M > 0 && N > 0, "matrix dimensions must be positive");
        let mut data = Vec::with_capacity(M * N);
        for col in &cols {
            data.extend_from_slice(col);
        }
        Self {
            rows: M,
            cols: N,
            data,
        }
    }

    /// Creates a `size`x`size` identity matrix.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSize`] when `size` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use raster_matrix::Matrix;
    ///
    /// let i = Matrix::identity(3)?;
    /// assert_eq!(i.get(0, 0)?, 1.0);
    /// assert_eq!(i.get(0, 1)?, 0.0);
    /// # Ok::<(), raster_matrix::Error>(())
    /// ```
    pub fn identity(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidSize { size });
        }
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            data[i * size + i] = 1.0;
        }
        Ok(Self {
            rows: size,
            cols: size,
            data,
        })
    }

    /// Creates a zero-filled matrix.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSize`] when either dimension is zero.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidSize {
                size: rows.min(cols),
            });
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` when the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// The flat column-major value buffer.
    ///
    /// Length is always `rows * cols`. For a 4x4 transform this slice is
    /// directly consumable as a column-major uniform upload buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the element at (row, col), 0-based.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] when either index is outside the matrix. Indices
    /// never wrap or clamp.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::out_of_bounds(row, col, self.rows, self.cols));
        }
        Ok(self.data[col * self.rows + row])
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] unless both matrices have identical
    /// dimensions.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.assert_same_size(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] unless both matrices have identical
    /// dimensions.
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.assert_same_size(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a - b)
            .collect();
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Multiplies every element by `scalar`.
    #[inline]
    pub fn scale(&self, scalar: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * scalar).collect(),
        }
    }

    /// Matrix product `self * other`.
    ///
    /// The result is `self.rows() x other.cols()`. Accumulation runs over the
    /// inner index in ascending order with plain summation; callers needing
    /// higher precision must pre-scale their inputs.
    ///
    /// # Errors
    ///
    /// [`Error::InnerDimensionMismatch`] unless `self.cols() == other.rows()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use raster_matrix::Matrix;
    ///
    /// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
    /// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]])?;
    /// let c = a.mul(&b)?;
    /// assert_eq!(c.as_slice(), &[19.0, 43.0, 22.0, 50.0]);
    /// # Ok::<(), raster_matrix::Error>(())
    /// ```
    pub fn mul(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::InnerDimensionMismatch {
                a_cols: self.cols,
                b_rows: other.rows,
            });
        }
        let mut data = vec![0.0; self.rows * other.cols];
        for col in 0..other.cols {
            for row in 0..self.rows {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.data[k * self.rows + row] * other.data[col * other.rows + k];
                }
                data[col * self.rows + row] = acc;
            }
        }
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let mut data = vec![0.0; self.data.len()];
        for c in 0..self.cols {
            for r in 0..self.rows {
                data[r * self.cols + c] = self.data[c * self.rows + r];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Exports the matrix as nested row-major vectors.
    ///
    /// Exists so tests can assert against human-authored row-major literals;
    /// production consumers read [`Matrix::as_slice`] instead.
    pub fn to_row_major(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.data[c * self.rows + r]).collect())
            .collect()
    }

    fn assert_same_size(&self, other: &Self) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::shape_mismatch(
                (self.rows, self.cols),
                (other.rows, other.cols),
            ));
        }
        Ok(())
    }
}

/// Panicking element access. Prefer [`Matrix::get`] for untrusted indices.
impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[col * self.rows + row]
    }
}

// Matrix * f64
impl Mul<f64> for Matrix {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    #[inline]
    fn mul(self, rhs: f64) -> Matrix {
        self.scale(rhs)
    }
}

/// Diagnostic rendering: row-major, tab-separated columns, one row per line.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{}", self.data[c * self.rows + r])?;
            }
            if r + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| f64::abs_diff_eq(a, b, epsilon))
    }
}

impl RelativeEq for Matrix {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| f64::relative_eq(a, b, epsilon, max_relative))
    }
}
