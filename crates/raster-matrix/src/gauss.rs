//! Gaussian-elimination engine: matrix inverse and determinant.
//!
//! Both operations clone the input into a private working matrix and run
//! partial-pivoting elimination over its column-major buffer. The public API
//! stays pure; the row primitives below are the only mutation in the crate
//! and never touch a caller-visible buffer.
//!
//! # Thresholds
//!
//! Three tunable constants govern pivoting:
//! [`SINGULAR_EPS`] (inverse bails out below this pivot magnitude),
//! [`DET_PIVOT_EPS`] (determinant re-pivots below this), and [`ELIM_EPS`]
//! (elimination of a row is skipped when its factor is already this small).

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Smallest pivot magnitude [`Matrix::inverse`] accepts before declaring the
/// matrix singular.
pub const SINGULAR_EPS: f64 = 1e-6;

/// Pivot magnitude below which [`Matrix::determinant`] searches for a larger
/// pivot in the rows beneath.
pub const DET_PIVOT_EPS: f64 = 1e-5;

/// Elimination factors at or below this magnitude are treated as already
/// eliminated.
pub const ELIM_EPS: f64 = 1e-8;

/// Exchanges rows `i` and `j` across all columns.
fn swap_rows(m: &mut Matrix, i: usize, j: usize) {
    for c in 0..m.cols {
        m.data.swap(c * m.rows + i, c * m.rows + j);
    }
}

/// Multiplies every entry of row `i` by `scalar`.
fn scale_row(m: &mut Matrix, i: usize, scalar: f64) {
    for c in 0..m.cols {
        m.data[c * m.rows + i] *= scalar;
    }
}

/// `row[target] -= factor * row[source]`, elementwise across columns.
fn sub_scaled_row(m: &mut Matrix, target: usize, source: usize, factor: f64) {
    for c in 0..m.cols {
        let v = m.data[c * m.rows + source];
        m.data[c * m.rows + target] -= factor * v;
    }
}

/// Scans column `col` in rows `from..n` for the entry with the largest
/// absolute value. Ties break to the first row attaining the maximum, so
/// pivot selection is deterministic.
fn pivot_row(m: &Matrix, col: usize, from: usize) -> (usize, f64) {
    let mut max_row = from;
    let mut max_abs = m.data[col * m.rows + from].abs();
    for r in (from + 1)..m.rows {
        let v = m.data[col * m.rows + r].abs();
        if v > max_abs {
            max_abs = v;
            max_row = r;
        }
    }
    (max_row, max_abs)
}

impl Matrix {
    /// Computes the inverse by Gauss-Jordan elimination with partial
    /// pivoting.
    ///
    /// The working copy is reduced all the way to the identity (every row is
    /// eliminated, not only those below the pivot) while the same row
    /// operations accumulate into an identity matrix, which becomes the
    /// result. O(n^3).
    ///
    /// # Errors
    ///
    /// [`Error::NotSquare`] for a non-square input. [`Error::Singular`] when
    /// no pivot of magnitude at least [`SINGULAR_EPS`] exists in some column,
    /// i.e. the matrix is singular or numerically too close to singular.
    ///
    /// # Example
    ///
    /// ```rust
    /// use approx::assert_abs_diff_eq;
    /// use raster_matrix::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]])?;
    /// let inv = m.inverse()?;
    /// assert_abs_diff_eq!(m.mul(&inv)?, Matrix::identity(2)?, epsilon = 1e-12);
    /// # Ok::<(), raster_matrix::Error>(())
    /// ```
    pub fn inverse(&self) -> Result<Matrix> {
        if !self.is_square() {
            return Err(Error::not_square(self.rows, self.cols));
        }
        let n = self.rows;
        let mut work = self.clone();
        let mut inv = Matrix::identity(n)?;

        for p in 0..n {
            let (max_row, max_abs) = pivot_row(&work, p, p);
            if max_abs < SINGULAR_EPS {
                return Err(Error::Singular {
                    pivot_col: p,
                    max_abs,
                });
            }
            if max_row != p {
                swap_rows(&mut work, p, max_row);
                swap_rows(&mut inv, p, max_row);
            }

            let inv_pivot = 1.0 / work.data[p * n + p];
            scale_row(&mut work, p, inv_pivot);
            scale_row(&mut inv, p, inv_pivot);

            for r in 0..n {
                if r == p {
                    continue;
                }
                let factor = work.data[p * n + r];
                if factor.abs() > ELIM_EPS {
                    sub_scaled_row(&mut work, r, p, factor);
                    sub_scaled_row(&mut inv, r, p, factor);
                }
            }
        }

        Ok(inv)
    }

    /// Computes the determinant by elimination to row-echelon form.
    ///
    /// The running product collects each pivot before its row is normalized;
    /// a row swap negates the product. A structurally singular matrix returns
    /// `0.0` rather than an error — zero is the mathematically correct, total
    /// answer, unlike [`Matrix::inverse`] which has nothing to return.
    ///
    /// A 1x1 matrix returns its sole entry.
    ///
    /// # Errors
    ///
    /// [`Error::NotSquare`] for a non-square input.
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
    pub fn determinant(&self) -> Result<f64> {
        if !self.is_square() {
            return Err(Error::not_square(self.rows, self.cols));
        }
        let n = self.rows;
        let mut work = self.clone();
        let mut det = 1.0;

        for p in 0..n {
            if work.data[p * n + p].abs() < DET_PIVOT_EPS {
                let (max_row, max_abs) = pivot_row(&work, p, p);
                if max_abs == 0.0 {
                    // Singular: the determinant is exactly zero.
                    return Ok(0.0);
                }
                if max_row != p {
                    swap_rows(&mut work, p, max_row);
                    det = -det;
                }
            }

            let pivot = work.data[p * n + p];
            det *= pivot;
            // Normalize so elimination factors are read straight from the
            // column; `det` already captured the true pivot.
            scale_row(&mut work, p, 1.0 / pivot);

            for r in (p + 1)..n {
                let factor = work.data[p * n + r];
                if factor.abs() > ELIM_EPS {
                    sub_scaled_row(&mut work, r, p, factor);
                }
            }
        }

        Ok(det)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_determinant_identity() {
        for n in 1..=6 {
            assert_eq!(Matrix::identity(n).unwrap().determinant().unwrap(), 1.0);
        }
    }

    #[test]
    fn test_determinant_1x1() {
        let m = Matrix::from_rows(&[[-2.5]]).unwrap();
        assert_eq!(m.determinant().unwrap(), -2.5);
    }

    #[test]
    fn test_determinant_2x2() {
        let m = Matrix::from_rows(&[[4.0, 6.0], [3.0, 8.0]]).unwrap();
        assert_eq!(m.determinant().unwrap(), 14.0);
    }

    #[test]
    fn test_determinant_3x3() {
        let m = Matrix::from_rows(&[[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]).unwrap();
        assert_relative_eq!(m.determinant().unwrap(), -306.0, max_relative = 1e-12);
    }

    #[test]
    fn test_determinant_dependent_rows_is_zero() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        assert_eq!(m.determinant().unwrap(), 0.0);

        let m = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert_eq!(m.determinant().unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_sign_flip_on_row_swap() {
        let m = Matrix::from_rows(&[[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]).unwrap();
        let swapped =
            Matrix::from_rows(&[[4.0, -2.0, 5.0], [6.0, 1.0, 1.0], [2.0, 8.0, 7.0]]).unwrap();
        assert_relative_eq!(
            m.determinant().unwrap(),
            -swapped.determinant().unwrap(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_determinant_multiplicative() {
        let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 3.0]]).unwrap();
        let b = Matrix::from_rows(&[[4.0, -1.0], [0.5, 2.0]]).unwrap();
        let lhs = a.mul(&b).unwrap().determinant().unwrap();
        let rhs = a.determinant().unwrap() * b.determinant().unwrap();
        assert_relative_eq!(lhs, rhs, max_relative = 1e-12);
    }

    #[test]
    fn test_determinant_requires_square() {
        let m = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert!(matches!(
            m.determinant(),
            Err(Error::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn test_determinant_small_leading_pivot() {
        // Leading entry below the re-pivot threshold forces a row swap.
        let m = Matrix::from_rows(&[[1e-7, 1.0], [1.0, 1.0]]).unwrap();
        assert_relative_eq!(m.determinant().unwrap(), 1e-7 - 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_inverse_2x2_fixture() {
        let m = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
        let expected = Matrix::from_rows(&[[0.6, -0.7], [-0.2, 0.4]]).unwrap();
        assert_abs_diff_eq!(m.inverse().unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_law() {
        let m = Matrix::from_rows(&[[6.0, 1.0, 1.0], [4.0, -2.0, 5.0], [2.0, 8.0, 7.0]]).unwrap();
        let prod = m.mul(&m.inverse().unwrap()).unwrap();
        assert_abs_diff_eq!(prod, Matrix::identity(3).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_inverse_identity_is_identity() {
        let i = Matrix::identity(4).unwrap();
        assert_abs_diff_eq!(i.inverse().unwrap(), i, epsilon = 1e-15);
    }

    #[test]
    fn test_inverse_singular() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        let err = m.inverse().unwrap_err();
        assert!(err.is_singular());
    }

    #[test]
    fn test_inverse_near_singular() {
        // Column of near-zeros falls under the singularity threshold.
        let m = Matrix::from_rows(&[[1e-8, 0.0], [0.0, 1.0]]).unwrap();
        assert!(m.inverse().unwrap_err().is_singular());
    }

    #[test]
    fn test_inverse_requires_square() {
        let m = Matrix::from_rows(&[[1.0], [2.0]]).unwrap();
        assert!(matches!(
            m.inverse(),
            Err(Error::NotSquare { rows: 2, cols: 1 })
        ));
    }

    #[test]
    fn test_inverse_leaves_input_untouched() {
        let m = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
        let before = m.clone();
        let _ = m.inverse().unwrap();
        assert_eq!(m, before);
    }

    #[test]
    fn test_inverse_needs_pivoting() {
        // Zero leading entry is only invertible through a row swap.
        let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        let inv = m.inverse().unwrap();
        assert_abs_diff_eq!(inv, m, epsilon = 1e-15);
    }
}
