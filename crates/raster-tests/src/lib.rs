//! Integration tests for raster-rs crates.
//!
//! This crate contains cross-crate property tests that verify the matrix
//! engine and the 4x4 transform layer against the algebraic laws they must
//! satisfy, plus an end-to-end model/view/projection pipeline check.

use raster_matrix::Matrix;

/// Deterministic pseudo-random matrix generator for property tests.
///
/// Plain LCG so fixtures are reproducible without a RNG dependency. Values
/// land in [-5, 5).
pub fn pseudo_random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as f64 / (1u64 << 31) as f64) * 10.0 - 5.0
    };
    let rows_data: Vec<Vec<f64>> = (0..rows)
        .map(|_| (0..cols).map(|_| next()).collect())
        .collect();
    Matrix::from_rows(&rows_data).expect("generated input is rectangular and finite")
}

/// A diagonally dominant (hence well-conditioned, invertible) square matrix.
pub fn well_conditioned_matrix(size: usize, seed: u64) -> Matrix {
    let base = pseudo_random_matrix(size, size, seed);
    let mut rows = base.to_row_major();
    for (i, row) in rows.iter_mut().enumerate() {
        let dominance: f64 = row.iter().map(|v| v.abs()).sum::<f64>() + 1.0;
        row[i] += if row[i] >= 0.0 { dominance } else { -dominance };
    }
    Matrix::from_rows(&rows).expect("adjusted input is rectangular and finite")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use raster_matrix::Matrix;
    use raster_transform::{Mat4, Vec3};
    use std::f64::consts::FRAC_PI_3;

    #[test]
    fn test_row_major_round_trip_law() {
        for seed in 0..8 {
            let m = pseudo_random_matrix(3 + (seed as usize % 3), 4, seed);
            let round = Matrix::from_rows(&m.to_row_major()).unwrap();
            assert_eq!(round, m);
        }
    }

    #[test]
    fn test_identity_law() {
        for seed in 0..8 {
            let m = pseudo_random_matrix(4, 6, seed);
            let right = m.mul(&Matrix::identity(6).unwrap()).unwrap();
            let left = Matrix::identity(4).unwrap().mul(&m).unwrap();
            assert_eq!(right, m);
            assert_eq!(left, m);
        }
    }

    #[test]
    fn test_inverse_law() {
        for size in [2, 3, 4, 5, 8] {
            let m = well_conditioned_matrix(size, size as u64 * 31 + 7);
            let inv = m.inverse().unwrap();
            let prod = m.mul(&inv).unwrap();
            assert_abs_diff_eq!(prod, Matrix::identity(size).unwrap(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_determinant_multiplicativity() {
        for seed in 0..6 {
            let a = well_conditioned_matrix(4, seed);
            let b = well_conditioned_matrix(4, seed + 100);
            let lhs = a.mul(&b).unwrap().determinant().unwrap();
            let rhs = a.determinant().unwrap() * b.determinant().unwrap();
            assert_relative_eq!(lhs, rhs, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_determinant_of_inverse() {
        let m = well_conditioned_matrix(5, 42);
        let det = m.determinant().unwrap();
        let det_inv = m.inverse().unwrap().determinant().unwrap();
        assert_relative_eq!(det * det_inv, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_sign_flip_on_row_swap() {
        let m = well_conditioned_matrix(4, 9);
        let mut rows = m.to_row_major();
        rows.swap(1, 3);
        let swapped = Matrix::from_rows(&rows).unwrap();
        assert_relative_eq!(
            swapped.determinant().unwrap(),
            -m.determinant().unwrap(),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_linearly_dependent_rows_determinant_zero() {
        let m = well_conditioned_matrix(3, 5);
        let mut rows = m.to_row_major();
        rows[2] = rows[0].iter().map(|v| v * 2.0).collect();
        let singular = Matrix::from_rows(&rows).unwrap();
        assert_abs_diff_eq!(singular.determinant().unwrap(), 0.0, epsilon = 1e-9);
        assert!(singular.inverse().unwrap_err().is_singular());
    }

    /// Full MVP pipeline: build model, view and projection the way a
    /// rasterizer client does every frame, then check the composite maps a
    /// known world point into clip space sanely.
    #[test]
    fn test_mvp_pipeline() {
        let model = Mat4::translation(0.0, 0.0, -2.0) * Mat4::scaling(0.5, 0.5, 0.5);
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);

        let mvp = &proj * &(&view * &model);

        // The model origin sits 5 units in front of the camera, well inside
        // the frustum: NDC coordinates must be finite and within [-1, 1].
        let ndc = mvp.transform_point(Vec3::ZERO);
        assert!(ndc.is_finite());
        assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && ndc.z.abs() <= 1.0);

        // Uniform upload buffer is 16 column-major floats
        let uniform = mvp.to_cols_array_f32();
        assert_eq!(uniform.len(), 16);
        assert_eq!(uniform[15], mvp.get(3, 3).unwrap() as f32);
    }

    /// The view matrix undoes itself: applying view then its inverse is a
    /// no-op on points.
    #[test]
    fn test_view_inverse_round_trip() {
        let view = Mat4::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        let back = view.inverse().unwrap();
        let p = Vec3::new(0.3, -0.7, 1.1);
        let round = back.transform_point(view.transform_point(p));
        assert_abs_diff_eq!(round.x, p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(round.y, p.y, epsilon = 1e-12);
        assert_abs_diff_eq!(round.z, p.z, epsilon = 1e-12);
    }

    /// The 4x4 layer and the generic engine agree: a transform's buffer fed
    /// back through the core constructors behaves identically.
    #[test]
    fn test_transform_layer_reuses_core_buffer() {
        let m = Mat4::rotation_axis(0.4, Vec3::new(1.0, 1.0, 0.0));
        let rebuilt = Matrix::from_cols(&[
            &m.as_slice()[0..4],
            &m.as_slice()[4..8],
            &m.as_slice()[8..12],
            &m.as_slice()[12..16],
        ])
        .unwrap();
        assert_eq!(rebuilt, *m.as_matrix());
    }
}
