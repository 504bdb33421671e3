//! Fixed 4x4 transform matrices built on the generic dense-matrix core.
//!
//! # Convention
//!
//! - Column-major storage, **column vectors** on the right: `Mat4 * v`
//! - Translation lives in the last column
//! - Transforms chain right-to-left: `a * b * v` applies `b` first
//! - Right-handed coordinates, OpenGL clip space for [`Mat4::perspective`]
//!
//! The flat buffer from [`Mat4::as_slice`] (or the f32 export) uploads
//! directly as a column-major uniform; see `raster-matrix` for the layout
//! contract.

use std::ops::Mul;

use raster_matrix::{Matrix, Result};

use crate::Vec3;

/// A 4x4 transform matrix.
///
/// Thin newtype over the core [`Matrix`], always 4x4. Builders are
/// closed-form; composition and inversion delegate to the core engine.
///
/// # Example
///
/// ```rust
/// use raster_transform::{Mat4, Vec3};
///
/// let model = Mat4::translation(1.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
/// let p = model.transform_point(Vec3::new(1.0, 0.0, 0.0));
/// assert_eq!(p, Vec3::new(3.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mat4(Matrix);

impl Mat4 {
    /// The identity transform.
    pub fn identity() -> Self {
        Self(Matrix::from_cols_array([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Translation by (x, y, z), stored in the last column.
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self(Matrix::from_cols_array([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ]))
    }

    /// Non-uniform scale along the three axes.
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self(Matrix::from_cols_array([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Rotation about the X axis by `radians`. Any real angle is accepted.
    pub fn rotation_x(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self(Matrix::from_cols_array([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Rotation about the Y axis by `radians`.
    pub fn rotation_y(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self(Matrix::from_cols_array([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Rotation about the Z axis by `radians`.
    pub fn rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self(Matrix::from_cols_array([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Rotation about an arbitrary axis (Rodrigues formula).
    ///
    /// The axis is normalized internally. A zero-length axis yields NaN
    /// components that propagate silently through the result; callers are
    /// responsible for supplying a non-degenerate axis.
    pub fn rotation_axis(radians: f64, axis: Vec3) -> Self {
        let a = axis.normalize();
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (a.x, a.y, a.z);
        Self(Matrix::from_cols_array([
            [t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0],
            [t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0],
            [t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }

    /// Right-handed look-at view matrix.
    ///
    /// Builds an orthonormal basis from the view direction and `up` via
    /// cross products. If `up` is parallel to the view direction or zero,
    /// the basis degenerates and NaN columns propagate silently; this is
    /// accepted, documented behavior.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let s = f.cross(up).normalize();
        let u = s.cross(f);
        Self(Matrix::from_cols_array([
            [s.x, u.x, -f.x, 0.0],
            [s.y, u.y, -f.y, 0.0],
            [s.z, u.z, -f.z, 0.0],
            [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
        ]))
    }

    /// Right-handed perspective projection with OpenGL clip conventions
    /// (z in [-1, 1] after the w divide).
    ///
    /// `fov_y` is the vertical field of view in radians.
    pub fn perspective(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let depth = near - far;
        Self(Matrix::from_cols_array([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / depth, -1.0],
            [0.0, 0.0, 2.0 * far * near / depth, 0.0],
        ]))
    }

    /// Composes two transforms via the core matrix product.
    pub fn mul(&self, other: &Self) -> Self {
        // Both operands are 4x4 by construction.
        Self(Matrix::mul(&self.0, &other.0).expect("4x4 product dimensions always agree"))
    }

    /// Inverts the transform through the general elimination engine.
    ///
    /// # Errors
    ///
    /// [`raster_matrix::Error::Singular`] for a non-invertible transform
    /// (e.g. a scale with a zero factor).
    pub fn inverse(&self) -> Result<Self> {
        Ok(Self(self.0.inverse()?))
    }

    /// Determinant via the core elimination engine.
    pub fn determinant(&self) -> f64 {
        // A 4x4 is always square.
        self.0.determinant().expect("4x4 matrix is square")
    }

    /// Element at (row, col), 0-based.
    ///
    /// # Errors
    ///
    /// [`raster_matrix::Error::OutOfBounds`] when either index exceeds 3.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.0.get(row, col)
    }

    /// The underlying generic matrix.
    #[inline]
    pub fn as_matrix(&self) -> &Matrix {
        &self.0
    }

    /// The flat column-major buffer, length 16.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    /// Column-major array copy.
    pub fn to_cols_array(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.0.as_slice());
        out
    }

    /// Column-major f32 array, ready for uniform upload.
    pub fn to_cols_array_f32(&self) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for (dst, &src) in out.iter_mut().zip(self.0.as_slice()) {
            *dst = src as f32;
        }
        out
    }

    /// Converts to a column-major [`glam::Mat4`].
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.to_cols_array_f32())
    }

    /// Creates from a column-major [`glam::Mat4`].
    pub fn from_glam(m: glam::Mat4) -> Self {
        let cols = m.to_cols_array_2d();
        let mut cols64 = [[0.0f64; 4]; 4];
        for (c, col) in cols.iter().enumerate() {
            for (r, &v) in col.iter().enumerate() {
                cols64[c][r] = f64::from(v);
            }
        }
        Self(Matrix::from_cols_array(cols64))
    }

    /// Transforms a point (w = 1), applying the perspective divide when the
    /// resulting w is neither 0 nor 1.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = self.0.as_slice();
        let x = m[0] * p.x + m[4] * p.y + m[8] * p.z + m[12];
        let y = m[1] * p.x + m[5] * p.y + m[9] * p.z + m[13];
        let z = m[2] * p.x + m[6] * p.y + m[10] * p.z + m[14];
        let w = m[3] * p.x + m[7] * p.y + m[11] * p.z + m[15];
        if w != 0.0 && w != 1.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    /// Transforms a direction (w = 0): rotation and scale only, no
    /// translation.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let m = self.0.as_slice();
        Vec3::new(
            m[0] * v.x + m[4] * v.y + m[8] * v.z,
            m[1] * v.x + m[5] * v.y + m[9] * v.z,
            m[2] * v.x + m[6] * v.y + m[10] * v.z,
        )
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

// Mat4 * Mat4
impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Mat4::mul(&self, &rhs)
    }
}

impl Mul for &Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Self) -> Mat4 {
        Mat4::mul(self, rhs)
    }
}

impl From<Mat4> for Matrix {
    #[inline]
    fn from(m: Mat4) -> Matrix {
        m.0
    }
}

impl From<glam::Mat4> for Mat4 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self::from_glam(m)
    }
}

impl From<Mat4> for glam::Mat4 {
    #[inline]
    fn from(m: Mat4) -> glam::Mat4 {
        m.to_glam()
    }
}
