//! # raster-transform
//!
//! Fixed 4x4 transform matrices for model/view/projection construction,
//! built on the generic `raster-matrix` engine.
//!
//! This crate provides:
//!
//! - [`Mat4`] - 4x4 transform with closed-form builders: translation, scale,
//!   axis rotations, arbitrary-axis (Rodrigues) rotation, look-at,
//!   perspective
//! - [`Vec3`] - f64 3-vector for positions, directions and rotation axes
//! - Column-major f32 export ([`Mat4::to_cols_array_f32`], [`Mat4::to_glam`])
//!   for direct uniform upload
//!
//! # Convention
//!
//! Column-major storage, column vectors, right-handed coordinates, OpenGL
//! clip space. Transforms chain right-to-left.
//!
//! # Usage
//!
//! ```rust
//! use std::f64::consts::FRAC_PI_3;
//! use raster_transform::{Mat4, Vec3};
//!
//! let model = Mat4::translation(0.0, 0.0, -4.0) * Mat4::rotation_y(0.5);
//! let view = Mat4::look_at(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Vec3::Y);
//! let proj = Mat4::perspective(FRAC_PI_3, 16.0 / 9.0, 0.1, 100.0);
//!
//! let mvp = proj * view * model;
//! let uniform: [f32; 16] = mvp.to_cols_array_f32();
//! # let _ = uniform;
//! ```
//!
//! # Sharp edges
//!
//! Degenerate input is not guarded: a zero-length rotation axis or an `up`
//! vector parallel to the view direction produces NaN components that
//! propagate silently. See the individual builders.
//!
//! # Dependencies
//!
//! - [`raster-matrix`](raster_matrix) - Dense matrix core
//! - [`glam`] - Column-major f32 interop

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat4;
mod vec3;

pub use mat4::Mat4;
pub use vec3::Vec3;

/// Re-export of the core matrix crate for downstream convenience.
pub use raster_matrix;
