// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Affine transforms stored as homogeneous 4x4 matrices

use super::Plane;
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Determinant magnitude below which a transform is treated as singular
const SINGULAR_EPS: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform(pub Matrix4<f64>);

impl Transform {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    pub fn translation(offset: Vector3<f64>) -> Self {
        Self(Matrix4::new_translation(&offset))
    }

    /// Matrix whose columns are the plane axes and origin.
    /// Maps plane coordinates to world coordinates.
    fn frame(plane: &Plane) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 1>(0, 0).copy_from(&plane.x_axis);
        m.fixed_view_mut::<3, 1>(0, 1).copy_from(&plane.y_axis);
        m.fixed_view_mut::<3, 1>(0, 2).copy_from(&plane.z_axis);
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&plane.origin.coords);
        m
    }

    /// Change of basis between two frames.
    ///
    /// If `P = plane0.origin + a0*x0 + b0*y0 + c0*z0` and
    /// `P = plane1.origin + a1*x1 + b1*y1 + c1*z1`, the result maps
    /// `(a1, b1, c1)` to `(a0, b0, c0)`. With `plane0` the world XY plane this
    /// takes coordinates recorded relative to `plane1` into world coordinates.
    ///
    /// A degenerate `plane0` yields a zero matrix; a degenerate `plane1` yields a
    /// singular one. Neither is an error here.
    pub fn change_basis(plane0: &Plane, plane1: &Plane) -> Self {
        let f0 = Self::frame(plane0);
        let f1 = Self::frame(plane1);
        let f0_inv = f0.try_inverse().unwrap_or_else(Matrix4::zeros);
        Self(f0_inv * f1)
    }

    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Inverse transform, or `None` when the matrix is singular
    pub fn try_inverse(&self) -> Option<Self> {
        if self.determinant().abs() < SINGULAR_EPS {
            return None;
        }
        self.0.try_inverse().map(Self)
    }

    /// `self` applied after `first`
    pub fn compose(&self, first: &Transform) -> Self {
        Self(self.0 * first.0)
    }

    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.0.transform_point(point)
    }

    pub fn apply_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.0.transform_vector(vector)
    }

    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.0.is_identity(epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
