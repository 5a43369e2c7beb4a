// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented planes used as local reference frames

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Minimum axis length accepted when building a frame
const AXIS_EPS: f64 = 1e-12;

/// A right-handed reference frame: origin plus orthonormal axes.
///
/// Equality is exact over all four fields. Two planes that describe the same
/// frame up to rounding are different planes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3<f64>,
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
    pub z_axis: Vector3<f64>,
}

impl Plane {
    /// The world XY plane at the origin
    pub fn world_xy() -> Self {
        Self {
            origin: Point3::origin(),
            x_axis: Vector3::x(),
            y_axis: Vector3::y(),
            z_axis: Vector3::z(),
        }
    }

    /// A plane with all axes zero. Never valid.
    pub fn unset() -> Self {
        Self {
            origin: Point3::origin(),
            x_axis: Vector3::zeros(),
            y_axis: Vector3::zeros(),
            z_axis: Vector3::zeros(),
        }
    }

    /// Build a plane from an origin and two in-plane directions.
    ///
    /// `x_dir` is unitized, `y_dir` is orthogonalized against it. Parallel or
    /// zero-length directions produce a plane with zero axes instead of an error;
    /// [`Plane::is_valid`] reports the problem and any transform built from it is
    /// singular.
    pub fn new(origin: Point3<f64>, x_dir: Vector3<f64>, y_dir: Vector3<f64>) -> Self {
        let x_len = x_dir.norm();
        if x_len < AXIS_EPS {
            return Self { origin, ..Self::unset() };
        }
        let x_axis = x_dir / x_len;
        let y_perp = y_dir - x_axis * x_axis.dot(&y_dir);
        let y_len = y_perp.norm();
        if y_len < AXIS_EPS {
            return Self { origin, ..Self::unset() };
        }
        let y_axis = y_perp / y_len;
        let z_axis = x_axis.cross(&y_axis);
        Self {
            origin,
            x_axis,
            y_axis,
            z_axis,
        }
    }

    /// Build a plane with the given origin and normal.
    /// The x axis is chosen deterministically perpendicular to the normal.
    pub fn from_normal(origin: Point3<f64>, normal: Vector3<f64>) -> Self {
        let len = normal.norm();
        if len < AXIS_EPS {
            return Self { origin, ..Self::unset() };
        }
        let z = normal / len;
        // Pick the world axis least aligned with the normal as the seed for x
        let seed = if z.x.abs() <= z.y.abs() && z.x.abs() <= z.z.abs() {
            Vector3::x()
        } else if z.y.abs() <= z.z.abs() {
            Vector3::y()
        } else {
            Vector3::z()
        };
        let x_dir = seed - z * z.dot(&seed);
        let y_dir = z.cross(&x_dir);
        Self::new(origin, x_dir, y_dir)
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.z_axis
    }

    /// True when the axes are unit length and mutually perpendicular
    pub fn is_valid(&self) -> bool {
        let finite = self.origin.coords.iter().all(|v| v.is_finite());
        let unit = |v: &Vector3<f64>| (v.norm() - 1.0).abs() < 1e-9;
        finite
            && unit(&self.x_axis)
            && unit(&self.y_axis)
            && unit(&self.z_axis)
            && self.x_axis.dot(&self.y_axis).abs() < 1e-9
            && self.x_axis.dot(&self.z_axis).abs() < 1e-9
            && self.y_axis.dot(&self.z_axis).abs() < 1e-9
    }

    /// Express a world point in plane coordinates
    pub fn to_local(&self, point: &Point3<f64>) -> Point3<f64> {
        let d = point - self.origin;
        Point3::new(d.dot(&self.x_axis), d.dot(&self.y_axis), d.dot(&self.z_axis))
    }

    /// Map plane coordinates back to world space
    pub fn to_world(&self, local: &Point3<f64>) -> Point3<f64> {
        self.origin + self.x_axis * local.x + self.y_axis * local.y + self.z_axis * local.z
    }

    /// Signed distance of a point above the plane
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(&self.z_axis)
    }

    /// Same frame with the normal reversed (y axis flipped to stay right-handed)
    pub fn flipped(&self) -> Self {
        Self {
            origin: self.origin,
            x_axis: self.x_axis,
            y_axis: -self.y_axis,
            z_axis: -self.z_axis,
        }
    }

    /// True when both planes describe the same infinite plane within tolerance
    pub fn is_coplanar(&self, other: &Plane, tolerance: f64) -> bool {
        let parallel = self.z_axis.cross(&other.z_axis).norm() < 1e-6;
        parallel && self.distance_to(&other.origin).abs() <= tolerance
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::world_xy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_orthogonalizes_axes() {
        let plane = Plane::new(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
        );
        assert!(plane.is_valid());
        assert_relative_eq!(plane.y_axis, Vector3::y());
        assert_relative_eq!(plane.z_axis, Vector3::z());
    }

    #[test]
    fn test_parallel_directions_are_invalid() {
        let plane = Plane::new(Point3::origin(), Vector3::x(), Vector3::x() * 3.0);
        assert!(!plane.is_valid());
        assert_eq!(plane.z_axis, Vector3::zeros());
    }

    #[test]
    fn test_local_world_round_trip() {
        let plane = Plane::from_normal(Point3::new(5.0, -2.0, 1.0), Vector3::new(1.0, 1.0, 1.0));
        let p = Point3::new(3.0, 4.0, 5.0);
        let back = plane.to_world(&plane.to_local(&p));
        assert_relative_eq!(back, p, epsilon = 1e-12);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = Plane::world_xy();
        let mut b = Plane::world_xy();
        assert_eq!(a, b);
        b.origin.x += 1e-15;
        assert_ne!(a, b);
    }
}
