// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Curves that can bound a planar face

use super::{CurveOrientation, Plane, Polyline, Transform};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Circular arc in the XY plane of `plane`, swept counter-clockwise from
/// `start_angle` to `end_angle` (radians)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub plane: Plane,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Arc {
    pub fn new(plane: Plane, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            plane,
            radius,
            start_angle,
            end_angle,
        }
    }

    pub fn circle(plane: Plane, radius: f64) -> Self {
        Self::new(plane, radius, 0.0, TAU)
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn is_circle(&self) -> bool {
        (self.sweep().abs() - TAU).abs() < 1e-12
    }

    pub fn point_at(&self, angle: f64) -> Point3<f64> {
        let local = Point3::new(self.radius * angle.cos(), self.radius * angle.sin(), 0.0);
        self.plane.to_world(&local)
    }

    /// Chord approximation whose sagitta stays within `tolerance`
    pub fn tessellate(&self, tolerance: f64) -> Polyline {
        let sweep = self.sweep();
        let r = self.radius.abs();
        let tol = tolerance.max(f64::EPSILON);
        // Sagitta s = r(1 - cos(θ/2)) <= tol
        let max_step = if tol >= r {
            std::f64::consts::FRAC_PI_2
        } else {
            2.0 * (1.0 - tol / r).acos()
        };
        let segments = ((sweep.abs() / max_step).ceil() as usize).clamp(4, 4096);
        let mut points: Vec<Point3<f64>> = (0..=segments)
            .map(|i| self.point_at(self.start_angle + sweep * i as f64 / segments as f64))
            .collect();
        if self.is_circle() {
            // Make closure exact
            if let Some(first) = points.first().copied() {
                if let Some(last) = points.last_mut() {
                    *last = first;
                }
            }
        }
        Polyline::new(points)
    }

    pub fn transform(&mut self, xform: &Transform) {
        let origin = xform.apply_point(&self.plane.origin);
        let x = xform.apply_vector(&(self.plane.x_axis * self.radius));
        let y = xform.apply_vector(&(self.plane.y_axis * self.radius));
        // Uniform scale is assumed; a non-uniform scale turns the arc into an ellipse
        self.radius = x.norm();
        self.plane = Plane::new(origin, x, y);
    }

    pub fn reverse(&mut self) {
        self.plane = self.plane.flipped();
        let (s, e) = (self.start_angle, self.end_angle);
        self.start_angle = -e;
        self.end_angle = -s;
    }
}

/// A 3D boundary curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    Polyline(Polyline),
    Arc(Arc),
}

impl Curve {
    /// The underlying polyline, if this curve is exactly one
    pub fn try_get_polyline(&self) -> Option<Polyline> {
        match self {
            Self::Polyline(pl) => Some(pl.clone()),
            Self::Arc(_) => None,
        }
    }

    /// Polyline approximation; exact for polyline curves
    pub fn to_polyline(&self, tolerance: f64) -> Polyline {
        match self {
            Self::Polyline(pl) => pl.clone(),
            Self::Arc(arc) => arc.tessellate(tolerance),
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Self::Polyline(pl) => pl.is_closed(),
            Self::Arc(arc) => arc.is_circle(),
        }
    }

    pub fn start_point(&self) -> Option<Point3<f64>> {
        match self {
            Self::Polyline(pl) => pl.first().copied(),
            Self::Arc(arc) => Some(arc.point_at(arc.start_angle)),
        }
    }

    pub fn reverse(&mut self) {
        match self {
            Self::Polyline(pl) => pl.reverse(),
            Self::Arc(arc) => arc.reverse(),
        }
    }

    pub fn transform(&mut self, xform: &Transform) {
        match self {
            Self::Polyline(pl) => pl.transform(xform),
            Self::Arc(arc) => arc.transform(xform),
        }
    }

    pub fn closed_orientation(&self, normal: &Vector3<f64>) -> CurveOrientation {
        match self {
            Self::Polyline(pl) => pl.orientation(normal),
            Self::Arc(arc) if arc.is_circle() => {
                let d = arc.plane.z_axis.dot(normal) * arc.sweep().signum();
                if d > 0.0 {
                    CurveOrientation::CounterClockwise
                } else if d < 0.0 {
                    CurveOrientation::Clockwise
                } else {
                    CurveOrientation::Undefined
                }
            }
            Self::Arc(_) => CurveOrientation::Undefined,
        }
    }

    /// Reverse if needed so the curve runs counter-clockwise about world Z
    pub fn orient_counter_clockwise(&mut self) {
        if self.closed_orientation(&Vector3::z()) == CurveOrientation::Clockwise {
            self.reverse();
        }
    }

    /// Reverse if needed so the curve runs clockwise about world Z
    pub fn orient_clockwise(&mut self) {
        if self.closed_orientation(&Vector3::z()) == CurveOrientation::CounterClockwise {
            self.reverse();
        }
    }
}

impl From<Polyline> for Curve {
    fn from(polyline: Polyline) -> Self {
        Self::Polyline(polyline)
    }
}

impl From<Arc> for Curve {
    fn from(arc: Arc) -> Self {
        Self::Arc(arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_circle_tessellation_is_closed() {
        let arc = Arc::circle(Plane::world_xy(), 5.0);
        let pl = arc.tessellate(0.01);
        assert!(pl.is_closed());
        let expected = std::f64::consts::PI * 25.0;
        assert!((pl.area() - expected).abs() / expected < 0.01);
    }

    #[test]
    fn test_arc_is_not_a_polyline() {
        let curve = Curve::from(Arc::circle(Plane::world_xy(), 1.0));
        assert!(curve.try_get_polyline().is_none());
        assert!(curve.is_closed());
    }

    #[test]
    fn test_orient_counter_clockwise() {
        let mut curve = Curve::from(Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]));
        assert_eq!(curve.closed_orientation(&Vector3::z()), CurveOrientation::Clockwise);
        curve.orient_counter_clockwise();
        assert_eq!(
            curve.closed_orientation(&Vector3::z()),
            CurveOrientation::CounterClockwise
        );
        curve.orient_clockwise();
        assert_eq!(curve.closed_orientation(&Vector3::z()), CurveOrientation::Clockwise);
    }

    #[test]
    fn test_arc_reverse_keeps_geometry() {
        let mut arc = Arc::new(Plane::world_xy(), 2.0, 0.0, std::f64::consts::FRAC_PI_2);
        let start = arc.point_at(arc.start_angle);
        let end = arc.point_at(arc.end_angle);
        arc.reverse();
        assert_relative_eq!(arc.point_at(arc.start_angle), end, epsilon = 1e-12);
        assert_relative_eq!(arc.point_at(arc.end_angle), start, epsilon = 1e-12);
    }
}
