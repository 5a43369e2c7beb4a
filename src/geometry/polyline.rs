// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polylines: ordered vertex lists with optional closure

use super::{BoundingBox, Transform};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Winding of a closed curve seen from the tip of a reference normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveOrientation {
    Clockwise,
    CounterClockwise,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
}

impl Polyline {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// Closed when there are at least three points and the start is identical
    /// to the end
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 3 && self.points.first() == self.points.last()
    }

    pub fn is_closed_within(&self, tolerance: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) if self.points.len() >= 3 => (a - b).norm() <= tolerance,
            _ => false,
        }
    }

    /// At least two points with at least one segment of non-zero length
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
            && self.points.iter().all(|p| p.coords.iter().all(|v| v.is_finite()))
            && self.segments().any(|(a, b)| a != b)
    }

    /// Consecutive vertex pairs
    pub fn segments(&self) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> + '_ {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| (b - a).norm()).sum()
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    pub fn transform(&mut self, xform: &Transform) {
        for point in &mut self.points {
            *point = xform.apply_point(point);
        }
    }

    /// Append the start point if the polyline is not already closed
    pub fn close(&mut self) {
        if let Some(first) = self.points.first().copied() {
            if self.points.last() != Some(&first) {
                self.points.push(first);
            }
        }
    }

    /// Snap the end onto the start when they are within tolerance.
    /// Returns false when the gap is too large.
    pub fn close_within(&mut self, tolerance: f64) -> bool {
        if !self.is_closed_within(tolerance) {
            return false;
        }
        if let Some(first) = self.points.first().copied() {
            if let Some(last) = self.points.last_mut() {
                *last = first;
            }
        }
        true
    }

    /// Drop vertices closer than `tolerance` to their predecessor.
    /// Returns the number of points removed.
    pub fn remove_duplicate_points(&mut self, tolerance: f64) -> usize {
        let before = self.points.len();
        let closed = self.is_closed();
        let mut kept: Vec<Point3<f64>> = Vec::with_capacity(before);
        for point in &self.points {
            match kept.last() {
                Some(prev) if (point - prev).norm() <= tolerance => {}
                _ => kept.push(*point),
            }
        }
        if closed {
            // The closing vertex may have been absorbed into its predecessor
            if kept.len() > 1 && (kept[kept.len() - 1] - kept[0]).norm() <= tolerance {
                kept.pop();
            }
            if let Some(first) = kept.first().copied() {
                kept.push(first);
            }
        }
        self.points = kept;
        before - self.points.len()
    }

    /// Newell's area vector. For a closed planar polyline its length is twice
    /// the enclosed area and its direction is the right-hand normal.
    pub fn area_normal(&self) -> Vector3<f64> {
        let mut n = Vector3::zeros();
        let pts = &self.points;
        if pts.len() < 3 {
            return n;
        }
        let count = if self.is_closed() { pts.len() - 1 } else { pts.len() };
        for i in 0..count {
            let a = &pts[i];
            let b = &pts[(i + 1) % count];
            n.x += (a.y - b.y) * (a.z + b.z);
            n.y += (a.z - b.z) * (a.x + b.x);
            n.z += (a.x - b.x) * (a.y + b.y);
        }
        n
    }

    /// Enclosed area of a closed planar polyline
    pub fn area(&self) -> f64 {
        self.area_normal().norm() * 0.5
    }

    pub fn orientation(&self, normal: &Vector3<f64>) -> CurveOrientation {
        if !self.is_closed() {
            return CurveOrientation::Undefined;
        }
        let signed = self.area_normal().dot(normal);
        if signed > 0.0 {
            CurveOrientation::CounterClockwise
        } else if signed < 0.0 {
            CurveOrientation::Clockwise
        } else {
            CurveOrientation::Undefined
        }
    }

    /// Largest distance of any vertex from the best-fit plane through the
    /// Newell normal and the vertex centroid
    pub fn planarity_deviation(&self) -> Option<f64> {
        let normal = self.area_normal();
        let len = normal.norm();
        if len < f64::EPSILON || self.points.is_empty() {
            return None;
        }
        let normal = normal / len;
        let centroid = self.centroid();
        Some(
            self.points
                .iter()
                .map(|p| (p - centroid).dot(&normal).abs())
                .fold(0.0, f64::max),
        )
    }

    /// Vertex average, ignoring the duplicated closing vertex
    pub fn centroid(&self) -> Point3<f64> {
        let count = if self.is_closed() {
            self.points.len() - 1
        } else {
            self.points.len()
        };
        if count == 0 {
            return Point3::origin();
        }
        let sum = self.points[..count]
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p.coords);
        Point3::from(sum / count as f64)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for point in &self.points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// Rotate a closed polyline so that it starts at vertex `index`
    pub fn rotate_start(&mut self, index: usize) {
        if !self.is_closed() || index == 0 || index >= self.points.len() - 1 {
            return;
        }
        self.points.pop();
        self.points.rotate_left(index);
        self.close();
    }
}

impl From<Vec<Point3<f64>>> for Polyline {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point3<f64>> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
