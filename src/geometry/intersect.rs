// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Curve self-intersection detection

use super::{Curve, Polyline};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Squared cross-product magnitude below which two directions are parallel
const PARALLEL_EPS: f64 = 1e-18;

/// A single self-intersection. `segments` are the indices of the two
/// polyline segments involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IntersectionEvent {
    Point {
        point: Point3<f64>,
        segments: (usize, usize),
    },
    Overlap {
        start: Point3<f64>,
        end: Point3<f64>,
        segments: (usize, usize),
    },
}

impl IntersectionEvent {
    pub fn is_overlap(&self) -> bool {
        matches!(self, Self::Overlap { .. })
    }

    /// Representative location: the point, or the overlap midpoint
    pub fn location(&self) -> Point3<f64> {
        match self {
            Self::Point { point, .. } => *point,
            Self::Overlap { start, end, .. } => nalgebra::center(start, end),
        }
    }
}

/// The (possibly empty) set of self-intersections of a curve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveIntersections {
    pub events: Vec<IntersectionEvent>,
}

impl CurveIntersections {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IntersectionEvent> {
        self.events.iter()
    }

    fn push_unique(&mut self, event: IntersectionEvent, tolerance: f64) {
        let loc = event.location();
        let duplicate = self
            .events
            .iter()
            .any(|e| {
                e.is_overlap() == event.is_overlap() && (e.location() - loc).norm() <= tolerance
            });
        if !duplicate {
            self.events.push(event);
        }
    }
}

impl<'a> IntoIterator for &'a CurveIntersections {
    type Item = &'a IntersectionEvent;
    type IntoIter = std::slice::Iter<'a, IntersectionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Intersect a curve with itself.
///
/// The shared vertex of consecutive segments (and the closing vertex of a
/// closed curve) is not an intersection. Consecutive segments that fold back
/// over each other are reported as overlaps.
pub fn curve_self_intersections(curve: &Curve, tolerance: f64) -> CurveIntersections {
    polyline_self_intersections(&curve.to_polyline(tolerance), tolerance)
}

/// Segment indices refer to the polyline after vertices within `tolerance`
/// of their predecessor have been merged.
pub fn polyline_self_intersections(polyline: &Polyline, tolerance: f64) -> CurveIntersections {
    let mut result = CurveIntersections::default();
    let mut compacted = polyline.clone();
    compacted.remove_duplicate_points(tolerance);
    let pts = &compacted.points;
    let n = compacted.segment_count();
    if n < 2 {
        return result;
    }
    let closed = compacted.is_closed();
    let adjacent = |i: usize, j: usize| j == i + 1 || (closed && i == 0 && j == n - 1);

    for i in 0..n {
        for j in (i + 1)..n {
            let (a0, a1) = (pts[i], pts[i + 1]);
            let (b0, b1) = (pts[j], pts[j + 1]);
            match segment_segment(&a0, &a1, &b0, &b1, tolerance) {
                Some(SegmentHit::Overlap(start, end)) => {
                    result.push_unique(
                        IntersectionEvent::Overlap {
                            start,
                            end,
                            segments: (i, j),
                        },
                        tolerance,
                    );
                }
                Some(SegmentHit::Point(point)) if !adjacent(i, j) => {
                    result.push_unique(
                        IntersectionEvent::Point {
                            point,
                            segments: (i, j),
                        },
                        tolerance,
                    );
                }
                _ => {}
            }
        }
    }
    if !result.is_empty() {
        log::debug!("curve has {} self-intersection events", result.len());
    }
    result
}

enum SegmentHit {
    Point(Point3<f64>),
    Overlap(Point3<f64>, Point3<f64>),
}

fn segment_segment(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    q0: &Point3<f64>,
    q1: &Point3<f64>,
    tolerance: f64,
) -> Option<SegmentHit> {
    let d1 = p1 - p0;
    let d2 = q1 - q0;
    let len1 = d1.norm_squared();
    let len2 = d2.norm_squared();
    if len1 <= f64::EPSILON || len2 <= f64::EPSILON {
        return None;
    }

    if d1.cross(&d2).norm_squared() <= PARALLEL_EPS * len1 * len2 {
        return collinear_overlap(p0, p1, q0, q1, tolerance);
    }

    // Closest points between the two segments (Ericson, RTCD 5.1.9)
    let r = p0 - q0;
    let a = len1;
    let e = len2;
    let f = d2.dot(&r);
    let c = d1.dot(&r);
    let b = d1.dot(&d2);
    let denom = a * e - b * b;
    let mut s = if denom > 0.0 {
        ((b * f - c * e) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut t = (b * s + f) / e;
    if t < 0.0 {
        t = 0.0;
        s = (-c / a).clamp(0.0, 1.0);
    } else if t > 1.0 {
        t = 1.0;
        s = ((b - c) / a).clamp(0.0, 1.0);
    }
    let c1 = p0 + d1 * s;
    let c2 = q0 + d2 * t;
    if (c1 - c2).norm() <= tolerance {
        Some(SegmentHit::Point(nalgebra::center(&c1, &c2)))
    } else {
        None
    }
}

fn collinear_overlap(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    q0: &Point3<f64>,
    q1: &Point3<f64>,
    tolerance: f64,
) -> Option<SegmentHit> {
    let dir = p1 - p0;
    let len = dir.norm();
    let unit = dir / len;
    // Distance from q0 to the supporting line of p
    let offset = q0 - p0;
    if (offset - unit * offset.dot(&unit)).norm() > tolerance {
        return None;
    }
    let tq0 = (q0 - p0).dot(&unit);
    let tq1 = (q1 - p0).dot(&unit);
    let lo = tq0.min(tq1).max(0.0);
    let hi = tq0.max(tq1).min(len);
    if hi < lo - tolerance {
        return None;
    }
    if hi - lo <= tolerance {
        let mid = (lo + hi) * 0.5;
        return Some(SegmentHit::Point(p0 + unit * mid));
    }
    Some(SegmentHit::Overlap(p0 + unit * lo, p0 + unit * hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(points: &[(f64, f64)]) -> Curve {
        Curve::from(Polyline::new(
            points.iter().map(|&(x, y)| Point3::new(x, y, 0.0)).collect(),
        ))
    }

    #[test]
    fn test_simple_square_has_no_intersections() {
        let square = pl(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert!(curve_self_intersections(&square, 1e-6).is_empty());
    }

    #[test]
    fn test_bowtie_crosses_once() {
        let bowtie = pl(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0), (0.0, 0.0)]);
        let hits = curve_self_intersections(&bowtie, 1e-6);
        assert_eq!(hits.len(), 1);
        let loc = hits.events[0].location();
        assert!((loc - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn test_fold_back_is_overlap() {
        let folded = pl(&[(0.0, 0.0), (4.0, 0.0), (2.0, 0.0)]);
        let hits = curve_self_intersections(&folded, 1e-6);
        assert_eq!(hits.len(), 1);
        assert!(hits.events[0].is_overlap());
    }

    #[test]
    fn test_repeated_vertex_is_not_an_intersection() {
        let square = pl(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert!(curve_self_intersections(&square, 1e-6).is_empty());
    }

    #[test]
    fn test_spur_within_tolerance_is_ignored() {
        let square = pl(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0005),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        assert!(curve_self_intersections(&square, 1e-3).is_empty());
    }

    #[test]
    fn test_skew_segments_in_3d_do_not_touch() {
        let curve = Curve::from(Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
        ]));
        assert!(curve_self_intersections(&curve, 1e-6).is_empty());
    }
}
