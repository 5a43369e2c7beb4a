// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary representation built from planar trimmed faces

use super::{planar, BoundingBox, Curve, Plane, Polyline, Transform};
use serde::{Deserialize, Serialize};

/// Role of a trimming loop within its face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopType {
    Outer,
    Inner,
}

/// A closed trimming loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrepLoop {
    pub loop_type: LoopType,
    pub curve: Curve,
}

impl BrepLoop {
    pub fn outer(curve: impl Into<Curve>) -> Self {
        Self {
            loop_type: LoopType::Outer,
            curve: curve.into(),
        }
    }

    pub fn inner(curve: impl Into<Curve>) -> Self {
        Self {
            loop_type: LoopType::Inner,
            curve: curve.into(),
        }
    }

    /// The 3D curve traced by this loop
    pub fn to_3d_curve(&self) -> &Curve {
        &self.curve
    }
}

/// Rectangular patch of a plane, in plane coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneSurface {
    pub plane: Plane,
    pub u: [f64; 2],
    pub v: [f64; 2],
}

impl PlaneSurface {
    pub fn area(&self) -> f64 {
        (self.u[1] - self.u[0]) * (self.v[1] - self.v[0])
    }
}

/// Planar face: a plane surface trimmed by one outer loop and any number of
/// inner loops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrepFace {
    pub surface: PlaneSurface,
    pub loops: Vec<BrepLoop>,
}

impl BrepFace {
    pub fn plane(&self) -> &Plane {
        &self.surface.plane
    }

    pub fn outer_loop(&self) -> Option<&BrepLoop> {
        self.loops.iter().find(|l| l.loop_type == LoopType::Outer)
    }

    pub fn inner_loops(&self) -> impl Iterator<Item = &BrepLoop> + '_ {
        self.loops.iter().filter(|l| l.loop_type == LoopType::Inner)
    }

    /// Trimmed area: outer loop area minus hole areas
    pub fn area(&self, tolerance: f64) -> f64 {
        let Some(outer) = self.outer_loop() else {
            return 0.0;
        };
        let holes: Vec<Polyline> = self
            .inner_loops()
            .map(|l| l.curve.to_polyline(tolerance))
            .collect();
        planar::trimmed_area(self.plane(), &outer.curve.to_polyline(tolerance), &holes)
    }

    pub fn transform(&mut self, xform: &Transform) {
        let plane = &self.surface.plane;
        let origin = xform.apply_point(&plane.origin);
        let x = xform.apply_vector(&plane.x_axis);
        let y = xform.apply_vector(&plane.y_axis);
        let scale = x.norm();
        self.surface.plane = Plane::new(origin, x, y);
        for bound in self.surface.u.iter_mut().chain(self.surface.v.iter_mut()) {
            *bound *= scale;
        }
        for l in &mut self.loops {
            l.curve.transform(xform);
        }
    }
}

/// A collection of planar faces
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Brep {
    pub faces: Vec<BrepFace>,
}

impl Brep {
    pub fn new(faces: Vec<BrepFace>) -> Self {
        Self { faces }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Every loop of every face, in face order
    pub fn loops(&self) -> impl Iterator<Item = &BrepLoop> + '_ {
        self.faces.iter().flat_map(|f| f.loops.iter())
    }

    pub fn area(&self, tolerance: f64) -> f64 {
        self.faces.iter().map(|f| f.area(tolerance)).sum()
    }

    pub fn transform(&mut self, xform: &Transform) {
        for face in &mut self.faces {
            face.transform(xform);
        }
    }

    pub fn bounding_box(&self, tolerance: f64) -> BoundingBox {
        self.loops()
            .map(|l| l.curve.to_polyline(tolerance).bounding_box())
            .fold(BoundingBox::empty(), |acc, b| acc.union(&b))
    }

    /// Structural validity check:
    /// - at least one face
    /// - exactly one outer loop per face
    /// - every loop closed, on the face plane, and enclosing non-zero area
    /// - every inner loop inside the outer loop
    pub fn is_valid(&self, tolerance: f64) -> bool {
        !self.faces.is_empty() && self.faces.iter().all(|f| face_is_valid(f, tolerance))
    }
}

fn face_is_valid(face: &BrepFace, tolerance: f64) -> bool {
    let plane = face.plane();
    if !plane.is_valid() {
        return false;
    }
    let outer_count = face
        .loops
        .iter()
        .filter(|l| l.loop_type == LoopType::Outer)
        .count();
    if outer_count != 1 {
        return false;
    }
    let mut outer = None;
    let mut holes = Vec::new();
    for l in &face.loops {
        let pl = l.curve.to_polyline(tolerance);
        let on_plane = pl.iter().all(|p| plane.distance_to(p).abs() <= tolerance);
        if !pl.is_closed() || pl.len() < 4 || !on_plane || pl.area() <= tolerance * tolerance {
            log::trace!("face loop rejected: closed={} on_plane={}", pl.is_closed(), on_plane);
            return false;
        }
        match l.loop_type {
            LoopType::Outer => outer = Some(pl),
            LoopType::Inner => holes.push(pl),
        }
    }
    match outer {
        Some(outer) => holes
            .iter()
            .all(|hole| planar::ring_contains(plane, &outer, hole)),
        None => false,
    }
}
