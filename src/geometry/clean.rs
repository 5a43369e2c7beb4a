// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Brep cleanup: capping, coplanar merging, repair and compaction

use super::planar::{self, create_planar_breps, local_extents, surface_around};
use super::{Brep, BrepFace, BrepLoop, Curve, CurveOrientation, LoopType, Polyline};
use crate::error::{Error, Result};
use geo::{BooleanOps, MultiPolygon};
use nalgebra::Point3;
use std::panic::AssertUnwindSafe;

/// Best-effort cleanup of a brep.
///
/// Works on a copy: optionally caps planar holes and merges coplanar faces,
/// then shrinks faces, repairs, standardizes and compacts. Returns `None`
/// when any step fails or the result is not valid; the input is never
/// modified.
pub fn clean_brep(brep: &Brep, cap_holes: bool, merge_faces: bool, tolerance: f64) -> Option<Brep> {
    match try_clean(brep, cap_holes, merge_faces, tolerance) {
        Ok(cleaned) => Some(cleaned),
        Err(e) => {
            log::warn!("brep cleanup abandoned: {}", e);
            None
        }
    }
}

fn try_clean(brep: &Brep, cap_holes: bool, merge_faces: bool, tolerance: f64) -> Result<Brep> {
    let mut duplicate = brep.clone();
    // Degenerate faces are dropped before any boolean work sees them
    repair(&mut duplicate, tolerance);
    compact(&mut duplicate, tolerance);
    if cap_holes {
        duplicate = cap_planar_holes(&duplicate, tolerance)?;
    }
    if merge_faces {
        merge_coplanar_faces(&mut duplicate, tolerance)?;
    }
    shrink_faces(&mut duplicate, tolerance);
    repair(&mut duplicate, tolerance);
    standardize(&mut duplicate, tolerance);
    compact(&mut duplicate, tolerance);

    if !duplicate.is_valid(tolerance) {
        return Err(Error::InvalidGeometry(
            "brep cleaning resulted in an invalid brep".into(),
        ));
    }
    Ok(duplicate)
}

/// Boundary segment with its owning face and loop
#[derive(Debug, Clone, Copy)]
struct Edge {
    a: Point3<f64>,
    b: Point3<f64>,
    face: usize,
    lp: usize,
}

impl Edge {
    fn matches(&self, other: &Edge, tolerance: f64) -> bool {
        let near = |p: &Point3<f64>, q: &Point3<f64>| (p - q).norm() <= tolerance;
        let same = near(&self.a, &other.a) && near(&self.b, &other.b);
        let flipped = near(&self.a, &other.b) && near(&self.b, &other.a);
        same || flipped
    }
}

fn collect_edges(brep: &Brep, tolerance: f64) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (face, f) in brep.faces.iter().enumerate() {
        for (lp, l) in f.loops.iter().enumerate() {
            let pl = l.curve.to_polyline(tolerance);
            edges.extend(pl.segments().map(|(a, b)| Edge { a: *a, b: *b, face, lp }));
        }
    }
    edges
}

/// Edges not shared with any other face
fn naked_edges(brep: &Brep, tolerance: f64) -> Vec<Edge> {
    let edges = collect_edges(brep, tolerance);
    edges
        .iter()
        .filter(|e| {
            !edges
                .iter()
                .any(|o| o.face != e.face && o.matches(e, tolerance))
        })
        .copied()
        .collect()
}

/// Chain naked edges into closed loops. Open chains are dropped.
fn chain_loops(mut edges: Vec<Edge>, tolerance: f64) -> Vec<Vec<Edge>> {
    let mut loops = Vec::new();
    while let Some(seed) = edges.pop() {
        let mut chain = vec![seed];
        loop {
            let end = chain[chain.len() - 1].b;
            if (end - chain[0].a).norm() <= tolerance {
                loops.push(chain);
                break;
            }
            let next = edges.iter().position(|e| (e.a - end).norm() <= tolerance);
            let next = next.map(|i| edges.swap_remove(i)).or_else(|| {
                edges
                    .iter()
                    .position(|e| (e.b - end).norm() <= tolerance)
                    .map(|i| {
                        let e = edges.swap_remove(i);
                        Edge { a: e.b, b: e.a, ..e }
                    })
            });
            match next {
                Some(edge) => chain.push(edge),
                None => {
                    log::trace!("open naked chain of {} edges dropped", chain.len());
                    break;
                }
            }
        }
    }
    loops
}

/// Cap every closed planar loop of naked edges with a new face.
///
/// A naked loop that is simply the whole boundary of a single loop of one
/// face (an isolated face) is not a hole and is left alone. Fails when a
/// naked loop is not planar.
pub fn cap_planar_holes(brep: &Brep, tolerance: f64) -> Result<Brep> {
    let mut capped = brep.clone();
    for chain in chain_loops(naked_edges(brep, tolerance), tolerance) {
        let (face, lp) = (chain[0].face, chain[0].lp);
        if chain.iter().all(|e| e.face == face && e.lp == lp) {
            continue;
        }
        let mut points: Vec<Point3<f64>> = chain.iter().map(|e| e.a).collect();
        points.push(chain[0].a);
        let cap = create_planar_breps(&[Curve::from(Polyline::new(points))], tolerance);
        if cap.is_empty() {
            return Err(Error::PatchGenerationFailed(format!(
                "naked loop of {} edges is not planar",
                chain.len()
            )));
        }
        log::debug!("capped a hole bounded by {} naked edges", chain.len());
        capped.faces.extend(cap.into_iter().flat_map(|b| b.faces));
    }
    Ok(capped)
}

/// Merge faces that share a supporting plane and overlap or touch.
/// Returns true when any faces were merged. Fails if the polygon union
/// cannot be computed for the given loops.
pub fn merge_coplanar_faces(brep: &mut Brep, tolerance: f64) -> Result<bool> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, face) in brep.faces.iter().enumerate() {
        let plane = face.plane();
        match groups.iter_mut().find(|g| {
            let other = brep.faces[g[0]].plane();
            other.is_coplanar(plane, tolerance) && other.normal().dot(&plane.normal()) > 0.0
        }) {
            Some(g) => g.push(i),
            None => groups.push(vec![i]),
        }
    }

    let mut merged_any = false;
    let mut faces = Vec::with_capacity(brep.faces.len());
    for group in groups {
        if group.len() == 1 {
            faces.push(brep.faces[group[0]].clone());
            continue;
        }
        let plane = *brep.faces[group[0]].plane();
        let mut union = MultiPolygon::new(Vec::new());
        for &i in &group {
            let face = &brep.faces[i];
            let Some(outer) = face.outer_loop() else {
                continue;
            };
            let holes: Vec<Polyline> = face
                .inner_loops()
                .map(|l| l.curve.to_polyline(tolerance))
                .collect();
            let boundary = outer.curve.to_polyline(tolerance);
            let polygon = planar::to_geo_polygon(&plane, &boundary, &holes);
            union = std::panic::catch_unwind(AssertUnwindSafe(|| union.union(&polygon)))
                .map_err(|_| {
                    let count = group.len();
                    Error::InvalidGeometry(format!("union of {} coplanar faces failed", count))
                })?;
        }
        if union.0.len() >= group.len() {
            faces.extend(group.iter().map(|&i| brep.faces[i].clone()));
            continue;
        }
        log::debug!("merged {} coplanar faces into {}", group.len(), union.0.len());
        merged_any = true;
        for polygon in &union.0 {
            let outer = planar::lift(&plane, polygon.exterior());
            let mut loops = vec![BrepLoop::outer(outer.clone())];
            loops.extend(
                polygon
                    .interiors()
                    .iter()
                    .map(|ring| BrepLoop::inner(planar::lift(&plane, ring))),
            );
            faces.push(BrepFace {
                surface: surface_around(&plane, &outer),
                loops,
            });
        }
    }
    brep.faces = faces;
    if merged_any {
        standardize(brep, tolerance);
    }
    Ok(merged_any)
}

/// Shrink each face's untrimmed surface to the extents of its outer loop
pub fn shrink_faces(brep: &mut Brep, tolerance: f64) {
    for face in &mut brep.faces {
        let Some(outer) = face.outer_loop() else {
            continue;
        };
        let (u, v) = local_extents(face.plane(), &outer.curve.to_polyline(tolerance));
        face.surface.u = u;
        face.surface.v = v;
    }
}

/// Remove duplicate vertices, snap nearly closed loops shut and drop loops
/// that collapse. Returns true if anything changed.
pub fn repair(brep: &mut Brep, tolerance: f64) -> bool {
    let mut changed = false;
    for face in &mut brep.faces {
        let before = face.loops.len();
        face.loops.retain_mut(|l| {
            let Curve::Polyline(pl) = &mut l.curve else {
                return true;
            };
            if pl.remove_duplicate_points(tolerance) > 0 {
                changed = true;
            }
            if !pl.is_closed() && pl.close_within(tolerance) {
                changed = true;
            }
            pl.is_closed() && pl.len() >= 4 && pl.area() > tolerance * tolerance
        });
        if face.loops.len() != before {
            log::debug!("repair dropped {} degenerate loops", before - face.loops.len());
            changed = true;
        }
    }
    changed
}

/// Outer loop first and counter-clockwise about the face normal; inner
/// loops clockwise
pub fn standardize(brep: &mut Brep, tolerance: f64) {
    for face in &mut brep.faces {
        let normal = face.plane().normal();
        face.loops.sort_by_key(|l| match l.loop_type {
            LoopType::Outer => 0,
            LoopType::Inner => 1,
        });
        for l in &mut face.loops {
            let wanted = match l.loop_type {
                LoopType::Outer => CurveOrientation::CounterClockwise,
                LoopType::Inner => CurveOrientation::Clockwise,
            };
            let actual = l.curve.closed_orientation(&normal);
            if actual != CurveOrientation::Undefined && actual != wanted {
                l.curve.reverse();
            }
        }
        log::trace!("standardized face with {} loops at tolerance {}", face.loops.len(), tolerance);
    }
}

/// Drop faces without an outer loop or without area.
/// Returns the number of faces removed.
pub fn compact(brep: &mut Brep, tolerance: f64) -> usize {
    let before = brep.faces.len();
    brep.faces.retain(|f| {
        f.plane().is_valid()
            && f.outer_loop().is_some()
            && f.area(tolerance) > tolerance * tolerance
    });
    before - brep.faces.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Plane, PlaneSurface};
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polyline {
        Polyline::new(vec![
            Point3::new(x0, y0, 0.0),
            Point3::new(x1, y0, 0.0),
            Point3::new(x1, y1, 0.0),
            Point3::new(x0, y1, 0.0),
            Point3::new(x0, y0, 0.0),
        ])
    }

    fn flat_face(outer: Polyline) -> BrepFace {
        BrepFace {
            surface: PlaneSurface {
                plane: Plane::world_xy(),
                u: [-100.0, 100.0],
                v: [-100.0, 100.0],
            },
            loops: vec![BrepLoop::outer(outer)],
        }
    }

    /// Unit cube without its top face
    fn open_box() -> Brep {
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        let quads = [
            [p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)],
            [p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
            [p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
            [p(1., 1., 0.), p(0., 1., 0.), p(0., 1., 1.), p(1., 1., 1.)],
            [p(0., 1., 0.), p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.)],
        ];
        let curves: Vec<Curve> = quads
            .iter()
            .map(|q| {
                let mut pts = q.to_vec();
                pts.push(q[0]);
                Curve::from(Polyline::new(pts))
            })
            .collect();
        Brep::new(
            create_planar_breps(&curves, 1e-6)
                .into_iter()
                .flat_map(|b| b.faces)
                .collect(),
        )
    }

    #[test]
    fn test_cap_open_box() {
        let brep = open_box();
        assert_eq!(brep.face_count(), 5);
        let capped = cap_planar_holes(&brep, 1e-6).unwrap();
        assert_eq!(capped.face_count(), 6);
        assert_relative_eq!(capped.area(1e-6), 6.0, epsilon = 1e-9);
        assert!(naked_edges(&capped, 1e-6).is_empty());
    }

    #[test]
    fn test_cap_leaves_isolated_face_alone() {
        let brep = Brep::new(vec![flat_face(rect(0.0, 0.0, 1.0, 1.0))]);
        let capped = cap_planar_holes(&brep, 1e-6).unwrap();
        assert_eq!(capped.face_count(), 1);
    }

    #[test]
    fn test_merge_adjacent_coplanar_faces() {
        let mut brep = Brep::new(vec![
            flat_face(rect(0.0, 0.0, 1.0, 1.0)),
            flat_face(rect(1.0, 0.0, 2.0, 1.0)),
        ]);
        assert!(merge_coplanar_faces(&mut brep, 1e-6).unwrap());
        assert_eq!(brep.face_count(), 1);
        assert_relative_eq!(brep.area(1e-6), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_merge_keeps_disjoint_faces() {
        let mut brep = Brep::new(vec![
            flat_face(rect(0.0, 0.0, 1.0, 1.0)),
            flat_face(rect(5.0, 5.0, 6.0, 6.0)),
        ]);
        assert!(!merge_coplanar_faces(&mut brep, 1e-6).unwrap());
        assert_eq!(brep.face_count(), 2);
    }

    #[test]
    fn test_shrink_faces() {
        let mut brep = Brep::new(vec![flat_face(rect(0.0, 0.0, 2.0, 3.0))]);
        shrink_faces(&mut brep, 1e-6);
        assert_eq!(brep.faces[0].surface.u, [0.0, 2.0]);
        assert_eq!(brep.faces[0].surface.v, [0.0, 3.0]);
    }

    #[test]
    fn test_repair_and_compact_drop_degenerate_face() {
        let sliver = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1e-9, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        let mut brep = Brep::new(vec![flat_face(rect(0.0, 0.0, 1.0, 1.0)), flat_face(sliver)]);
        assert!(repair(&mut brep, 1e-6));
        assert_eq!(compact(&mut brep, 1e-6), 1);
        assert_eq!(brep.face_count(), 1);
    }

    #[test]
    fn test_standardize_orients_loops() {
        let mut outer = rect(0.0, 0.0, 10.0, 10.0);
        outer.reverse();
        let mut face = flat_face(outer);
        face.loops.insert(0, BrepLoop::inner(rect(2.0, 2.0, 4.0, 4.0)));
        let mut brep = Brep::new(vec![face]);
        standardize(&mut brep, 1e-6);
        let face = &brep.faces[0];
        assert_eq!(face.loops[0].loop_type, LoopType::Outer);
        let n = face.plane().normal();
        assert_eq!(face.loops[0].curve.closed_orientation(&n), CurveOrientation::CounterClockwise);
        assert_eq!(face.loops[1].curve.closed_orientation(&n), CurveOrientation::Clockwise);
    }

    #[test]
    fn test_clean_returns_copy() {
        let brep = Brep::new(vec![flat_face(rect(0.0, 0.0, 1.0, 1.0))]);
        let cleaned = clean_brep(&brep, true, true, 1e-6).unwrap();
        assert_eq!(brep.faces[0].surface.u, [-100.0, 100.0]);
        assert_eq!(cleaned.faces[0].surface.u, [0.0, 1.0]);
    }

    #[test]
    fn test_clean_drops_vanishing_face_before_merging() {
        let s = 1e-300;
        let triangle = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        let brep = Brep::new(vec![flat_face(rect(0.0, 0.0, s, s)), flat_face(triangle)]);
        let cleaned = std::panic::catch_unwind(|| clean_brep(&brep, true, true, 1e-3))
            .expect("cleanup must not panic")
            .unwrap();
        assert_eq!(cleaned.face_count(), 1);
        assert_relative_eq!(cleaned.area(1e-3), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_clean_invalid_brep_is_none() {
        assert!(clean_brep(&Brep::default(), false, false, 1e-6).is_none());
    }
}
