// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar patch construction from closed boundary curves
//!
//! Curves are grouped by supporting plane, projected into that plane and
//! nested by containment. A curve enclosed by an even number of other curves
//! starts a new face; a curve enclosed by an odd number becomes a hole of its
//! innermost container. Each face is returned as its own single-face [`Brep`].

use super::{Brep, BrepFace, BrepLoop, Curve, CurveOrientation, Plane, PlaneSurface, Polyline};
use geo::{Area, Contains, Coord, LineString, Polygon};
use nalgebra::{Point3, Vector3};

/// Margin added around the trimming boundary when sizing the untrimmed surface
const SURFACE_MARGIN: f64 = 0.1;

/// A closed planar boundary ready for nesting
#[derive(Debug, Clone)]
struct PlanarRing {
    index: usize,
    polyline: Polyline,
    plane: Plane,
}

/// Build planar faces from a set of closed curves.
///
/// Open, degenerate or non-planar curves (at `tolerance`) are skipped. An
/// empty result means no usable boundary was found.
pub fn create_planar_breps(curves: &[Curve], tolerance: f64) -> Vec<Brep> {
    let rings: Vec<PlanarRing> = curves
        .iter()
        .enumerate()
        .filter_map(|(index, curve)| {
            let ring = prepare_ring(index, curve, tolerance);
            if ring.is_none() {
                log::warn!("boundary curve {} skipped: open, degenerate or not planar", index);
            }
            ring
        })
        .collect();

    let mut groups: Vec<Vec<PlanarRing>> = Vec::new();
    for ring in rings {
        match groups
            .iter_mut()
            .find(|g| g[0].plane.is_coplanar(&ring.plane, tolerance))
        {
            Some(group) => group.push(ring),
            None => groups.push(vec![ring]),
        }
    }

    let mut faces: Vec<(usize, BrepFace)> = groups
        .iter()
        .flat_map(|group| nest_group(group))
        .collect();
    faces.sort_by_key(|(index, _)| *index);

    log::debug!(
        "planar patch builder: {} curves -> {} faces",
        curves.len(),
        faces.len()
    );
    faces
        .into_iter()
        .map(|(_, face)| Brep::new(vec![face]))
        .collect()
}

fn prepare_ring(index: usize, curve: &Curve, tolerance: f64) -> Option<PlanarRing> {
    let mut polyline = curve.to_polyline(tolerance);
    polyline.remove_duplicate_points(tolerance);
    if !polyline.close_within(tolerance) || polyline.len() < 4 {
        return None;
    }
    if polyline.area() <= tolerance * tolerance {
        return None;
    }
    if polyline.planarity_deviation()? > tolerance {
        return None;
    }
    let normal = canonical_normal(polyline.area_normal())?;
    let plane = Plane::from_normal(polyline.centroid(), normal);
    Some(PlanarRing {
        index,
        polyline,
        plane,
    })
}

/// Unit normal flipped to point toward +Z, then +Y, then +X
pub(crate) fn canonical_normal(normal: Vector3<f64>) -> Option<Vector3<f64>> {
    const EPS: f64 = 1e-12;
    let len = normal.norm();
    if len < EPS {
        return None;
    }
    let n = normal / len;
    let flip = if n.z.abs() > EPS {
        n.z < 0.0
    } else if n.y.abs() > EPS {
        n.y < 0.0
    } else {
        n.x < 0.0
    };
    Some(if flip { -n } else { n })
}

fn nest_group(group: &[PlanarRing]) -> Vec<(usize, BrepFace)> {
    let reference = group[0].plane;
    let polygons: Vec<Polygon<f64>> = group
        .iter()
        .map(|r| Polygon::new(project(&reference, &r.polyline), vec![]))
        .collect();
    let areas: Vec<f64> = polygons.iter().map(|p| p.unsigned_area()).collect();

    // containers[i] = rings strictly enclosing ring i
    let containers: Vec<Vec<usize>> = (0..group.len())
        .map(|i| {
            (0..group.len())
                .filter(|&j| j != i && areas[j] > areas[i])
                .filter(|&j| polygons[j].contains(polygons[i].exterior()))
                .collect()
        })
        .collect();

    let parent = |i: usize| {
        containers[i]
            .iter()
            .copied()
            .min_by(|&a, &b| areas[a].total_cmp(&areas[b]))
    };

    let mut faces = Vec::new();
    for (i, ring) in group.iter().enumerate() {
        if containers[i].len() % 2 == 1 {
            continue;
        }
        let normal = ring.plane.normal();
        let mut outer = ring.polyline.clone();
        if outer.orientation(&normal) == CurveOrientation::Clockwise {
            outer.reverse();
        }
        let mut loops = vec![BrepLoop::outer(outer.clone())];
        for (k, hole) in group.iter().enumerate() {
            if containers[k].len() % 2 == 1 && parent(k) == Some(i) {
                let mut pl = hole.polyline.clone();
                if pl.orientation(&normal) == CurveOrientation::CounterClockwise {
                    pl.reverse();
                }
                log::trace!("ring {} nested as hole of ring {}", hole.index, ring.index);
                loops.push(BrepLoop::inner(pl));
            }
        }
        let surface = surface_around(&ring.plane, &outer);
        faces.push((ring.index, BrepFace { surface, loops }));
    }
    faces
}

/// Plane surface covering the outer boundary plus a margin
pub(crate) fn surface_around(plane: &Plane, outer: &Polyline) -> PlaneSurface {
    let (u, v) = local_extents(plane, outer);
    let du = (u[1] - u[0]) * SURFACE_MARGIN;
    let dv = (v[1] - v[0]) * SURFACE_MARGIN;
    PlaneSurface {
        plane: *plane,
        u: [u[0] - du, u[1] + du],
        v: [v[0] - dv, v[1] + dv],
    }
}

/// Bounding interval of a polyline in plane coordinates
pub(crate) fn local_extents(plane: &Plane, polyline: &Polyline) -> ([f64; 2], [f64; 2]) {
    let mut u = [f64::INFINITY, f64::NEG_INFINITY];
    let mut v = [f64::INFINITY, f64::NEG_INFINITY];
    for p in polyline {
        let local = plane.to_local(p);
        u = [u[0].min(local.x), u[1].max(local.x)];
        v = [v[0].min(local.y), v[1].max(local.y)];
    }
    (u, v)
}

/// Project a polyline into the 2D coordinates of `plane`
pub(crate) fn project(plane: &Plane, polyline: &Polyline) -> LineString<f64> {
    polyline
        .iter()
        .map(|p| {
            let local = plane.to_local(p);
            Coord {
                x: local.x,
                y: local.y,
            }
        })
        .collect()
}

/// Lift 2D plane coordinates back into world space
pub(crate) fn lift(plane: &Plane, ring: &LineString<f64>) -> Polyline {
    ring.coords()
        .map(|c| plane.to_world(&Point3::new(c.x, c.y, 0.0)))
        .collect()
}

pub(crate) fn to_geo_polygon(plane: &Plane, outer: &Polyline, holes: &[Polyline]) -> Polygon<f64> {
    Polygon::new(
        project(plane, outer),
        holes.iter().map(|h| project(plane, h)).collect(),
    )
}

/// Area of an outer boundary minus its holes, measured in `plane`
pub fn trimmed_area(plane: &Plane, outer: &Polyline, holes: &[Polyline]) -> f64 {
    to_geo_polygon(plane, outer, holes).unsigned_area()
}

/// True when `inner` lies inside `outer` (touching the boundary is allowed)
pub fn ring_contains(plane: &Plane, outer: &Polyline, inner: &Polyline) -> bool {
    Polygon::new(project(plane, outer), vec![]).contains(&project(plane, inner))
}
