// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Planar patch reconstruction from polygons and rings
//!
//! The planar builder may return several candidate patches for one boundary
//! set, for example when a hole ring is degenerate or lies outside the
//! exterior. The candidate with the largest area is kept.

use super::curve::linear_ring_to_polyline;
use crate::error::{Error, Result};
use crate::geometry::{create_planar_breps, Brep, Curve};
use crate::gis::{LinearRing, Polygon};

/// Rebuild a patch from an exterior ring and its holes
pub fn polygon_to_brep(polygon: &Polygon, tolerance: f64) -> Result<Brep> {
    let curves: Vec<Curve> = std::iter::once(polygon.exterior_ring())
        .chain(polygon.interior_rings())
        .map(|ring| Curve::Polyline(linear_ring_to_polyline(ring)))
        .collect();
    largest_patch(&curves, tolerance)
}

/// Rebuild a patch bounded by a single ring
pub fn ring_to_brep(ring: &LinearRing, tolerance: f64) -> Result<Brep> {
    largest_patch(&[Curve::Polyline(linear_ring_to_polyline(ring))], tolerance)
}

fn largest_patch(curves: &[Curve], tolerance: f64) -> Result<Brep> {
    let candidates = create_planar_breps(curves, tolerance);
    let count = candidates.len();

    let (area, brep) = candidates
        .into_iter()
        .map(|b| (b.area(tolerance), b))
        .max_by(|(a, _), (b, _)| a.total_cmp(b))
        .ok_or_else(|| {
            Error::PatchGenerationFailed(format!(
                "no planar patch from {} boundary curves",
                curves.len()
            ))
        })?;

    if count > 1 {
        log::warn!(
            "{} planar patch candidates; kept the largest (area {:.6}), discarded {}",
            count,
            area,
            count - 1
        );
    } else {
        log::debug!("planar patch rebuilt with area {:.6}", area);
    }
    Ok(brep)
}
