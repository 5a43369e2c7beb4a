// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Loop extraction from boundary patches

use super::curve::polyline_to_linear_ring;
use crate::error::{Error, Result};
use crate::geometry::{Brep, BrepLoop, LoopType, Polyline};
use crate::gis::Polygon;
use crate::projection::ProjectionSystem;

/// The loop's 3D curve as a polyline; curved loops are rejected
pub fn extract_polyline(brep_loop: &BrepLoop) -> Result<Polyline> {
    brep_loop.to_3d_curve().try_get_polyline().ok_or_else(|| {
        Error::UnsupportedGeometry(format!(
            "{:?} loop curve is not a polyline",
            brep_loop.loop_type
        ))
    })
}

/// The first outer loop of the patch
pub fn extract_outer_loop(brep: &Brep) -> Result<Polyline> {
    let outer = brep
        .loops()
        .find(|l| l.loop_type == LoopType::Outer)
        .ok_or_else(|| Error::InvalidGeometry("boundary patch has no outer loop".into()))?;
    extract_polyline(outer)
}

/// Every inner loop of the patch, in loop order; empty when there are no holes
pub fn extract_hole_loops(brep: &Brep) -> Result<Vec<Polyline>> {
    brep.loops()
        .filter(|l| l.loop_type == LoopType::Inner)
        .map(extract_polyline)
        .collect()
}

/// Polygon with the outer loop as exterior ring and the holes as interiors
pub fn brep_to_polygon(brep: &Brep, proj: &ProjectionSystem) -> Result<Polygon> {
    let exterior = polyline_to_linear_ring(&extract_outer_loop(brep)?, proj)?;
    let interiors = extract_hole_loops(brep)?
        .iter()
        .map(|hole| polyline_to_linear_ring(hole, proj))
        .collect::<Result<Vec<_>>>()?;
    log::trace!(
        "brep -> polygon: {} exterior points, {} holes",
        exterior.num_points(),
        interiors.len()
    );
    Ok(proj.factory().create_polygon(exterior, interiors))
}
